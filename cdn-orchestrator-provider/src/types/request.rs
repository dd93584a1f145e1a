//! 统一请求/响应类型

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::OriginServer;
use super::enums::{
    AccessMetric, AreaCode, ChannelType, DataInterval, DomainStatus, HttpProtocol, IpProtocol,
    IspCode, OriginMetric, OriginPriority, OriginProtocol, ProductType, PurgePathMode, PurgeType,
    TaskStatus, TopFilter,
};

// ============ 域名 ============

/// 创建域名请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDomainRequest {
    pub domain: String,
    pub area_code: AreaCode,
    pub channel_type: ChannelType,
    /// 回源协议（决定源站端口取 HTTP 还是 HTTPS）
    pub origin_protocol: OriginProtocol,
    /// 源站列表，不能为空
    pub sources: Vec<OriginServer>,
}

impl CreateDomainRequest {
    /// 主源站、备源站数量
    pub fn count_by_priority(&self) -> (usize, usize) {
        let primary = self
            .sources
            .iter()
            .filter(|s| s.priority == OriginPriority::Primary)
            .count();
        (primary, self.sources.len() - primary)
    }
}

/// 创建域名响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDomainResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
}

/// 域名详情
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainDetail {
    /// 厂商域名 ID，腾讯云等以域名本身为标识的厂商可能与 `domain` 相同
    pub domain_id: String,
    pub domain: String,
    /// 加速区域；厂商查询接口不返回区域时为 `None`
    pub area_code: Option<AreaCode>,
    pub channel_type: ChannelType,
    pub cname: String,
    pub status: DomainStatus,
    /// 创建时间（Unix 秒）
    pub create_time: i64,
    /// 修改时间（Unix 秒）
    pub update_time: i64,
}

/// 按状态列出域名
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainStatusListRequest {
    pub page: i64,
    pub limit: i64,
    pub status: DomainStatus,
}

// ============ 刷新 / 预热 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgePathRequest {
    pub paths: Vec<String>,
    pub mode: PurgePathMode,
    pub url_encode: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeUrlsRequest {
    pub urls: Vec<String>,
    pub url_encode: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushUrlsRequest {
    pub urls: Vec<String>,
    pub url_encode: bool,
}

/// 刷新/预热任务句柄
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

impl TaskHandle {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }
}

/// 任务状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub task_id: String,
    pub status: TaskStatus,
}

/// 刷新任务列表查询，时间为 Unix 秒
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeTaskListRequest {
    pub start_time: i64,
    pub end_time: i64,
    pub page: i64,
    pub limit: i64,
    pub purge_type: PurgeType,
    pub status: TaskStatus,
    /// IANA 时区名，缺省为 `Asia/Shanghai`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// 预热任务列表查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushTaskListRequest {
    pub start_time: i64,
    pub end_time: i64,
    pub page: i64,
    pub limit: i64,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

// ============ 归属权验证 ============

/// 域名归属权验证记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyRecord {
    /// TXT 记录值
    pub record: String,
    /// 文件验证地址
    pub file_verify_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyDomainRecordRequest {
    pub domain: String,
    /// `dns` 或 `file`
    pub verify_type: String,
}

// ============ 统计 ============

/// 时间序列中的一个点，`time` 为 Unix 秒
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatPoint {
    pub time: i64,
    pub value: f64,
}

impl StatPoint {
    pub const fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// `domain`（或状态码指标下的 `domain#code`）-> 按时间升序的数据点
pub type StatSeries = BTreeMap<String, Vec<StatPoint>>;

/// 访问数据查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessStatsRequest {
    pub domains: Vec<String>,
    pub metric: AccessMetric,
    pub start_time: i64,
    pub end_time: i64,
    pub interval: DataInterval,
    pub isp: Option<IspCode>,
    pub area: AreaCode,
    /// 0 按服务端区域，1 按客户端区域
    pub area_type: i64,
    /// 省份（`ProvinceCode`）或国家（`CountryCode`）编码，由 `area` 决定含义
    pub district: Option<i64>,
    pub protocol: Option<HttpProtocol>,
    pub ip_protocol: Option<IpProtocol>,
    pub product: ProductType,
    pub channel_type: ChannelType,
    pub time_zone: Option<String>,
}

/// 回源数据查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginStatsRequest {
    pub domains: Vec<String>,
    pub metric: OriginMetric,
    pub start_time: i64,
    pub end_time: i64,
    pub interval: DataInterval,
    pub area: AreaCode,
    pub channel_type: ChannelType,
    pub time_zone: Option<String>,
}

/// Top URL 查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopUrlRequest {
    pub filter: TopFilter,
    pub domain: String,
    pub start_time: i64,
    pub end_time: i64,
    pub product: ProductType,
    pub channel_type: ChannelType,
    pub area: AreaCode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopUrl {
    pub url: String,
    pub value: f64,
}

/// 访问数据汇总查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessTotalRequest {
    pub domains: Vec<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub area: AreaCode,
    pub product: ProductType,
    pub channel_type: ChannelType,
    pub metric: AccessMetric,
    pub time_zone: Option<String>,
}

/// 回源数据汇总查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginTotalRequest {
    pub domains: Vec<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub area: AreaCode,
    pub channel_type: ChannelType,
    pub metric: OriginMetric,
    pub time_zone: Option<String>,
}

/// 用户访问地区分布查询
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionDistributionRequest {
    pub domains: Vec<String>,
    pub start_time: i64,
    pub end_time: i64,
    /// 仅支持 `Flux` 与 `Request`
    pub metric: AccessMetric,
    pub area: AreaCode,
    pub product: ProductType,
    pub channel_type: ChannelType,
}

/// 境内/境外分布
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDistribution {
    pub mainland_value: i64,
    pub oversea_value: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_primary_and_backup() {
        let req = CreateDomainRequest {
            domain: "cdn.example.com".to_string(),
            sources: vec![
                OriginServer::default(),
                OriginServer {
                    priority: OriginPriority::Backup,
                    ..OriginServer::default()
                },
                OriginServer::default(),
            ],
            ..CreateDomainRequest::default()
        };
        assert_eq!(req.count_by_priority(), (2, 1));
    }

    #[test]
    fn access_stats_request_from_partial_json() {
        let json = r#"{"domains":["a.com"],"metric":5,"start_time":0,"end_time":3600,"isp":3001}"#;
        let req: AccessStatsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.metric, AccessMetric::Status2xx);
        assert_eq!(req.isp, Some(IspCode::Yidong));
        assert_eq!(req.district, None);
        assert_eq!(req.interval, DataInterval::FiveMinutes);
    }

    #[test]
    fn create_response_omits_absent_fields() {
        let json = serde_json::to_string(&CreateDomainResponse::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
