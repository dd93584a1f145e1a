//! 统一域名配置模型
//!
//! 纯数据。`DomainConfig` 中为 `None` 的子配置表示“不触碰该功能”，而不是“关闭该功能”；
//! 关闭应显式传入 `status = Off` 的子配置。

use serde::{Deserialize, Serialize};

use super::action::UpdateAction;
use super::enums::{
    AreaCode, AuthManner, AuthRange, CacheParameterStatus, CacheStatus, CacheUnit,
    CertificateType, CompressMethod, CompressRuleType, EffectiveType, EncryptManner, HeaderAction,
    HttpsJumpType, InheritTimeType, ListType, OriginMateMethod, OriginPriority, OriginProtocol,
    OriginType, OriginUrlMatchMode, RedirectCode, RemoteAuthTimeoutAction, RequestMethod,
    RequestUrlRewriteType, RuleType, Switch, TimeFormat, TlsVersion,
};

// ============ 基础 ============

/// 基础配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConf {
    /// 加速区域（`UpdateAction::Area` 使用）
    pub area_code: AreaCode,
    /// IPv6 访问（`UpdateAction::Base` 使用）
    pub support_ipv6: Switch,
}

// ============ 回源 ============

/// 回源基础配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginConf {
    pub protocol: OriginProtocol,
    /// 回源 SNI 开关，`None` 表示不下发 SNI 配置
    pub sni_switch: Option<Switch>,
    pub sni_value: String,
    /// Range 回源
    pub range: Switch,
    /// 跟随 301/302
    pub follow: Switch,
    /// 校验 ETag
    pub etag: Switch,
    /// 回源超时（秒）
    pub timeout: i64,
    /// TCP 建连超时（秒）
    pub tcp_timeout: i64,
}

/// 源站
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginServer {
    pub origin_type: OriginType,
    /// IP、域名或存储桶地址
    pub address: String,
    pub http_port: i64,
    pub https_port: i64,
    /// 回源 Host
    pub host: String,
    pub weight: i64,
    pub priority: OriginPriority,
    pub priority_value: i64,
}

impl OriginServer {
    /// 按回源协议选择端口，协议跟随时返回 0
    pub const fn port_for(&self, protocol: OriginProtocol) -> i64 {
        match protocol {
            OriginProtocol::Http => self.http_port,
            OriginProtocol::Https => self.https_port,
            OriginProtocol::Follow => 0,
        }
    }
}

/// 高级回源（按 URL 匹配选择源站）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginAdvanceServer {
    pub url_match_mode: OriginUrlMatchMode,
    pub url_match_rule: Vec<String>,
    pub origin_type: OriginType,
    pub address: String,
    pub http_port: i64,
    pub https_port: i64,
    pub host: String,
    pub priority_value: i64,
}

impl OriginAdvanceServer {
    pub const fn port_for(&self, protocol: OriginProtocol) -> i64 {
        match protocol {
            OriginProtocol::Http => self.http_port,
            OriginProtocol::Https => self.https_port,
            OriginProtocol::Follow => 0,
        }
    }
}

/// 请求头/响应头改写规则
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderRule {
    pub action: HeaderAction,
    pub key: String,
    pub value: String,
}

/// 回源 URL 改写
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginUrlRule {
    pub mate_method: OriginMateMethod,
    /// 待改写路径
    pub rewrite_url: String,
    /// 目标路径
    pub target_url: String,
    pub priority: i64,
}

// ============ 访问控制 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpFilterRule {
    pub list_type: ListType,
    pub ips: Vec<String>,
    pub effective_type: EffectiveType,
    pub effective_rules: Vec<String>,
}

/// IP 黑白名单
///
/// `status = On` 且规则为空是合法的退化情形，按字面翻译。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpFilterConf {
    pub status: Switch,
    pub rules: Vec<IpFilterRule>,
}

impl IpFilterConf {
    /// 合并后的名单：名单类型取第一条规则，值为全部规则的 IP
    pub fn filter_values(&self) -> AccessFilterValues {
        AccessFilterValues {
            status: self.status,
            list_type: self.rules.first().map(|r| r.list_type).unwrap_or_default(),
            values: self.rules.iter().flat_map(|r| r.ips.iter().cloned()).collect(),
        }
    }
}

/// 单一名单形式的黑白名单，供只支持一条名单的厂商使用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessFilterValues {
    pub status: Switch,
    pub list_type: ListType,
    pub values: Vec<String>,
}

/// IP 访问限频
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpFrequencyConf {
    pub qps: i64,
    pub status: Switch,
}

/// Referer 防盗链
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefererConf {
    pub list_type: ListType,
    pub referers: Vec<String>,
    /// 是否允许空 Referer
    pub include_empty: Switch,
    pub status: Switch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgentRule {
    pub list_type: ListType,
    pub agents: Vec<String>,
    pub effective_type: EffectiveType,
    pub effective_rules: Vec<String>,
}

/// User-Agent 黑白名单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAgentConf {
    pub status: Switch,
    pub rules: Vec<UserAgentRule>,
}

impl UserAgentConf {
    /// 合并后的名单：名单类型取第一条规则，值为全部规则的 UA
    pub fn filter_values(&self) -> AccessFilterValues {
        AccessFilterValues {
            status: self.status,
            list_type: self.rules.first().map(|r| r.list_type).unwrap_or_default(),
            values: self
                .rules
                .iter()
                .flat_map(|r| r.agents.iter().cloned())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedRule {
    pub rule_type: RuleType,
    pub content: Vec<String>,
    /// 限速阈值（KB/s）
    pub kbps: i64,
}

/// 单请求限速
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConf {
    pub status: Switch,
    pub rules: Vec<SpeedRule>,
}

// ============ 鉴权 ============

/// URL 鉴权（A/B/C/D 四种方式）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConf {
    pub manner: AuthManner,
    pub range: AuthRange,
    pub file_suffix: Vec<String>,
    /// 继承配置，逗号分隔（如 `m3u8,mpd`），为空表示不继承
    pub inherit_conf: String,
    pub inherit_time_type: InheritTimeType,
    pub key: String,
    pub backup_key: String,
    /// 签名参数名
    pub parameter: String,
    pub encrypt: EncryptManner,
    pub time_format: TimeFormat,
    /// 有效时长（秒）
    pub ttl: i64,
    pub status: Switch,
}

/// 远程鉴权
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteAuthConf {
    pub auth_url: String,
    pub method: RequestMethod,
    /// 鉴权范围
    pub file_type: EffectiveType,
    pub file_content: Vec<String>,
    /// 超时（毫秒）
    pub timeout: i64,
    pub timeout_action: RemoteAuthTimeoutAction,
    pub status: Switch,
}

// ============ 缓存 ============

/// 节点缓存规则
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRule {
    pub rule_type: RuleType,
    pub content: Vec<String>,
    pub ttl: i64,
    pub unit: CacheUnit,
    pub status: CacheStatus,
    pub use_regex: Switch,
    pub priority: i64,
    pub parameter_status: CacheParameterStatus,
    /// 参数列表，下发时最多保留前 10 个
    pub parameter_values: Vec<String>,
    /// 忽略大小写
    pub ignore_case: Switch,
    pub remark: String,
}

impl CacheRule {
    /// TTL 折算为秒
    pub const fn ttl_seconds(&self) -> i64 {
        self.ttl.saturating_mul(self.unit.seconds())
    }
}

/// 状态码缓存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheCodeRule {
    pub http_code: i64,
    pub ttl: i64,
    pub unit: CacheUnit,
}

impl CacheCodeRule {
    pub const fn ttl_seconds(&self) -> i64 {
        self.ttl.saturating_mul(self.unit.seconds())
    }
}

/// 浏览器缓存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserCacheRule {
    pub rule_type: RuleType,
    pub content: Vec<String>,
    pub ttl: i64,
    pub unit: CacheUnit,
    pub status: CacheStatus,
    pub priority: i64,
}

impl BrowserCacheRule {
    pub const fn ttl_seconds(&self) -> i64 {
        self.ttl.saturating_mul(self.unit.seconds())
    }
}

// ============ 重写 / 错误页 / 压缩 ============

/// 访问 URL 重定向
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlRewriteRule {
    pub mate_method: RequestUrlRewriteType,
    pub rewrite_url: String,
    pub target_url: String,
    pub redirect_code: RedirectCode,
    pub priority: i64,
}

/// 自定义错误页
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPageRule {
    pub status_code: i64,
    pub redirect_code: RedirectCode,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionRule {
    pub rule_type: CompressRuleType,
    pub content: Vec<String>,
    pub method: CompressMethod,
    pub priority: i64,
    pub status: Switch,
}

/// 智能压缩
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConf {
    pub status: Switch,
    pub rules: Vec<CompressionRule>,
}

// ============ HTTPS ============

/// HTTPS 配置
///
/// `https_status = Off` 时证书、HSTS、强制跳转等子对象不会下发。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpsConf {
    pub https_status: Switch,
    pub tls_versions: Vec<TlsVersion>,
    pub http2: Switch,
    /// 强制跳转开关
    pub force_redirect: Switch,
    pub jump_type: HttpsJumpType,
    pub redirect_code: RedirectCode,
    pub hsts_status: Switch,
    pub hsts_max_age: i64,
    pub hsts_subdomains: Switch,
    pub ocsp: Switch,
    pub quic: Switch,
    pub cert_name: String,
    /// PEM 证书
    pub cert_value: String,
    /// PEM 私钥
    pub cert_key: String,
    pub cert_type: CertificateType,
}

// ============ DomainConfig ============

/// 域名完整配置面
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub base: Option<BaseConf>,
    pub origin: Option<OriginConf>,
    pub origin_servers: Option<Vec<OriginServer>>,
    pub origin_advance: Option<Vec<OriginAdvanceServer>>,
    pub origin_request_headers: Option<Vec<HeaderRule>>,
    pub origin_urls: Option<Vec<OriginUrlRule>>,
    pub ip_filter: Option<IpFilterConf>,
    pub ip_frequency: Option<IpFrequencyConf>,
    pub referer: Option<RefererConf>,
    pub user_agent: Option<UserAgentConf>,
    pub speed: Option<SpeedConf>,
    pub auth: Option<AuthConf>,
    pub remote_auth: Option<RemoteAuthConf>,
    pub cache_rules: Option<Vec<CacheRule>>,
    pub cache_codes: Option<Vec<CacheCodeRule>>,
    pub browser_cache: Option<Vec<BrowserCacheRule>>,
    pub url_rewrites: Option<Vec<UrlRewriteRule>>,
    pub error_pages: Option<Vec<ErrorPageRule>>,
    pub compression: Option<CompressionConf>,
    pub response_headers: Option<Vec<HeaderRule>>,
    pub https: Option<HttpsConf>,
}

/// 回源协议，未配置回源时按 HTTP
impl DomainConfig {
    pub fn origin_protocol(&self) -> OriginProtocol {
        self.origin.as_ref().map(|o| o.protocol).unwrap_or_default()
    }
}

/// 更新域名配置请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDomainRequest {
    pub action: UpdateAction,
    pub domain: String,
    /// 厂商域名 ID（部分厂商需要）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default)]
    pub config: DomainConfig,
}

impl UpdateDomainRequest {
    pub fn new(action: UpdateAction, domain: impl Into<String>, config: DomainConfig) -> Self {
        Self {
            action,
            domain: domain.into(),
            domain_id: None,
            config,
        }
    }

    /// 仅切换加速区域的请求
    pub fn area(domain: impl Into<String>, area_code: AreaCode) -> Self {
        Self::new(
            UpdateAction::Area,
            domain,
            DomainConfig {
                base: Some(BaseConf {
                    area_code,
                    support_ipv6: Switch::Off,
                }),
                ..DomainConfig::default()
            },
        )
    }
}
