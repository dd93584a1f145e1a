//! 腾讯云 CDN API 请求/响应结构
//!
//! 字段名沿用 API 的 PascalCase；未设置的可选字段不序列化，
//! 这样 `UpdateDomainConfig` 只会修改请求体中出现的配置项。

use serde::{Deserialize, Serialize};

// ============ 通用响应 ============

/// 腾讯云 API 响应外层
#[derive(Debug, Deserialize)]
pub struct TencentResponse<T> {
    #[serde(rename = "Response")]
    pub response: TencentResponseBody<T>,
}

#[derive(Debug, Deserialize)]
pub struct TencentResponseBody<T> {
    #[serde(rename = "Error")]
    pub error: Option<TencentError>,
    #[serde(flatten)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// 只有 `RequestId` 的响应
#[derive(Debug, Default, Deserialize)]
pub struct EmptyResponse {}

// ============ 域名 ============

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainRequest {
    pub domain: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddCdnDomainRequest {
    pub domain: String,
    pub service_type: String,
    pub origin: Origin,
    pub area: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainFilter {
    pub name: String,
    pub value: Vec<String>,
    pub fuzzy: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainsRequest {
    pub offset: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<DomainFilter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeDomainsResponse {
    pub domains: Vec<BriefDomain>,
    pub total_number: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BriefDomain {
    pub resource_id: String,
    pub domain: String,
    pub cname: String,
    pub status: String,
    pub area: String,
    pub service_type: String,
    pub create_time: String,
    pub update_time: String,
}

// ============ 归属权验证 ============

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateVerifyRecordResponse {
    pub record: String,
    pub file_verify_url: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyDomainRecordRequest {
    pub domain: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub verify_type: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VerifyDomainRecordResponse {
    pub result: bool,
}

// ============ 刷新 / 预热 ============

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurgePathCacheRequest {
    pub paths: Vec<String>,
    pub flush_type: String,
    pub url_encode: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurgeUrlsCacheRequest {
    pub urls: Vec<String>,
    pub url_encode: bool,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PushUrlsCacheRequest {
    pub urls: Vec<String>,
    pub area: String,
    pub url_encode: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskIdResponse {
    pub task_id: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTasksRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purge_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskLog {
    pub task_id: String,
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribePurgeTasksResponse {
    pub purge_logs: Vec<TaskLog>,
    pub total_count: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribePushTasksResponse {
    pub push_logs: Vec<TaskLog>,
    pub total_count: i64,
}

// ============ 统计 ============

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCdnDataRequest {
    pub start_time: String,
    pub end_time: String,
    pub metric: String,
    pub domains: Vec<String>,
    pub interval: String,
    pub detail: bool,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<i64>,
    pub protocol: String,
    pub ip_protocol: String,
    pub product: String,
    pub time_zone: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeOriginDataRequest {
    pub start_time: String,
    pub end_time: String,
    pub metric: String,
    pub domains: Vec<String>,
    pub interval: String,
    pub detail: bool,
    pub area: String,
    pub time_zone: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TimestampData {
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SummarizedData {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CdnData {
    pub metric: String,
    pub detail_data: Vec<TimestampData>,
    pub summarized_data: SummarizedData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceData {
    pub resource: String,
    pub cdn_data: Vec<CdnData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceOriginData {
    pub resource: String,
    pub origin_data: Vec<CdnData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeCdnDataResponse {
    pub data: Vec<ResourceData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeOriginDataResponse {
    pub data: Vec<ResourceOriginData>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTopDataRequest {
    pub start_time: String,
    pub end_time: String,
    pub metric: String,
    pub filter: String,
    pub domains: Vec<String>,
    pub product: String,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_type: Option<String>,
    pub detail: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TopDetailData {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TopData {
    pub resource: String,
    pub detail_data: Vec<TopDetailData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListTopDataResponse {
    pub data: Vec<TopData>,
}

// ============ UpdateDomainConfig ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Origin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_origin_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_rules: Option<Vec<PathRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_based_origin: Option<Vec<PathBasedOriginRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<OriginSni>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginSni {
    pub switch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathRule {
    pub regex: bool,
    pub path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub origin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub forward_uri: String,
    pub full_match: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathBasedOriginRule {
    pub rule_type: String,
    pub rule_paths: Vec<String>,
    pub origin: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginPullTimeout {
    pub connect_timeout: i64,
    pub receive_timeout: i64,
}

/// 只有开关的配置项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwitchConfig {
    pub switch: String,
}

impl SwitchConfig {
    pub fn new(switch: &str) -> Self {
        Self {
            switch: switch.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeaderRuleItem {
    pub header_mode: String,
    pub header_name: String,
    pub header_value: String,
    pub rule_type: String,
    pub rule_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeaderConfig {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub header_rules: Vec<HeaderRuleItem>,
}

// ---------- 访问控制 ----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpFilterRuleItem {
    pub filter_type: String,
    pub filters: Vec<String>,
    pub rule_type: String,
    pub rule_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpFilter {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_rules: Vec<IpFilterRuleItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IpFreqLimit {
    pub switch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefererRuleItem {
    pub rule_type: String,
    pub rule_paths: Vec<String>,
    pub referer_type: String,
    pub referers: Vec<String>,
    pub allow_empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Referer {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referer_rules: Vec<RefererRuleItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAgentFilterRule {
    pub filter_type: String,
    pub user_agents: Vec<String>,
    pub rule_type: String,
    pub rule_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserAgentFilter {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_rules: Vec<UserAgentFilterRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CappingRule {
    pub rule_type: String,
    pub rule_paths: Vec<String>,
    #[serde(rename = "KBpsThreshold")]
    pub kbps_threshold: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DownstreamCapping {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capping_rules: Vec<CappingRule>,
}

// ---------- 鉴权 ----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationTypeDetail {
    pub secret_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_param: Option<String>,
    pub expire_time: i64,
    pub file_extensions: Vec<String>,
    pub filter_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Authentication {
    pub switch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_a: Option<AuthenticationTypeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_b: Option<AuthenticationTypeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_c: Option<AuthenticationTypeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_d: Option<AuthenticationTypeDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteAuthenticationRule {
    pub server: String,
    pub auth_method: String,
    pub rule_type: String,
    pub rule_paths: Vec<String>,
    pub auth_timeout: i64,
    pub auth_timeout_action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteAuthentication {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remote_authentication_rules: Vec<RemoteAuthenticationRule>,
}

// ---------- 缓存 ----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheConfigCache {
    pub switch: String,
    pub cache_time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfigCache>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_cache: Option<SwitchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_origin: Option<SwitchConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleCache {
    pub rule_type: String,
    pub rule_paths: Vec<String>,
    pub cache_config: RuleCacheConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cache {
    pub rule_cache: Vec<RuleCache>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryStringKey {
    pub switch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyRule {
    pub rule_type: String,
    pub rule_paths: Vec<String>,
    pub full_url_cache: String,
    pub ignore_case: String,
    pub query_string: QueryStringKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url_cache: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<QueryStringKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_rules: Vec<KeyRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusCodeCacheRule {
    pub status_code: String,
    pub cache_time: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusCodeCache {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_rules: Vec<StatusCodeCacheRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MaxAgeRule {
    pub max_age_type: String,
    pub max_age_contents: Vec<String>,
    pub max_age_time: i64,
    pub follow_origin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MaxAge {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub max_age_rules: Vec<MaxAgeRule>,
}

// ---------- 重写 / 错误页 / 压缩 ----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UrlRedirectRule {
    pub redirect_status_code: i64,
    pub pattern: String,
    pub redirect_url: String,
    pub full_match: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UrlRedirect {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path_rules: Vec<UrlRedirectRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorPageRule {
    pub status_code: i64,
    pub redirect_code: i64,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorPage {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_rules: Vec<ErrorPageRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompressionRule {
    pub compress: bool,
    pub min_length: i64,
    pub max_length: i64,
    pub algorithms: Vec<String>,
    pub rule_type: String,
    pub rule_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Compression {
    pub switch: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compression_rules: Vec<CompressionRule>,
}

// ---------- HTTPS ----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerCert {
    pub certificate: String,
    pub private_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub from: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hsts {
    pub switch: String,
    pub max_age: i64,
    pub include_sub_domains: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Https {
    pub switch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocsp_stapling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_info: Option<ServerCert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts: Option<Hsts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_version: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForceRedirect {
    pub switch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_status_code: Option<i64>,
}

/// `UpdateDomainConfig` 请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDomainConfigRequest {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_access: Option<SwitchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_pull_timeout: Option<OriginPullTimeout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirect: Option<SwitchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_origin_pull: Option<SwitchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_header: Option<HeaderConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_header: Option<HeaderConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_filter: Option<IpFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_freq_limit: Option<IpFreqLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<Referer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent_filter: Option<UserAgentFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_capping: Option<DownstreamCapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_authentication: Option<RemoteAuthentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<Cache>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<CacheKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code_cache: Option<StatusCodeCache>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<MaxAge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_redirect: Option<UrlRedirect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_page: Option<ErrorPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<Compression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<Https>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_billing: Option<SwitchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_redirect: Option<ForceRedirect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_has_no_data() {
        let json = r#"{"Response":{"Error":{"Code":"AuthFailure","Message":"bad"},"RequestId":"r"}}"#;
        let resp: TencentResponse<TaskIdResponse> = serde_json::from_str(json).unwrap();
        let Some(err) = resp.response.error else {
            panic!("error should be present");
        };
        assert_eq!(err.code, "AuthFailure");
    }

    #[test]
    fn domains_response() {
        let json = r#"{"Response":{"Domains":[{"ResourceId":"cdn-1","Domain":"a.com",
            "Status":"online","Area":"global"}],"TotalNumber":1,"RequestId":"r"}}"#;
        let resp: TencentResponse<DescribeDomainsResponse> = serde_json::from_str(json).unwrap();
        assert!(resp.response.error.is_none());
        let Some(data) = resp.response.data else {
            panic!("data should be present");
        };
        assert_eq!(data.total_number, 1);
        assert_eq!(data.domains[0].resource_id, "cdn-1");
        assert_eq!(data.domains[0].cname, "");
    }

    #[test]
    fn update_body_only_has_set_fields() {
        let body = UpdateDomainConfigRequest {
            domain: "a.com".to_string(),
            downstream_capping: Some(DownstreamCapping {
                switch: "on".to_string(),
                capping_rules: vec![CappingRule {
                    rule_type: "all".to_string(),
                    rule_paths: vec!["*".to_string()],
                    kbps_threshold: 100,
                }],
            }),
            ..UpdateDomainConfigRequest::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Domain": "a.com",
                "DownstreamCapping": {
                    "Switch": "on",
                    "CappingRules": [{"RuleType": "all", "RulePaths": ["*"], "KBpsThreshold": 100}]
                }
            })
        );
    }
}
