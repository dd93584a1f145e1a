//! Huawei Cloud CDN API type definition

use serde::{Deserialize, Serialize};

// ============ 域名配置（UpdateDomainFullConfig） ============

/// Request body of `PUT /v1.1/cdn/configuration/domains/{name}/configs`.
#[derive(Debug, Default, Serialize)]
pub struct ModifyDomainConfigRequest {
    pub configs: Configs,
}

/// Full configuration document. Only populated fields are sent.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Configs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_accelerate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_follow302_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_range_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_receive_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<Sni>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flexible_origin: Option<Vec<FlexibleOrigin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_request_header: Option<Vec<HeaderConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_request_url_rewrite: Option<Vec<OriginRequestUrlRewrite>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_response_header: Option<Vec<HeaderConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compress: Option<Compress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code_redirect_rules: Option<Vec<ErrorCodeRedirectRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_rules: Option<Vec<CacheRuleConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_cache_rules: Option<Vec<BrowserCacheRuleConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code_cache: Option<Vec<ErrorCodeCache>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url_rewrite: Option<Vec<RequestUrlRewrite>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_filter: Option<AccessFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<RefererConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent_filter: Option<AccessFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_auth: Option<UrlAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_auth: Option<RemoteAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_frequency_limit: Option<IpFrequencyLimit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<HttpsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_redirect: Option<ForceRedirect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts: Option<Hsts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sni {
    pub status: String,
    pub server_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceConfig {
    pub origin_type: String,
    pub origin_addr: String,
    pub priority: i64,
    pub weight: i64,
    pub http_port: i64,
    pub https_port: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlexibleOrigin {
    pub match_type: String,
    pub match_pattern: String,
    pub priority: i64,
    pub back_sources: Vec<BackSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackSource {
    pub sources_type: String,
    pub ip_or_domain: String,
    pub http_port: i64,
    pub https_port: i64,
}

/// Origin request header / HTTP response header rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderConfig {
    pub name: String,
    pub value: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginRequestUrlRewrite {
    pub priority: i64,
    pub match_type: String,
    pub source_url: String,
    pub target_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compress {
    pub status: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub compress_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCodeRedirectRule {
    pub error_code: i64,
    pub target_code: u16,
    pub target_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheRuleConfig {
    pub match_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    pub ttl_unit: String,
    pub priority: i64,
    pub follow_origin: String,
    pub url_parameter_type: String,
    pub url_parameter_value: String,
}

/// Match condition shared by browser cache and URL rewrite rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCondition {
    pub match_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_value: Option<String>,
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserCacheRuleConfig {
    pub condition: RuleCondition,
    pub cache_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCodeCache {
    pub code: i64,
    pub ttl: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestUrlRewrite {
    pub condition: RuleCondition,
    pub redirect_status_code: u16,
    pub redirect_url: String,
    pub execution_mode: String,
}

/// IP / User-Agent black & white list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessFilter {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefererConfig {
    #[serde(rename = "type")]
    pub filter_type: String,
    pub value: String,
    pub include_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InheritConfig {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherit_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherit_time_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlAuth {
    pub status: String,
    #[serde(rename = "type")]
    pub auth_type: String,
    pub expire_time: i64,
    pub sign_method: String,
    pub match_type: String,
    pub inherit_config: InheritConfig,
    pub key: String,
    pub backup_key: String,
    pub sign_arg: String,
    pub time_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteAuth {
    pub remote_authentication: String,
    pub remote_auth_rules: RemoteAuthRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteAuthRule {
    pub auth_server: String,
    pub request_method: String,
    pub file_type_setting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specified_file_type: Option<String>,
    pub reserve_args_setting: String,
    pub reserve_args: String,
    pub add_custom_args_rules: Vec<serde_json::Value>,
    pub reserve_headers_setting: String,
    pub reserve_headers: String,
    pub add_custom_headers_rules: Vec<serde_json::Value>,
    pub auth_success_status: String,
    pub auth_failed_status: String,
    pub response_status: String,
    pub timeout: i64,
    pub timeout_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpFrequencyLimit {
    pub status: String,
    pub qps: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpsConfig {
    pub https_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_source: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http2_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocsp_stapling_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForceRedirect {
    pub status: String,
    #[serde(rename = "type")]
    pub jump_type: String,
    pub redirect_code: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hsts {
    pub status: String,
    pub max_age: i64,
    pub include_subdomains: String,
}

// ============ 域名 ============

/// Request body of `POST /v1.0/cdn/domains`.
#[derive(Debug, Serialize)]
pub struct CreateDomainBody {
    pub domain: CreateDomainItem,
}

#[derive(Debug, Serialize)]
pub struct CreateDomainItem {
    pub domain_name: String,
    pub business_type: String,
    pub service_area: String,
    pub sources: Vec<CreateSource>,
}

#[derive(Debug, Serialize)]
pub struct CreateSource {
    pub ip_or_domain: String,
    pub origin_type: String,
    pub active_standby: i64,
}

/// Response payload for `CreateDomain` / `ShowDomainDetailByName`.
#[derive(Debug, Deserialize)]
pub struct DomainResponse {
    pub domain: Option<HuaweicloudDomain>,
}

/// Domain item returned by Huawei Cloud CDN APIs. Times are Unix milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HuaweicloudDomain {
    pub id: Option<String>,
    pub domain_name: Option<String>,
    pub business_type: Option<String>,
    pub domain_status: Option<String>,
    pub cname: Option<String>,
    pub service_area: Option<String>,
    pub create_time: Option<i64>,
    pub modify_time: Option<i64>,
    pub update_time: Option<i64>,
}

/// Response payload for `ListDomains`.
#[derive(Debug, Deserialize)]
pub struct ListDomainsResponse {
    pub total: Option<i64>,
    pub domains: Option<Vec<HuaweicloudDomain>>,
}

// ============ 刷新预热 ============

#[derive(Debug, Serialize)]
pub struct RefreshTaskBody {
    pub refresh_task: RefreshTask,
}

#[derive(Debug, Serialize)]
pub struct RefreshTask {
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub zh_url_encode: bool,
    pub urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTaskResponse {
    pub refresh_task: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreheatingTaskBody {
    pub preheating_task: PreheatingTask,
}

#[derive(Debug, Serialize)]
pub struct PreheatingTask {
    pub zh_url_encode: bool,
    pub urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreheatingTaskResponse {
    pub preheating_task: Option<String>,
}

/// Response payload for `ShowHistoryTaskDetails`.
#[derive(Debug, Deserialize)]
pub struct HistoryTaskDetailResponse {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// Response payload for `ShowHistoryTasks`.
#[derive(Debug, Deserialize)]
pub struct HistoryTasksResponse {
    pub total: Option<i64>,
    pub tasks: Option<Vec<HistoryTask>>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryTask {
    pub id: Option<String>,
}

// ============ 统计 ============

/// Response payload for `ShowDomainStats` / `ShowDomainLocationStats`.
///
/// `result` shape depends on `action` and `group_by`, so it is kept untyped here.
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub result: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct TopUrlResponse {
    pub top_url_summary: Option<Vec<TopUrlSummary>>,
}

#[derive(Debug, Deserialize)]
pub struct TopUrlSummary {
    pub url: Option<String>,
    pub value: Option<f64>,
}

// ============ 错误 ============

/// Error payload returned by Huawei Cloud CDN APIs.
///
/// CDN APIs wrap the error in an `error` object, API Gateway errors are flat.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<ErrorBody>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
}

impl ErrorResponse {
    /// `(code, message)`，两种格式都取不到时返回 `None`
    pub fn into_parts(self) -> Option<(String, String)> {
        let (code, msg) = match self.error {
            Some(body) => (body.error_code, body.error_msg),
            None => (self.error_code, self.error_msg),
        };
        code.map(|c| (c, msg.unwrap_or_default()))
    }
}
