//! 网宿 API 请求/响应类型
//!
//! 域名接口使用 kebab-case 字段，`setsrcconfig` 使用 camelCase。

use serde::{Deserialize, Serialize};

// ============ 通用 ============

/// 非 2xx 响应体；`code` 可能是字符串也可能是整数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub code: serde_json::Value,
    pub message: String,
}

impl ErrorResponse {
    /// 拆为 (code, message)，没有 code 时返回 None
    pub fn into_parts(self) -> Option<(String, String)> {
        let code = match self.code {
            serde_json::Value::String(s) if !s.is_empty() => s,
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some((code, self.message))
    }
}

// ============ 域名 ============

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OriginConfig {
    /// 多个源站以 `;` 分隔
    pub origin_ips: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_origin_host_header: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreateDomainRequest {
    pub version: String,
    pub domain_name: String,
    pub service_type: String,
    pub service_areas: String,
    pub origin_config: OriginConfig,
    pub comment: String,
    pub cname_with_customized_prefix: bool,
    pub accelerate_no_china: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CreateDomainResponse {
    /// `.../api/domain/{domain-id}`
    pub location: String,
    pub cname: String,
}

impl CreateDomainResponse {
    /// `location` 最后一段即域名 ID
    pub fn domain_id(&self) -> Option<String> {
        self.location
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DomainNameRequest {
    /// 多个域名以 `,` 分隔
    pub domain_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DomainSummary {
    pub domain_id: String,
    pub domain_name: String,
    pub service_type: String,
    pub cname: String,
    /// `Deployed` / `InProgress`
    pub status: String,
    pub cdn_service_status: String,
    pub enabled: String,
}

/// `GET /api/domain` 的响应，兼容包裹与裸数组两种形态
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DomainListResponse {
    Wrapped {
        #[serde(rename = "domain-summary", default)]
        domain_summary: Vec<DomainSummary>,
    },
    Bare(Vec<DomainSummary>),
}

impl DomainListResponse {
    pub fn into_domains(self) -> Vec<DomainSummary> {
        match self {
            Self::Wrapped { domain_summary } => domain_summary,
            Self::Bare(domains) => domains,
        }
    }
}

// ============ 回源 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvSrcConfigs {
    pub master_ips: Vec<String>,
    pub backup_ips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvSrcSetting {
    pub use_adv_src: bool,
    pub detect_url: String,
    pub detect_period: i64,
    pub adv_src_configs: AdvSrcConfigs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrcConfigRequest {
    pub domain_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_range: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow301: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow302: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adv_src_setting: Option<AdvSrcSetting>,
}

// ============ 缓存 ============

/// `PUT /api/config/cachetime/{domain}` 的请求体是该结构的数组
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheTimeBehavior {
    pub path_pattern: String,
    /// 秒，`0` 表示不缓存
    pub cache_ttl: String,
    pub is_respect_server: bool,
    pub ignore_letter_case: bool,
    pub priority: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpCodeCacheRule {
    pub cache_ttl: String,
    pub http_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpCodeCacheRequest {
    pub http_code_cache_rules: Vec<HttpCodeCacheRule>,
}

// ============ 限速 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccessSpeedRule {
    pub path_pattern: String,
    pub limit_mode: String,
    /// KB/s
    pub speed: String,
    pub priority: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccessSpeedRequest {
    pub access_speed_rules: Vec<AccessSpeedRule>,
}

// ============ 头部改写 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HeaderModifyRule {
    pub path_pattern: String,
    /// `cache2origin` / `cache2visitor`
    pub header_direction: String,
    /// `add` / `set` / `delete`
    pub action: String,
    pub header_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub header_value: String,
    pub priority: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HeaderModifyRequest {
    pub header_modify_rules: Vec<HeaderModifyRule>,
}

// ============ 内容重定向 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RewriteRuleSetting {
    pub path_pattern: String,
    pub ignore_letter_case: bool,
    /// 目前只支持 `Cache`
    pub publish_type: String,
    pub priority: i64,
    pub before_value: String,
    /// 带状态码时为 `301:https://...`
    pub after_value: String,
    /// `before`：防盗链之前
    pub rewrite_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InnerRedirectRequest {
    pub rewrite_rule_settings: Vec<RewriteRuleSetting>,
}

// ============ 访问控制 ============

/// 空对象表示清除该类名单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IpControlRule {
    /// `;` 分隔
    pub forbidden_ips: String,
    pub allowed_ips: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RefererControlRule {
    /// 名单均为空时必须为空串
    pub allow_null_referer: String,
    /// 空格分隔
    pub valid_referer: String,
    pub invalid_referer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct UaControlRule {
    /// `|` 分隔的正则
    pub valid_user_agents: String,
    pub invalid_user_agents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VisitControlRule {
    pub path_pattern: String,
    /// `403` / `302`
    pub control_action: String,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_control_rule: Option<IpControlRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer_control_rule: Option<RefererControlRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ua_control_rule: Option<UaControlRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VisitControlRequest {
    pub visit_control_rules: Vec<VisitControlRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_list_shapes() {
        let wrapped: DomainListResponse = serde_json::from_str(
            r#"{"domain-summary":[{"domain-id":"1","domain-name":"a.com","enabled":"true"}]}"#,
        )
        .unwrap();
        let bare: DomainListResponse =
            serde_json::from_str(r#"[{"domain-id":"2","domain-name":"b.com"}]"#).unwrap();
        assert_eq!(wrapped.into_domains()[0].domain_name, "a.com");
        assert_eq!(bare.into_domains()[0].domain_id, "2");
    }

    #[test]
    fn domain_id_from_location() {
        let resp = CreateDomainResponse {
            location: "https://open.chinanetcenter.com/api/domain/5f3e".to_string(),
            cname: String::new(),
        };
        assert_eq!(resp.domain_id().as_deref(), Some("5f3e"));
        assert_eq!(CreateDomainResponse::default().domain_id(), None);
    }

    #[test]
    fn error_code_string_or_number() {
        let e: ErrorResponse =
            serde_json::from_str(r#"{"code":"AccessDenied","message":"no"}"#).unwrap();
        assert_eq!(e.into_parts(), Some(("AccessDenied".to_string(), "no".to_string())));
        let e: ErrorResponse = serde_json::from_str(r#"{"code":404,"message":"gone"}"#).unwrap();
        assert_eq!(e.into_parts().map(|p| p.0), Some("404".to_string()));
        let e: ErrorResponse = serde_json::from_str(r#"{"message":"x"}"#).unwrap();
        assert_eq!(e.into_parts(), None);
    }

    #[test]
    fn src_config_is_camel_case() {
        let body = SrcConfigRequest {
            domain_name: "a.com".to_string(),
            use_range: Some(true),
            ..SrcConfigRequest::default()
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"domainName":"a.com","useRange":true}"#);
    }
}
