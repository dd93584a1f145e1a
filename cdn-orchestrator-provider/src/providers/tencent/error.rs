//! 腾讯云 CDN 错误映射
//!
//! 参考: <https://cloud.tencent.com/document/api/228/30986>

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::TencentProvider;

/// 腾讯云错误码映射实现
impl ProviderErrorMapper for TencentProvider {
    fn provider_name(&self) -> &'static str {
        "tencent"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let code = raw.code.as_deref().unwrap_or_default();
        match code {
            // ============ 认证错误 ============
            "AuthFailure"
            | "AuthFailure.InvalidAuthorization"
            | "AuthFailure.InvalidSecretId"
            | "AuthFailure.MFAFailure"
            | "AuthFailure.SecretIdNotFound"
            | "AuthFailure.SignatureExpire"
            | "AuthFailure.SignatureFailure"
            | "AuthFailure.TokenFailure" => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 频率限制（可重试） ============
            "RequestLimitExceeded"
            | "RequestLimitExceeded.UinLimitExceeded"
            | "RequestLimitExceeded.IPLimitExceeded"
            | "LimitExceeded.CdnHostOpTooOften"
            | "LimitExceeded.CdnCallingQueryIpTooOften" => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ============ 域名不存在 ============
            "ResourceNotFound.CdnHostNotExists"
            | "ResourceNotFound.DomainNotFound"
            | "ResourceNotFound.CdnProjectNotExists" => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // 任务查询上下文下的泛化 ResourceNotFound
            "ResourceNotFound" if context.task_id.is_some() => ProviderError::TaskNotFound {
                provider: self.provider_name().to_string(),
                task_id: context.task_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            "ResourceNotFound" => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 配额（刷新/预热日限额等，不重试） ============
            c if c.starts_with("LimitExceeded") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 权限 ============
            c if c.starts_with("UnauthorizedOperation") || c == "AuthFailure.UnauthorizedOperation" => {
                ProviderError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 后端服务错误 ============
            c if c.starts_with("InternalError") => ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: raw.message,
            },

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TencentProvider {
        TencentProvider::new("id".to_string(), "key".to_string())
    }

    fn map(code: &str, ctx: ErrorContext) -> ProviderError {
        provider().map_error(RawApiError::with_code(code, "message"), ctx)
    }

    #[test]
    fn auth_failures() {
        let err = map("AuthFailure.SignatureFailure", ErrorContext::default());
        assert!(
            matches!(err, ProviderError::InvalidCredentials { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn host_not_exists_carries_domain() {
        let err = map(
            "ResourceNotFound.CdnHostNotExists",
            ErrorContext::domain("cdn.example.com"),
        );
        assert!(
            matches!(&err, ProviderError::DomainNotFound { domain, .. } if domain == "cdn.example.com"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn generic_not_found_depends_on_context() {
        let err = map("ResourceNotFound", ErrorContext::task("t-9"));
        assert!(
            matches!(&err, ProviderError::TaskNotFound { task_id, .. } if task_id == "t-9"),
            "unexpected error: {err:?}"
        );
        let err = map("ResourceNotFound", ErrorContext::domain("a.com"));
        assert!(
            matches!(err, ProviderError::DomainNotFound { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn limit_exceeded_split() {
        let err = map("LimitExceeded.CdnHostOpTooOften", ErrorContext::default());
        assert!(
            matches!(err, ProviderError::RateLimited { .. }),
            "unexpected error: {err:?}"
        );
        let err = map(
            "LimitExceeded.CdnPurgeUrlExceedDayLimit",
            ErrorContext::default(),
        );
        assert!(
            matches!(err, ProviderError::QuotaExceeded { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn permission_and_internal() {
        let err = map("UnauthorizedOperation.CdnCamUnauthorized", ErrorContext::default());
        assert!(
            matches!(err, ProviderError::PermissionDenied { .. }),
            "unexpected error: {err:?}"
        );
        let err = map("InternalError.CdnSystemError", ErrorContext::default());
        assert!(
            matches!(err, ProviderError::NetworkError { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn unknown_code_keeps_vendor_detail() {
        let err = map("InvalidParameter.CdnHostInvalidParam", ErrorContext::default());
        assert!(
            matches!(
                &err,
                ProviderError::VendorError { raw_code: Some(code), .. }
                    if code == "InvalidParameter.CdnHostInvalidParam"
            ),
            "unexpected error: {err:?}"
        );
    }
}
