//! 华为云错误映射
//!
//! 参考: <https://support.huaweicloud.com/api-cdn/ErrorCode.html>
//!
//! ## 错误码分类
//!
//! - **认证错误**：APIGW.0301, APIGW.0101, APIGW.0303, APIGW.0305
//! - **权限拒绝**：APIGW.0302, APIGW.0306, CDN.0003
//! - **频率限制**：APIGW.0308
//! - **域名不存在**：CDN.0170
//! - **网络错误**：APIGW.0201, CDN.0000
//!
//! 其余错误码 fallback 到 `VendorError`，保留原始 code 与 message。

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::HuaweicloudProvider;

/// 华为云错误码映射实现
impl ProviderErrorMapper for HuaweicloudProvider {
    fn provider_name(&self) -> &'static str {
        "huaweicloud"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "APIGW.0301" // IAM 认证信息错误
                | "APIGW.0101" // API 不存在/未发布（认证路径错误）
                | "APIGW.0303" // APP 认证信息错误
                | "APIGW.0305", // 通用认证错误
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 权限/操作被拒绝 ============
            Some(
                "APIGW.0302" // IAM 用户不允许访问（黑/白名单限制）
                | "APIGW.0306" // API 访问被拒绝
                | "CDN.0003", // 用户无权限
            ) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 流控 ============
            Some("APIGW.0308") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ============ 域名不存在 ============
            Some("CDN.0170") => ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 网络/后端服务错误 ============
            Some(
                "APIGW.0201" // 请求格式错误/后端不可用/超时
                | "CDN.0000", // 系统内部错误
            ) => ProviderError::NetworkError {
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

    fn provider() -> HuaweicloudProvider {
        HuaweicloudProvider::new("ak".to_string(), "sk".to_string())
    }

    #[test]
    fn domain_not_found_carries_context() {
        let err = provider().map_error(
            RawApiError::with_code("CDN.0170", "domain not exist"),
            ErrorContext::domain("cdn.example.com"),
        );
        assert!(
            matches!(&err, ProviderError::DomainNotFound { domain, .. } if domain == "cdn.example.com"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn auth_codes() {
        let err = provider().map_error(
            RawApiError::with_code("APIGW.0301", "bad sign"),
            ErrorContext::default(),
        );
        assert!(
            matches!(err, ProviderError::InvalidCredentials { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn throttling_is_retryable() {
        let err = provider().map_error(
            RawApiError::with_code("APIGW.0308", "flow control"),
            ErrorContext::default(),
        );
        assert!(
            matches!(err, ProviderError::RateLimited { .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn unknown_code_keeps_vendor_detail() {
        let err = provider().map_error(
            RawApiError::with_code("CDN.9999", "boom"),
            ErrorContext::default(),
        );
        assert!(
            matches!(
                &err,
                ProviderError::VendorError { raw_code: Some(code), raw_message, .. }
                    if code == "CDN.9999" && raw_message == "boom"
            ),
            "unexpected error: {err:?}"
        );
    }
}
