//! 网宿错误映射
//!
//! 网宿的错误体 `code` 既可能是语义字符串，也可能直接是 HTTP 状态码；
//! 没有错误体时以 HTTP 状态码作为 code。
//!
//! ## 错误码分类
//!
//! - **认证错误**：401, AuthFailure, InvalidAccessKey, SignatureDoesNotMatch
//! - **权限拒绝**：403, AccessDenied
//! - **域名不存在**：404, NoSuchDomain, DomainNotFound
//! - **频率限制**：429, RequestLimitExceeded
//!
//! 其余错误码 fallback 到 `VendorError`。

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::WangsuProvider;

impl ProviderErrorMapper for WangsuProvider {
    fn provider_name(&self) -> &'static str {
        "wangsu"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("401" | "AuthFailure" | "InvalidAccessKey" | "SignatureDoesNotMatch") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            Some("403" | "AccessDenied") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("404" | "NoSuchDomain" | "DomainNotFound") if context.domain.is_some() => {
                ProviderError::DomainNotFound {
                    provider: self.provider_name().to_string(),
                    domain: context.domain.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            Some("429" | "RequestLimitExceeded") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
