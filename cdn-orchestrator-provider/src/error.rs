use serde::{Deserialize, Serialize};

/// Unified error type for all CDN provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential backoff.
///
/// # Local Errors
///
/// [`InvalidRequest`](Self::InvalidRequest) and
/// [`MutualExclusionViolation`](Self::MutualExclusionViolation) are raised before any
/// network call is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are invalid or expired.
    InvalidCredentials {
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The canonical request is malformed (missing sources, unsupported metric, unknown action).
    InvalidRequest {
        provider: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Mutually exclusive statistics filters were combined.
    MutualExclusionViolation {
        provider: String,
        /// Description of the conflicting filters.
        detail: String,
    },

    /// The account's resource quota has been exceeded.
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not a transient condition.
    QuotaExceeded {
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    ///
    /// This is a transient error. Unlike [`QuotaExceeded`](Self::QuotaExceeded),
    /// the request should succeed after waiting.
    RateLimited {
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The accelerated domain does not exist on the provider.
    DomainNotFound {
        provider: String,
        /// Domain name that was not found.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The purge / prefetch task does not exist.
    TaskNotFound {
        provider: String,
        /// Task id that was not found.
        task_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated user lacks permission for the requested operation.
    PermissionDenied {
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provider cannot express the requested capability.
    NotImplemented {
        provider: String,
        /// Operation or update action name.
        operation: String,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The background region migration gave up before reaching its target area.
    MigrationFailed {
        provider: String,
        /// Domain being migrated.
        domain: String,
        /// Canonical code of the target area.
        target_area: i64,
        /// Number of attempts made.
        attempts: u32,
        /// Message of the last failed attempt.
        last_error: String,
    },

    /// A vendor-reported failure not mapped to a more specific variant.
    ///
    /// Carries the vendor's own error code and message unmodified.
    VendorError {
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::InvalidRequest { .. }
                | Self::MutualExclusionViolation { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
                | Self::TaskNotFound { .. }
                | Self::PermissionDenied { .. }
                | Self::NotImplemented { .. }
        )
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::MutualExclusionViolation { provider, .. }
            | Self::QuotaExceeded { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::TaskNotFound { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::NotImplemented { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::MigrationFailed { provider, .. }
            | Self::VendorError { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::InvalidRequest { provider, detail } => {
                write!(f, "[{provider}] Invalid request: {detail}")
            }
            Self::MutualExclusionViolation { provider, detail } => {
                write!(f, "[{provider}] Mutually exclusive filters: {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' not found")
                }
            }
            Self::TaskNotFound {
                provider, task_id, ..
            } => {
                write!(f, "[{provider}] Task '{task_id}' not found")
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::NotImplemented {
                provider,
                operation,
            } => {
                write!(f, "[{provider}] Not implemented: {operation}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::MigrationFailed {
                provider,
                domain,
                target_area,
                attempts,
                last_error,
            } => {
                write!(
                    f,
                    "[{provider}] Migration of '{domain}' to area {target_area} failed after {attempts} attempts: {last_error}"
                )
            }
            Self::VendorError {
                provider,
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] {code}: {raw_message}")
                } else {
                    write!(f, "[{provider}] {raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_provider_prefix() {
        let cases = [
            (
                ProviderError::InvalidCredentials {
                    provider: "tencent".to_string(),
                    raw_message: Some("bad key".to_string()),
                },
                "[tencent] Invalid credentials: bad key",
            ),
            (
                ProviderError::MutualExclusionViolation {
                    provider: "tencent".to_string(),
                    detail: "ip_protocol with district".to_string(),
                },
                "[tencent] Mutually exclusive filters: ip_protocol with district",
            ),
            (
                ProviderError::RateLimited {
                    provider: "wangsu".to_string(),
                    retry_after: Some(30),
                    raw_message: None,
                },
                "[wangsu] Rate limited (retry after 30s)",
            ),
            (
                ProviderError::DomainNotFound {
                    provider: "huaweicloud".to_string(),
                    domain: "cdn.example.com".to_string(),
                    raw_message: Some("CDN.0170".to_string()),
                },
                "[huaweicloud] Domain 'cdn.example.com' not found: CDN.0170",
            ),
            (
                ProviderError::NotImplemented {
                    provider: "wangsu".to_string(),
                    operation: "purge_urls_cache".to_string(),
                },
                "[wangsu] Not implemented: purge_urls_cache",
            ),
            (
                ProviderError::MigrationFailed {
                    provider: "tencent".to_string(),
                    domain: "cdn.example.com".to_string(),
                    target_area: 1,
                    attempts: 3,
                    last_error: "busy".to_string(),
                },
                "[tencent] Migration of 'cdn.example.com' to area 1 failed after 3 attempts: busy",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn vendor_error_keeps_raw_code() {
        let with_code = ProviderError::VendorError {
            provider: "tencent".to_string(),
            raw_code: Some("FailedOperation.CdnConfigError".to_string()),
            raw_message: "config error".to_string(),
        };
        assert_eq!(
            with_code.to_string(),
            "[tencent] FailedOperation.CdnConfigError: config error"
        );

        let bare = ProviderError::VendorError {
            provider: "wangsu".to_string(),
            raw_code: None,
            raw_message: "something broke".to_string(),
        };
        assert_eq!(bare.to_string(), "[wangsu] something broke");
    }

    #[test]
    fn serialize_json_tagged() {
        let e = ProviderError::RateLimited {
            provider: "tencent".to_string(),
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }

    #[test]
    fn deserialize_all_variants() {
        let variants: Vec<ProviderError> = vec![
            ProviderError::NetworkError {
                provider: "t".into(),
                detail: "d".into(),
            },
            ProviderError::InvalidCredentials {
                provider: "t".into(),
                raw_message: None,
            },
            ProviderError::InvalidRequest {
                provider: "t".into(),
                detail: "bad".into(),
            },
            ProviderError::MutualExclusionViolation {
                provider: "t".into(),
                detail: "isp".into(),
            },
            ProviderError::QuotaExceeded {
                provider: "t".into(),
                raw_message: None,
            },
            ProviderError::RateLimited {
                provider: "t".into(),
                retry_after: Some(30),
                raw_message: None,
            },
            ProviderError::Timeout {
                provider: "t".into(),
                detail: "30s".into(),
            },
            ProviderError::DomainNotFound {
                provider: "t".into(),
                domain: "x.com".into(),
                raw_message: None,
            },
            ProviderError::TaskNotFound {
                provider: "t".into(),
                task_id: "1".into(),
                raw_message: None,
            },
            ProviderError::PermissionDenied {
                provider: "t".into(),
                raw_message: None,
            },
            ProviderError::NotImplemented {
                provider: "t".into(),
                operation: "op".into(),
            },
            ProviderError::ParseError {
                provider: "t".into(),
                detail: "bad".into(),
            },
            ProviderError::SerializationError {
                provider: "t".into(),
                detail: "fail".into(),
            },
            ProviderError::MigrationFailed {
                provider: "t".into(),
                domain: "x.com".into(),
                target_area: 1,
                attempts: 3,
                last_error: "e".into(),
            },
            ProviderError::VendorError {
                provider: "t".into(),
                raw_code: Some("E1".into()),
                raw_message: "oops".into(),
            },
        ];

        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: ProviderError = serde_json::from_str(&json).unwrap();
            assert_eq!(back.to_string(), v.to_string());
            assert_eq!(back.provider(), "t");
        }
    }

    #[test]
    fn expected_variants() {
        assert!(
            ProviderError::DomainNotFound {
                provider: "t".into(),
                domain: "x".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            ProviderError::MutualExclusionViolation {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
        assert!(
            !ProviderError::VendorError {
                provider: "t".into(),
                raw_code: None,
                raw_message: "x".into(),
            }
            .is_expected()
        );
        assert!(
            !ProviderError::Timeout {
                provider: "t".into(),
                detail: "x".into(),
            }
            .is_expected()
        );
    }
}
