//! Shared HTTP plumbing for the CDN adapters
//!
//! Every adapter signs and builds its own `RequestBuilder`; this module only owns
//! what is identical across vendors: sending, classifying transport failures,
//! logging, retrying transient errors and decoding JSON.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound honoured for a vendor supplied `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Upper bound of the exponential backoff.
const MAX_BACKOFF_MS: u64 = 10_000;

/// HTTP helper functions
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request once and returns `(status, body)`.
    ///
    /// Every status that [`transient_status_error`] does not claim is returned to
    /// the caller, which owns the vendor specific error body format.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(&e, provider_name))?;

        let status = response.status().as_u16();
        // 读取 body 之前先取出 Retry-After
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;
        log::debug!(
            "[{provider_name}] HTTP {status} <- {url_or_action}: {}",
            truncate_for_log(&body)
        );

        match transient_status_error(status, retry_after, &body, provider_name) {
            Some(err) => {
                log::warn!("[{provider_name}] {method_name} {url_or_action}: {err}");
                Err(err)
            }
            None => Ok((status, body)),
        }
    }

    /// Decodes a JSON body, mapping failures to `ParseError`.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Serializes a request body, mapping failures to `SerializationError`.
    pub fn to_json<T>(body: &T, provider_name: &str) -> Result<String, ProviderError>
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        })
    }

    /// Like [`execute_request`](Self::execute_request), retrying transient failures.
    ///
    /// `max_retries = 0` sends exactly once. Only `NetworkError`, `Timeout` and
    /// `RateLimited` are retried; vendor errors are returned immediately.
    /// Delays: `Retry-After` (capped at 30s) when present, otherwise
    /// 100ms, 200ms, 400ms, ... capped at 10s.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(
                request_builder,
                provider_name,
                method_name,
                url_or_action,
            )
            .await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder 只能发送一次，每轮克隆
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return Self::execute_request(
                    request_builder,
                    provider_name,
                    method_name,
                    url_or_action,
                )
                .await;
            };

            match Self::execute_request(req, provider_name, method_name, url_or_action).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        provider_name,
                        method_name,
                        url_or_action,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

fn transport_error(e: &reqwest::Error, provider_name: &str) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: e.to_string(),
        }
    }
}

/// 429 与网关类 5xx 转成可重试错误，其余状态码交给各厂商解析
fn transient_status_error(
    status: u16,
    retry_after: Option<u64>,
    body: &str,
    provider_name: &str,
) -> Option<ProviderError> {
    match status {
        429 => Some(ProviderError::RateLimited {
            provider: provider_name.to_string(),
            retry_after,
            raw_message: (!body.is_empty()).then(|| body.to_string()),
        }),
        502..=504 => Some(ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("HTTP {status}: {}", truncate_for_log(body)),
        }),
        _ => None,
    }
}

/// Whether the HTTP status is a 2xx.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    // 2^20 以上没有意义，且避免移位溢出
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
