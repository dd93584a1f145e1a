//! 网宿 HTTP 请求方法

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::WangsuProvider;
use super::sign::CONTENT_TYPE;
use super::types::ErrorResponse;

impl WangsuProvider {
    // ==================== 辅助方法 ====================

    /// 统一处理网宿响应错误
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if is_success(status) {
            return Ok(());
        }

        let raw = match serde_json::from_str::<ErrorResponse>(response_text)
            .ok()
            .and_then(ErrorResponse::into_parts)
        {
            Some((code, message)) => RawApiError::with_code(code, message),
            // 没有错误体时按状态码映射
            None => RawApiError::with_code(
                status.to_string(),
                format!("HTTP {status}: {response_text}"),
            ),
        };
        Err(self.map_error(raw, ctx))
    }

    /// 签名并发送请求，返回 (状态码, 响应文本)
    async fn send(
        &self,
        method: &str,
        uri: &str,
        payload: Option<String>,
        ctx: ErrorContext,
    ) -> Result<(u16, String)> {
        let timestamp = Utc::now().timestamp();
        let body = payload.unwrap_or_default();
        if !body.is_empty() {
            log::debug!("Request Body: {body}");
        }

        let authorization = self.sign(method, uri, &body, timestamp);
        let url = format!("https://{}{uri}", self.endpoint);

        let mut request = match method {
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            _ => self.client.get(&url),
        };
        request = request
            .header("Host", &self.endpoint)
            .header("Content-Type", CONTENT_TYPE)
            .header("x-cnc-accesskey", &self.access_key_id)
            .header("x-cnc-timestamp", timestamp.to_string())
            .header("x-cnc-auth-method", "AKSK")
            .header("Authorization", authorization);
        if !body.is_empty() {
            request = request.body(body);
        }

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            method,
            &url,
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        Ok((status, response_text))
    }

    // ==================== 公开 API 方法 ====================

    /// 执行 GET 请求
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        uri: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let (_, text) = self.send("GET", uri, None, ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 POST 请求，返回状态码与响应文本
    ///
    /// 创建域名以 202 表示受理，调用方需要自行检查状态码。
    pub(crate) async fn post_status<B: Serialize>(
        &self,
        uri: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<(u16, String)> {
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        self.send("POST", uri, Some(payload), ctx).await
    }

    /// 执行 PUT 请求，忽略响应体
    pub(crate) async fn put<B: Serialize>(
        &self,
        uri: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<()> {
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        self.send("PUT", uri, Some(payload), ctx).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;

    fn provider() -> WangsuProvider {
        WangsuProvider::new("ak".to_string(), "sk".to_string())
    }

    #[test]
    fn structured_error_is_mapped() {
        let body = r#"{"code":"NoSuchDomain","message":"domain not exist"}"#;
        let r = provider().handle_response_error(400, body, ErrorContext::domain("x.com"));
        assert!(
            matches!(&r, Err(ProviderError::DomainNotFound { domain, .. }) if domain == "x.com"),
            "unexpected result: {r:?}"
        );
    }

    #[test]
    fn bare_status_falls_back_to_status_code() {
        let r = provider().handle_response_error(401, "", ErrorContext::default());
        assert!(
            matches!(&r, Err(ProviderError::InvalidCredentials { .. })),
            "unexpected result: {r:?}"
        );

        let r = provider().handle_response_error(500, "oops", ErrorContext::default());
        assert!(
            matches!(
                &r,
                Err(ProviderError::VendorError { raw_code: Some(code), raw_message, .. })
                    if code == "500" && raw_message == "HTTP 500: oops"
            ),
            "unexpected result: {r:?}"
        );
    }

    #[test]
    fn accepted_is_success() {
        assert!(provider().handle_response_error(202, "", ErrorContext::default()).is_ok());
    }
}
