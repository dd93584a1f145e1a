//! 腾讯云 HTTP 请求方法

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::TencentResponse;
use super::{TENCENT_CDN_VERSION, TencentProvider};

impl TencentProvider {
    /// 执行腾讯云 API 请求
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        // 1. 序列化请求体
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        log::debug!("Request Body: {payload}");

        // 2. 生成签名
        let timestamp = Utc::now().timestamp();
        let authorization = self.sign(action, &payload, timestamp);

        // 3. 发送请求
        let url = format!("https://{}", self.endpoint);
        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json; charset=utf-8")
            .header("Host", &self.endpoint)
            .header("X-TC-Action", action)
            .header("X-TC-Version", TENCENT_CDN_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("Authorization", authorization)
            .body(payload);

        let (_status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "POST",
            &format!("Action: {action}"),
            self.max_retries,
        )
        .await?;

        self.parse_response(&response_text, ctx)
    }

    /// 解析 `{"Response": {...}}`，业务错误映射为 `ProviderError`
    fn parse_response<T: DeserializeOwned>(&self, text: &str, ctx: ErrorContext) -> Result<T> {
        let response: TencentResponse<T> = HttpUtils::parse_json(text, self.provider_name())?;

        if let Some(error) = response.response.error {
            log::error!("API error: {} - {}", error.code, error.message);
            return Err(self.map_error(RawApiError::with_code(error.code, error.message), ctx));
        }

        response
            .response
            .data
            .ok_or_else(|| self.parse_error("Missing data in response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::tencent::types::TaskIdResponse;

    fn provider() -> TencentProvider {
        TencentProvider::new("id".to_string(), "key".to_string())
    }

    #[test]
    fn business_error_is_mapped() {
        let body = r#"{"Response":{"Error":{"Code":"ResourceNotFound.CdnHostNotExists","Message":"no host"},"RequestId":"x"}}"#;
        let r: Result<TaskIdResponse> =
            provider().parse_response(body, ErrorContext::domain("a.com"));
        assert!(
            matches!(&r, Err(ProviderError::DomainNotFound { domain, .. }) if domain == "a.com"),
            "unexpected result: {r:?}"
        );
    }

    #[test]
    fn data_is_extracted() {
        let body = r#"{"Response":{"TaskId":"t-1","RequestId":"x"}}"#;
        let r: Result<TaskIdResponse> = provider().parse_response(body, ErrorContext::default());
        let Ok(data) = r else {
            panic!("unexpected result: {r:?}");
        };
        assert_eq!(data.task_id, "t-1");
    }

    #[test]
    fn garbage_is_parse_error() {
        let r: Result<TaskIdResponse> =
            provider().parse_response("<html>", ErrorContext::default());
        assert!(
            matches!(&r, Err(ProviderError::ParseError { .. })),
            "unexpected result: {r:?}"
        );
    }
}
