//! 华为云 HTTP 请求方法

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, is_success};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::HuaweicloudProvider;
use super::sign::SignInput;
use super::types::ErrorResponse;

impl HuaweicloudProvider {
    // ==================== 辅助方法 ====================

    /// 统一处理华为云响应错误
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if is_success(status) {
            return Ok(());
        }

        // 尝试解析结构化错误
        if let Some((code, message)) = serde_json::from_str::<ErrorResponse>(response_text)
            .ok()
            .and_then(ErrorResponse::into_parts)
        {
            return Err(self.map_error(RawApiError::with_code(code, message), ctx));
        }

        // 没有错误体的 404
        if status == 404 {
            if let Some(task_id) = ctx.task_id {
                return Err(ProviderError::TaskNotFound {
                    provider: self.provider_name().to_string(),
                    task_id,
                    raw_message: Some(response_text.to_string()),
                });
            }
        }

        // 回退到通用错误
        Err(self.unknown_error(RawApiError::new(format!("HTTP {status}: {response_text}"))))
    }

    /// 签名并发送请求，返回原始响应文本
    async fn send(
        &self,
        method: &str,
        path: &str,
        query: &str,
        payload: Option<String>,
        ctx: ErrorContext,
    ) -> Result<String> {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let body = payload.unwrap_or_default();

        let mut headers = vec![
            ("Host", self.endpoint.clone()),
            ("X-Sdk-Date", timestamp.clone()),
        ];
        if !body.is_empty() {
            headers.push(("Content-Type", "application/json".to_string()));
            log::debug!("Request Body: {body}");
        }

        let authorization = self.sign(&SignInput {
            method,
            path,
            query,
            headers: &headers,
            payload: &body,
            timestamp: &timestamp,
        });

        let url = if query.is_empty() {
            format!("https://{}{path}", self.endpoint)
        } else {
            format!("https://{}{path}?{query}", self.endpoint)
        };

        let mut request = match method {
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            _ => self.client.get(&url),
        };
        for (name, value) in &headers {
            request = request.header(*name, value);
        }
        request = request.header("Authorization", authorization);
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
        Ok(response_text)
    }

    // ==================== 公开 API 方法 ====================

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let text = self.send("GET", path, query, None, ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = HttpUtils::to_json(body, self.provider_name())?;
        let text = self.send("POST", path, "", Some(payload), ctx).await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 执行 PUT 请求，忽略响应体
    pub(crate) async fn put<B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<()> {
        let payload = body
            .map(|b| HttpUtils::to_json(b, self.provider_name()))
            .transpose()?;
        self.send("PUT", path, "", payload, ctx).await.map(|_| ())
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.send("DELETE", path, "", None, ctx).await.map(|_| ())
    }
}

/// 拼接 query，值做 URL 编码
pub(crate) fn build_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
