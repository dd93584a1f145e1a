//! 网宿 CDN Provider
//!
//! 只覆盖域名生命周期与按功能拆分的配置接口；刷新预热、统计等接口返回 `NotImplemented`。

mod builder;
mod error;
mod http;
mod mapping;
mod provider;
mod sign;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) const WANGSU_CDN_HOST: &str = "open.chinanetcenter.com";
/// `GET /api/domain` 一次返回全部域名，本地分页上限
pub(crate) const MAX_PAGE_SIZE: i64 = 500;

/// 网宿 CDN Provider
///
/// 使用 CNC-HMAC-SHA256 AK/SK 签名的 JSON REST 接口。
pub struct WangsuProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    pub(crate) endpoint: String,
    pub(crate) max_retries: u32,
}

/// 网宿 CDN Provider Builder
pub struct WangsuProviderBuilder {
    access_key_id: String,
    secret_access_key: String,
    endpoint: String,
    max_retries: u32,
}

impl WangsuProviderBuilder {
    fn new(access_key_id: String, secret_access_key: String) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            endpoint: WANGSU_CDN_HOST.to_string(),
            max_retries: 2,
        }
    }

    /// 瞬时错误的最大自动重试次数（默认 2）
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// 覆盖 API 域名（默认 `open.chinanetcenter.com`），空串保持默认
    #[must_use]
    pub fn endpoint(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        if !host.is_empty() {
            self.endpoint = host;
        }
        self
    }

    pub fn build(self) -> WangsuProvider {
        log::debug!(
            "Building Wangsu CDN provider (access_key_id={}, endpoint={}, max_retries={})",
            mask_secret(&self.access_key_id),
            self.endpoint,
            self.max_retries
        );
        WangsuProvider {
            client: create_http_client(),
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            endpoint: self.endpoint,
            max_retries: self.max_retries,
        }
    }
}

impl WangsuProvider {
    pub fn new(access_key_id: String, secret_access_key: String) -> Self {
        Self::builder(access_key_id, secret_access_key).build()
    }

    pub fn builder(access_key_id: String, secret_access_key: String) -> WangsuProviderBuilder {
        WangsuProviderBuilder::new(access_key_id, secret_access_key)
    }
}
