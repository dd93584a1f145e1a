//! 腾讯云 CDN Provider

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

pub(crate) const TENCENT_CDN_HOST: &str = "cdn.tencentcloudapi.com";
pub(crate) const TENCENT_CDN_SERVICE: &str = "cdn";
pub(crate) const TENCENT_CDN_VERSION: &str = "2018-06-06";
/// `DescribeDomains` / `DescribePurgeTasks` 单页上限
pub(crate) const MAX_PAGE_SIZE: i64 = 1000;

/// 腾讯云 CDN Provider
///
/// 使用 TC3-HMAC-SHA256 签名的 JSON RPC 接口。
pub struct TencentProvider {
    pub(crate) client: Client,
    pub(crate) secret_id: String,
    pub(crate) secret_key: String,
    pub(crate) endpoint: String,
    pub(crate) max_retries: u32,
}

/// 腾讯云 CDN Provider Builder
pub struct TencentProviderBuilder {
    secret_id: String,
    secret_key: String,
    endpoint: String,
    max_retries: u32,
}

impl TencentProviderBuilder {
    fn new(secret_id: String, secret_key: String) -> Self {
        Self {
            secret_id,
            secret_key,
            endpoint: TENCENT_CDN_HOST.to_string(),
            max_retries: 2,
        }
    }

    /// 瞬时错误的最大自动重试次数（默认 2）
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// 覆盖 API 域名（默认 `cdn.tencentcloudapi.com`）
    #[must_use]
    pub fn endpoint(mut self, host: impl Into<String>) -> Self {
        self.endpoint = host.into();
        self
    }

    pub fn build(self) -> TencentProvider {
        log::debug!(
            "Building Tencent Cloud CDN provider (secret_id={}, endpoint={}, max_retries={})",
            mask_secret(&self.secret_id),
            self.endpoint,
            self.max_retries
        );
        TencentProvider {
            client: create_http_client(),
            secret_id: self.secret_id,
            secret_key: self.secret_key,
            endpoint: self.endpoint,
            max_retries: self.max_retries,
        }
    }
}

impl TencentProvider {
    pub fn new(secret_id: String, secret_key: String) -> Self {
        Self::builder(secret_id, secret_key).build()
    }

    pub fn builder(secret_id: String, secret_key: String) -> TencentProviderBuilder {
        TencentProviderBuilder::new(secret_id, secret_key)
    }
}
