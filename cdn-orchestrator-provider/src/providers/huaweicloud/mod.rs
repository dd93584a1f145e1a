//! Huawei Cloud CDN Provider

mod builder;
mod error;
mod http;
mod mapping;
mod provider;
mod sign;
/// Huawei Cloud CDN API-specific request/response types.
pub(crate) mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

/// Huawei Cloud CDN API host.
pub(crate) const HUAWEICLOUD_CDN_HOST: &str = "cdn.myhuaweicloud.com";
/// Maximum page size of `ListDomains` / `ShowHistoryTasks`.
pub(crate) const MAX_PAGE_SIZE: i64 = 10_000;

/// Huawei Cloud CDN provider implementation.
///
/// Authenticates via AK/SK request signing (`SDK-HMAC-SHA256`).
///
/// # Construction
///
/// ```rust,no_run
/// use cdn_orchestrator_provider::HuaweicloudProvider;
///
/// let provider = HuaweicloudProvider::new(
///     "your-access-key-id".to_string(),
///     "your-secret-access-key".to_string(),
/// );
/// ```
pub struct HuaweicloudProvider {
    pub(crate) client: Client,
    pub(crate) access_key_id: String,
    pub(crate) secret_access_key: String,
    pub(crate) endpoint: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`HuaweicloudProvider`] with configurable retry behavior and endpoint.
pub struct HuaweicloudProviderBuilder {
    access_key_id: String,
    secret_access_key: String,
    endpoint: String,
    max_retries: u32,
}

impl HuaweicloudProviderBuilder {
    fn new(access_key_id: String, secret_access_key: String) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            endpoint: HUAWEICLOUD_CDN_HOST.to_string(),
            max_retries: 2,
        }
    }

    /// Set the maximum number of automatic retries for transient errors (default: 2).
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Override the API host (default: `cdn.myhuaweicloud.com`).
    #[must_use]
    pub fn endpoint(mut self, host: impl Into<String>) -> Self {
        self.endpoint = host.into();
        self
    }

    /// Build the [`HuaweicloudProvider`] instance.
    pub fn build(self) -> HuaweicloudProvider {
        log::debug!(
            "Building Huawei Cloud CDN provider (ak={}, endpoint={}, max_retries={})",
            mask_secret(&self.access_key_id),
            self.endpoint,
            self.max_retries
        );
        HuaweicloudProvider {
            client: create_http_client(),
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_access_key,
            endpoint: self.endpoint,
            max_retries: self.max_retries,
        }
    }
}

impl HuaweicloudProvider {
    /// Creates a new Huawei Cloud provider with default settings (2 retries).
    pub fn new(access_key_id: String, secret_access_key: String) -> Self {
        Self::builder(access_key_id, secret_access_key).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(access_key_id: String, secret_access_key: String) -> HuaweicloudProviderBuilder {
        HuaweicloudProviderBuilder::new(access_key_id, secret_access_key)
    }
}
