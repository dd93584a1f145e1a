//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::traits::CdnProvider;
use crate::types::{ProviderCredentials, ProviderMetadata};

#[cfg(feature = "huaweicloud")]
use crate::providers::HuaweicloudProvider;
#[cfg(feature = "tencent")]
use crate::providers::TencentProvider;
#[cfg(feature = "wangsu")]
use crate::providers::WangsuProvider;

/// Creates a [`CdnProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn CdnProvider>` so it can be shared
/// across async tasks and handed to a [`DomainLifecycle`](crate::DomainLifecycle).
///
/// # Examples
///
/// ```rust,no_run
/// use cdn_orchestrator_provider::{create_provider, DomainOperations, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Tencent {
///     secret_id: "your-secret-id".to_string(),
///     secret_key: "your-secret-key".to_string(),
/// });
/// assert_eq!(provider.id(), "tencent");
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Arc<dyn CdnProvider> {
    match credentials {
        #[cfg(feature = "huaweicloud")]
        ProviderCredentials::Huaweicloud {
            access_key_id,
            secret_access_key,
        } => Arc::new(HuaweicloudProvider::new(access_key_id, secret_access_key)),
        #[cfg(feature = "tencent")]
        ProviderCredentials::Tencent {
            secret_id,
            secret_key,
        } => Arc::new(TencentProvider::new(secret_id, secret_key)),
        #[cfg(feature = "wangsu")]
        ProviderCredentials::Wangsu {
            access_key_id,
            secret_access_key,
        } => Arc::new(WangsuProvider::new(access_key_id, secret_access_key)),
    }
}

/// Returns metadata for all providers enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available providers
/// and their required credential fields.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "huaweicloud")]
        HuaweicloudProvider::metadata(),
        #[cfg(feature = "tencent")]
        TencentProvider::metadata(),
        #[cfg(feature = "wangsu")]
        WangsuProvider::metadata(),
    ]
}
