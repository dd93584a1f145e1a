//! # cdn-orchestrator-provider
//!
//! A unified CDN provider abstraction library: one canonical domain configuration
//! model and operation set, translated into the wire schemas of several cloud CDN
//! platforms.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Huawei Cloud CDN](https://www.huaweicloud.com/product/cdn.html) | `huaweicloud` | SDK-HMAC-SHA256 (AK/SK) |
//! | [Tencent Cloud CDN](https://cloud.tencent.com/product/cdn) | `tencent` | TC3-HMAC-SHA256 |
//! | [Wangsu CDN](https://www.wangsu.com/) | `wangsu` | CNC-HMAC-SHA256 (AK/SK) |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`all-providers`** *(default)*: Enable all providers listed above.
//! - **`huaweicloud`**: Enable only the Huawei Cloud CDN provider.
//! - **`tencent`**: Enable only the Tencent Cloud CDN provider.
//! - **`wangsu`**: Enable only the Wangsu CDN provider.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cdn_orchestrator_provider::{
//!     create_provider, CacheRule, CacheUnit, CdnProvider, DomainConfig,
//!     DomainOperations, ProviderCredentials, RuleType, UpdateAction, UpdateDomainRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Huaweicloud {
//!         access_key_id: "your-ak".to_string(),
//!         secret_access_key: "your-sk".to_string(),
//!     });
//!
//!     if !provider.validate_credentials().await? {
//!         return Err("invalid credentials".into());
//!     }
//!
//!     // Cache every .jpg for one day
//!     let config = DomainConfig {
//!         cache_rules: Some(vec![CacheRule {
//!             rule_type: RuleType::FileSuffix,
//!             content: vec!["jpg".to_string()],
//!             ttl: 1,
//!             unit: CacheUnit::Day,
//!             ..CacheRule::default()
//!         }]),
//!         ..DomainConfig::default()
//!     };
//!     provider
//!         .update_domain(&UpdateDomainRequest::new(
//!             UpdateAction::CacheList,
//!             "cdn.example.com",
//!             config,
//!         ))
//!         .await?;
//!
//!     let detail = provider.show_domain_detail("cdn.example.com").await?;
//!     println!("{} -> {} ({:?})", detail.domain, detail.cname, detail.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Domain Lifecycle
//!
//! [`DomainLifecycle`] wraps any provider and makes creation, area migration and
//! deletion idempotent:
//!
//! ```rust,no_run
//! # use cdn_orchestrator_provider::*;
//! # async fn example(provider: std::sync::Arc<dyn CdnProvider>) -> Result<()> {
//! let lifecycle = DomainLifecycle::new(provider);
//! let request = CreateDomainRequest {
//!     domain: "cdn.example.com".to_string(),
//!     area_code: AreaCode::Oversea,
//!     sources: vec![OriginServer {
//!         address: "1.2.3.4".to_string(),
//!         ..OriginServer::default()
//!     }],
//!     ..CreateDomainRequest::default()
//! };
//! let result = lifecycle.create_or_reconcile(&request).await?;
//! if let Some(migration) = result.migration {
//!     println!("migration outcome: {:?}", migration.wait().await?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! The error enum provides structured variants for common failure modes:
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::DomainNotFound`]: the domain does not exist at the vendor
//! - [`ProviderError::NotImplemented`]: the vendor does not offer the operation
//! - [`ProviderError::RateLimited`]: API rate limit exceeded (retryable)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff. See [`ProviderError`] for the full list.

mod error;
mod factory;
mod http_client;
mod lifecycle;
mod metrics;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::{create_provider, get_all_provider_metadata};

// Re-export public traits (the error mapper stays internal)
pub use traits::{CdnProvider, DomainOperations};

// Re-export the lifecycle controller
pub use lifecycle::{
    DomainLifecycle, ExhaustedPolicy, MigrationHandle, MigrationOutcome, MigrationPolicy,
    ReconcileAction, Reconciliation,
};

// Re-export types
pub use types::*;

// Re-export utils module
pub use utils::time;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "huaweicloud")]
pub use providers::{HuaweicloudProvider, HuaweicloudProviderBuilder};

#[cfg(feature = "tencent")]
pub use providers::{TencentProvider, TencentProviderBuilder};

#[cfg(feature = "wangsu")]
pub use providers::{WangsuProvider, WangsuProviderBuilder};
