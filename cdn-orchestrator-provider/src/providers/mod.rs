//! CDN Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "huaweicloud")]
mod huaweicloud;
#[cfg(feature = "tencent")]
mod tencent;
#[cfg(feature = "wangsu")]
mod wangsu;

#[cfg(feature = "huaweicloud")]
pub use huaweicloud::{HuaweicloudProvider, HuaweicloudProviderBuilder};
#[cfg(feature = "tencent")]
pub use tencent::{TencentProvider, TencentProviderBuilder};
#[cfg(feature = "wangsu")]
pub use wangsu::{WangsuProvider, WangsuProviderBuilder};
