//! 更新动作
//!
//! `UpdateAction` 选择一次 `update_domain` 调用影响的配置子集。
//! 组合动作 `Recommend` / `Full` 在各厂商的构造器中展开为固定顺序的步骤表。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// 非厂商相关的本地错误使用的 provider 名称
pub(crate) const LOCAL_PROVIDER: &str = "orchestrator";

/// 配置更新动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum UpdateAction {
    /// 基础配置（IPv6）
    Base,
    /// 加速区域
    Area,
    OriginConf,
    OriginServer,
    OriginAdvance,
    OriginRequestHeader,
    OriginUrl,
    IpFilter,
    IpFrequency,
    Referer,
    UserAgent,
    Speed,
    Auth,
    RemoteAuth,
    CacheList,
    CacheCode,
    BrowserCache,
    UrlRewrite,
    ErrorPage,
    Compression,
    ResponseHeader,
    Https,
    /// 推荐配置组合
    Recommend,
    /// 全量配置
    Full,
}

impl UpdateAction {
    /// 全部 22 个原子动作
    pub const PRIMITIVES: [Self; 22] = [
        Self::Base,
        Self::Area,
        Self::OriginConf,
        Self::OriginServer,
        Self::OriginAdvance,
        Self::OriginRequestHeader,
        Self::OriginUrl,
        Self::IpFilter,
        Self::IpFrequency,
        Self::Referer,
        Self::UserAgent,
        Self::Speed,
        Self::Auth,
        Self::RemoteAuth,
        Self::CacheList,
        Self::CacheCode,
        Self::BrowserCache,
        Self::UrlRewrite,
        Self::ErrorPage,
        Self::Compression,
        Self::ResponseHeader,
        Self::Https,
    ];

    /// 动作的字符串名
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "update_cdn_domain_base_conf",
            Self::Area => "update_area",
            Self::OriginConf => "update_origin_conf",
            Self::OriginServer => "update_origin_server_conf",
            Self::OriginAdvance => "update_origin_advance_server_conf",
            Self::OriginRequestHeader => "update_origin_request_header_conf",
            Self::OriginUrl => "update_origin_url_conf",
            Self::IpFilter => "update_ip_filter_conf",
            Self::IpFrequency => "update_ip_frequency_conf",
            Self::Referer => "update_referer_conf",
            Self::UserAgent => "update_user_agent_conf",
            Self::Speed => "update_speed_conf",
            Self::Auth => "update_auth_conf",
            Self::RemoteAuth => "update_remote_auth_conf",
            Self::CacheList => "update_cache_list_conf",
            Self::CacheCode => "update_cache_code_conf",
            Self::BrowserCache => "update_browser_cache_conf",
            Self::UrlRewrite => "update_request_url_rewrite_conf",
            Self::ErrorPage => "update_custom_error_page_conf",
            Self::Compression => "update_intelligent_compression_conf",
            Self::ResponseHeader => "update_response_header_conf",
            Self::Https => "update_https_conf",
            Self::Recommend => "update_recommend_conf",
            Self::Full => "update_full_conf",
        }
    }

    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Recommend | Self::Full)
    }
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateAction {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIMITIVES
            .iter()
            .chain([Self::Recommend, Self::Full].iter())
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| ProviderError::InvalidRequest {
                provider: LOCAL_PROVIDER.to_string(),
                detail: format!("unknown update action '{s}'"),
            })
    }
}

impl TryFrom<String> for UpdateAction {
    type Error = ProviderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UpdateAction> for &'static str {
    fn from(action: UpdateAction) -> Self {
        action.as_str()
    }
}
