//! Provider 公共工具函数

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build HTTP client with timeouts, using defaults: {e}");
            Client::new()
        })
}

// ============ 摘要 / HMAC ============

/// HMAC-SHA256 计算（供 huaweicloud/tencent/wangsu 使用）
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC 接受任意长度的 key
    <HmacSha256 as Mac>::new_from_slice(key)
        .map(|mut mac| {
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        })
        .unwrap_or_default()
}

/// SHA256 十六进制小写摘要
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

// ============ 规则内容处理 ============

/// 缓存参数列表下发的最大条数
pub const MAX_CACHE_PARAMETERS: usize = 10;

/// 截取前 [`MAX_CACHE_PARAMETERS`] 个参数，多余的静默丢弃
pub fn truncate_parameters(values: &[String]) -> &[String] {
    &values[..values.len().min(MAX_CACHE_PARAMETERS)]
}

/// 给每个文件后缀加上前导 `.`（已带 `.` 的保持不变）
pub fn dotted_suffixes(suffixes: &[String]) -> Vec<String> {
    suffixes
        .iter()
        .map(|s| {
            if s.starts_with('.') {
                s.clone()
            } else {
                format!(".{s}")
            }
        })
        .collect()
}
