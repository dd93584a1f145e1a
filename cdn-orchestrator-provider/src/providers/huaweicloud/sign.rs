//! Huawei Cloud SDK-HMAC-SHA256 signature

use std::fmt::Write;

use crate::providers::common::{hmac_sha256, sha256_hex};
use crate::utils::log_sanitizer::truncate_for_log;

use super::HuaweicloudProvider;

/// 签名所需的请求要素
pub(crate) struct SignInput<'a> {
    pub method: &'a str,
    pub path: &'a str,
    /// 已编码的 query（`k=v&k=v`），顺序任意
    pub query: &'a str,
    pub headers: &'a [(&'a str, String)],
    pub payload: &'a str,
    /// `X-Sdk-Date`，格式 `%Y%m%dT%H%M%SZ`
    pub timestamp: &'a str,
}

/// 规范 URI：逐段编码，并以 `/` 结尾
fn canonical_uri(path: &str) -> String {
    let encoded = path
        .split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if encoded.ends_with('/') {
        encoded
    } else {
        format!("{encoded}/")
    }
}

/// 规范 query：按参数排序
fn canonical_query(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }
    let mut params: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
    params.sort_unstable();
    params.join("&")
}

impl HuaweicloudProvider {
    /// Generate Huawei Cloud SDK signature
    /// Reference: <https://support.huaweicloud.com/devg-apisign/api-sign-algorithm-005.html>
    pub(crate) fn sign(&self, input: &SignInput<'_>) -> String {
        let mut sorted_headers: Vec<(String, &str)> = input
            .headers
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.trim()))
            .collect();
        sorted_headers.sort_by(|a, b| a.0.cmp(&b.0));

        let canonical_headers =
            sorted_headers
                .iter()
                .fold(String::new(), |mut acc, (k, v)| {
                    let _ = writeln!(acc, "{k}:{v}");
                    acc
                });
        let signed_headers = sorted_headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            input.method,
            canonical_uri(input.path),
            canonical_query(input.query),
            canonical_headers,
            signed_headers,
            sha256_hex(input.payload.as_bytes())
        );
        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        let string_to_sign = format!(
            "SDK-HMAC-SHA256\n{}\n{}",
            input.timestamp,
            sha256_hex(canonical_request.as_bytes())
        );
        log::debug!("StringToSign:\n{string_to_sign}");

        let signature = hex::encode(hmac_sha256(
            self.secret_access_key.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        format!(
            "SDK-HMAC-SHA256 Access={}, SignedHeaders={}, Signature={}",
            self.access_key_id, signed_headers, signature
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "20240101T000000Z";

    fn provider_with_keys(ak: &str, sk: &str) -> HuaweicloudProvider {
        HuaweicloudProvider::new(ak.to_string(), sk.to_string())
    }

    fn headers() -> Vec<(&'static str, String)> {
        vec![
            ("Host", "cdn.myhuaweicloud.com".to_string()),
            ("X-Sdk-Date", TS.to_string()),
        ]
    }

    fn sign(p: &HuaweicloudProvider, method: &str, path: &str, query: &str) -> String {
        let headers = headers();
        p.sign(&SignInput {
            method,
            path,
            query,
            headers: &headers,
            payload: "",
            timestamp: TS,
        })
    }

    fn signature(auth: &str) -> Option<&str> {
        auth.split("Signature=").nth(1)
    }

    #[test]
    fn authorization_layout() {
        let p = provider_with_keys("MY-AK", "sk");
        let auth = sign(&p, "GET", "/v1.0/cdn/domains", "");
        assert!(auth.starts_with("SDK-HMAC-SHA256 Access=MY-AK, "));
        assert!(auth.contains("SignedHeaders=host;x-sdk-date,"));
        let sig = signature(&auth);
        assert_eq!(sig.map(str::len), Some(64), "unexpected auth: {auth}");
    }

    #[test]
    fn trailing_slash_and_query_order_do_not_matter() {
        let p = provider_with_keys("ak", "sk");
        let a = sign(&p, "GET", "/v1.0/cdn/domains", "page_size=10&page_number=1");
        let b = sign(&p, "GET", "/v1.0/cdn/domains/", "page_number=1&page_size=10");
        assert_eq!(signature(&a), signature(&b));
    }

    #[test]
    fn method_and_secret_change_signature() {
        let p1 = provider_with_keys("ak", "secret-one");
        let p2 = provider_with_keys("ak", "secret-two");
        let get = sign(&p1, "GET", "/v1.0/cdn/domains", "");
        let put = sign(&p1, "PUT", "/v1.0/cdn/domains", "");
        let other = sign(&p2, "GET", "/v1.0/cdn/domains", "");
        assert_ne!(signature(&get), signature(&put));
        assert_ne!(signature(&get), signature(&other));
    }

    #[test]
    fn canonical_parts() {
        assert_eq!(
            canonical_uri("/v1.0/cdn/configuration/domains/a.example.com/configs"),
            "/v1.0/cdn/configuration/domains/a.example.com/configs/"
        );
        assert_eq!(canonical_uri("/v1.0/cdn/a b"), "/v1.0/cdn/a%20b/");
        assert_eq!(canonical_query("b=2&a=1&"), "a=1&b=2");
        assert_eq!(canonical_query(""), "");
    }
}
