//! 网宿 CNC-HMAC-SHA256 (AK/SK) 签名

use crate::providers::common::{hmac_sha256, sha256_hex};
use crate::utils::log_sanitizer::truncate_for_log;

use super::WangsuProvider;

pub(crate) const SIGN_ALGORITHM: &str = "CNC-HMAC-SHA256";
/// 参与签名的头部，已按字母序排列
pub(crate) const SIGNED_HEADERS: &str = "content-type;host";
pub(crate) const CONTENT_TYPE: &str = "application/json";

/// 规范 query：POST 不带 query，其余取 `?` 之后的部分并解码
fn canonical_query(method: &str, uri: &str) -> String {
    if method == "POST" {
        return String::new();
    }
    uri.split_once('?')
        .map(|(_, q)| {
            urlencoding::decode(q).map_or_else(|_| q.to_string(), |d| d.into_owned())
        })
        .unwrap_or_default()
}

impl WangsuProvider {
    /// 生成 `Authorization` 头
    ///
    /// `uri` 为带 query 的请求路径，`timestamp` 为 Unix 秒（同 `x-cnc-timestamp`）。
    /// GET 请求的 payload 按空串计算摘要。
    pub(crate) fn sign(&self, method: &str, uri: &str, payload: &str, timestamp: i64) -> String {
        let payload = if method == "GET" { "" } else { payload };
        let path = uri.split_once('?').map_or(uri, |(p, _)| p);

        let canonical_headers = format!(
            "content-type:{}\nhost:{}\n",
            CONTENT_TYPE,
            self.endpoint.to_lowercase()
        );
        let canonical_request = format!(
            "{method}\n{path}\n{}\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
            canonical_query(method, uri),
            sha256_hex(payload.as_bytes())
        );
        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        let string_to_sign = format!(
            "{SIGN_ALGORITHM}\n{timestamp}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );
        let signature = hex::encode(hmac_sha256(
            self.secret_access_key.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        format!(
            "{SIGN_ALGORITHM} Credential={}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.access_key_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1_704_067_200;

    fn provider(ak: &str, sk: &str) -> WangsuProvider {
        WangsuProvider::new(ak.to_string(), sk.to_string())
    }

    fn signature(auth: &str) -> Option<&str> {
        auth.split("Signature=").nth(1)
    }

    #[test]
    fn authorization_layout() {
        let auth = provider("MY-AK", "sk").sign("GET", "/api/domain", "", TS);
        assert!(auth.starts_with("CNC-HMAC-SHA256 Credential=MY-AK, "));
        assert!(auth.contains("SignedHeaders=content-type;host, "));
        assert_eq!(signature(&auth).map(str::len), Some(64), "unexpected auth: {auth}");
    }

    #[test]
    fn get_ignores_payload() {
        let p = provider("ak", "sk");
        let a = p.sign("GET", "/api/domain", "", TS);
        let b = p.sign("GET", "/api/domain", "{\"x\":1}", TS);
        assert_eq!(signature(&a), signature(&b));

        let c = p.sign("POST", "/api/domain", "", TS);
        let d = p.sign("POST", "/api/domain", "{\"x\":1}", TS);
        assert_ne!(signature(&c), signature(&d));
    }

    #[test]
    fn timestamp_and_secret_change_signature() {
        let a = provider("ak", "one").sign("PUT", "/api/config/cachetime/a.com", "[]", TS);
        let b = provider("ak", "two").sign("PUT", "/api/config/cachetime/a.com", "[]", TS);
        let c = provider("ak", "one").sign("PUT", "/api/config/cachetime/a.com", "[]", TS + 1);
        assert_ne!(signature(&a), signature(&b));
        assert_ne!(signature(&a), signature(&c));
    }

    #[test]
    fn query_is_decoded_except_for_post() {
        assert_eq!(canonical_query("GET", "/api/domain?cname_label=a%20b"), "cname_label=a b");
        assert_eq!(canonical_query("POST", "/api/domain?x=1"), "");
        assert_eq!(canonical_query("GET", "/api/domain"), "");
    }
}
