//! Log sanitization utilities
//!
//! Keeps certificate material, private keys and access secrets that travel
//! through request/response bodies from being fully exposed in logs.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters kept visible by [`mask_secret`].
const MASK_VISIBLE_PREFIX: usize = 4;

/// Cut a body down to [`TRUNCATE_LIMIT`] bytes for logging.
///
/// The cut lands on a char boundary and the suffix records the full length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a credential for logging, keeping at most a short prefix.
///
/// Short secrets are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= MASK_VISIBLE_PREFIX * 2 {
        return "*".repeat(count.max(1));
    }
    let prefix: String = secret.chars().take(MASK_VISIBLE_PREFIX).collect();
    format!("{prefix}****")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_within_limit_are_kept() {
        assert_eq!(truncate_for_log("{}"), "{}");
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.ends_with(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));

        // 3 字节字符，256 不是边界
        let s = "证".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.starts_with(&"证".repeat(85)));
        assert!(result.contains("... [truncated, total 600 bytes]"));
    }

    #[test]
    fn mask_long_secret() {
        assert_eq!(mask_secret("AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE"), "AKID****");
    }

    #[test]
    fn mask_short_secret_fully() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "*");
    }
}
