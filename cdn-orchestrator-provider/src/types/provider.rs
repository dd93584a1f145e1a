use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// A paginated response wrapper.
///
/// Returned by all list operations (domain status lists, purge/push task lists).
/// Contains the current page of items along with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub page: i64,
    /// Page size used for this request.
    pub page_size: i64,
    /// Total number of items across all pages.
    pub total_count: i64,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<T>, page: i64, page_size: i64, total_count: i64) -> Self {
        let has_more = page.saturating_mul(page_size) < total_count;
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more,
        }
    }
}

// ============ Provider Types ============

/// Identifies which CDN provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Huawei Cloud CDN. Requires feature `huaweicloud`.
    #[cfg(feature = "huaweicloud")]
    Huaweicloud,
    /// Tencent Cloud CDN. Requires feature `tencent`.
    #[cfg(feature = "tencent")]
    Tencent,
    /// Wangsu (ChinaNetCenter) CDN. Requires feature `wangsu`.
    #[cfg(feature = "wangsu")]
    Wangsu,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud => write!(f, "huaweicloud"),
            #[cfg(feature = "tencent")]
            Self::Tencent => write!(f, "tencent"),
            #[cfg(feature = "wangsu")]
            Self::Wangsu => write!(f, "wangsu"),
        }
    }
}

impl ProviderType {
    /// 凭证字段 `(key, label)`：先是 ID，再是密钥
    pub fn credential_keys(&self) -> [(&'static str, &'static str); 2] {
        match self {
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud => [
                ("accessKeyId", "Access Key ID"),
                ("secretAccessKey", "Secret Access Key"),
            ],
            #[cfg(feature = "tencent")]
            Self::Tencent => [("secretId", "Secret ID"), ("secretKey", "Secret Key")],
            #[cfg(feature = "wangsu")]
            Self::Wangsu => [
                ("accessKeyId", "Access Key ID"),
                ("secretAccessKey", "Secret Access Key"),
            ],
        }
    }

    /// UI 用的凭证字段描述，密钥字段按密码框渲染
    pub fn credential_fields(&self) -> Vec<ProviderCredentialField> {
        let [(id_key, id_label), (secret_key, secret_label)] = self.credential_keys();
        vec![
            ProviderCredentialField {
                key: id_key.to_string(),
                label: id_label.to_string(),
                field_type: FieldType::Text,
                placeholder: Some(format!("输入 {id_label}")),
                help_text: None,
            },
            ProviderCredentialField {
                key: secret_key.to_string(),
                label: secret_label.to_string(),
                field_type: FieldType::Password,
                placeholder: Some(format!("输入 {secret_label}")),
                help_text: None,
            },
        ]
    }
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"secretId"`).
    pub key: String,
    /// Human-readable label (e.g., `"Secret ID"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Capabilities a provider actually implements.
///
/// Operations outside these flags return
/// [`ProviderError::NotImplemented`](crate::ProviderError::NotImplemented).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeatures {
    /// Domain deletion.
    pub delete_domain: bool,
    /// Cache purge and prefetch tasks.
    pub purge: bool,
    /// Domain ownership verification records.
    pub domain_verification: bool,
    /// Access/origin statistics, top URLs and region distribution.
    pub statistics: bool,
}

/// Provider-specific pagination limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLimits {
    /// Maximum page size for domain list requests.
    pub max_page_size_domains: i64,
    /// Maximum page size for purge/push task list requests.
    pub max_page_size_tasks: i64,
}

/// Static metadata describing a CDN provider.
///
/// Obtain via [`CdnProvider::metadata()`](crate::CdnProvider::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Credential fields required to authenticate with this provider.
    pub required_fields: Vec<ProviderCredentialField>,
    /// Feature flags for this provider.
    pub features: ProviderFeatures,
    /// API pagination limits for this provider.
    pub limits: ProviderLimits,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    #[error("Missing required field: {label}")]
    MissingField {
        provider: ProviderType,
        field: String,
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    #[error("Field must not be empty: {label}")]
    EmptyField {
        provider: ProviderType,
        field: String,
        label: String,
    },
}

/// Type-safe credential container for all supported CDN providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// # Serialization
///
/// ```json
/// { "provider": "tencent", "credentials": { "secret_id": "...", "secret_key": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Huawei Cloud credentials. Requires feature `huaweicloud`.
    #[cfg(feature = "huaweicloud")]
    #[serde(rename = "huaweicloud")]
    Huaweicloud {
        /// Huawei Cloud Access Key ID.
        access_key_id: String,
        /// Huawei Cloud Secret Access Key.
        secret_access_key: String,
    },

    /// Tencent Cloud credentials. Requires feature `tencent`.
    #[cfg(feature = "tencent")]
    #[serde(rename = "tencent")]
    Tencent {
        /// Tencent Cloud Secret ID.
        secret_id: String,
        /// Tencent Cloud Secret Key.
        secret_key: String,
    },

    /// Wangsu credentials. Requires feature `wangsu`.
    #[cfg(feature = "wangsu")]
    #[serde(rename = "wangsu")]
    Wangsu {
        /// Wangsu API access key.
        access_key_id: String,
        /// Wangsu API secret key.
        secret_access_key: String,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a flat key-value map, validating required fields.
    ///
    /// Keys follow [`ProviderType::credential_keys`].
    pub fn from_map(
        provider: &ProviderType,
        map: &HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        let [id_field, secret_field] = provider.credential_keys();
        let id = required_field(provider, map, id_field)?;
        let secret = required_field(provider, map, secret_field)?;
        Ok(match provider {
            #[cfg(feature = "huaweicloud")]
            ProviderType::Huaweicloud => Self::Huaweicloud {
                access_key_id: id,
                secret_access_key: secret,
            },
            #[cfg(feature = "tencent")]
            ProviderType::Tencent => Self::Tencent {
                secret_id: id,
                secret_key: secret,
            },
            #[cfg(feature = "wangsu")]
            ProviderType::Wangsu => Self::Wangsu {
                access_key_id: id,
                secret_access_key: secret,
            },
        })
    }

    /// Flatten into the same key-value shape [`from_map`](Self::from_map) accepts.
    pub fn to_map(&self) -> HashMap<String, String> {
        let [(id_key, _), (secret_key, _)] = self.provider_type().credential_keys();
        let (id, secret) = self.key_pair();
        HashMap::from([
            (id_key.to_string(), id.to_string()),
            (secret_key.to_string(), secret.to_string()),
        ])
    }

    /// Returns the [`ProviderType`] corresponding to this credential variant.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud { .. } => ProviderType::Huaweicloud,
            #[cfg(feature = "tencent")]
            Self::Tencent { .. } => ProviderType::Tencent,
            #[cfg(feature = "wangsu")]
            Self::Wangsu { .. } => ProviderType::Wangsu,
        }
    }

    fn key_pair(&self) -> (&str, &str) {
        match self {
            #[cfg(feature = "huaweicloud")]
            Self::Huaweicloud {
                access_key_id,
                secret_access_key,
            } => (access_key_id, secret_access_key),
            #[cfg(feature = "tencent")]
            Self::Tencent {
                secret_id,
                secret_key,
            } => (secret_id, secret_key),
            #[cfg(feature = "wangsu")]
            Self::Wangsu {
                access_key_id,
                secret_access_key,
            } => (access_key_id, secret_access_key),
        }
    }
}

fn required_field(
    provider: &ProviderType,
    map: &HashMap<String, String>,
    (key, label): (&str, &str),
) -> Result<String, CredentialValidationError> {
    match map.get(key) {
        None => Err(CredentialValidationError::MissingField {
            provider: provider.clone(),
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
            provider: provider.clone(),
            field: key.to_string(),
            label: label.to_string(),
        }),
        Some(v) => Ok(v.clone()),
    }
}

#[cfg(all(test, feature = "all-providers"))]
mod tests {
    use super::*;

    // ============ ProviderCredentials ============

    #[test]
    fn credentials_map_round_trip() {
        for (provider, id_key, secret_key) in [
            (ProviderType::Huaweicloud, "accessKeyId", "secretAccessKey"),
            (ProviderType::Tencent, "secretId", "secretKey"),
            (ProviderType::Wangsu, "accessKeyId", "secretAccessKey"),
        ] {
            let map: HashMap<String, String> = [
                (id_key.to_string(), "id".to_string()),
                (secret_key.to_string(), "secret".to_string()),
            ]
            .into();
            let res = ProviderCredentials::from_map(&provider, &map);
            assert!(res.is_ok(), "{provider}: expected Ok(..), got {res:?}");
            let Ok(cred) = res else {
                return;
            };
            assert_eq!(cred.provider_type(), provider);
            assert_eq!(cred.to_map(), map);
        }
    }

    #[test]
    fn credential_fields_follow_keys() {
        let fields = ProviderType::Tencent.credential_fields();
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["secretId", "secretKey"]);
        assert_eq!(fields[1].field_type, FieldType::Password);
        assert_eq!(fields[0].placeholder.as_deref(), Some("输入 Secret ID"));
    }

    #[test]
    fn credentials_missing_field() {
        let map: HashMap<String, String> = [("secretId".to_string(), "sid".to_string())].into();
        let res = ProviderCredentials::from_map(&ProviderType::Tencent, &map);
        assert!(
            matches!(&res, Err(CredentialValidationError::MissingField { field, .. }) if field == "secretKey"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_empty_field() {
        let map: HashMap<String, String> = [
            ("accessKeyId".to_string(), "  ".to_string()),
            ("secretAccessKey".to_string(), "sk".to_string()),
        ]
        .into();
        let res = ProviderCredentials::from_map(&ProviderType::Huaweicloud, &map);
        assert!(
            matches!(&res, Err(CredentialValidationError::EmptyField { .. })),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn credentials_serde_tagged() {
        let cred = ProviderCredentials::Tencent {
            secret_id: "a".to_string(),
            secret_key: "b".to_string(),
        };
        let json = serde_json::to_string(&cred).unwrap();
        assert_eq!(
            json,
            r#"{"provider":"tencent","credentials":{"secret_id":"a","secret_key":"b"}}"#
        );
    }

    #[test]
    fn validation_error_display() {
        let e = CredentialValidationError::MissingField {
            provider: ProviderType::Wangsu,
            field: "accessKeyId".to_string(),
            label: "Access Key ID".to_string(),
        };
        assert_eq!(e.to_string(), "Missing required field: Access Key ID");
    }

    // ============ PaginatedResponse paging calculation test ============

    #[test]
    fn paginated_response_has_more() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 1, 3, 10);
        assert!(resp.has_more);
        assert_eq!(resp.total_count, 10);
    }

    #[test]
    fn paginated_response_no_more() {
        let resp = PaginatedResponse::new(vec![1, 2], 2, 3, 5);
        assert!(!resp.has_more); // page 2 * page_size 3 = 6 >= 5
    }
}
