//! Provider configuration and credential references.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Points at one key inside a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SecretKeySelector {
    /// Secret namespace
    namespace: String,
    /// Secret name
    name: String,
    /// Key within the secret
    key: String,
}

impl SecretKeySelector {
    /// Create a selector.
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Where a provider config finds its bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    /// Secret holding the bot token
    #[serde(default, alias = "secret_ref")]
    pub secret_ref: Option<SecretKeySelector>,
}

/// Named credentials configuration shared by many managed resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ProviderConfig {
    /// Config name
    name: String,
    /// Credentials source
    #[serde(default)]
    credentials: ProviderCredentials,
}

impl ProviderConfig {
    /// Provider config reading its token from `secret_ref`.
    pub fn new(name: impl Into<String>, secret_ref: SecretKeySelector) -> Self {
        Self {
            name: name.into(),
            credentials: ProviderCredentials {
                secret_ref: Some(secret_ref),
            },
        }
    }

    /// Provider config without any credentials source.
    pub fn without_credentials(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credentials: ProviderCredentials::default(),
        }
    }
}

/// Reference from a managed resource to a provider config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderConfigReference {
    /// Referenced config name
    pub name: String,
}
