//! Provider config and secret stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use steward_core::{ProviderConfig, SecretKeySelector};
use steward_error::{CredentialError, CredentialErrorKind, StewardResult};
use steward_interface::{CredentialResolver, ProviderConfigStore};
use tracing::{debug, instrument};

/// Provider configs held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderConfigStore {
    configs: HashMap<String, ProviderConfig>,
}

impl InMemoryProviderConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a config.
    pub fn insert(&mut self, config: ProviderConfig) {
        self.configs.insert(config.name().clone(), config);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.insert(config);
        self
    }

    /// Number of configs held.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True when no configs are held.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl FromIterator<ProviderConfig> for InMemoryProviderConfigStore {
    fn from_iter<I: IntoIterator<Item = ProviderConfig>>(iter: I) -> Self {
        let mut store = Self::new();
        for config in iter {
            store.insert(config);
        }
        store
    }
}

#[async_trait]
impl ProviderConfigStore for InMemoryProviderConfigStore {
    async fn provider_config(&self, name: &str) -> StewardResult<ProviderConfig> {
        self.configs.get(name).cloned().ok_or_else(|| {
            CredentialError::new(CredentialErrorKind::ProviderConfigNotFound(name.to_string()))
                .into()
        })
    }
}

/// Secrets held in memory as namespace/name → key → value.
#[derive(Clone, Default)]
pub struct InMemorySecretStore {
    secrets: HashMap<(String, String), HashMap<String, String>>,
}

impl std::fmt::Debug for InMemorySecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySecretStore")
            .field("secrets", &self.secrets.len())
            .finish()
    }
}

impl InMemorySecretStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one key of a secret, creating the secret if needed.
    pub fn insert(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.secrets
            .entry((namespace.into(), name.into()))
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_secret(
        mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.insert(namespace, name, key, value);
        self
    }
}

#[async_trait]
impl CredentialResolver for InMemorySecretStore {
    #[instrument(
        skip(self),
        fields(namespace = %selector.namespace(), name = %selector.name(), key = %selector.key())
    )]
    async fn resolve(&self, selector: &SecretKeySelector) -> StewardResult<String> {
        let secret = self
            .secrets
            .get(&(selector.namespace().clone(), selector.name().clone()))
            .ok_or_else(|| {
                CredentialError::new(CredentialErrorKind::SecretNotFound {
                    namespace: selector.namespace().clone(),
                    name: selector.name().clone(),
                })
            })?;
        let value = secret.get(selector.key()).ok_or_else(|| {
            CredentialError::new(CredentialErrorKind::KeyNotFound {
                namespace: selector.namespace().clone(),
                name: selector.name().clone(),
                key: selector.key().clone(),
            })
        })?;
        Ok(value.trim().to_string())
    }
}

/// Secrets read from a directory tree laid out as `<namespace>/<name>/<key>`.
///
/// This is the layout of a mounted secret volume: one directory per secret,
/// one file per key.
#[derive(Debug, Clone)]
pub struct DirectorySecretStore {
    root: PathBuf,
}

impl DirectorySecretStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl CredentialResolver for DirectorySecretStore {
    #[instrument(
        skip(self),
        fields(
            root = %self.root.display(),
            namespace = %selector.namespace(),
            name = %selector.name(),
            key = %selector.key(),
        )
    )]
    async fn resolve(&self, selector: &SecretKeySelector) -> StewardResult<String> {
        let secret_dir = self.root.join(selector.namespace()).join(selector.name());
        let is_dir = tokio::fs::metadata(&secret_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(CredentialError::new(CredentialErrorKind::SecretNotFound {
                namespace: selector.namespace().clone(),
                name: selector.name().clone(),
            })
            .into());
        }

        let path = secret_dir.join(selector.key());
        let value = tokio::fs::read_to_string(&path).await.map_err(|e| {
            let kind = if e.kind() == ErrorKind::NotFound {
                CredentialErrorKind::KeyNotFound {
                    namespace: selector.namespace().clone(),
                    name: selector.name().clone(),
                    key: selector.key().clone(),
                }
            } else {
                CredentialErrorKind::Unreadable(format!("{}: {}", path.display(), e))
            };
            CredentialError::new(kind)
        })?;

        debug!("Resolved secret from directory");
        Ok(value.trim().to_string())
    }
}
