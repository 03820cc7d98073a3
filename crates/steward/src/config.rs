//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - bundled defaults (`include_str!` of `steward.toml`)
//! - `~/.config/steward/steward.toml`
//! - `./steward.toml`

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use steward_core::{ProviderConfig, SecretKeySelector};
use steward_discord::{ApiSettings, HttpClientFactory};
use steward_error::{ConfigError, StewardError, StewardResult};
use steward_resources::{DirectorySecretStore, InMemoryProviderConfigStore};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../steward.toml");

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    json: bool,
}

fn default_filter() -> String {
    "info,steward=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

/// Where the directory-backed secret store reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SecretsConfig {
    /// Root of a `<namespace>/<name>/<key>` tree
    #[serde(default)]
    directory: Option<PathBuf>,
}

/// Top-level steward configuration.
///
/// # Example
///
/// ```toml
/// [api]
/// timeout_secs = 10
///
/// [provider_configs.default]
/// namespace = "steward-system"
/// name = "discord-bot"
/// key = "token"
///
/// [secrets]
/// directory = "/var/run/secrets/steward"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StewardConfig {
    /// Remote API settings
    #[serde(default)]
    api: ApiSettings,
    /// Log output
    #[serde(default)]
    logging: LoggingConfig,
    /// Provider config name → secret holding its token
    #[serde(default)]
    provider_configs: BTreeMap<String, SecretKeySelector>,
    /// Directory secret store
    #[serde(default)]
    secrets: SecretsConfig,
}

impl StewardConfig {
    /// Load the layered configuration.
    ///
    /// Missing user files are skipped; malformed ones are errors.
    #[instrument]
    pub fn load() -> StewardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/steward/steward.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("steward").required(false));

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;
        Self::finish(config)
    }

    /// Load a single file on top of the bundled defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StewardResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;
        Self::finish(config)
    }

    fn finish(config: Config) -> StewardResult<Self> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        parsed.validate()?;
        debug!(
            provider_configs = parsed.provider_configs.len(),
            base_url = %parsed.api.base_url(),
            "Configuration loaded"
        );
        Ok(parsed)
    }

    /// Reject values no client could work with.
    pub fn validate(&self) -> StewardResult<()> {
        if *self.api.timeout_secs() == 0 {
            return Err(ConfigError::new("api.timeout_secs must be positive").into());
        }
        if self.api.base_url().trim().is_empty() {
            return Err(ConfigError::new("api.base_url must not be empty").into());
        }
        Ok(())
    }

    /// Provider configs as a store for connectors.
    pub fn provider_config_store(&self) -> InMemoryProviderConfigStore {
        self.provider_configs
            .iter()
            .map(|(name, selector)| ProviderConfig::new(name.clone(), selector.clone()))
            .collect()
    }

    /// Directory secret store, when a directory is configured.
    pub fn secret_store(&self) -> Option<DirectorySecretStore> {
        self.secrets.directory.as_ref().map(DirectorySecretStore::new)
    }

    /// Client factory carrying the `[api]` section.
    pub fn client_factory(&self) -> HttpClientFactory {
        HttpClientFactory::new(self.api.clone())
    }
}

impl std::str::FromStr for StewardConfig {
    type Err = StewardError;

    fn from_str(toml: &str) -> Result<Self, Self::Err> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;
        Self::finish(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        let config: StewardConfig = "".parse().unwrap();
        assert_eq!(config.api().base_url(), "https://discord.com/api/v10");
        assert_eq!(config.api().invite_base_url(), "https://discord.gg");
        assert_eq!(*config.api().timeout_secs(), 30);
        assert_eq!(config.api().auth_scheme(), "Bot");
        assert_eq!(config.logging().filter(), "info,steward=debug");
        assert!(!*config.logging().json());
        assert!(config.provider_configs().is_empty());
        assert!(config.secret_store().is_none());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = "[api]\ntimeout_secs = 0\n"
            .parse::<StewardConfig>()
            .unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be positive"));
    }
}
