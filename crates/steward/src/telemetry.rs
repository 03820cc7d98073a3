//! Tracing subscriber setup.

use crate::LoggingConfig;
use steward_error::{ConfigError, StewardResult};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Fails when the
/// directives do not parse or a subscriber is already installed.
pub fn init_tracing(logging: &LoggingConfig) -> StewardResult<()> {
    let directives = std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| logging.filter().clone());
    let env_filter = parse_filter(&directives)?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if *logging.json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    info!(filter = %directives, json = *logging.json(), "Tracing initialized");
    Ok(())
}

fn parse_filter(directives: &str) -> StewardResult<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        ConfigError::new(format!("Invalid log filter '{}': {}", directives, e)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(parse_filter(LoggingConfig::default().filter()).is_ok());
    }

    #[test]
    fn bad_level_is_rejected() {
        let err = parse_filter("steward=loudest").unwrap_err();
        assert!(err.to_string().contains("Invalid log filter"));
    }
}
