//! Configuration loading from explicit files.

use std::io::Write;
use steward::{CredentialResolver, ProviderConfigStore, StewardConfig};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_overrides_bundled_defaults() {
    let file = write_config(
        r#"
[api]
timeout_secs = 5
base_url = "http://localhost:8080/api/v10"

[logging]
json = true
"#,
    );

    let config = StewardConfig::from_file(file.path()).expect("load");
    assert_eq!(*config.api().timeout_secs(), 5);
    assert_eq!(config.api().base_url(), "http://localhost:8080/api/v10");
    assert_eq!(config.api().auth_scheme(), "Bot");
    assert!(*config.logging().json());
    assert_eq!(config.logging().filter(), "info,steward=debug");
}

#[tokio::test]
async fn provider_configs_and_secret_directory_resolve_a_token() {
    let secrets = tempfile::tempdir().expect("tempdir");
    let secret_dir = secrets.path().join("steward-system").join("discord-bot");
    std::fs::create_dir_all(&secret_dir).expect("secret dir");
    std::fs::write(secret_dir.join("token"), "  bot-token \n").expect("token");

    let file = write_config(&format!(
        r#"
[provider_configs.default]
namespace = "steward-system"
name = "discord-bot"
key = "token"

[secrets]
directory = "{}"
"#,
        secrets.path().display()
    ));

    let config = StewardConfig::from_file(file.path()).expect("load");
    assert_eq!(config.provider_configs().len(), 1);

    let store = config.provider_config_store();
    let provider = store.provider_config("default").await.expect("provider config");
    let selector = provider
        .credentials()
        .secret_ref
        .clone()
        .expect("secret ref");

    let resolver = config.secret_store().expect("directory configured");
    assert_eq!(resolver.root(), secrets.path());
    assert_eq!(resolver.resolve(&selector).await.expect("token"), "bot-token");
}

#[test]
fn malformed_file_is_a_config_error() {
    let file = write_config("[api\ntimeout_secs = ");
    let err = StewardConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = StewardConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read configuration"));
}

#[test]
fn zero_timeout_in_file_is_rejected() {
    let file = write_config("[api]\ntimeout_secs = 0\n");
    assert!(StewardConfig::from_file(file.path()).is_err());
}
