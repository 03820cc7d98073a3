//! HTTP plumbing shared by every endpoint.

use derive_getters::Getters;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use steward_error::{DiscordError, DiscordErrorKind};
use tracing::{debug, instrument, warn};

/// Result type for Discord client operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

/// Connection settings for the remote API.
///
/// # Example
///
/// ```
/// use steward_discord::ApiSettings;
///
/// let settings = ApiSettings::default().with_timeout_secs(10u64);
/// assert_eq!(settings.base_url(), "https://discord.com/api/v10");
/// assert_eq!(*settings.timeout_secs(), 10);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_", into)]
#[builder(default, setter(into))]
pub struct ApiSettings {
    /// REST base URL including the API version
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Base URL invite codes are appended to
    #[serde(default = "default_invite_base_url")]
    invite_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    user_agent: String,

    /// Authorization scheme placed before the token
    #[serde(default = "default_auth_scheme")]
    auth_scheme: String,
}

fn default_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_invite_base_url() -> String {
    "https://discord.gg".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!(
        "DiscordBot (https://github.com/crumplecup/steward, {})",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_auth_scheme() -> String {
    "Bot".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            invite_base_url: default_invite_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            auth_scheme: default_auth_scheme(),
        }
    }
}

impl ApiSettings {
    /// Creates a new settings builder.
    pub fn builder() -> ApiSettingsBuilder {
        ApiSettingsBuilder::default()
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Typed client for the Discord REST API.
///
/// Holds one token and one base URL. Nothing else survives between calls.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    base_url: String,
    invite_base_url: String,
}

impl DiscordClient {
    /// Build a client bound to `token`.
    ///
    /// # Errors
    ///
    /// Fails when the token cannot be sent as a header or the HTTP client
    /// cannot be constructed.
    #[instrument(
        skip(settings, token),
        fields(base_url = %settings.base_url, token_len = token.len())
    )]
    pub fn new(settings: &ApiSettings, token: &str) -> DiscordResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("{} {}", settings.auth_scheme, token))
            .map_err(|e| DiscordError::new(DiscordErrorKind::InvalidToken(e.to_string())))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| DiscordError::new(DiscordErrorKind::Client(e.to_string())))?;

        debug!("Created Discord REST client");
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            invite_base_url: settings.invite_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// REST base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL for an invite code.
    pub fn invite_url(&self, code: &str) -> String {
        format!("{}/{}", self.invite_base_url, code)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %url, "Discord API request");
        self.http.request(method, url)
    }

    fn with_body<B: Serialize + ?Sized>(
        builder: RequestBuilder,
        body: &B,
    ) -> DiscordResult<RequestBuilder> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| DiscordError::new(DiscordErrorKind::Encode(e.to_string())))?;
        Ok(builder.header(CONTENT_TYPE, "application/json").body(bytes))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> DiscordResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> DiscordResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Self::with_body(self.request(Method::POST, path), body)?)
            .await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> DiscordResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Self::with_body(self.request(Method::PATCH, path), body)?)
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> DiscordResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> DiscordResult<T> {
        let response = self.execute(builder).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::Request(e.to_string())))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "Failed to decode Discord response");
            DiscordError::new(DiscordErrorKind::Decode(e.to_string()))
        })
    }

    /// Send the request and turn any status ≥ 400 into an error.
    async fn execute(&self, builder: RequestBuilder) -> DiscordResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::Request(e.to_string())))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read error response body"
                    );
                    String::new()
                }
            };
            debug!(status = status.as_u16(), body = %body, "Discord API rejected request");
            return Err(DiscordError::new(DiscordErrorKind::Api {
                status: status.as_u16(),
                body,
            }));
        }

        Ok(response)
    }
}

/// Builds remote API clients from resolved tokens.
///
/// Injected into connectors so tests can point clients at a mock server.
pub trait ClientFactory: Send + Sync {
    /// Build a client bound to `token`.
    fn build(&self, token: &str) -> DiscordResult<DiscordClient>;
}

/// Default factory: a fresh `reqwest` client per call.
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    settings: ApiSettings,
}

impl HttpClientFactory {
    /// Factory using the given settings.
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }

    /// Settings handed to every client.
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }
}

impl ClientFactory for HttpClientFactory {
    fn build(&self, token: &str) -> DiscordResult<DiscordClient> {
        DiscordClient::new(&self.settings, token)
    }
}
