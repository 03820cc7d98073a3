//! Application endpoints.

use crate::{DiscordClient, DiscordResult, User};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Application object as returned by the API.
///
/// The public RPC view omits most fields, so nearly everything is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application snowflake
    pub id: String,
    /// Application name
    pub name: String,
    /// Icon hash
    #[serde(default)]
    pub icon: Option<String>,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Anyone can add the bot
    #[serde(default)]
    pub bot_public: Option<bool>,
    /// Bot requires the full OAuth2 code grant
    #[serde(default)]
    pub bot_require_code_grant: Option<bool>,
    /// Discovery tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Interactions endpoint
    #[serde(default)]
    pub interactions_endpoint_url: Option<String>,
    /// Role connection verification URL
    #[serde(default)]
    pub role_connections_verification_url: Option<String>,
    /// Custom install link
    #[serde(default)]
    pub custom_install_url: Option<String>,
    /// Application flags
    #[serde(default)]
    pub flags: Option<u64>,
    /// Owning user
    #[serde(default)]
    pub owner: Option<User>,
}

/// Body for `PATCH /applications/@me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyCurrentApplicationRequest {
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64 image data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Discovery tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Interactions endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactions_endpoint_url: Option<String>,
    /// Role connection verification URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_connections_verification_url: Option<String>,
    /// Custom install link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_install_url: Option<String>,
}

impl DiscordClient {
    /// `GET /applications/@me`
    #[instrument(skip(self))]
    pub async fn current_application(&self) -> DiscordResult<Application> {
        self.get("/applications/@me").await
    }

    /// `GET /applications/{id}/rpc`
    #[instrument(skip(self))]
    pub async fn get_application_rpc(&self, application_id: &str) -> DiscordResult<Application> {
        self.get(&format!("/applications/{application_id}/rpc"))
            .await
    }

    /// `PATCH /applications/@me`
    #[instrument(skip(self, request))]
    pub async fn modify_current_application(
        &self,
        request: &ModifyCurrentApplicationRequest,
    ) -> DiscordResult<Application> {
        self.patch("/applications/@me", request).await
    }
}
