//! User endpoints. Only the token's own account can be modified.

use crate::{DiscordClient, DiscordResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// User object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User snowflake
    pub id: String,
    /// Username
    pub username: String,
    /// Legacy discriminator
    #[serde(default)]
    pub discriminator: Option<String>,
    /// Display name
    #[serde(default)]
    pub global_name: Option<String>,
    /// Avatar hash
    #[serde(default)]
    pub avatar: Option<String>,
    /// Bot account
    #[serde(default)]
    pub bot: Option<bool>,
}

/// Body for `PATCH /users/@me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyCurrentUserRequest {
    /// New username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Base64 image data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl DiscordClient {
    /// `GET /users/{id}`
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> DiscordResult<User> {
        self.get(&format!("/users/{user_id}")).await
    }

    /// `GET /users/@me`
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> DiscordResult<User> {
        self.get("/users/@me").await
    }

    /// `PATCH /users/@me`
    #[instrument(skip(self, request))]
    pub async fn modify_current_user(
        &self,
        request: &ModifyCurrentUserRequest,
    ) -> DiscordResult<User> {
        self.patch("/users/@me", request).await
    }
}
