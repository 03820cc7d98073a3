//! Guild endpoints.

use crate::{DiscordClient, DiscordResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Guild object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    /// Guild snowflake
    pub id: String,
    /// Guild name
    pub name: String,
    /// Icon hash
    #[serde(default)]
    pub icon: Option<String>,
    /// Owner snowflake
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Voice region (deprecated upstream, still echoed by some guilds)
    #[serde(default)]
    pub region: Option<String>,
    /// AFK voice channel
    #[serde(default)]
    pub afk_channel_id: Option<String>,
    /// AFK timeout in seconds
    #[serde(default)]
    pub afk_timeout: u32,
    /// Verification level 0-4
    #[serde(default)]
    pub verification_level: u8,
    /// Default notification level 0-1
    #[serde(default)]
    pub default_message_notifications: u8,
    /// Explicit content filter 0-2
    #[serde(default)]
    pub explicit_content_filter: u8,
    /// Enabled guild features
    #[serde(default)]
    pub features: Vec<String>,
    /// System message channel
    #[serde(default)]
    pub system_channel_id: Option<String>,
    /// System channel flag bitfield
    #[serde(default)]
    pub system_channel_flags: u64,
    /// Boost tier 0-3
    #[serde(default)]
    pub premium_tier: u8,
    /// Guild description
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for `POST /guilds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateGuildRequest {
    /// Guild name
    pub name: String,
    /// Voice region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Base64 image data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Verification level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_level: Option<u8>,
    /// Default notification level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_message_notifications: Option<u8>,
    /// Explicit content filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_content_filter: Option<u8>,
    /// AFK channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_channel_id: Option<String>,
    /// AFK timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<u32>,
    /// System channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_id: Option<String>,
    /// System channel flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_flags: Option<u64>,
}

/// Body for `PATCH /guilds/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyGuildRequest {
    /// Guild name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Voice region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Base64 image data URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Verification level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_level: Option<u8>,
    /// Default notification level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_message_notifications: Option<u8>,
    /// Explicit content filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_content_filter: Option<u8>,
    /// AFK channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_channel_id: Option<String>,
    /// AFK timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<u32>,
    /// System channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_id: Option<String>,
    /// System channel flags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel_flags: Option<u64>,
}

impl DiscordClient {
    /// `POST /guilds`
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_guild(&self, request: &CreateGuildRequest) -> DiscordResult<Guild> {
        self.post("/guilds", request).await
    }

    /// `GET /guilds/{id}`
    #[instrument(skip(self))]
    pub async fn get_guild(&self, guild_id: &str) -> DiscordResult<Guild> {
        self.get(&format!("/guilds/{guild_id}")).await
    }

    /// `PATCH /guilds/{id}`
    #[instrument(skip(self, request))]
    pub async fn modify_guild(
        &self,
        guild_id: &str,
        request: &ModifyGuildRequest,
    ) -> DiscordResult<Guild> {
        self.patch(&format!("/guilds/{guild_id}"), request).await
    }

    /// `DELETE /guilds/{id}`
    #[instrument(skip(self))]
    pub async fn delete_guild(&self, guild_id: &str) -> DiscordResult<()> {
        self.delete(&format!("/guilds/{guild_id}")).await
    }
}
