//! Channel endpoints.

use crate::{DiscordClient, DiscordResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Channel object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel snowflake
    pub id: String,
    /// Channel type (0 text, 2 voice, 4 category, 5 announcement, ...)
    #[serde(rename = "type")]
    pub kind: u8,
    /// Parent guild
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Channel name
    #[serde(default)]
    pub name: Option<String>,
    /// Channel topic
    #[serde(default)]
    pub topic: Option<String>,
    /// Sort position
    #[serde(default)]
    pub position: Option<i32>,
    /// Age-restricted
    #[serde(default)]
    pub nsfw: Option<bool>,
    /// Parent category
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Slowmode in seconds
    #[serde(default)]
    pub rate_limit_per_user: Option<u32>,
    /// Voice bitrate
    #[serde(default)]
    pub bitrate: Option<u32>,
    /// Voice user limit
    #[serde(default)]
    pub user_limit: Option<u32>,
}

/// Body for `POST /guilds/{guild_id}/channels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateChannelRequest {
    /// Channel name
    pub name: String,
    /// Channel type
    #[serde(rename = "type")]
    pub kind: u8,
    /// Channel topic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Sort position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Age-restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// Parent category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Slowmode in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
    /// Voice bitrate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    /// Voice user limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
}

/// Body for `PATCH /channels/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyChannelRequest {
    /// Channel name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Channel topic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Sort position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Age-restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// Parent category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Slowmode in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
    /// Voice bitrate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    /// Voice user limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
}

impl DiscordClient {
    /// `POST /guilds/{guild_id}/channels`
    #[instrument(skip(self, request), fields(name = %request.name, kind = request.kind))]
    pub async fn create_channel(
        &self,
        guild_id: &str,
        request: &CreateChannelRequest,
    ) -> DiscordResult<Channel> {
        self.post(&format!("/guilds/{guild_id}/channels"), request)
            .await
    }

    /// `GET /channels/{id}`
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> DiscordResult<Channel> {
        self.get(&format!("/channels/{channel_id}")).await
    }

    /// `PATCH /channels/{id}`
    #[instrument(skip(self, request))]
    pub async fn modify_channel(
        &self,
        channel_id: &str,
        request: &ModifyChannelRequest,
    ) -> DiscordResult<Channel> {
        self.patch(&format!("/channels/{channel_id}"), request)
            .await
    }

    /// `DELETE /channels/{id}`
    #[instrument(skip(self))]
    pub async fn delete_channel(&self, channel_id: &str) -> DiscordResult<()> {
        self.delete(&format!("/channels/{channel_id}")).await
    }
}
