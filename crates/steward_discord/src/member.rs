//! Guild member endpoints.
//!
//! Members cannot be created through the bot API. They join by invite or
//! OAuth2 and are then modified or removed here.

use crate::{DiscordClient, DiscordResult, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Guild member object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMember {
    /// The member's user account
    #[serde(default)]
    pub user: Option<User>,
    /// Guild nickname
    #[serde(default)]
    pub nick: Option<String>,
    /// Role snowflakes
    #[serde(default)]
    pub roles: Vec<String>,
    /// Join time
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    /// Server deafened
    #[serde(default)]
    pub deaf: bool,
    /// Server muted
    #[serde(default)]
    pub mute: bool,
    /// Has not passed membership screening
    #[serde(default)]
    pub pending: Option<bool>,
    /// Timeout expiry
    #[serde(default)]
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

/// Body for `PATCH /guilds/{guild_id}/members/{user_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModifyMemberRequest {
    /// Guild nickname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Full replacement role list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Server mute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
    /// Server deafen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deaf: Option<bool>,
}

impl DiscordClient {
    /// `GET /guilds/{guild_id}/members/{user_id}`
    #[instrument(skip(self))]
    pub async fn get_member(&self, guild_id: &str, user_id: &str) -> DiscordResult<GuildMember> {
        self.get(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
    }

    /// `PATCH /guilds/{guild_id}/members/{user_id}`
    #[instrument(skip(self, request))]
    pub async fn modify_member(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &ModifyMemberRequest,
    ) -> DiscordResult<GuildMember> {
        self.patch(&format!("/guilds/{guild_id}/members/{user_id}"), request)
            .await
    }

    /// `DELETE /guilds/{guild_id}/members/{user_id}` (kick)
    #[instrument(skip(self))]
    pub async fn remove_member(&self, guild_id: &str, user_id: &str) -> DiscordResult<()> {
        self.delete(&format!("/guilds/{guild_id}/members/{user_id}"))
            .await
    }
}
