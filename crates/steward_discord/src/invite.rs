//! Invite endpoints. Invites cannot be modified once created.

use crate::{DiscordClient, DiscordResult, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Partial guild embedded in an invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteGuild {
    /// Guild snowflake
    pub id: String,
    /// Guild name
    #[serde(default)]
    pub name: Option<String>,
}

/// Partial channel embedded in an invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteChannel {
    /// Channel snowflake
    pub id: String,
    /// Channel name
    #[serde(default)]
    pub name: Option<String>,
    /// Channel type
    #[serde(rename = "type", default)]
    pub kind: u8,
}

/// Invite object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    /// Invite code
    pub code: String,
    /// Target guild
    #[serde(default)]
    pub guild: Option<InviteGuild>,
    /// Target channel
    #[serde(default)]
    pub channel: Option<InviteChannel>,
    /// Creator
    #[serde(default)]
    pub inviter: Option<User>,
    /// Times used
    #[serde(default)]
    pub uses: Option<u32>,
    /// Maximum uses (0 is unlimited)
    #[serde(default)]
    pub max_uses: Option<u32>,
    /// Lifetime in seconds (0 never expires)
    #[serde(default)]
    pub max_age: Option<u32>,
    /// Grants temporary membership
    #[serde(default)]
    pub temporary: Option<bool>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Body for `POST /channels/{channel_id}/invites`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateInviteRequest {
    /// Lifetime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    /// Maximum uses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    /// Grants temporary membership
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,
    /// Never reuse a similar existing invite
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

impl DiscordClient {
    /// `POST /channels/{channel_id}/invites`
    #[instrument(skip(self, request))]
    pub async fn create_invite(
        &self,
        channel_id: &str,
        request: &CreateInviteRequest,
    ) -> DiscordResult<Invite> {
        self.post(&format!("/channels/{channel_id}/invites"), request)
            .await
    }

    /// `GET /invites/{code}`
    #[instrument(skip(self))]
    pub async fn get_invite(&self, code: &str) -> DiscordResult<Invite> {
        self.get(&format!("/invites/{code}")).await
    }

    /// `DELETE /invites/{code}`
    #[instrument(skip(self))]
    pub async fn delete_invite(&self, code: &str) -> DiscordResult<()> {
        self.delete(&format!("/invites/{code}")).await
    }
}
