//! Role endpoints.
//!
//! The API only lists roles per guild, so single-role lookup scans the list.

use crate::{DiscordClient, DiscordResult};
use serde::{Deserialize, Serialize};
use steward_error::DiscordError;
use tracing::{debug, instrument};

/// Role object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role snowflake
    pub id: String,
    /// Role name
    pub name: String,
    /// RGB color as an integer
    #[serde(default)]
    pub color: u32,
    /// Shown separately in the member list
    #[serde(default)]
    pub hoist: bool,
    /// Hierarchy position
    #[serde(default)]
    pub position: i32,
    /// Permission bitfield as a decimal string
    #[serde(default)]
    pub permissions: String,
    /// Managed by an integration
    #[serde(default)]
    pub managed: bool,
    /// Can be mentioned
    #[serde(default)]
    pub mentionable: bool,
    /// Role icon hash
    #[serde(default)]
    pub icon: Option<String>,
    /// Unicode emoji
    #[serde(default)]
    pub unicode_emoji: Option<String>,
}

/// Body for `POST /guilds/{guild_id}/roles`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateRoleRequest {
    /// Role name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Permission bitfield
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// RGB color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Shown separately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoist: Option<bool>,
    /// Can be mentioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentionable: Option<bool>,
    /// Unicode emoji
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
}

/// Body for `PATCH /guilds/{guild_id}/roles/{id}`. Absent fields are left unchanged.
pub type ModifyRoleRequest = CreateRoleRequest;

impl DiscordClient {
    /// `POST /guilds/{guild_id}/roles`
    #[instrument(skip(self, request))]
    pub async fn create_role(
        &self,
        guild_id: &str,
        request: &CreateRoleRequest,
    ) -> DiscordResult<Role> {
        self.post(&format!("/guilds/{guild_id}/roles"), request)
            .await
    }

    /// `GET /guilds/{guild_id}/roles`
    #[instrument(skip(self))]
    pub async fn list_roles(&self, guild_id: &str) -> DiscordResult<Vec<Role>> {
        self.get(&format!("/guilds/{guild_id}/roles")).await
    }

    /// Find one role by scanning the guild's role list.
    ///
    /// # Errors
    ///
    /// Returns the `NotFound` sentinel when no role has `role_id`.
    #[instrument(skip(self))]
    pub async fn get_role(&self, guild_id: &str, role_id: &str) -> DiscordResult<Role> {
        let roles = self.list_roles(guild_id).await?;
        debug!(count = roles.len(), "Scanning guild roles");
        roles
            .into_iter()
            .find(|role| role.id == role_id)
            .ok_or_else(|| DiscordError::not_found("role", role_id))
    }

    /// `PATCH /guilds/{guild_id}/roles/{id}`
    #[instrument(skip(self, request))]
    pub async fn modify_role(
        &self,
        guild_id: &str,
        role_id: &str,
        request: &ModifyRoleRequest,
    ) -> DiscordResult<Role> {
        self.patch(&format!("/guilds/{guild_id}/roles/{role_id}"), request)
            .await
    }

    /// `DELETE /guilds/{guild_id}/roles/{id}`
    #[instrument(skip(self))]
    pub async fn delete_role(&self, guild_id: &str, role_id: &str) -> DiscordResult<()> {
        self.delete(&format!("/guilds/{guild_id}/roles/{role_id}"))
            .await
    }
}
