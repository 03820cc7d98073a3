//! Guild integration endpoints.
//!
//! Integrations are listed per guild and can only be removed.

use crate::{DiscordClient, DiscordResult, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_error::DiscordError;
use tracing::{debug, instrument};

/// External account behind an integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationAccount {
    /// Account ID on the external service
    pub id: String,
    /// Account name
    pub name: String,
}

/// Integration object as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Integration snowflake
    pub id: String,
    /// Integration name
    pub name: String,
    /// `twitch`, `youtube`, `discord` or `guild_subscription`
    #[serde(rename = "type")]
    pub kind: String,
    /// Enabled
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Currently syncing
    #[serde(default)]
    pub syncing: Option<bool>,
    /// Role granted to subscribers
    #[serde(default)]
    pub role_id: Option<String>,
    /// Behavior when a subscription expires
    #[serde(default)]
    pub expire_behavior: Option<u8>,
    /// Grace period in days
    #[serde(default)]
    pub expire_grace_period: Option<u32>,
    /// User that added the integration
    #[serde(default)]
    pub user: Option<User>,
    /// External account
    #[serde(default)]
    pub account: Option<IntegrationAccount>,
    /// Last sync time
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
    /// Bot application for `discord` integrations
    #[serde(default)]
    pub application: Option<serde_json::Value>,
}

impl DiscordClient {
    /// `GET /guilds/{guild_id}/integrations`
    #[instrument(skip(self))]
    pub async fn list_integrations(&self, guild_id: &str) -> DiscordResult<Vec<Integration>> {
        self.get(&format!("/guilds/{guild_id}/integrations")).await
    }

    /// Find one integration by scanning the guild's list.
    ///
    /// # Errors
    ///
    /// Returns the `NotFound` sentinel when no integration has `integration_id`.
    #[instrument(skip(self))]
    pub async fn get_integration(
        &self,
        guild_id: &str,
        integration_id: &str,
    ) -> DiscordResult<Integration> {
        let integrations = self.list_integrations(guild_id).await?;
        debug!(count = integrations.len(), "Scanning guild integrations");
        integrations
            .into_iter()
            .find(|integration| integration.id == integration_id)
            .ok_or_else(|| DiscordError::not_found("integration", integration_id))
    }

    /// `DELETE /guilds/{guild_id}/integrations/{id}`
    #[instrument(skip(self))]
    pub async fn delete_integration(
        &self,
        guild_id: &str,
        integration_id: &str,
    ) -> DiscordResult<()> {
        self.delete(&format!("/guilds/{guild_id}/integrations/{integration_id}"))
            .await
    }
}
