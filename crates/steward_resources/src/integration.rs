//! Integration adapter.
//!
//! Integrations are installed and configured by the service that owns them.
//! steward can only observe them and remove them from a guild.

use crate::FromDiscordClient;
use crate::support::{adopt, found, gone, usable_or_declared_id, vanished};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{DiscordClient, Integration};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalObservation};
use tracing::{debug, info, instrument};

/// Which integration to track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationSpec {
    /// Guild the integration is installed in
    pub guild_id: String,
    /// Integration snowflake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<String>,
}

/// Last-known remote integration state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationObservation {
    /// Integration snowflake
    pub id: String,
    /// Integration name
    pub name: String,
    /// Integration type
    #[serde(rename = "type")]
    pub kind: String,
    /// Enabled
    pub enabled: Option<bool>,
    /// Currently syncing
    pub syncing: Option<bool>,
    /// Role granted to subscribers
    pub role_id: Option<String>,
    /// External account ID
    pub account_id: Option<String>,
    /// External account name
    pub account_name: Option<String>,
    /// Last sync time
    pub synced_at: Option<DateTime<Utc>>,
}

impl From<Integration> for IntegrationObservation {
    fn from(integration: Integration) -> Self {
        let (account_id, account_name) = match integration.account {
            Some(account) => (Some(account.id), Some(account.name)),
            None => (None, None),
        };
        Self {
            id: integration.id,
            name: integration.name,
            kind: integration.kind,
            enabled: integration.enabled,
            syncing: integration.syncing,
            role_id: integration.role_id,
            account_id,
            account_name,
            synced_at: integration.synced_at,
        }
    }
}

/// A managed integration.
pub type IntegrationResource = Managed<IntegrationSpec, IntegrationObservation>;

/// Reconciles guild integrations. Observe and delete only.
#[derive(Debug, Clone)]
pub struct IntegrationAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for IntegrationAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

fn target(mr: &IntegrationResource) -> Option<String> {
    usable_or_declared_id(
        mr,
        ResourceKind::Integration,
        mr.spec().integration_id.as_deref(),
    )
}

#[async_trait]
impl ExternalClient for IntegrationAdapter {
    type Spec = IntegrationSpec;
    type Observation = IntegrationObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Integration
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), guild_id = %mr.spec().guild_id))]
    async fn observe(&self, mr: &mut IntegrationResource) -> StewardResult<ExternalObservation> {
        let Some(id) = target(mr) else {
            return Ok(ExternalObservation::absent());
        };
        let lookup = self.client.get_integration(&mr.spec().guild_id, &id).await;
        let Some(integration) = found(lookup)? else {
            return Ok(vanished(mr));
        };

        adopt(mr, self.kind(), &id);
        debug!(%id, kind = %integration.kind, "Observed integration");
        mr.set_observed(integration.into());
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(true))
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), guild_id = %mr.spec().guild_id))]
    async fn delete(&self, mr: &mut IntegrationResource) -> StewardResult<()> {
        let Some(id) = target(mr) else {
            debug!("No integration to remove");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(
            self.client
                .delete_integration(&mr.spec().guild_id, &id)
                .await,
        )?;
        info!(%id, "Removed integration");
        Ok(())
    }
}
