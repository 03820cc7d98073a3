//! Invite adapter.
//!
//! Invites are immutable once created, so Observe always reports them up to
//! date and Update succeeds without touching the remote API.

use crate::FromDiscordClient;
use crate::support::{found, gone, usable_id, vanished};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_core::{Condition, ConnectionDetails, Managed, ResourceKind};
use steward_discord::{CreateInviteRequest, DiscordClient, Invite};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalCreation, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Connection detail key holding the public invite URL.
pub const URL_KEY: &str = "url";

/// Desired invite settings, applied once at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteSpec {
    /// Channel the invite points at
    pub channel_id: String,
    /// Lifetime in seconds (0 never expires)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    /// Maximum uses (0 is unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    /// Grants temporary membership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,
    /// Never reuse a similar existing invite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

/// Last-known remote invite state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteObservation {
    /// Invite code
    pub code: String,
    /// Target guild
    pub guild_id: Option<String>,
    /// Target channel
    pub channel_id: Option<String>,
    /// Creator
    pub inviter_id: Option<String>,
    /// Times used
    pub uses: Option<u32>,
    /// Maximum uses
    pub max_uses: Option<u32>,
    /// Lifetime in seconds
    pub max_age: Option<u32>,
    /// Grants temporary membership
    pub temporary: Option<bool>,
    /// Creation time
    pub created_at: Option<DateTime<Utc>>,
    /// Expiry time
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Invite> for InviteObservation {
    fn from(invite: Invite) -> Self {
        Self {
            code: invite.code,
            guild_id: invite.guild.map(|guild| guild.id),
            channel_id: invite.channel.map(|channel| channel.id),
            inviter_id: invite.inviter.map(|user| user.id),
            uses: invite.uses,
            max_uses: invite.max_uses,
            max_age: invite.max_age,
            temporary: invite.temporary,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
        }
    }
}

/// A managed invite.
pub type InviteResource = Managed<InviteSpec, InviteObservation>;

/// Reconciles channel invites. Create and delete only.
#[derive(Debug, Clone)]
pub struct InviteAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for InviteAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

impl InviteAdapter {
    fn connection_details(&self, code: &str) -> ConnectionDetails {
        ConnectionDetails::new().with(URL_KEY, self.client.invite_url(code))
    }
}

#[async_trait]
impl ExternalClient for InviteAdapter {
    type Spec = InviteSpec;
    type Observation = InviteObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Invite
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut InviteResource) -> StewardResult<ExternalObservation> {
        let Some(code) = usable_id(mr, self.kind()) else {
            return Ok(ExternalObservation::absent());
        };
        let Some(invite) = found(self.client.get_invite(&code).await)? else {
            return Ok(vanished(mr));
        };

        mr.set_observed(invite.into());
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(true)
            .with_connection_details(self.connection_details(&code)))
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), channel_id = %mr.spec().channel_id))]
    async fn create(&self, mr: &mut InviteResource) -> StewardResult<ExternalCreation> {
        mr.set_condition(Condition::creating());
        let spec = mr.spec();
        let request = CreateInviteRequest {
            max_age: spec.max_age,
            max_uses: spec.max_uses,
            temporary: spec.temporary,
            unique: spec.unique,
        };

        let invite = self
            .client
            .create_invite(&spec.channel_id, &request)
            .await?;
        info!(code = %invite.code, "Created invite");
        let details = self.connection_details(&invite.code);
        mr.set_external_name(invite.code);
        Ok(ExternalCreation {
            connection_details: details,
        })
    }

    async fn update(&self, mr: &mut InviteResource) -> StewardResult<ExternalUpdate> {
        debug!(resource = %mr.name(), "Invites are immutable; nothing to update");
        Ok(ExternalUpdate::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn delete(&self, mr: &mut InviteResource) -> StewardResult<()> {
        let Some(code) = usable_id(mr, self.kind()) else {
            debug!("No remote invite to delete");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(self.client.delete_invite(&code).await)?;
        info!(%code, "Deleted invite");
        Ok(())
    }
}
