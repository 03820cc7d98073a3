//! Webhook adapter.
//!
//! The webhook token is secret material. It goes out as connection details
//! and never into the observed state.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, patch};
use crate::support::{found, gone, require_id, usable_id, vanished};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use steward_core::{Condition, ConnectionDetails, Managed, ResourceKind};
use steward_discord::{CreateWebhookRequest, DiscordClient, ModifyWebhookRequest, Webhook};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalCreation, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Connection detail key holding the webhook token.
pub const TOKEN_KEY: &str = "token";
/// Connection detail key holding the execution URL.
pub const URL_KEY: &str = "url";

/// Desired webhook settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSpec {
    /// Channel the webhook posts to
    pub channel_id: String,
    /// Default name
    pub name: String,
    /// Base64 image data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Last-known remote webhook state, without the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookObservation {
    /// Webhook snowflake
    pub id: String,
    /// Webhook type
    #[serde(rename = "type")]
    pub kind: u8,
    /// Guild the webhook belongs to
    pub guild_id: Option<String>,
    /// Channel the webhook posts to
    pub channel_id: Option<String>,
    /// Default name
    pub name: Option<String>,
    /// Avatar hash
    pub avatar: Option<String>,
    /// Owning application
    pub application_id: Option<String>,
}

impl From<&Webhook> for WebhookObservation {
    fn from(webhook: &Webhook) -> Self {
        Self {
            id: webhook.id.clone(),
            kind: webhook.kind,
            guild_id: webhook.guild_id.clone(),
            channel_id: webhook.channel_id.clone(),
            name: webhook.name.clone(),
            avatar: webhook.avatar.clone(),
            application_id: webhook.application_id.clone(),
        }
    }
}

/// A managed webhook.
pub type WebhookResource = Managed<WebhookSpec, WebhookObservation>;

type S = WebhookSpec;
type O = WebhookObservation;
type P = ModifyWebhookRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "name",
        |s: &S, o: &O| o.name.as_deref() != Some(s.name.as_str()),
        |s: &S, p: &mut P| p.name = Some(s.name.clone()),
    ),
    Field::compared(
        "channel_id",
        |s: &S, o: &O| o.channel_id.as_deref() != Some(s.channel_id.as_str()),
        |s: &S, p: &mut P| p.channel_id = Some(s.channel_id.clone()),
    ),
    Field::write_only("avatar", |s: &S, p: &mut P| p.avatar = s.avatar.clone()),
];

/// Reconciles channel webhooks. Full CRUD.
#[derive(Debug, Clone)]
pub struct WebhookAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for WebhookAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

impl WebhookAdapter {
    fn connection_details(&self, webhook: &Webhook) -> ConnectionDetails {
        let mut details = ConnectionDetails::new();
        if let Some(token) = &webhook.token {
            details.insert(TOKEN_KEY, token.as_bytes());
        }
        if let Some(url) = self.client.webhook_url(webhook) {
            details.insert(URL_KEY, url);
        }
        details
    }
}

#[async_trait]
impl ExternalClient for WebhookAdapter {
    type Spec = WebhookSpec;
    type Observation = WebhookObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Webhook
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut WebhookResource) -> StewardResult<ExternalObservation> {
        let Some(id) = usable_id(mr, self.kind()) else {
            return Ok(ExternalObservation::absent());
        };
        let Some(webhook) = found(self.client.get_webhook(&id).await)? else {
            return Ok(vanished(mr));
        };

        let observed = WebhookObservation::from(&webhook);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(?drifted, "Compared webhook");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty())
            .with_connection_details(self.connection_details(&webhook)))
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), channel_id = %mr.spec().channel_id))]
    async fn create(&self, mr: &mut WebhookResource) -> StewardResult<ExternalCreation> {
        mr.set_condition(Condition::creating());
        let spec = mr.spec();
        let request = CreateWebhookRequest {
            name: spec.name.clone(),
            avatar: spec.avatar.clone(),
        };

        let webhook = self
            .client
            .create_webhook(&spec.channel_id, &request)
            .await?;
        info!(id = %webhook.id, "Created webhook");
        mr.set_external_name(webhook.id.clone());
        Ok(ExternalCreation {
            connection_details: self.connection_details(&webhook),
        })
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut WebhookResource) -> StewardResult<ExternalUpdate> {
        let id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("Webhook already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let webhook = self.client.modify_webhook(&id, &request).await?;
        info!(%id, "Updated webhook");
        mr.set_observed(WebhookObservation::from(&webhook));
        Ok(ExternalUpdate {
            connection_details: self.connection_details(&webhook),
        })
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn delete(&self, mr: &mut WebhookResource) -> StewardResult<()> {
        let Some(id) = usable_id(mr, self.kind()) else {
            debug!("No remote webhook to delete");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(self.client.delete_webhook(&id).await)?;
        info!(%id, "Deleted webhook");
        Ok(())
    }
}
