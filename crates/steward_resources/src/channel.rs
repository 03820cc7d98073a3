//! Channel adapter.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, option_differs, patch};
use crate::support::{found, gone, require_id, usable_id, vanished};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{Channel, CreateChannelRequest, DiscordClient, ModifyChannelRequest};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalCreation, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Desired channel settings.
///
/// `type` is fixed at creation; the remote API only converts between a few
/// types and steward never attempts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSpec {
    /// Parent guild
    pub guild_id: String,
    /// Channel name
    pub name: String,
    /// Channel type
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Channel topic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Sort position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// Age-restricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// Parent category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Slowmode in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u32>,
    /// Voice bitrate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    /// Voice user limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
}

/// Last-known remote channel state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelObservation {
    /// Channel snowflake
    pub id: String,
    /// Channel type
    #[serde(rename = "type")]
    pub kind: u8,
    /// Parent guild
    pub guild_id: Option<String>,
    /// Channel name
    pub name: Option<String>,
    /// Channel topic
    pub topic: Option<String>,
    /// Sort position
    pub position: Option<i32>,
    /// Age-restricted
    pub nsfw: Option<bool>,
    /// Parent category
    pub parent_id: Option<String>,
    /// Slowmode in seconds
    pub rate_limit_per_user: Option<u32>,
    /// Voice bitrate
    pub bitrate: Option<u32>,
    /// Voice user limit
    pub user_limit: Option<u32>,
}

impl From<Channel> for ChannelObservation {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            kind: channel.kind,
            guild_id: channel.guild_id,
            name: channel.name,
            topic: channel.topic,
            position: channel.position,
            nsfw: channel.nsfw,
            parent_id: channel.parent_id,
            rate_limit_per_user: channel.rate_limit_per_user,
            bitrate: channel.bitrate,
            user_limit: channel.user_limit,
        }
    }
}

/// A managed channel.
pub type ChannelResource = Managed<ChannelSpec, ChannelObservation>;

type S = ChannelSpec;
type O = ChannelObservation;
type P = ModifyChannelRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "name",
        |s: &S, o: &O| o.name.as_deref() != Some(s.name.as_str()),
        |s: &S, p: &mut P| p.name = Some(s.name.clone()),
    ),
    Field::compared(
        "topic",
        |s: &S, o: &O| option_differs(s.topic.as_ref(), o.topic.as_ref()),
        |s: &S, p: &mut P| p.topic = s.topic.clone(),
    ),
    Field::compared(
        "position",
        |s: &S, o: &O| option_differs(s.position.as_ref(), o.position.as_ref()),
        |s: &S, p: &mut P| p.position = s.position,
    ),
    Field::compared(
        "nsfw",
        |s: &S, o: &O| option_differs(s.nsfw.as_ref(), o.nsfw.as_ref()),
        |s: &S, p: &mut P| p.nsfw = s.nsfw,
    ),
    Field::compared(
        "parent_id",
        |s: &S, o: &O| option_differs(s.parent_id.as_ref(), o.parent_id.as_ref()),
        |s: &S, p: &mut P| p.parent_id = s.parent_id.clone(),
    ),
    Field::compared(
        "rate_limit_per_user",
        |s: &S, o: &O| {
            option_differs(s.rate_limit_per_user.as_ref(), o.rate_limit_per_user.as_ref())
        },
        |s: &S, p: &mut P| p.rate_limit_per_user = s.rate_limit_per_user,
    ),
    Field::compared(
        "bitrate",
        |s: &S, o: &O| option_differs(s.bitrate.as_ref(), o.bitrate.as_ref()),
        |s: &S, p: &mut P| p.bitrate = s.bitrate,
    ),
    Field::compared(
        "user_limit",
        |s: &S, o: &O| option_differs(s.user_limit.as_ref(), o.user_limit.as_ref()),
        |s: &S, p: &mut P| p.user_limit = s.user_limit,
    ),
];

/// Reconciles guild channels. Full CRUD.
#[derive(Debug, Clone)]
pub struct ChannelAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for ChannelAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExternalClient for ChannelAdapter {
    type Spec = ChannelSpec;
    type Observation = ChannelObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Channel
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut ChannelResource) -> StewardResult<ExternalObservation> {
        let Some(id) = usable_id(mr, self.kind()) else {
            return Ok(ExternalObservation::absent());
        };
        let Some(channel) = found(self.client.get_channel(&id).await)? else {
            return Ok(vanished(mr));
        };

        let observed = ChannelObservation::from(channel);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(?drifted, "Compared channel");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty()))
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), guild_id = %mr.spec().guild_id))]
    async fn create(&self, mr: &mut ChannelResource) -> StewardResult<ExternalCreation> {
        mr.set_condition(Condition::creating());
        let spec = mr.spec();
        let request = CreateChannelRequest {
            name: spec.name.clone(),
            kind: spec.kind,
            topic: spec.topic.clone(),
            position: spec.position,
            nsfw: spec.nsfw,
            parent_id: spec.parent_id.clone(),
            rate_limit_per_user: spec.rate_limit_per_user,
            bitrate: spec.bitrate,
            user_limit: spec.user_limit,
        };

        let channel = self
            .client
            .create_channel(&spec.guild_id, &request)
            .await?;
        info!(id = %channel.id, "Created channel");
        mr.set_external_name(channel.id);
        Ok(ExternalCreation::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut ChannelResource) -> StewardResult<ExternalUpdate> {
        let id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("Channel already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let channel = self.client.modify_channel(&id, &request).await?;
        info!(%id, "Updated channel");
        mr.set_observed(channel.into());
        Ok(ExternalUpdate::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn delete(&self, mr: &mut ChannelResource) -> StewardResult<()> {
        let Some(id) = usable_id(mr, self.kind()) else {
            debug!("No remote channel to delete");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(self.client.delete_channel(&id).await)?;
        info!(%id, "Deleted channel");
        Ok(())
    }
}
