//! Guild adapter.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, option_differs, patch, value_differs};
use crate::support::{found, gone, require_id, usable_id, vanished};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{CreateGuildRequest, DiscordClient, Guild, ModifyGuildRequest};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalCreation, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Desired guild settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildSpec {
    /// Guild name
    pub name: String,
    /// Voice region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Base64 image data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Verification level 0-4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_level: Option<u8>,
    /// Default notification level 0-1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_message_notifications: Option<u8>,
    /// Explicit content filter 0-2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_content_filter: Option<u8>,
    /// AFK voice channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afk_channel_id: Option<String>,
    /// AFK timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afk_timeout: Option<u32>,
    /// System message channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_channel_id: Option<String>,
    /// System channel flag bitfield
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_channel_flags: Option<u64>,
}

/// Last-known remote guild state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildObservation {
    /// Guild snowflake
    pub id: String,
    /// Guild name
    pub name: String,
    /// Icon hash
    pub icon: Option<String>,
    /// Owner snowflake
    pub owner_id: Option<String>,
    /// Voice region
    pub region: Option<String>,
    /// AFK voice channel
    pub afk_channel_id: Option<String>,
    /// AFK timeout in seconds
    pub afk_timeout: u32,
    /// Verification level
    pub verification_level: u8,
    /// Default notification level
    pub default_message_notifications: u8,
    /// Explicit content filter
    pub explicit_content_filter: u8,
    /// Enabled guild features
    pub features: Vec<String>,
    /// System message channel
    pub system_channel_id: Option<String>,
    /// System channel flags
    pub system_channel_flags: u64,
    /// Boost tier
    pub premium_tier: u8,
    /// Guild description
    pub description: Option<String>,
}

impl From<Guild> for GuildObservation {
    fn from(guild: Guild) -> Self {
        Self {
            id: guild.id,
            name: guild.name,
            icon: guild.icon,
            owner_id: guild.owner_id,
            region: guild.region,
            afk_channel_id: guild.afk_channel_id,
            afk_timeout: guild.afk_timeout,
            verification_level: guild.verification_level,
            default_message_notifications: guild.default_message_notifications,
            explicit_content_filter: guild.explicit_content_filter,
            features: guild.features,
            system_channel_id: guild.system_channel_id,
            system_channel_flags: guild.system_channel_flags,
            premium_tier: guild.premium_tier,
            description: guild.description,
        }
    }
}

/// A managed guild.
pub type GuildResource = Managed<GuildSpec, GuildObservation>;

type S = GuildSpec;
type O = GuildObservation;
type P = ModifyGuildRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "name",
        |s: &S, o: &O| s.name != o.name,
        |s: &S, p: &mut P| p.name = Some(s.name.clone()),
    ),
    Field::compared(
        "region",
        |s: &S, o: &O| option_differs(s.region.as_ref(), o.region.as_ref()),
        |s: &S, p: &mut P| p.region = s.region.clone(),
    ),
    Field::compared(
        "verification_level",
        |s: &S, o: &O| value_differs(s.verification_level.as_ref(), &o.verification_level),
        |s: &S, p: &mut P| p.verification_level = s.verification_level,
    ),
    Field::compared(
        "default_message_notifications",
        |s: &S, o: &O| {
            value_differs(
                s.default_message_notifications.as_ref(),
                &o.default_message_notifications,
            )
        },
        |s: &S, p: &mut P| p.default_message_notifications = s.default_message_notifications,
    ),
    Field::compared(
        "explicit_content_filter",
        |s: &S, o: &O| {
            value_differs(s.explicit_content_filter.as_ref(), &o.explicit_content_filter)
        },
        |s: &S, p: &mut P| p.explicit_content_filter = s.explicit_content_filter,
    ),
    Field::compared(
        "afk_timeout",
        |s: &S, o: &O| value_differs(s.afk_timeout.as_ref(), &o.afk_timeout),
        |s: &S, p: &mut P| p.afk_timeout = s.afk_timeout,
    ),
    Field::compared(
        "system_channel_flags",
        |s: &S, o: &O| value_differs(s.system_channel_flags.as_ref(), &o.system_channel_flags),
        |s: &S, p: &mut P| p.system_channel_flags = s.system_channel_flags,
    ),
    Field::write_only("icon", |s: &S, p: &mut P| p.icon = s.icon.clone()),
    Field::write_only("afk_channel_id", |s: &S, p: &mut P| {
        p.afk_channel_id = s.afk_channel_id.clone()
    }),
    Field::write_only("system_channel_id", |s: &S, p: &mut P| {
        p.system_channel_id = s.system_channel_id.clone()
    }),
];

/// Reconciles guilds. Full CRUD.
#[derive(Debug, Clone)]
pub struct GuildAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for GuildAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExternalClient for GuildAdapter {
    type Spec = GuildSpec;
    type Observation = GuildObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Guild
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut GuildResource) -> StewardResult<ExternalObservation> {
        let Some(id) = usable_id(mr, self.kind()) else {
            return Ok(ExternalObservation::absent());
        };
        let Some(guild) = found(self.client.get_guild(&id).await)? else {
            return Ok(vanished(mr));
        };

        let observed = GuildObservation::from(guild);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(?drifted, "Compared guild");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty()))
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name()))]
    async fn create(&self, mr: &mut GuildResource) -> StewardResult<ExternalCreation> {
        mr.set_condition(Condition::creating());
        let spec = mr.spec();
        let request = CreateGuildRequest {
            name: spec.name.clone(),
            region: spec.region.clone(),
            icon: spec.icon.clone(),
            verification_level: spec.verification_level,
            default_message_notifications: spec.default_message_notifications,
            explicit_content_filter: spec.explicit_content_filter,
            afk_channel_id: spec.afk_channel_id.clone(),
            afk_timeout: spec.afk_timeout,
            system_channel_id: spec.system_channel_id.clone(),
            system_channel_flags: spec.system_channel_flags,
        };

        let guild = self.client.create_guild(&request).await?;
        info!(id = %guild.id, "Created guild");
        mr.set_external_name(guild.id);
        Ok(ExternalCreation::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut GuildResource) -> StewardResult<ExternalUpdate> {
        let id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("Guild already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let guild = self.client.modify_guild(&id, &request).await?;
        info!(%id, "Updated guild");
        mr.set_observed(guild.into());
        Ok(ExternalUpdate::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn delete(&self, mr: &mut GuildResource) -> StewardResult<()> {
        let Some(id) = usable_id(mr, self.kind()) else {
            debug!("No remote guild to delete");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(self.client.delete_guild(&id).await)?;
        info!(%id, "Deleted guild");
        Ok(())
    }
}
