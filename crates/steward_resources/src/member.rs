//! Guild member adapter.
//!
//! Members join through invites or OAuth2, so Create is refused. A member is
//! addressed by its user ID, taken from the external name or, before the
//! first successful Observe, from `spec.userId`.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, option_differs, patch, set_differs, value_differs};
use crate::support::{adopt, found, gone, require_id, usable_or_declared_id, vanished};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{DiscordClient, GuildMember, ModifyMemberRequest};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Desired member settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSpec {
    /// Guild the member belongs to
    pub guild_id: String,
    /// User snowflake of the member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Guild nickname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Role snowflakes, compared as a set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Server mute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute: Option<bool>,
    /// Server deafen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deaf: Option<bool>,
}

/// Last-known remote member state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberObservation {
    /// User snowflake
    pub user_id: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Guild nickname
    pub nick: Option<String>,
    /// Role snowflakes
    pub roles: Vec<String>,
    /// Join time
    pub joined_at: Option<DateTime<Utc>>,
    /// Server muted
    pub mute: bool,
    /// Server deafened
    pub deaf: bool,
    /// Has not passed membership screening
    pub pending: Option<bool>,
    /// Timeout expiry
    pub communication_disabled_until: Option<DateTime<Utc>>,
}

impl From<GuildMember> for MemberObservation {
    fn from(member: GuildMember) -> Self {
        let (user_id, username) = match member.user {
            Some(user) => (Some(user.id), Some(user.username)),
            None => (None, None),
        };
        Self {
            user_id,
            username,
            nick: member.nick,
            roles: member.roles,
            joined_at: member.joined_at,
            mute: member.mute,
            deaf: member.deaf,
            pending: member.pending,
            communication_disabled_until: member.communication_disabled_until,
        }
    }
}

/// A managed guild member.
pub type MemberResource = Managed<MemberSpec, MemberObservation>;

type S = MemberSpec;
type O = MemberObservation;
type P = ModifyMemberRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "nick",
        |s: &S, o: &O| option_differs(s.nick.as_ref(), o.nick.as_ref()),
        |s: &S, p: &mut P| p.nick = s.nick.clone(),
    ),
    Field::compared(
        "roles",
        |s: &S, o: &O| set_differs(s.roles.as_ref(), &o.roles),
        |s: &S, p: &mut P| p.roles = s.roles.clone(),
    ),
    Field::compared(
        "mute",
        |s: &S, o: &O| value_differs(s.mute.as_ref(), &o.mute),
        |s: &S, p: &mut P| p.mute = s.mute,
    ),
    Field::compared(
        "deaf",
        |s: &S, o: &O| value_differs(s.deaf.as_ref(), &o.deaf),
        |s: &S, p: &mut P| p.deaf = s.deaf,
    ),
];

/// Reconciles guild members. Update and delete (kick) only.
#[derive(Debug, Clone)]
pub struct MemberAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for MemberAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

fn target(mr: &MemberResource) -> Option<String> {
    usable_or_declared_id(mr, ResourceKind::Member, mr.spec().user_id.as_deref())
}

#[async_trait]
impl ExternalClient for MemberAdapter {
    type Spec = MemberSpec;
    type Observation = MemberObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Member
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), guild_id = %mr.spec().guild_id))]
    async fn observe(&self, mr: &mut MemberResource) -> StewardResult<ExternalObservation> {
        let Some(user_id) = target(mr) else {
            return Ok(ExternalObservation::absent());
        };
        let lookup = self.client.get_member(&mr.spec().guild_id, &user_id).await;
        let Some(member) = found(lookup)? else {
            return Ok(vanished(mr));
        };

        adopt(mr, self.kind(), &user_id);
        let observed = MemberObservation::from(member);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(%user_id, ?drifted, "Compared member");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty()))
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut MemberResource) -> StewardResult<ExternalUpdate> {
        let user_id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("Member already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let member = self
            .client
            .modify_member(&mr.spec().guild_id, &user_id, &request)
            .await?;
        info!(%user_id, "Updated member");
        mr.set_observed(member.into());
        Ok(ExternalUpdate::default())
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), guild_id = %mr.spec().guild_id))]
    async fn delete(&self, mr: &mut MemberResource) -> StewardResult<()> {
        let Some(user_id) = target(mr) else {
            debug!("No member to remove");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(
            self.client
                .remove_member(&mr.spec().guild_id, &user_id)
                .await,
        )?;
        info!(%user_id, "Removed member");
        Ok(())
    }
}
