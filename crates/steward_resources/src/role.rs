//! Role adapter.
//!
//! Roles are addressed by guild and role ID. Observe goes through the
//! client's list-and-scan lookup.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, option_differs, patch, value_differs};
use crate::support::{found, gone, require_id, usable_id, vanished};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{CreateRoleRequest, DiscordClient, ModifyRoleRequest, Role};
use steward_error::StewardResult;
use steward_interface::{ExternalClient, ExternalCreation, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Desired role settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    /// Parent guild
    pub guild_id: String,
    /// Role name
    pub name: String,
    /// Permission bitfield as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// RGB color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Shown separately in the member list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoist: Option<bool>,
    /// Can be mentioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentionable: Option<bool>,
    /// Unicode emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_emoji: Option<String>,
}

/// Last-known remote role state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleObservation {
    /// Role snowflake
    pub id: String,
    /// Role name
    pub name: String,
    /// RGB color
    pub color: u32,
    /// Shown separately
    pub hoist: bool,
    /// Hierarchy position
    pub position: i32,
    /// Permission bitfield
    pub permissions: String,
    /// Managed by an integration
    pub managed: bool,
    /// Can be mentioned
    pub mentionable: bool,
    /// Unicode emoji
    pub unicode_emoji: Option<String>,
}

impl From<Role> for RoleObservation {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            color: role.color,
            hoist: role.hoist,
            position: role.position,
            permissions: role.permissions,
            managed: role.managed,
            mentionable: role.mentionable,
            unicode_emoji: role.unicode_emoji,
        }
    }
}

/// A managed role.
pub type RoleResource = Managed<RoleSpec, RoleObservation>;

type S = RoleSpec;
type O = RoleObservation;
type P = ModifyRoleRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "name",
        |s: &S, o: &O| s.name != o.name,
        |s: &S, p: &mut P| p.name = Some(s.name.clone()),
    ),
    Field::compared(
        "permissions",
        |s: &S, o: &O| value_differs(s.permissions.as_ref(), &o.permissions),
        |s: &S, p: &mut P| p.permissions = s.permissions.clone(),
    ),
    Field::compared(
        "color",
        |s: &S, o: &O| value_differs(s.color.as_ref(), &o.color),
        |s: &S, p: &mut P| p.color = s.color,
    ),
    Field::compared(
        "hoist",
        |s: &S, o: &O| value_differs(s.hoist.as_ref(), &o.hoist),
        |s: &S, p: &mut P| p.hoist = s.hoist,
    ),
    Field::compared(
        "mentionable",
        |s: &S, o: &O| value_differs(s.mentionable.as_ref(), &o.mentionable),
        |s: &S, p: &mut P| p.mentionable = s.mentionable,
    ),
    Field::compared(
        "unicode_emoji",
        |s: &S, o: &O| option_differs(s.unicode_emoji.as_ref(), o.unicode_emoji.as_ref()),
        |s: &S, p: &mut P| p.unicode_emoji = s.unicode_emoji.clone(),
    ),
];

/// Reconciles guild roles. Full CRUD.
#[derive(Debug, Clone)]
pub struct RoleAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for RoleAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExternalClient for RoleAdapter {
    type Spec = RoleSpec;
    type Observation = RoleObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Role
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut RoleResource) -> StewardResult<ExternalObservation> {
        let Some(id) = usable_id(mr, self.kind()) else {
            return Ok(ExternalObservation::absent());
        };
        let lookup = self.client.get_role(&mr.spec().guild_id, &id).await;
        let Some(role) = found(lookup)? else {
            return Ok(vanished(mr));
        };

        let observed = RoleObservation::from(role);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(?drifted, "Compared role");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty()))
    }

    #[instrument(skip(self, mr), fields(resource = %mr.name(), guild_id = %mr.spec().guild_id))]
    async fn create(&self, mr: &mut RoleResource) -> StewardResult<ExternalCreation> {
        mr.set_condition(Condition::creating());
        let spec = mr.spec();
        let request = CreateRoleRequest {
            name: Some(spec.name.clone()),
            permissions: spec.permissions.clone(),
            color: spec.color,
            hoist: spec.hoist,
            mentionable: spec.mentionable,
            unicode_emoji: spec.unicode_emoji.clone(),
        };

        let role = self.client.create_role(&spec.guild_id, &request).await?;
        info!(id = %role.id, "Created role");
        mr.set_external_name(role.id);
        Ok(ExternalCreation::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut RoleResource) -> StewardResult<ExternalUpdate> {
        let id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("Role already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let role = self
            .client
            .modify_role(&mr.spec().guild_id, &id, &request)
            .await?;
        info!(%id, "Updated role");
        mr.set_observed(role.into());
        Ok(ExternalUpdate::default())
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn delete(&self, mr: &mut RoleResource) -> StewardResult<()> {
        let Some(id) = usable_id(mr, self.kind()) else {
            debug!("No remote role to delete");
            return Ok(());
        };
        mr.set_condition(Condition::deleting());
        gone(self.client.delete_role(&mr.spec().guild_id, &id).await)?;
        info!(%id, "Deleted role");
        Ok(())
    }
}
