//! User adapter.
//!
//! Any user can be observed. Only the account the token belongs to can be
//! modified, and there is no way to create or delete one.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, patch, value_differs};
use crate::support::{adopt, found, require_id, usable_or_declared_id, vanished};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{DiscordClient, ModifyCurrentUserRequest, User};
use steward_error::{ReconcileError, ReconcileErrorKind, StewardResult};
use steward_interface::{ExternalClient, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Desired user settings.
///
/// Without a `userId` the resource tracks the authenticated account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpec {
    /// User snowflake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Base64 image data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Last-known remote user state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserObservation {
    /// User snowflake
    pub id: String,
    /// Username
    pub username: String,
    /// Legacy discriminator
    pub discriminator: Option<String>,
    /// Display name
    pub global_name: Option<String>,
    /// Avatar hash
    pub avatar: Option<String>,
    /// Bot account
    pub bot: Option<bool>,
}

impl From<User> for UserObservation {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            discriminator: user.discriminator,
            global_name: user.global_name,
            avatar: user.avatar,
            bot: user.bot,
        }
    }
}

/// A managed user.
pub type UserResource = Managed<UserSpec, UserObservation>;

type S = UserSpec;
type O = UserObservation;
type P = ModifyCurrentUserRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "username",
        |s: &S, o: &O| value_differs(s.username.as_ref(), &o.username),
        |s: &S, p: &mut P| p.username = s.username.clone(),
    ),
    Field::write_only("avatar", |s: &S, p: &mut P| p.avatar = s.avatar.clone()),
];

/// Reconciles user accounts. Observe any, update only the caller's own.
#[derive(Debug, Clone)]
pub struct UserAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for UserAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExternalClient for UserAdapter {
    type Spec = UserSpec;
    type Observation = UserObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::User
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut UserResource) -> StewardResult<ExternalObservation> {
        let target = usable_or_declared_id(mr, self.kind(), mr.spec().user_id.as_deref());
        let lookup = match target {
            Some(id) => self.client.get_user(&id).await,
            None if mr.spec().user_id.is_some() || mr.external_name().is_some() => {
                debug!("Recorded or declared user ID is not a snowflake");
                return Ok(ExternalObservation::absent());
            }
            None => self.client.current_user().await,
        };
        let Some(user) = found(lookup)? else {
            return Ok(vanished(mr));
        };

        adopt(mr, self.kind(), &user.id);
        let observed = UserObservation::from(user);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(?drifted, "Compared user");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty()))
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut UserResource) -> StewardResult<ExternalUpdate> {
        let id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("User already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let me = self.client.current_user().await?;
        if me.id != id {
            return Err(ReconcileError::new(ReconcileErrorKind::ForeignIdentity {
                kind: self.kind().to_string(),
                id,
            })
            .into());
        }

        let user = self.client.modify_current_user(&request).await?;
        info!(%id, "Updated current user");
        mr.set_observed(user.into());
        Ok(ExternalUpdate::default())
    }

    async fn delete(&self, mr: &mut UserResource) -> StewardResult<()> {
        debug!(resource = %mr.name(), "Users cannot be deleted; releasing local tracking only");
        Ok(())
    }
}
