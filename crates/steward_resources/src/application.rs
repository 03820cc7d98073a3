//! Application adapter.
//!
//! The caller's own application is read and modified through `@me`. Any
//! other application is only visible through its public RPC view and stays
//! read-only.

use crate::FromDiscordClient;
use crate::drift::{Field, drift, option_differs, patch, set_differs, value_differs};
use crate::support::{adopt, found, require_id, usable_or_declared_id, vanished};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::{Application, DiscordClient, ModifyCurrentApplicationRequest};
use steward_error::{ReconcileError, ReconcileErrorKind, StewardResult};
use steward_interface::{ExternalClient, ExternalObservation, ExternalUpdate};
use tracing::{debug, info, instrument};

/// Desired application settings.
///
/// Without an `applicationId` the resource tracks the caller's application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    /// Application snowflake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64 image data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Discovery tags, compared as a set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Interactions endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions_endpoint_url: Option<String>,
    /// Role connection verification URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_connections_verification_url: Option<String>,
    /// Custom install link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_install_url: Option<String>,
}

/// Last-known remote application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationObservation {
    /// Application snowflake
    pub id: String,
    /// Application name
    pub name: String,
    /// Icon hash
    pub icon: Option<String>,
    /// Description
    pub description: String,
    /// Anyone can add the bot
    pub bot_public: Option<bool>,
    /// Discovery tags
    pub tags: Vec<String>,
    /// Interactions endpoint
    pub interactions_endpoint_url: Option<String>,
    /// Role connection verification URL
    pub role_connections_verification_url: Option<String>,
    /// Custom install link
    pub custom_install_url: Option<String>,
    /// Application flags
    pub flags: Option<u64>,
    /// Owning user
    pub owner_id: Option<String>,
}

impl From<Application> for ApplicationObservation {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            name: application.name,
            icon: application.icon,
            description: application.description,
            bot_public: application.bot_public,
            tags: application.tags.unwrap_or_default(),
            interactions_endpoint_url: application.interactions_endpoint_url,
            role_connections_verification_url: application.role_connections_verification_url,
            custom_install_url: application.custom_install_url,
            flags: application.flags,
            owner_id: application.owner.map(|owner| owner.id),
        }
    }
}

/// A managed application.
pub type ApplicationResource = Managed<ApplicationSpec, ApplicationObservation>;

type S = ApplicationSpec;
type O = ApplicationObservation;
type P = ModifyCurrentApplicationRequest;

const FIELDS: &[Field<S, O, P>] = &[
    Field::compared(
        "description",
        |s: &S, o: &O| value_differs(s.description.as_ref(), &o.description),
        |s: &S, p: &mut P| p.description = s.description.clone(),
    ),
    Field::compared(
        "tags",
        |s: &S, o: &O| set_differs(s.tags.as_ref(), &o.tags),
        |s: &S, p: &mut P| p.tags = s.tags.clone(),
    ),
    Field::compared(
        "interactions_endpoint_url",
        |s: &S, o: &O| {
            option_differs(
                s.interactions_endpoint_url.as_ref(),
                o.interactions_endpoint_url.as_ref(),
            )
        },
        |s: &S, p: &mut P| p.interactions_endpoint_url = s.interactions_endpoint_url.clone(),
    ),
    Field::compared(
        "role_connections_verification_url",
        |s: &S, o: &O| {
            option_differs(
                s.role_connections_verification_url.as_ref(),
                o.role_connections_verification_url.as_ref(),
            )
        },
        |s: &S, p: &mut P| {
            p.role_connections_verification_url = s.role_connections_verification_url.clone()
        },
    ),
    Field::compared(
        "custom_install_url",
        |s: &S, o: &O| option_differs(s.custom_install_url.as_ref(), o.custom_install_url.as_ref()),
        |s: &S, p: &mut P| p.custom_install_url = s.custom_install_url.clone(),
    ),
    Field::write_only("icon", |s: &S, p: &mut P| p.icon = s.icon.clone()),
];

/// Reconciles applications. Observe any, update only the caller's own.
#[derive(Debug, Clone)]
pub struct ApplicationAdapter {
    client: DiscordClient,
}

impl FromDiscordClient for ApplicationAdapter {
    fn from_client(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExternalClient for ApplicationAdapter {
    type Spec = ApplicationSpec;
    type Observation = ApplicationObservation;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Application
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn observe(&self, mr: &mut ApplicationResource) -> StewardResult<ExternalObservation> {
        let declared = mr.spec().application_id.clone();
        let target = usable_or_declared_id(mr, self.kind(), declared.as_deref());
        let application = match target {
            Some(id) => match found(self.client.current_application().await)? {
                Some(own) if own.id == id => own,
                _ => {
                    let Some(public) = found(self.client.get_application_rpc(&id).await)? else {
                        return Ok(vanished(mr));
                    };
                    public
                }
            },
            None if declared.is_some() || mr.external_name().is_some() => {
                debug!("Recorded or declared application ID is not a snowflake");
                return Ok(ExternalObservation::absent());
            }
            None => {
                let Some(own) = found(self.client.current_application().await)? else {
                    return Ok(vanished(mr));
                };
                own
            }
        };

        adopt(mr, self.kind(), &application.id);
        let observed = ApplicationObservation::from(application);
        let drifted = drift(FIELDS, mr.spec(), &observed);
        debug!(?drifted, "Compared application");
        mr.set_observed(observed);
        mr.set_condition(Condition::available());
        Ok(ExternalObservation::present(drifted.is_empty()))
    }

    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    async fn update(&self, mr: &mut ApplicationResource) -> StewardResult<ExternalUpdate> {
        let id = require_id(mr, self.kind())?;
        let Some(request) = patch(FIELDS, mr.spec(), mr.observed()) else {
            debug!("Application already matches spec");
            return Ok(ExternalUpdate::default());
        };

        let own = self.client.current_application().await?;
        if own.id != id {
            return Err(ReconcileError::new(ReconcileErrorKind::ForeignIdentity {
                kind: self.kind().to_string(),
                id,
            })
            .into());
        }

        let application = self.client.modify_current_application(&request).await?;
        info!(%id, "Updated current application");
        mr.set_observed(application.into());
        Ok(ExternalUpdate::default())
    }

    async fn delete(&self, mr: &mut ApplicationResource) -> StewardResult<()> {
        debug!(
            resource = %mr.name(),
            "Applications cannot be deleted; releasing local tracking only"
        );
        Ok(())
    }
}
