//! Reconciliation adapters for every Discord entity kind steward manages.
//!
//! Each kind has a `*Spec` (caller intent), a `*Observation` (last-known
//! remote state), an adapter implementing [`ExternalClient`] and a connector
//! alias over [`DiscordConnector`]. The capability matrix of
//! [`ResourceKind::capabilities`] decides which verbs an adapter overrides:
//!
//! | Kind | Create | Update | Delete |
//! |---|---|---|---|
//! | Guild, Channel, Role, Webhook | remote | remote | remote |
//! | Invite | remote | no-op | remote |
//! | Member | refused | remote | remote |
//! | User, Application | refused | own identity only | untrack |
//! | Integration | refused | refused | remote |
//!
//! Refused verbs fail locally and never reach the remote API. Every remote
//! delete treats an already-absent entity as success.
//!
//! [`ExternalClient`]: steward_interface::ExternalClient
//! [`ResourceKind::capabilities`]: steward_core::ResourceKind::capabilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod application;
mod channel;
mod connector;
mod credentials;
mod drift;
mod guild;
mod integration;
mod invite;
mod member;
mod role;
mod support;
mod user;
mod webhook;

pub use application::{
    ApplicationAdapter, ApplicationObservation, ApplicationResource, ApplicationSpec,
};
pub use channel::{ChannelAdapter, ChannelObservation, ChannelResource, ChannelSpec};
pub use connector::{
    ApplicationConnector, ChannelConnector, DiscordConnector, FromDiscordClient, GuildConnector,
    IntegrationConnector, InviteConnector, MemberConnector, RoleConnector, UserConnector,
    WebhookConnector,
};
pub use credentials::{DirectorySecretStore, InMemoryProviderConfigStore, InMemorySecretStore};
pub use drift::{Field, drift, patch};
pub use guild::{GuildAdapter, GuildObservation, GuildResource, GuildSpec};
pub use integration::{
    IntegrationAdapter, IntegrationObservation, IntegrationResource, IntegrationSpec,
};
pub use invite::{InviteAdapter, InviteObservation, InviteResource, InviteSpec};
pub use member::{MemberAdapter, MemberObservation, MemberResource, MemberSpec};
pub use role::{RoleAdapter, RoleObservation, RoleResource, RoleSpec};
pub use user::{UserAdapter, UserObservation, UserResource, UserSpec};
pub use webhook::{WebhookAdapter, WebhookObservation, WebhookResource, WebhookSpec};
