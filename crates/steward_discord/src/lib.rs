//! Typed Discord REST client.
//!
//! One method per (resource kind × operation) that steward manages, each
//! with its own request and response payloads. The client is deliberately
//! thin:
//! - bearer-style `Authorization` header injected from the held token
//! - JSON bodies with unset optional fields omitted (PATCH semantics)
//! - any status ≥ 400 becomes [`DiscordErrorKind::Api`] with the raw body
//! - 2xx bodies that fail to decode are hard errors
//! - no caching, batching or retry; a 429 is an ordinary error
//!
//! Lookups the remote API only exposes as lists (roles, integrations) scan
//! the list client-side and return [`DiscordErrorKind::NotFound`] when the
//! ID is absent.
//!
//! # Usage
//!
//! ```rust,ignore
//! use steward_discord::{ApiSettings, DiscordClient};
//!
//! let client = DiscordClient::new(&ApiSettings::default(), &token)?;
//! let guild = client.get_guild("197038439483310086").await?;
//! println!("{}", guild.name);
//! ```
//!
//! [`DiscordErrorKind::Api`]: steward_error::DiscordErrorKind::Api
//! [`DiscordErrorKind::NotFound`]: steward_error::DiscordErrorKind::NotFound

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod application;
mod channel;
mod client;
mod guild;
mod integration;
mod invite;
mod member;
mod role;
mod user;
mod webhook;

pub use application::{Application, ModifyCurrentApplicationRequest};
pub use channel::{Channel, CreateChannelRequest, ModifyChannelRequest};
pub use client::{
    ApiSettings, ApiSettingsBuilder, ClientFactory, DiscordClient, DiscordResult,
    HttpClientFactory,
};
pub use guild::{CreateGuildRequest, Guild, ModifyGuildRequest};
pub use integration::{Integration, IntegrationAccount};
pub use invite::{CreateInviteRequest, Invite, InviteChannel, InviteGuild};
pub use member::{GuildMember, ModifyMemberRequest};
pub use role::{CreateRoleRequest, ModifyRoleRequest, Role};
pub use user::{ModifyCurrentUserRequest, User};
pub use webhook::{CreateWebhookRequest, ModifyWebhookRequest, Webhook};
