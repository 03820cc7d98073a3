//! steward: declarative reconciliation of Discord entities.
//!
//! Each managed resource pairs a desired spec with the last observed remote
//! state. A reconciliation pass compares the two and issues at most one
//! create, update or delete against the Discord REST API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use steward::{
//!     GuildConnector, GuildResource, GuildSpec, InMemoryConnectionDetailsSink, Reconciler,
//!     StewardConfig, init_tracing,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StewardConfig::load()?;
//!     init_tracing(config.logging())?;
//!
//!     let secrets = config.secret_store().ok_or("no [secrets] directory configured")?;
//!     let connector = GuildConnector::new(
//!         Arc::new(config.provider_config_store()),
//!         Arc::new(secrets),
//!         Arc::new(config.client_factory()),
//!     );
//!     let reconciler = Reconciler::new(connector, Arc::new(InMemoryConnectionDetailsSink::new()));
//!
//!     let mut guild = GuildResource::new(
//!         "hq",
//!         GuildSpec { name: "Steward HQ".into(), ..Default::default() },
//!     )
//!     .with_provider_config("default");
//!
//!     let outcome = reconciler.reconcile(&mut guild).await?;
//!     println!("{outcome}");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `steward_error` - error families and `StewardError`
//! - `steward_core` - managed resource envelope, conditions, capability matrix
//! - `steward_interface` - `ExternalClient`, `Connector` and credential traits
//! - `steward_discord` - typed REST client
//! - `steward_resources` - per-kind adapters, connectors, secret stores
//!
//! This crate re-exports all of them and adds configuration, tracing setup
//! and the single-pass [`Reconciler`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod reconciler;
mod sink;
mod telemetry;

pub use config::{LoggingConfig, SecretsConfig, StewardConfig};
pub use reconciler::{ReconcileOutcome, Reconciler, ResourceOf};
pub use sink::InMemoryConnectionDetailsSink;
pub use telemetry::init_tracing;

pub use steward_core::*;
pub use steward_discord::*;
pub use steward_error::*;
pub use steward_interface::*;
pub use steward_resources::*;
