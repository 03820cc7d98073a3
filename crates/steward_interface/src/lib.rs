//! Trait definitions for the steward workspace.
//!
//! This crate provides the seams between the reconciliation core and its
//! collaborators: the four-verb external client, the per-kind connector, the
//! credential and provider-config lookups, and the connection-details sink.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    ConnectionDetailsSink, Connector, CredentialResolver, ExternalClient, ProviderConfigStore,
};
pub use types::{ExternalCreation, ExternalObservation, ExternalUpdate};
