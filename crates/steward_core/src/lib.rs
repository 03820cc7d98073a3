//! Core data types for the steward workspace.
//!
//! This crate provides the desired-state object model shared by every
//! reconciliation adapter: the managed resource envelope, lifecycle
//! conditions, connection details, provider configuration references and the
//! per-kind capability matrix.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod condition;
mod connection;
mod kind;
mod managed;
mod provider;

pub use condition::{Condition, ConditionReason, ConditionStatus, ConditionType};
pub use connection::ConnectionDetails;
pub use kind::{
    Capabilities, CreateSupport, DeleteSupport, IdShape, Operation, ResourceKind, UpdateSupport,
};
pub use managed::{Managed, ObjectMeta, ResourceStatus};
pub use provider::{
    ProviderConfig, ProviderConfigReference, ProviderCredentials, SecretKeySelector,
};
