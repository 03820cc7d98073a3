//! Error types for the steward workspace.
//!
//! This crate provides the foundation error types used by every steward crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Remote "not found" conditions are carried structurally (HTTP status or the
//! list-and-scan sentinel) so callers never need to inspect message text.
//!
//! # Examples
//!
//! ```
//! use steward_error::{DiscordError, DiscordErrorKind, StewardResult};
//!
//! fn fetch_guild() -> StewardResult<String> {
//!     Err(DiscordError::new(DiscordErrorKind::Api {
//!         status: 404,
//!         body: r#"{"message": "Unknown Guild", "code": 10004}"#.to_string(),
//!     }))?
//! }
//!
//! let err = fetch_guild().unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credential;
mod discord;
mod error;
mod reconcile;

pub use config::ConfigError;
pub use credential::{CredentialError, CredentialErrorKind};
pub use discord::{DiscordError, DiscordErrorKind};
pub use error::{StewardError, StewardErrorKind, StewardResult};
pub use reconcile::{ReconcileError, ReconcileErrorKind};
