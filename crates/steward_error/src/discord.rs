//! Remote API error types.
//!
//! Every failure surfaced by the Discord REST client lands here: transport
//! problems, payload encoding and decoding, and non-success HTTP statuses.

use derive_getters::Getters;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// The underlying HTTP client could not be constructed.
    #[display("HTTP client construction failed: {_0}")]
    Client(String),

    /// The bot token cannot be used as an HTTP header value.
    #[display("Invalid token: {_0}")]
    InvalidToken(String),

    /// Transport-level failure (DNS, connect, timeout, TLS).
    #[display("Request failed: {_0}")]
    Request(String),

    /// The request payload could not be serialized.
    #[display("Failed to encode request body: {_0}")]
    Encode(String),

    /// A successful response body did not match the expected shape.
    #[display("Failed to decode response body: {_0}")]
    Decode(String),

    /// The remote API answered with a status of 400 or above.
    #[display("Discord API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A list-and-scan lookup found no entity with the requested ID.
    #[display("{resource} not found: {id}")]
    NotFound {
        /// Resource kind that was looked up
        resource: String,
        /// Identifier that was searched for
        id: String,
    },
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use steward_error::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::Request("connection reset".into()));
    /// assert!(!err.is_not_found());
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for the list-and-scan "not found" sentinel.
    #[track_caller]
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(DiscordErrorKind::NotFound {
            resource: resource.into(),
            id: id.into(),
        })
    }

    /// True when the remote entity does not exist.
    ///
    /// Matches an HTTP 404 from the remote API as well as the sentinel
    /// produced by client-side list scans.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            DiscordErrorKind::Api { status: 404, .. } | DiscordErrorKind::NotFound { .. }
        )
    }

    /// HTTP status code, when the error came from a remote rejection.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            DiscordErrorKind::Api { status, .. } => Some(status),
            _ => None,
        }
    }
}
