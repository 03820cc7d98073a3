//! Top-level error wrapper types.

use crate::{ConfigError, CredentialError, DiscordError, ReconcileError};

/// Every error family a reconciliation pass can produce.
///
/// # Examples
///
/// ```
/// use steward_error::{ConfigError, StewardError};
///
/// let err: StewardError = ConfigError::new("bad base_url").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StewardErrorKind {
    /// Remote API client error
    #[from(DiscordError)]
    Discord(DiscordError),
    /// Credential resolution error
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Reconciliation protocol error
    #[from(ReconcileError)]
    Reconcile(ReconcileError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Steward error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Steward Error: {}", _0)]
pub struct StewardError(Box<StewardErrorKind>);

impl StewardError {
    /// Create a new error from a kind.
    pub fn new(kind: StewardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StewardErrorKind {
        &self.0
    }

    /// True when the underlying failure is a remote "entity absent" answer.
    pub fn is_not_found(&self) -> bool {
        match self.kind() {
            StewardErrorKind::Discord(err) => err.is_not_found(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to StewardErrorKind
impl<T> From<T> for StewardError
where
    T: Into<StewardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for steward operations.
pub type StewardResult<T> = std::result::Result<T, StewardError>;
