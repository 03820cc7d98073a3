//! Credential resolution errors.

/// Specific credential resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CredentialErrorKind {
    /// The managed resource names no provider configuration.
    #[display("Resource '{}' has no provider config reference", _0)]
    MissingProviderConfigRef(String),

    /// The referenced provider configuration does not exist.
    #[display("Provider config '{}' not found", _0)]
    ProviderConfigNotFound(String),

    /// The provider configuration carries no secret reference.
    #[display("Provider config '{}' has no credentials secret reference", _0)]
    MissingSecretRef(String),

    /// The referenced secret does not exist.
    #[display("Secret {}/{} not found", namespace, name)]
    SecretNotFound {
        /// Secret namespace
        namespace: String,
        /// Secret name
        name: String,
    },

    /// The secret exists but lacks the requested key.
    #[display("Key '{}' not found in secret {}/{}", key, namespace, name)]
    KeyNotFound {
        /// Secret namespace
        namespace: String,
        /// Secret name
        name: String,
        /// Missing key
        key: String,
    },

    /// The secret material could not be read or is not valid UTF-8.
    #[display("Secret material unreadable: {}", _0)]
    Unreadable(String),
}

/// Credential error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Credential Error: {} at line {} in {}", kind, line, file)]
pub struct CredentialError {
    kind: CredentialErrorKind,
    line: u32,
    file: &'static str,
}

impl CredentialError {
    /// Create a new credential error with caller location tracking.
    #[track_caller]
    pub fn new(kind: CredentialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CredentialErrorKind {
        &self.kind
    }
}
