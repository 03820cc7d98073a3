//! Reconciliation protocol errors.
//!
//! These are raised locally by the adapters and never reach the remote API.

/// Reconciliation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ReconcileErrorKind {
    /// The resource kind does not support the requested verb.
    #[display("{} does not support {}: {}", kind, operation, reason)]
    UnsupportedOperation {
        /// Resource kind
        kind: String,
        /// Rejected verb
        operation: String,
        /// Why the remote system forbids it
        reason: String,
    },

    /// A verb that addresses the remote entity ran before any ID was known.
    #[display("{} has no external name; observe or create it first", kind)]
    MissingExternalName {
        /// Resource kind
        kind: String,
    },

    /// Modification was requested for an identity other than the caller's own.
    #[display("{} {} is not the authenticated identity and is read-only", kind, id)]
    ForeignIdentity {
        /// Resource kind
        kind: String,
        /// Identifier of the foreign entity
        id: String,
    },
}

/// Reconciliation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Reconcile Error: {} at line {} in {}", kind, line, file)]
pub struct ReconcileError {
    kind: ReconcileErrorKind,
    line: u32,
    file: &'static str,
}

impl ReconcileError {
    /// Create a new reconcile error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ReconcileErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReconcileErrorKind {
        &self.kind
    }
}
