//! Results returned by the reconciliation verbs.

use steward_core::ConnectionDetails;

/// Outcome of Observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalObservation {
    /// Whether the remote entity exists
    pub resource_exists: bool,
    /// Whether the remote entity already matches its desired spec
    pub resource_up_to_date: bool,
    /// One-time secret material discovered while observing
    pub connection_details: ConnectionDetails,
}

impl ExternalObservation {
    /// The remote entity does not exist (or cannot be addressed yet).
    pub fn absent() -> Self {
        Self::default()
    }

    /// The remote entity exists.
    pub fn present(up_to_date: bool) -> Self {
        Self {
            resource_exists: true,
            resource_up_to_date: up_to_date,
            connection_details: ConnectionDetails::new(),
        }
    }

    /// Attach connection details.
    pub fn with_connection_details(mut self, details: ConnectionDetails) -> Self {
        self.connection_details = details;
        self
    }
}

/// Outcome of Create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalCreation {
    /// One-time secret material returned by the remote system
    pub connection_details: ConnectionDetails,
}

/// Outcome of Update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalUpdate {
    /// Secret material returned by the modify call, if any
    pub connection_details: ConnectionDetails,
}
