//! The desired-state object envelope.

use crate::{Condition, ConditionType, ProviderConfigReference};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identity and bookkeeping for a managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Local name of the declared object
    pub name: String,
    /// Correlation ID assigned by the remote system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
    /// Credentials configuration to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config_ref: Option<ProviderConfigReference>,
    /// Set by the declaring caller when the object should be removed
    #[serde(default)]
    pub deletion_requested: bool,
}

/// Observed state and lifecycle conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus<O> {
    /// Last-known remote state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<O>,
    /// Lifecycle conditions, at most one per type
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl<O> Default for ResourceStatus<O> {
    fn default() -> Self {
        Self {
            observed: None,
            conditions: Vec::new(),
        }
    }
}

impl<O> ResourceStatus<O> {
    /// Record a condition, replacing any previous one of the same type.
    ///
    /// An equivalent condition keeps its original transition time.
    pub fn set_condition(&mut self, condition: Condition) {
        match self.conditions.iter_mut().find(|c| c.kind == condition.kind) {
            Some(existing) if existing.equivalent(&condition) => {}
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }

    /// Current condition of the given type.
    pub fn condition(&self, kind: ConditionType) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }
}

/// A desired-state object: caller intent plus last-observed status.
///
/// The declaring caller owns `spec`. Reconciliation adapters only touch the
/// status and the external name.
///
/// # Examples
///
/// ```
/// use steward_core::Managed;
///
/// let mut mr: Managed<String, ()> = Managed::new("announcements", "spec".to_string())
///     .with_provider_config("default");
/// assert!(mr.external_name().is_none());
///
/// mr.set_external_name("175928847299117063");
/// assert_eq!(mr.external_name(), Some("175928847299117063"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Managed<S, O> {
    metadata: ObjectMeta,
    spec: S,
    #[serde(default)]
    status: ResourceStatus<O>,
}

impl<S, O> Managed<S, O> {
    /// Declare a new object with no external name.
    pub fn new(name: impl Into<String>, spec: S) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.into(),
                external_name: None,
                provider_config_ref: None,
                deletion_requested: false,
            },
            spec,
            status: ResourceStatus::default(),
        }
    }

    /// Reference a provider config by name.
    pub fn with_provider_config(mut self, name: impl Into<String>) -> Self {
        self.metadata.provider_config_ref = Some(ProviderConfigReference { name: name.into() });
        self
    }

    /// Pre-populate the external name.
    ///
    /// Values that do not have the kind's ID shape are ignored by the
    /// adapters until a real remote ID replaces them.
    pub fn with_external_name(mut self, external_name: impl Into<String>) -> Self {
        self.metadata.external_name = Some(external_name.into());
        self
    }

    /// Local name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Object metadata.
    pub fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    /// Desired state.
    pub fn spec(&self) -> &S {
        &self.spec
    }

    /// Replace the desired state. Reserved for the declaring caller.
    pub fn set_spec(&mut self, spec: S) {
        self.spec = spec;
    }

    /// Correlation ID, if any has been recorded.
    pub fn external_name(&self) -> Option<&str> {
        self.metadata.external_name.as_deref()
    }

    /// Record the correlation ID assigned by the remote system.
    pub fn set_external_name(&mut self, external_name: impl Into<String>) {
        let external_name = external_name.into();
        debug!(
            resource = %self.metadata.name,
            external_name = %external_name,
            "Binding external name"
        );
        self.metadata.external_name = Some(external_name);
    }

    /// Referenced provider config.
    pub fn provider_config_ref(&self) -> Option<&ProviderConfigReference> {
        self.metadata.provider_config_ref.as_ref()
    }

    /// Ask for the remote entity to be removed on the next pass.
    pub fn request_deletion(&mut self) {
        self.metadata.deletion_requested = true;
    }

    /// Whether deletion has been requested.
    pub fn is_deletion_requested(&self) -> bool {
        self.metadata.deletion_requested
    }

    /// Status sub-structure.
    pub fn status(&self) -> &ResourceStatus<O> {
        &self.status
    }

    /// Mutable status sub-structure.
    pub fn status_mut(&mut self) -> &mut ResourceStatus<O> {
        &mut self.status
    }

    /// Last-observed remote state.
    pub fn observed(&self) -> Option<&O> {
        self.status.observed.as_ref()
    }

    /// Record freshly observed remote state.
    pub fn set_observed(&mut self, observed: O) {
        self.status.observed = Some(observed);
    }

    /// Forget the last observation once the remote entity is gone.
    pub fn clear_observed(&mut self) {
        self.status.observed = None;
    }

    /// Record a lifecycle condition.
    pub fn set_condition(&mut self, condition: Condition) {
        self.status.set_condition(condition);
    }

    /// Current condition of the given type.
    pub fn condition(&self, kind: ConditionType) -> Option<&Condition> {
        self.status.condition(kind)
    }
}
