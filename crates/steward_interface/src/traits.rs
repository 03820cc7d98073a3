//! Trait definitions for reconciliation adapters and their collaborators.

use crate::{ExternalCreation, ExternalObservation, ExternalUpdate};
use async_trait::async_trait;
use steward_core::{
    ConnectionDetails, Managed, Operation, ProviderConfig, ResourceKind, SecretKeySelector,
};
use steward_error::{ReconcileError, ReconcileErrorKind, StewardResult};

fn refuse(kind: ResourceKind, operation: Operation) -> ReconcileError {
    ReconcileError::new(ReconcileErrorKind::UnsupportedOperation {
        kind: kind.to_string(),
        operation: operation.to_string(),
        reason: kind.refusal_reason(operation).to_string(),
    })
}

/// The four-verb reconciliation contract for one resource kind.
///
/// A pass always calls [`observe`](Self::observe) first and then at most one
/// of [`create`](Self::create), [`update`](Self::update) or
/// [`delete`](Self::delete).
///
/// Create, Update and Delete default to a local refusal. A kind opts into a
/// verb by overriding it, so the capability matrix of
/// [`ResourceKind::capabilities`] is mirrored by which methods an adapter
/// implements. Refusals never reach the remote API.
///
/// Adapters may mutate the resource's status and external name, never its spec.
#[async_trait]
pub trait ExternalClient: Send + Sync {
    /// Desired-state parameters for this kind.
    type Spec: Send + Sync;
    /// Observed remote state for this kind.
    type Observation: Send + Sync;

    /// Kind handled by this adapter.
    fn kind(&self) -> ResourceKind;

    /// Compare the remote entity with the desired `spec`.
    ///
    /// An absent remote entity, or a missing/malformed external name, is
    /// reported as `resource_exists == false` rather than as an error.
    async fn observe(
        &self,
        mr: &mut Managed<Self::Spec, Self::Observation>,
    ) -> StewardResult<ExternalObservation>;

    /// Create the remote entity and bind its ID as the external name.
    async fn create(
        &self,
        mr: &mut Managed<Self::Spec, Self::Observation>,
    ) -> StewardResult<ExternalCreation> {
        let _ = mr;
        Err(refuse(self.kind(), Operation::Create).into())
    }

    /// Bring the remote entity in line with the desired `spec`.
    async fn update(
        &self,
        mr: &mut Managed<Self::Spec, Self::Observation>,
    ) -> StewardResult<ExternalUpdate> {
        let _ = mr;
        Err(refuse(self.kind(), Operation::Update).into())
    }

    /// Remove the remote entity.
    async fn delete(&self, mr: &mut Managed<Self::Spec, Self::Observation>) -> StewardResult<()> {
        let _ = mr;
        Err(refuse(self.kind(), Operation::Delete).into())
    }
}

/// Produces a fresh external client bound to a resource's credentials.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Adapter produced by this connector.
    type Client: ExternalClient;

    /// Resolve credentials for `mr` and build a client bound to them.
    async fn connect(
        &self,
        mr: &Managed<
            <Self::Client as ExternalClient>::Spec,
            <Self::Client as ExternalClient>::Observation,
        >,
    ) -> StewardResult<Self::Client>;
}

/// Looks up provider configs by name.
#[async_trait]
pub trait ProviderConfigStore: Send + Sync {
    /// Fetch the named provider config.
    async fn provider_config(&self, name: &str) -> StewardResult<ProviderConfig>;
}

/// Resolves secret references to raw token strings.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Read the value the selector points at.
    async fn resolve(&self, selector: &SecretKeySelector) -> StewardResult<String>;
}

/// Receives connection details for out-of-band persistence.
#[async_trait]
pub trait ConnectionDetailsSink: Send + Sync {
    /// Persist the details produced for the named resource.
    async fn publish(&self, resource: &str, details: ConnectionDetails) -> StewardResult<()>;
}
