//! Single reconciliation pass.
//!
//! The scheduler that decides when to run a pass lives outside this crate.
//! One call to [`Reconciler::reconcile`] connects, observes, and then runs at
//! most one mutating verb.

use std::sync::Arc;
use steward_core::{Condition, ConnectionDetails, Managed};
use steward_error::StewardResult;
use steward_interface::{ConnectionDetailsSink, Connector, ExternalClient};
use tracing::{debug, info, instrument, warn};

/// Managed resource handled by connector `C`.
pub type ResourceOf<C> = Managed<
    <<C as Connector>::Client as ExternalClient>::Spec,
    <<C as Connector>::Client as ExternalClient>::Observation,
>;

/// What a pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ReconcileOutcome {
    /// Deletion was requested and the entity was deleted
    Deleted,
    /// The entity did not exist and was created
    Created,
    /// The entity had drifted and was updated
    Updated,
    /// The entity already matched its spec
    UpToDate,
    /// Deletion was requested and the entity was already absent
    Gone,
}

/// Drives one pass for resources handled by connector `C`.
pub struct Reconciler<C> {
    connector: C,
    sink: Arc<dyn ConnectionDetailsSink>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Reconciler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("connector", &self.connector)
            .finish_non_exhaustive()
    }
}

impl<C: Connector> Reconciler<C> {
    /// Reconciler publishing connection details to `sink`.
    pub fn new(connector: C, sink: Arc<dyn ConnectionDetailsSink>) -> Self {
        Self { connector, sink }
    }

    /// Run one pass over `mr`.
    ///
    /// Sets the `Synced` condition to success or to the error message, then
    /// returns the error unchanged.
    #[instrument(
        skip(self, mr),
        fields(resource = %mr.name(), external_name = ?mr.external_name())
    )]
    pub async fn reconcile(&self, mr: &mut ResourceOf<C>) -> StewardResult<ReconcileOutcome> {
        match self.pass(mr).await {
            Ok(outcome) => {
                info!(%outcome, "Reconciled");
                mr.set_condition(Condition::reconcile_success());
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "Reconcile failed");
                mr.set_condition(Condition::reconcile_error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn pass(&self, mr: &mut ResourceOf<C>) -> StewardResult<ReconcileOutcome> {
        let client = self.connector.connect(mr).await?;
        let observation = client.observe(mr).await?;
        debug!(
            exists = observation.resource_exists,
            up_to_date = observation.resource_up_to_date,
            "Observed"
        );
        self.publish(mr.name(), observation.connection_details)
            .await?;

        if mr.is_deletion_requested() {
            if !observation.resource_exists {
                mr.set_condition(Condition::unavailable());
                return Ok(ReconcileOutcome::Gone);
            }
            client.delete(mr).await?;
            return Ok(ReconcileOutcome::Deleted);
        }

        if !observation.resource_exists {
            let creation = client.create(mr).await?;
            self.publish(mr.name(), creation.connection_details).await?;
            return Ok(ReconcileOutcome::Created);
        }

        if observation.resource_up_to_date {
            return Ok(ReconcileOutcome::UpToDate);
        }

        let update = client.update(mr).await?;
        self.publish(mr.name(), update.connection_details).await?;
        Ok(ReconcileOutcome::Updated)
    }

    async fn publish(&self, resource: &str, details: ConnectionDetails) -> StewardResult<()> {
        if details.is_empty() {
            return Ok(());
        }
        self.sink.publish(resource, details).await
    }
}
