//! Helpers shared by the adapters.

use steward_core::{Condition, Managed, ResourceKind};
use steward_discord::DiscordResult;
use steward_error::{ReconcileError, ReconcileErrorKind, StewardResult};
use steward_interface::ExternalObservation;
use tracing::debug;

/// The recorded external name, if it has the kind's ID shape.
pub(crate) fn usable_id<S, O>(mr: &Managed<S, O>, kind: ResourceKind) -> Option<String> {
    let candidate = mr.external_name()?;
    if kind.id_shape().matches(candidate) {
        Some(candidate.to_string())
    } else {
        debug!(%kind, external_name = candidate, "External name is not a remote ID; ignoring");
        None
    }
}

/// The external name, falling back to an ID declared in `spec`.
pub(crate) fn usable_or_declared_id<S, O>(
    mr: &Managed<S, O>,
    kind: ResourceKind,
    declared: Option<&str>,
) -> Option<String> {
    usable_id(mr, kind).or_else(|| {
        declared
            .filter(|id| kind.id_shape().matches(id))
            .map(str::to_string)
    })
}

/// ID an Update can address, or a local error.
pub(crate) fn require_id<S, O>(mr: &Managed<S, O>, kind: ResourceKind) -> StewardResult<String> {
    usable_id(mr, kind).ok_or_else(|| {
        ReconcileError::new(ReconcileErrorKind::MissingExternalName {
            kind: kind.to_string(),
        })
        .into()
    })
}

/// Bind a discovered remote ID unless a usable one is already recorded.
pub(crate) fn adopt<S, O>(mr: &mut Managed<S, O>, kind: ResourceKind, id: &str) {
    if usable_id(mr, kind).is_none() {
        mr.set_external_name(id);
    }
}

/// Turn a remote "not found" into `None`.
pub(crate) fn found<T>(result: DiscordResult<T>) -> StewardResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => {
            debug!("Remote entity not found");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Report a previously addressable entity as absent.
///
/// Drops the stale observation and marks the resource unavailable so a
/// failed follow-up verb never leaves it looking ready.
pub(crate) fn vanished<S, O>(mr: &mut Managed<S, O>) -> ExternalObservation {
    mr.clear_observed();
    mr.set_condition(Condition::unavailable());
    ExternalObservation::absent()
}

/// Treat deleting an already-absent entity as success.
pub(crate) fn gone(result: DiscordResult<()>) -> StewardResult<()> {
    match result {
        Err(err) if err.is_not_found() => {
            debug!("Remote entity already gone");
            Ok(())
        }
        other => Ok(other?),
    }
}
