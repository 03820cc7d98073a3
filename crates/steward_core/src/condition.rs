//! Lifecycle conditions recorded on a managed resource's status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which aspect of the resource a condition describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ConditionType {
    /// Whether the remote entity is usable.
    Ready,
    /// Whether the last reconciliation pass succeeded.
    Synced,
}

/// Tri-state condition status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ConditionStatus {
    /// The condition holds.
    True,
    /// The condition does not hold.
    False,
    /// Not yet determined.
    Unknown,
}

/// Machine-readable reason for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ConditionReason {
    /// Create has been requested.
    Creating,
    /// The remote entity exists.
    Available,
    /// Delete has been requested.
    Deleting,
    /// The remote entity is not available.
    Unavailable,
    /// The last pass completed without error.
    ReconcileSuccess,
    /// The last pass failed.
    ReconcileError,
}

/// A single lifecycle condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type
    #[serde(rename = "type")]
    pub kind: ConditionType,
    /// Condition status
    pub status: ConditionStatus,
    /// Reason code
    pub reason: ConditionReason,
    /// Human-readable detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the condition last changed
    pub last_transition_time: DateTime<Utc>,
}

impl Condition {
    fn with(kind: ConditionType, status: ConditionStatus, reason: ConditionReason) -> Self {
        Self {
            kind,
            status,
            reason,
            message: None,
            last_transition_time: Utc::now(),
        }
    }

    /// The entity is being created.
    pub fn creating() -> Self {
        Self::with(
            ConditionType::Ready,
            ConditionStatus::False,
            ConditionReason::Creating,
        )
    }

    /// The entity exists and is usable.
    pub fn available() -> Self {
        Self::with(
            ConditionType::Ready,
            ConditionStatus::True,
            ConditionReason::Available,
        )
    }

    /// The entity is being deleted.
    pub fn deleting() -> Self {
        Self::with(
            ConditionType::Ready,
            ConditionStatus::False,
            ConditionReason::Deleting,
        )
    }

    /// The entity is not usable.
    pub fn unavailable() -> Self {
        Self::with(
            ConditionType::Ready,
            ConditionStatus::False,
            ConditionReason::Unavailable,
        )
    }

    /// The last reconciliation pass succeeded.
    pub fn reconcile_success() -> Self {
        Self::with(
            ConditionType::Synced,
            ConditionStatus::True,
            ConditionReason::ReconcileSuccess,
        )
    }

    /// The last reconciliation pass failed.
    pub fn reconcile_error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::with(
                ConditionType::Synced,
                ConditionStatus::False,
                ConditionReason::ReconcileError,
            )
        }
    }

    /// Equal in everything except the transition time.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.status == other.status
            && self.reason == other.reason
            && self.message == other.message
    }
}
