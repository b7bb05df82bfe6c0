//! Parcel statuses and the transition table.
//!
//! [`next_status`] is the whole rule set. It is total: every event is
//! accepted from every status, including the terminal ones.
//!
//! | event                 | from                           | to                 |
//! |-----------------------|--------------------------------|--------------------|
//! | scan                  | `CREATED`, `DELIVERY_FAILED`   | `IN_TRANSIT`       |
//! | scan                  | anything else                  | unchanged          |
//! | delivery attempt ok   | any                            | `DELIVERED`        |
//! | delivery attempt fail | any                            | `DELIVERY_FAILED`  |
//! | proof attached        | any                            | `DELIVERED`        |
//! | returned              | any                            | `RETURNED`         |

use crate::core::TransitionCause;
use serde::{Deserialize, Serialize};

crate::state_enum! {
    /// Where a parcel is in its lifecycle.
    ///
    /// `OutForDelivery` exists for callers that track it, but no operation in
    /// this crate moves a parcel into it.
    pub enum ParcelStatus {
        Created => "CREATED",
        InTransit => "IN_TRANSIT",
        OutForDelivery => "OUT_FOR_DELIVERY",
        Delivered => "DELIVERED",
        Returned => "RETURNED",
        DeliveryFailed => "DELIVERY_FAILED",
    }
    final: [Delivered, Returned]
    error: [DeliveryFailed]
}

impl Default for ParcelStatus {
    fn default() -> Self {
        Self::Created
    }
}

/// A mutating operation, as seen by the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifecycleEvent {
    Scan,
    DeliveryAttempt { success: bool },
    ProofAttached,
    Returned,
}

impl LifecycleEvent {
    pub fn cause(&self) -> TransitionCause {
        match self {
            Self::Scan => TransitionCause::Scan,
            Self::DeliveryAttempt { .. } => TransitionCause::DeliveryAttempt,
            Self::ProofAttached => TransitionCause::ProofAttached,
            Self::Returned => TransitionCause::Returned,
        }
    }
}

/// Status a parcel moves to when `event` is applied in `current`.
pub fn next_status(current: ParcelStatus, event: LifecycleEvent) -> ParcelStatus {
    match event {
        LifecycleEvent::Scan => match current {
            ParcelStatus::Created | ParcelStatus::DeliveryFailed => ParcelStatus::InTransit,
            other => other,
        },
        LifecycleEvent::DeliveryAttempt { success: true } => ParcelStatus::Delivered,
        LifecycleEvent::DeliveryAttempt { success: false } => ParcelStatus::DeliveryFailed,
        LifecycleEvent::ProofAttached => ParcelStatus::Delivered,
        LifecycleEvent::Returned => ParcelStatus::Returned,
    }
}
