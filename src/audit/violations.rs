//! Protocol violations and how to treat them.

use crate::core::TransitionCause;
use crate::model::{ParcelId, ParcelStatus};
use thiserror::Error;

/// A caller-side sequencing mistake the parcel itself would accept.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProtocolViolation {
    #[error("Delivery attempt on parcel {parcel} before any scan")]
    AttemptWithoutScan { parcel: ParcelId },

    #[error("Proof of delivery for parcel {parcel} without a successful delivery attempt")]
    ProofWithoutSuccessfulAttempt { parcel: ParcelId },

    #[error("Parcel {parcel} is already {status}; {operation} refused")]
    TerminalStatus {
        parcel: ParcelId,
        status: ParcelStatus,
        operation: TransitionCause,
    },

    #[error("Parcel {parcel} has invalid weight ({weight_kg} kg)")]
    InvalidWeight { parcel: ParcelId, weight_kg: f64 },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// What [`ProtocolRules::admit`](super::ProtocolRules::admit) does with
/// violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationStrategy {
    /// Refuse the operation
    Reject,

    /// Log each violation at `warn` and let the operation through
    LogAndProceed,
}
