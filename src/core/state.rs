//! Status trait shared by every lifecycle enum in the crate.
//!
//! Implementations describe a position in a lifecycle without carrying any
//! behavior of their own. Transition rules live elsewhere (see
//! [`crate::model::lifecycle`]).

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A lifecycle status.
///
/// All methods are pure. `is_final` and `is_error` are classification hints
/// for callers and aggregations; nothing in the crate refuses an operation
/// because a status is final.
///
/// # Example
///
/// ```rust
/// use parcel_lifecycle::core::State;
/// use parcel_lifecycle::ParcelStatus;
///
/// assert_eq!(ParcelStatus::InTransit.name(), "IN_TRANSIT");
/// assert!(ParcelStatus::Returned.is_final());
/// assert!(ParcelStatus::DeliveryFailed.is_error());
/// assert!(!ParcelStatus::DeliveryFailed.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Display name of the status.
    fn name(&self) -> &str;

    /// Whether the status is terminal by business convention.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether the status represents a failed outcome.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParcelStatus;

    const ALL: [ParcelStatus; 6] = [
        ParcelStatus::Created,
        ParcelStatus::InTransit,
        ParcelStatus::OutForDelivery,
        ParcelStatus::Delivered,
        ParcelStatus::Returned,
        ParcelStatus::DeliveryFailed,
    ];

    #[test]
    fn names_use_screaming_snake_case() {
        let names: Vec<&str> = ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "CREATED",
                "IN_TRANSIT",
                "OUT_FOR_DELIVERY",
                "DELIVERED",
                "RETURNED",
                "DELIVERY_FAILED",
            ]
        );
    }

    #[test]
    fn only_delivered_and_returned_are_final() {
        for status in ALL {
            let expected = matches!(status, ParcelStatus::Delivered | ParcelStatus::Returned);
            assert_eq!(status.is_final(), expected, "{status:?}");
        }
    }

    #[test]
    fn only_delivery_failed_is_error() {
        for status in ALL {
            assert_eq!(
                status.is_error(),
                status == ParcelStatus::DeliveryFailed,
                "{status:?}"
            );
        }
    }

    #[test]
    fn status_serializes_correctly() {
        let json = serde_json::to_string(&ParcelStatus::OutForDelivery).unwrap();
        let deserialized: ParcelStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ParcelStatus::OutForDelivery);
    }
}
