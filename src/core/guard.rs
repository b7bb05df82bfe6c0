//! Status predicates.
//!
//! Guards wrap pure boolean functions over a status. Shipment closability and
//! the protocol audit are both phrased in terms of them.

use super::state::State;

/// Pure predicate over a status.
///
/// # Example
///
/// ```rust
/// use parcel_lifecycle::core::{Guard, State};
/// use parcel_lifecycle::ParcelStatus;
///
/// let settled = Guard::new(|s: &ParcelStatus| s.is_final());
///
/// assert!(settled.check(&ParcelStatus::Delivered));
/// assert!(!settled.check(&ParcelStatus::InTransit));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that passes for final statuses only.
    pub fn final_states() -> Self
    where
        S: 'static,
    {
        Self::new(|s: &S| s.is_final())
    }

    /// Guard that passes when the status equals one of `allowed`.
    pub fn one_of(allowed: Vec<S>) -> Self
    where
        S: 'static,
    {
        Self::new(move |s: &S| allowed.contains(s))
    }

    /// Evaluate the guard.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    /// Evaluate the guard over every status; true for an empty iterator.
    pub fn check_all<'a, I>(&self, states: I) -> bool
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        states.into_iter().all(|s| self.check(s))
    }
}

impl<S: State> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParcelStatus;

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::new(|s: &ParcelStatus| matches!(s, ParcelStatus::Created));

        assert!(guard.check(&ParcelStatus::Created));
        assert!(!guard.check(&ParcelStatus::InTransit));
    }

    #[test]
    fn final_states_guard_matches_terminal_outcomes() {
        let guard = Guard::<ParcelStatus>::final_states();

        assert!(guard.check(&ParcelStatus::Delivered));
        assert!(guard.check(&ParcelStatus::Returned));
        assert!(!guard.check(&ParcelStatus::DeliveryFailed));
        assert!(!guard.check(&ParcelStatus::OutForDelivery));
    }

    #[test]
    fn one_of_checks_membership() {
        let guard = Guard::one_of(vec![ParcelStatus::Created, ParcelStatus::DeliveryFailed]);

        assert!(guard.check(&ParcelStatus::Created));
        assert!(guard.check(&ParcelStatus::DeliveryFailed));
        assert!(!guard.check(&ParcelStatus::Delivered));
    }

    #[test]
    fn check_all_is_vacuously_true() {
        let guard = Guard::<ParcelStatus>::final_states();
        let none: Vec<ParcelStatus> = Vec::new();

        assert!(guard.check_all(&none));
        assert!(guard.check_all(&[ParcelStatus::Delivered, ParcelStatus::Returned]));
        assert!(!guard.check_all(&[ParcelStatus::Delivered, ParcelStatus::InTransit]));
    }
}
