//! Status transition history.
//!
//! Every status change a parcel goes through is kept as an immutable
//! [`StateTransition`]. Operations that leave the status untouched are not
//! recorded here; the scan and attempt logs on the parcel cover those.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Operation that produced a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCause {
    Scan,
    DeliveryAttempt,
    ProofAttached,
    Returned,
}

impl fmt::Display for TransitionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scan => "scan",
            Self::DeliveryAttempt => "delivery_attempt",
            Self::ProofAttached => "proof_attached",
            Self::Returned => "returned",
        };
        f.write_str(label)
    }
}

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use parcel_lifecycle::core::{StateTransition, TransitionCause};
/// use parcel_lifecycle::ParcelStatus;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: ParcelStatus::Created,
///     to: ParcelStatus::InTransit,
///     timestamp: Utc::now(),
///     cause: TransitionCause::Scan,
/// };
/// assert!(transition.is_change());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// Status before the operation
    pub from: S,
    /// Status after the operation
    pub to: S,
    /// When the operation was applied
    pub timestamp: DateTime<Utc>,
    /// Which operation caused the change
    pub cause: TransitionCause,
}

impl<S: State> StateTransition<S> {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of status transitions.
///
/// History is immutable: [`record`](Self::record) returns a new history with
/// the transition appended.
///
/// # Example
///
/// ```rust
/// use parcel_lifecycle::core::{StateHistory, StateTransition, TransitionCause};
/// use parcel_lifecycle::ParcelStatus;
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: ParcelStatus::Created,
///         to: ParcelStatus::InTransit,
///         timestamp: Utc::now(),
///         cause: TransitionCause::Scan,
///     })
///     .record(StateTransition {
///         from: ParcelStatus::InTransit,
///         to: ParcelStatus::Delivered,
///         timestamp: Utc::now(),
///         cause: TransitionCause::DeliveryAttempt,
///     });
///
/// let path = history.get_path();
/// assert_eq!(
///     path,
///     vec![&ParcelStatus::Created, &ParcelStatus::InTransit, &ParcelStatus::Delivered]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left unchanged.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Statuses traversed: the first `from`, then each `to`.
    ///
    /// Empty when nothing has been recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Elapsed time between the first and last recorded transition.
    ///
    /// `None` with no transitions, or when the clock went backwards between
    /// them.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Number of times the history entered `state`.
    pub fn times_entered(&self, state: &S) -> usize {
        self.transitions.iter().filter(|t| &t.to == state).count()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParcelStatus;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn transition(
        from: ParcelStatus,
        to: ParcelStatus,
        secs: i64,
        cause: TransitionCause,
    ) -> StateTransition<ParcelStatus> {
        StateTransition {
            from,
            to,
            timestamp: at(secs),
            cause,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<ParcelStatus> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();

        let new_history = history.record(transition(
            ParcelStatus::Created,
            ParcelStatus::InTransit,
            0,
            TransitionCause::Scan,
        ));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(transition(
                ParcelStatus::Created,
                ParcelStatus::InTransit,
                0,
                TransitionCause::Scan,
            ))
            .record(transition(
                ParcelStatus::InTransit,
                ParcelStatus::Returned,
                60,
                TransitionCause::Returned,
            ));

        assert_eq!(
            history.get_path(),
            vec![
                &ParcelStatus::Created,
                &ParcelStatus::InTransit,
                &ParcelStatus::Returned
            ]
        );
    }

    #[test]
    fn duration_spans_first_to_last() {
        let history = StateHistory::new()
            .record(transition(
                ParcelStatus::Created,
                ParcelStatus::InTransit,
                0,
                TransitionCause::Scan,
            ))
            .record(transition(
                ParcelStatus::InTransit,
                ParcelStatus::Delivered,
                90,
                TransitionCause::DeliveryAttempt,
            ));

        assert_eq!(history.duration(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn duration_is_none_when_clock_went_backwards() {
        let history = StateHistory::new()
            .record(transition(
                ParcelStatus::Created,
                ParcelStatus::InTransit,
                100,
                TransitionCause::Scan,
            ))
            .record(transition(
                ParcelStatus::InTransit,
                ParcelStatus::Delivered,
                10,
                TransitionCause::DeliveryAttempt,
            ));

        assert!(history.duration().is_none());
    }

    #[test]
    fn times_entered_counts_reentry() {
        let history = StateHistory::new()
            .record(transition(
                ParcelStatus::Created,
                ParcelStatus::InTransit,
                0,
                TransitionCause::Scan,
            ))
            .record(transition(
                ParcelStatus::InTransit,
                ParcelStatus::DeliveryFailed,
                10,
                TransitionCause::DeliveryAttempt,
            ))
            .record(transition(
                ParcelStatus::DeliveryFailed,
                ParcelStatus::InTransit,
                20,
                TransitionCause::Scan,
            ));

        assert_eq!(history.times_entered(&ParcelStatus::InTransit), 2);
        assert_eq!(history.times_entered(&ParcelStatus::Delivered), 0);
        assert_eq!(history.last().map(|t| t.cause), Some(TransitionCause::Scan));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(transition(
            ParcelStatus::Created,
            ParcelStatus::InTransit,
            0,
            TransitionCause::Scan,
        ));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<ParcelStatus> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
