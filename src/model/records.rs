//! Immutable event records kept by a parcel.

use super::party::Hub;
use crate::clock::Clock;
use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::Rc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Empty notes are stored as absent; anything else is kept verbatim.
pub(crate) fn non_empty(note: Option<&str>) -> Option<String> {
    note.filter(|n| !n.is_empty()).map(str::to_owned)
}

/// A parcel seen at a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanEvent {
    hub: Rc<Hub>,
    timestamp: DateTime<Utc>,
    note: Option<String>,
}

impl ScanEvent {
    /// Record a scan at `hub`, stamped with the clock's current time.
    pub fn capture(hub: Rc<Hub>, note: Option<&str>, clock: &dyn Clock) -> Self {
        Self {
            hub,
            timestamp: clock.now(),
            note: non_empty(note),
        }
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Whether this scan was injected by a return.
    pub fn is_return(&self) -> bool {
        self.hub.is_return_sentinel()
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}",
            self.hub.name(),
            self.timestamp.format(TIMESTAMP_FORMAT)
        )?;
        if let Some(note) = &self.note {
            write!(f, " ({note})")?;
        }
        Ok(())
    }
}

/// One final-mile delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    timestamp: DateTime<Utc>,
    success: bool,
    outcome_note: Option<String>,
    attempted_by: Option<String>,
}

impl DeliveryAttempt {
    pub fn capture(
        success: bool,
        outcome_note: Option<&str>,
        attempted_by: Option<&str>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            timestamp: clock.now(),
            success,
            outcome_note: non_empty(outcome_note),
            attempted_by: non_empty(attempted_by),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn outcome_note(&self) -> Option<&str> {
        self.outcome_note.as_deref()
    }

    /// Courier name or identifier, when given.
    pub fn attempted_by(&self) -> Option<&str> {
        self.attempted_by.as_deref()
    }
}

impl fmt::Display for DeliveryAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.success { "SUCCESS" } else { "FAILED" };
        write!(f, "{outcome} at {}", self.timestamp.format(TIMESTAMP_FORMAT))?;
        if let Some(note) = &self.outcome_note {
            write!(f, " - {note}")?;
        }
        if let Some(by) = &self.attempted_by {
            write!(f, " (by {by})")?;
        }
        Ok(())
    }
}

/// Confirmation collected from the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOfDelivery {
    receiver_name: String,
    code: String,
    timestamp: DateTime<Utc>,
}

impl ProofOfDelivery {
    /// `code` is an opaque placeholder for a signature or PIN.
    pub fn capture(
        receiver_name: impl Into<String>,
        code: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            receiver_name: receiver_name.into(),
            code: code.into(),
            timestamp: clock.now(),
        }
    }

    pub fn receiver_name(&self) -> &str {
        &self.receiver_name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for ProofOfDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Received by {} @ {} (Proof: {})",
            self.receiver_name,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.code
        )
    }
}
