//! The parcel state machine.

use super::ids::{HubId, ParcelId};
use super::lifecycle::{next_status, LifecycleEvent, ParcelStatus};
use super::party::{Customer, Hub};
use super::records::{DeliveryAttempt, ProofOfDelivery, ScanEvent};
use crate::clock::Clock;
use crate::core::{StateHistory, StateTransition};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Parcel shared between the caller's registry and any number of shipments.
pub type SharedParcel = Rc<RefCell<Parcel>>;

/// A parcel and everything that has happened to it.
///
/// Operations never fail and never refuse: any operation may be applied in
/// any status, terminal ones included. Sequencing rules such as "proof only
/// after a successful attempt" are the caller's to uphold; see
/// [`crate::audit`] for an opt-in checker.
///
/// # Example
///
/// ```rust
/// use parcel_lifecycle::{Customer, Hub, Parcel, ParcelStatus, SystemClock};
/// use std::rc::Rc;
///
/// let alice = Rc::new(Customer::new("C001", "Alice", "12 Park Street, Chennai"));
/// let bob = Rc::new(Customer::new("C002", "Bob", "45 Lake Road, Coimbatore"));
/// let hub = Rc::new(Hub::new("H001", "Chennai Hub"));
///
/// let mut parcel = Parcel::new("P001", alice, bob, 1.2, SystemClock::shared());
/// assert_eq!(parcel.record_scan(hub, Some("Arrived")), ParcelStatus::InTransit);
/// assert_eq!(
///     parcel.record_delivery_attempt(true, None, Some("Ravi")),
///     ParcelStatus::Delivered
/// );
/// parcel.attach_proof("Bob", "XYZ123");
/// assert_eq!(parcel.proof().map(|p| p.code()), Some("XYZ123"));
/// ```
#[derive(Clone)]
pub struct Parcel {
    id: ParcelId,
    sender: Rc<Customer>,
    receiver: Rc<Customer>,
    weight_kg: f64,
    status: ParcelStatus,
    scans: Vec<ScanEvent>,
    attempts: Vec<DeliveryAttempt>,
    proof: Option<ProofOfDelivery>,
    last_known_hub: Option<HubId>,
    history: StateHistory<ParcelStatus>,
    clock: Rc<dyn Clock>,
}

impl Parcel {
    /// Create a parcel in `CREATED`.
    ///
    /// `weight_kg` is stored as given; callers validate it if they care.
    pub fn new(
        id: impl Into<ParcelId>,
        sender: Rc<Customer>,
        receiver: Rc<Customer>,
        weight_kg: f64,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let id = id.into();
        debug!(parcel = %id, sender = %sender.id(), receiver = %receiver.id(), "parcel created");
        Self {
            id,
            sender,
            receiver,
            weight_kg,
            status: ParcelStatus::Created,
            scans: Vec::new(),
            attempts: Vec::new(),
            proof: None,
            last_known_hub: None,
            history: StateHistory::new(),
            clock,
        }
    }

    /// Wrap the parcel for sharing with shipments.
    pub fn into_shared(self) -> SharedParcel {
        Rc::new(RefCell::new(self))
    }

    /// Record a scan at `hub`.
    ///
    /// Moves `CREATED` and `DELIVERY_FAILED` parcels to `IN_TRANSIT`; any
    /// other status is kept. The last known hub always follows the scan.
    pub fn record_scan(&mut self, hub: Rc<Hub>, note: Option<&str>) -> ParcelStatus {
        let scan = ScanEvent::capture(hub, note, self.clock.as_ref());
        let at = scan.timestamp();
        self.last_known_hub = Some(scan.hub().id().clone());
        trace!(parcel = %self.id, hub = %scan.hub().id(), "scan recorded");
        self.scans.push(scan);
        self.apply(LifecycleEvent::Scan, at)
    }

    /// Record a delivery attempt.
    ///
    /// Success moves the parcel to `DELIVERED`, failure to `DELIVERY_FAILED`,
    /// whatever the current status. Attaching proof after a successful
    /// attempt is left to the caller.
    pub fn record_delivery_attempt(
        &mut self,
        success: bool,
        outcome_note: Option<&str>,
        attempted_by: Option<&str>,
    ) -> ParcelStatus {
        let attempt =
            DeliveryAttempt::capture(success, outcome_note, attempted_by, self.clock.as_ref());
        let at = attempt.timestamp();
        self.attempts.push(attempt);
        self.apply(LifecycleEvent::DeliveryAttempt { success }, at)
    }

    /// Attach proof of delivery, replacing any earlier proof.
    ///
    /// Always moves the parcel to `DELIVERED`. The attempt history is not
    /// consulted.
    pub fn attach_proof(&mut self, receiver_name: &str, code: &str) -> ParcelStatus {
        let proof = ProofOfDelivery::capture(receiver_name, code, self.clock.as_ref());
        let at = proof.timestamp();
        if self.proof.replace(proof).is_some() {
            trace!(parcel = %self.id, "proof of delivery replaced");
        }
        self.apply(LifecycleEvent::ProofAttached, at)
    }

    /// Mark the parcel returned to its sender.
    ///
    /// Appends a scan at the sentinel return hub carrying `reason` as its
    /// note. The last known hub is left as it was.
    pub fn mark_returned(&mut self, reason: Option<&str>) -> ParcelStatus {
        let scan = ScanEvent::capture(
            Rc::new(Hub::returned_to_sender()),
            reason,
            self.clock.as_ref(),
        );
        let at = scan.timestamp();
        self.scans.push(scan);
        self.apply(LifecycleEvent::Returned, at)
    }

    fn apply(&mut self, event: LifecycleEvent, at: DateTime<Utc>) -> ParcelStatus {
        let from = self.status;
        let to = next_status(from, event);
        if from != to {
            debug!(parcel = %self.id, %from, %to, cause = %event.cause(), "parcel status changed");
            self.history = self.history.record(StateTransition {
                from,
                to,
                timestamp: at,
                cause: event.cause(),
            });
            self.status = to;
        }
        self.status
    }

    pub fn id(&self) -> &ParcelId {
        &self.id
    }

    pub fn sender(&self) -> &Customer {
        &self.sender
    }

    pub fn receiver(&self) -> &Customer {
        &self.receiver
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn status(&self) -> ParcelStatus {
        self.status
    }

    /// Scans in the order they were recorded, return scans included.
    pub fn scans(&self) -> &[ScanEvent] {
        &self.scans
    }

    pub fn delivery_attempts(&self) -> &[DeliveryAttempt] {
        &self.attempts
    }

    pub fn latest_attempt(&self) -> Option<&DeliveryAttempt> {
        self.attempts.last()
    }

    pub fn proof(&self) -> Option<&ProofOfDelivery> {
        self.proof.as_ref()
    }

    /// Hub of the most recent regular scan. Return scans do not move it.
    pub fn last_known_hub(&self) -> Option<&HubId> {
        self.last_known_hub.as_ref()
    }

    pub fn history(&self) -> &StateHistory<ParcelStatus> {
        &self.history
    }
}

impl fmt::Debug for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parcel")
            .field("id", &self.id)
            .field("sender", self.sender.id())
            .field("receiver", self.receiver.id())
            .field("weight_kg", &self.weight_kg)
            .field("status", &self.status)
            .field("scans", &self.scans.len())
            .field("attempts", &self.attempts.len())
            .field("proof", &self.proof.is_some())
            .field("last_known_hub", &self.last_known_hub)
            .finish_non_exhaustive()
    }
}
