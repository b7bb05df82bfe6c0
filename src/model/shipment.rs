//! Shipments: groups of parcels tracked together.

use super::ids::{ParcelId, ShipmentId};
use super::lifecycle::ParcelStatus;
use super::parcel::SharedParcel;
use crate::clock::Clock;
use crate::core::{Guard, State};
use chrono::{DateTime, Utc};
use std::rc::Rc;
use tracing::debug;

/// A group of parcels.
///
/// The shipment stores handles to parcels owned elsewhere. Closability is
/// computed from the members' statuses on every call, so a shipment can
/// become closable (or stop being closable) without being touched.
///
/// # Example
///
/// ```rust
/// use parcel_lifecycle::{Customer, Parcel, Shipment, SystemClock};
/// use std::rc::Rc;
///
/// let clock = SystemClock::shared();
/// let alice = Rc::new(Customer::new("C001", "Alice", "12 Park Street"));
/// let bob = Rc::new(Customer::new("C002", "Bob", "45 Lake Road"));
/// let parcel = Parcel::new("P001", alice, bob, 1.2, clock.clone()).into_shared();
///
/// let mut shipment = Shipment::new("S001", &*clock);
/// assert!(shipment.is_closable());
///
/// shipment.add_parcel(&parcel);
/// assert!(!shipment.is_closable());
///
/// parcel.borrow_mut().mark_returned(Some("Refused"));
/// assert!(shipment.is_closable());
/// ```
#[derive(Debug, Clone)]
pub struct Shipment {
    id: ShipmentId,
    created_at: DateTime<Utc>,
    parcels: Vec<SharedParcel>,
}

impl Shipment {
    pub fn new(id: impl Into<ShipmentId>, clock: &dyn Clock) -> Self {
        let id = id.into();
        debug!(shipment = %id, "shipment created");
        Self {
            id,
            created_at: clock.now(),
            parcels: Vec::new(),
        }
    }

    /// Append a parcel. Adding the same parcel twice keeps both entries.
    pub fn add_parcel(&mut self, parcel: &SharedParcel) {
        debug!(shipment = %self.id, parcel = %parcel.borrow().id(), "parcel added to shipment");
        self.parcels.push(Rc::clone(parcel));
    }

    /// True when every member is `DELIVERED` or `RETURNED`; true when empty.
    ///
    /// Panics if a member parcel is mutably borrowed at the time of the call.
    pub fn is_closable(&self) -> bool {
        let settled = Guard::<ParcelStatus>::final_states();
        self.parcels.iter().all(|p| settled.check(&p.borrow().status()))
    }

    /// Members not yet delivered or returned, in membership order.
    pub fn outstanding(&self) -> Vec<SharedParcel> {
        self.parcels
            .iter()
            .filter(|p| !p.borrow().status().is_final())
            .cloned()
            .collect()
    }

    /// Member ids with their current status, in membership order.
    pub fn member_statuses(&self) -> Vec<(ParcelId, ParcelStatus)> {
        self.parcels
            .iter()
            .map(|p| {
                let parcel = p.borrow();
                (parcel.id().clone(), parcel.status())
            })
            .collect()
    }

    /// Whether the parcel is a member (by identity, not by id).
    pub fn contains(&self, parcel: &SharedParcel) -> bool {
        self.parcels.iter().any(|p| Rc::ptr_eq(p, parcel))
    }

    pub fn id(&self) -> &ShipmentId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn parcels(&self) -> &[SharedParcel] {
        &self.parcels
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{Customer, Hub, Parcel};
    use chrono::TimeZone;

    fn clock() -> Rc<ManualClock> {
        Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap(),
        ))
    }

    fn parcel(id: &str, clock: &Rc<ManualClock>) -> SharedParcel {
        Parcel::new(
            id,
            Rc::new(Customer::new("C001", "Alice", "12 Park Street")),
            Rc::new(Customer::new("C002", "Bob", "45 Lake Road")),
            2.0,
            clock.clone(),
        )
        .into_shared()
    }

    #[test]
    fn empty_shipment_is_closable() {
        let clock = clock();
        let shipment = Shipment::new("S001", &*clock);

        assert!(shipment.is_empty());
        assert!(shipment.is_closable());
        assert!(shipment.outstanding().is_empty());
        assert_eq!(shipment.created_at(), clock.now());
    }

    #[test]
    fn closability_follows_member_status_changes() {
        let clock = clock();
        let p1 = parcel("P1", &clock);
        let p2 = parcel("P2", &clock);
        let hub = Rc::new(Hub::new("H001", "Chennai Hub"));

        p1.borrow_mut().record_delivery_attempt(true, None, None);
        p2.borrow_mut().record_scan(hub, None);

        let mut shipment = Shipment::new("S001", &*clock);
        shipment.add_parcel(&p1);
        shipment.add_parcel(&p2);
        assert!(!shipment.is_closable());
        assert_eq!(shipment.outstanding().len(), 1);

        p2.borrow_mut().mark_returned(None);
        assert!(shipment.is_closable());

        p1.borrow_mut().record_delivery_attempt(false, Some("Wrong address"), None);
        assert!(!shipment.is_closable());
    }

    #[test]
    fn duplicates_are_kept_and_do_not_change_closability() {
        let clock = clock();
        let p1 = parcel("P1", &clock);

        let mut shipment = Shipment::new("S001", &*clock);
        shipment.add_parcel(&p1);
        shipment.add_parcel(&p1);
        assert_eq!(shipment.len(), 2);
        assert!(!shipment.is_closable());

        p1.borrow_mut().attach_proof("Bob", "XYZ123");
        assert!(shipment.is_closable());
    }

    #[test]
    fn parcel_can_belong_to_several_shipments() {
        let clock = clock();
        let p1 = parcel("P1", &clock);

        let mut first = Shipment::new("S001", &*clock);
        let mut second = Shipment::new("S002", &*clock);
        first.add_parcel(&p1);
        second.add_parcel(&p1);

        p1.borrow_mut().mark_returned(Some("Damaged"));

        assert!(first.is_closable());
        assert!(second.is_closable());
        assert!(first.contains(&p1));
    }

    #[test]
    fn member_statuses_keep_membership_order() {
        let clock = clock();
        let p1 = parcel("P1", &clock);
        let p2 = parcel("P2", &clock);
        p2.borrow_mut().mark_returned(None);

        let mut shipment = Shipment::new("S001", &*clock);
        shipment.add_parcel(&p2);
        shipment.add_parcel(&p1);

        assert_eq!(
            shipment.member_statuses(),
            vec![
                (ParcelId::new("P2"), ParcelStatus::Returned),
                (ParcelId::new("P1"), ParcelStatus::Created),
            ]
        );
        assert!(!shipment.contains(&parcel("P1", &clock)));
    }
}
