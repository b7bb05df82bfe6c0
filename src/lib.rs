//! Parcel lifecycle: a state machine for parcels moving through a logistics
//! network, and shipments that group them.
//!
//! The crate is the pure core of a tracking system. Callers own the
//! registries of customers, hubs and parcels and hand validated references
//! in; the crate applies lifecycle operations and reports the resulting
//! status. It does no I/O and never reads the wall clock directly.
//!
//! # Core Concepts
//!
//! - **Parcel**: owns its status, scans, delivery attempts and proof
//! - **Shipment**: groups shared parcels; closable once all are settled
//! - **Lifecycle rules**: a total transition table ([`next_status`])
//! - **Audit**: opt-in checks for caller protocol mistakes ([`audit`])
//! - **Snapshots**: serializable exports ([`snapshot`])
//!
//! # Example
//!
//! ```rust
//! use parcel_lifecycle::{Customer, Hub, ManualClock, Parcel, ParcelStatus, Shipment};
//! use chrono::{TimeZone, Utc};
//! use std::rc::Rc;
//!
//! let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
//! let alice = Rc::new(Customer::new("C001", "Alice", "12 Park Street, Chennai"));
//! let bob = Rc::new(Customer::new("C002", "Bob", "45 Lake Road, Coimbatore"));
//! let chennai = Rc::new(Hub::new("H001", "Chennai Hub"));
//!
//! let p1 = Parcel::new("P001", alice.clone(), bob.clone(), 1.2, clock.clone()).into_shared();
//! let p2 = Parcel::new("P002", alice, bob, 0.4, clock.clone()).into_shared();
//!
//! let mut shipment = Shipment::new("S001", &*clock);
//! shipment.add_parcel(&p1);
//! shipment.add_parcel(&p2);
//!
//! p1.borrow_mut().record_scan(chennai.clone(), Some("Arrived"));
//! p1.borrow_mut().record_delivery_attempt(true, None, Some("Ravi"));
//! p1.borrow_mut().attach_proof("Bob", "XYZ123");
//! assert_eq!(p1.borrow().status(), ParcelStatus::Delivered);
//! assert!(!shipment.is_closable());
//!
//! p2.borrow_mut().mark_returned(Some("Refused"));
//! assert!(shipment.is_closable());
//! ```

pub mod audit;
pub mod clock;
pub mod core;
pub mod model;
pub mod snapshot;
pub mod timeline;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use self::core::{Guard, State, StateHistory, StateTransition, TransitionCause};
pub use model::{
    next_status, Customer, CustomerId, DeliveryAttempt, Hub, HubId, LifecycleEvent, Parcel,
    ParcelId, ParcelStatus, ProofOfDelivery, ScanEvent, SharedParcel, Shipment, ShipmentId,
};
pub use timeline::{ParcelTimeline, ShipmentSummary};
