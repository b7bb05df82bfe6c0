//! Parcel Journey
//!
//! Walks two parcels from the same shipment through the network:
//! - P001 fails its first delivery, is re-scanned and then delivered
//! - P002 is returned to sender after a refused delivery
//!
//! Every operation is checked with the recommended protocol rules first.
//! The shipment summary and a JSON snapshot are printed at the end.
//!
//! Run with: RUST_LOG=debug cargo run --example parcel_journey

use chrono::{Duration, TimeZone, Utc};
use parcel_lifecycle::audit::{OperationContext, ProtocolRules, RulesBuilder, ViolationStrategy};
use parcel_lifecycle::snapshot::{ShipmentSnapshot, Snapshot};
use parcel_lifecycle::{
    Customer, Hub, LifecycleEvent, ManualClock, Parcel, ParcelTimeline, SharedParcel, Shipment,
    ShipmentSummary,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn checked(rules: &ProtocolRules, parcel: &SharedParcel, event: LifecycleEvent) -> bool {
    let parcel = parcel.borrow();
    match rules.admit(&OperationContext::new(&parcel, event)) {
        Ok(()) => true,
        Err(violations) => {
            for violation in violations.iter() {
                println!("  rejected: {violation}");
            }
            false
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Parcel Journey ===\n");

    let clock = Rc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 9, 2, 7, 30, 0).unwrap(),
    ));
    let alice = Rc::new(Customer::new("C001", "Alice", "12 Park Street, Chennai"));
    let bob = Rc::new(Customer::new("C002", "Bob", "45 Lake Road, Coimbatore"));
    let chennai = Rc::new(Hub::new("H001", "Chennai Hub"));
    let coimbatore = Rc::new(Hub::new("H002", "Coimbatore Hub"));

    let p1 = Parcel::new("P001", alice.clone(), bob.clone(), 1.2, clock.clone()).into_shared();
    let p2 = Parcel::new("P002", alice, bob, 0.4, clock.clone()).into_shared();

    let mut shipment = Shipment::new("S001", &*clock);
    shipment.add_parcel(&p1);
    shipment.add_parcel(&p2);

    let rules = ProtocolRules::recommended();

    println!("Step 1: Proof before any attempt is caught by the rules");
    if checked(&rules, &p1, LifecycleEvent::ProofAttached) {
        p1.borrow_mut().attach_proof("Bob", "EARLY");
    }
    println!();

    println!("Step 2: P001 arrives at Chennai, first attempt fails");
    if checked(&rules, &p1, LifecycleEvent::Scan) {
        p1.borrow_mut().record_scan(chennai.clone(), Some("Arrived"));
    }
    clock.advance(Duration::hours(3));
    if checked(&rules, &p1, LifecycleEvent::Scan) {
        p1.borrow_mut().record_scan(coimbatore.clone(), Some("Out for delivery"));
    }
    clock.advance(Duration::hours(2));
    let failed = LifecycleEvent::DeliveryAttempt { success: false };
    if checked(&rules, &p1, failed) {
        p1.borrow_mut()
            .record_delivery_attempt(false, Some("No one home"), Some("Ravi"));
    }
    println!("  P001 is now {}\n", p1.borrow().status());

    println!("Step 3: Re-attempt the next day and capture proof");
    clock.advance(Duration::hours(20));
    if checked(&rules, &p1, LifecycleEvent::Scan) {
        p1.borrow_mut()
            .record_scan(coimbatore.clone(), Some("Re-attempt scheduled"));
    }
    clock.advance(Duration::hours(1));
    let success = LifecycleEvent::DeliveryAttempt { success: true };
    if checked(&rules, &p1, success) {
        p1.borrow_mut().record_delivery_attempt(true, None, Some("Ravi"));
    }
    if checked(&rules, &p1, LifecycleEvent::ProofAttached) {
        p1.borrow_mut().attach_proof("Bob", "XYZ123");
    }
    println!("  P001 is now {}\n", p1.borrow().status());

    println!("Step 4: P002 is refused and returned (violations only logged)");
    let lenient = RulesBuilder::new()
        .scan_before_attempt()
        .on_violation(ViolationStrategy::LogAndProceed)
        .build();
    if checked(&lenient, &p2, failed) {
        p2.borrow_mut()
            .record_delivery_attempt(false, Some("Refused"), None);
    }
    p2.borrow_mut().mark_returned(Some("Refused by receiver"));
    println!("  P002 is now {}\n", p2.borrow().status());

    print!("{}", ParcelTimeline(&p1.borrow()));
    print!("{}", ParcelTimeline(&p2.borrow()));
    print!("{}", ShipmentSummary(&shipment));

    let path: Vec<String> = p1
        .borrow()
        .history()
        .get_path()
        .iter()
        .map(|s| s.to_string())
        .collect();
    println!("\nP001 path: {}", path.join(" -> "));

    let snapshot = Snapshot::new(ShipmentSnapshot::capture(&shipment), &*clock);
    println!("\nShipment snapshot:\n{}", snapshot.to_json()?);

    println!("\n=== Journey Complete ===");
    Ok(())
}
