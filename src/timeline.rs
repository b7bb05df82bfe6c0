//! Plain-text rendering of parcels and shipments.

use crate::model::{Parcel, Shipment};
use std::fmt;

const PARCEL_RULE: &str = "-------------------------------------------------";
const SHIPMENT_RULE: &str = "=================================================";

/// Full timeline of a parcel: header, scans, attempts and proof.
pub struct ParcelTimeline<'a>(pub &'a Parcel);

impl fmt::Display for ParcelTimeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parcel = self.0;
        writeln!(f, "{PARCEL_RULE}")?;
        writeln!(f, "Parcel ID: {}", parcel.id())?;
        writeln!(f, "Sender: {}", parcel.sender())?;
        writeln!(f, "Receiver: {}", parcel.receiver())?;
        writeln!(f, "Weight: {:.2} kg", parcel.weight_kg())?;
        writeln!(f, "Current status: {}", parcel.status())?;
        writeln!(f)?;

        writeln!(f, "Scan history:")?;
        if parcel.scans().is_empty() {
            writeln!(f, "  (no scans recorded)")?;
        }
        for scan in parcel.scans() {
            writeln!(f, "  - {scan}")?;
        }
        writeln!(f)?;

        writeln!(f, "Delivery attempts:")?;
        if parcel.delivery_attempts().is_empty() {
            writeln!(f, "  (no delivery attempts)")?;
        }
        for attempt in parcel.delivery_attempts() {
            writeln!(f, "  - {attempt}")?;
        }
        writeln!(f)?;

        if let Some(proof) = parcel.proof() {
            writeln!(f, "Proof of Delivery:")?;
            writeln!(f, "  - {proof}")?;
        }
        writeln!(f, "{PARCEL_RULE}")
    }
}

/// Shipment header with one line per member and the closable verdict.
pub struct ShipmentSummary<'a>(pub &'a Shipment);

impl fmt::Display for ShipmentSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shipment = self.0;
        writeln!(f, "{SHIPMENT_RULE}")?;
        writeln!(f, "Shipment ID: {}", shipment.id())?;
        writeln!(
            f,
            "Created: {}",
            shipment.created_at().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "Parcels:")?;
        for (id, status) in shipment.member_statuses() {
            writeln!(f, "  - {id} : {status}")?;
        }
        writeln!(f, "Shipment closable/closed: {}", shipment.is_closable())?;
        writeln!(f, "{SHIPMENT_RULE}")
    }
}
