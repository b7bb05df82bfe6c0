//! Logistics domain: parcels, shipments and the records they keep.

mod ids;
pub mod lifecycle;
mod parcel;
mod party;
mod records;
mod shipment;

pub use ids::{CustomerId, HubId, ParcelId, ShipmentId};
pub use lifecycle::{next_status, LifecycleEvent, ParcelStatus};
pub use parcel::{Parcel, SharedParcel};
pub use party::{Customer, Hub, RETURN_HUB_ID, RETURN_HUB_NAME};
pub use records::{DeliveryAttempt, ProofOfDelivery, ScanEvent};
pub use shipment::Shipment;
