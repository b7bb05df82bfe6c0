//! Serializable snapshots of parcels and shipments.
//!
//! Snapshots are read-only exports for presentation or storage layers. They
//! flatten shared references into identifiers and carry every recorded event
//! in order. There is no way to turn a snapshot back into a live parcel.

use crate::clock::Clock;
use crate::core::{State, StateHistory};
use crate::model::{CustomerId, HubId, Parcel, ParcelId, ParcelStatus, Shipment, ShipmentId};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// A scan as stored in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub hub_id: HubId,
    pub hub_name: String,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

/// A delivery attempt as stored in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
    pub attempted_by: Option<String>,
}

/// Proof of delivery as stored in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub receiver_name: String,
    pub code: String,
    pub timestamp: DateTime<Utc>,
}

/// Flattened view of a parcel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParcelSnapshot {
    pub id: ParcelId,
    pub sender: CustomerId,
    pub receiver: CustomerId,
    #[serde(with = "weight")]
    pub weight_kg: f64,
    pub status: ParcelStatus,
    pub last_known_hub: Option<HubId>,
    pub scans: Vec<ScanRecord>,
    pub attempts: Vec<AttemptRecord>,
    pub proof: Option<ProofRecord>,
    pub history: StateHistory<ParcelStatus>,
}

impl ParcelSnapshot {
    pub fn capture(parcel: &Parcel) -> Self {
        Self {
            id: parcel.id().clone(),
            sender: parcel.sender().id().clone(),
            receiver: parcel.receiver().id().clone(),
            weight_kg: parcel.weight_kg(),
            status: parcel.status(),
            last_known_hub: parcel.last_known_hub().cloned(),
            scans: parcel
                .scans()
                .iter()
                .map(|s| ScanRecord {
                    hub_id: s.hub().id().clone(),
                    hub_name: s.hub().name().to_owned(),
                    timestamp: s.timestamp(),
                    note: s.note().map(str::to_owned),
                })
                .collect(),
            attempts: parcel
                .delivery_attempts()
                .iter()
                .map(|a| AttemptRecord {
                    success: a.is_success(),
                    timestamp: a.timestamp(),
                    note: a.outcome_note().map(str::to_owned),
                    attempted_by: a.attempted_by().map(str::to_owned),
                })
                .collect(),
            proof: parcel.proof().map(|p| ProofRecord {
                receiver_name: p.receiver_name().to_owned(),
                code: p.code().to_owned(),
                timestamp: p.timestamp(),
            }),
            history: parcel.history().clone(),
        }
    }
}

/// Weights are never validated, so NaN and infinities reach snapshots.
/// JSON has no literal for them; human-readable formats carry them as the
/// strings `"NaN"`, `"inf"` and `"-inf"`.
mod weight {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if weight.is_finite() || !serializer.is_human_readable() {
            serializer.serialize_f64(*weight)
        } else {
            serializer.serialize_str(&weight.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        if !deserializer.is_human_readable() {
            return f64::deserialize(deserializer);
        }
        match Repr::deserialize(deserializer)? {
            Repr::Number(weight) => Ok(weight),
            Repr::Text(text) => text
                .parse::<f64>()
                .map_err(|e| D::Error::custom(format!("invalid weight {text:?}: {e}"))),
        }
    }
}

/// A shipment member with the status it had at capture time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub parcel: ParcelId,
    pub status: ParcelStatus,
}

/// Flattened view of a shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentSnapshot {
    pub id: ShipmentId,
    pub created_at: DateTime<Utc>,
    pub parcels: Vec<MemberRecord>,
    pub closable: bool,
}

impl ShipmentSnapshot {
    pub fn capture(shipment: &Shipment) -> Self {
        let parcels: Vec<MemberRecord> = shipment
            .member_statuses()
            .into_iter()
            .map(|(parcel, status)| MemberRecord { parcel, status })
            .collect();
        // Derived from the same reading as the member list.
        let closable = parcels.iter().all(|m| m.status.is_final());
        Self {
            id: shipment.id().clone(),
            created_at: shipment.created_at(),
            parcels,
            closable,
        }
    }
}

/// Consistency checks run on decode.
pub trait SnapshotBody: Serialize + DeserializeOwned {
    fn validate(&self) -> Result<(), SnapshotError>;
}

impl SnapshotBody for ParcelSnapshot {
    fn validate(&self) -> Result<(), SnapshotError> {
        if let Some(last) = self.history.last() {
            if last.to != self.status {
                return Err(SnapshotError::ValidationFailed(format!(
                    "parcel {} has status {} but its history ends in {}",
                    self.id, self.status, last.to
                )));
            }
        } else if self.status != ParcelStatus::Created {
            return Err(SnapshotError::ValidationFailed(format!(
                "parcel {} has status {} with an empty history",
                self.id, self.status
            )));
        }
        Ok(())
    }
}

impl SnapshotBody for ShipmentSnapshot {
    fn validate(&self) -> Result<(), SnapshotError> {
        let expected = self.parcels.iter().all(|m| m.status.is_final());
        if expected != self.closable {
            return Err(SnapshotError::ValidationFailed(format!(
                "shipment {} marked closable={} but members say {}",
                self.id, self.closable, expected
            )));
        }
        Ok(())
    }
}

/// Versioned envelope around a snapshot body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub body: T,
}

impl<T: SnapshotBody> Snapshot<T> {
    pub fn new(body: T, clock: &dyn Clock) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: clock.now(),
            body,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check()?;
        Ok(snapshot)
    }

    fn check(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        self.body.validate()
    }
}
