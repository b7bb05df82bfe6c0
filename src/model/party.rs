//! Customers and hubs.
//!
//! Both are owned by the caller's registry and only referenced here.

use super::ids::{CustomerId, HubId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the sentinel hub used for return scans.
pub const RETURN_HUB_ID: &str = "RETURN";

/// Display name of the sentinel return hub.
pub const RETURN_HUB_NAME: &str = "Returned to Sender";

/// Sender or receiver of a parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: String,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
        }
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.id, self.name, self.address)
    }
}

/// Node in the network where parcels get scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    id: HubId,
    name: String,
}

impl Hub {
    pub fn new(id: impl Into<HubId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The sentinel hub attached to return scans.
    pub fn returned_to_sender() -> Self {
        Self::new(RETURN_HUB_ID, RETURN_HUB_NAME)
    }

    pub fn id(&self) -> &HubId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_return_sentinel(&self) -> bool {
        self.id.as_str() == RETURN_HUB_ID
    }
}

impl fmt::Display for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}
