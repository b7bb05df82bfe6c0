//! Context handed to protocol checks.

use crate::model::{next_status, LifecycleEvent, Parcel, ParcelStatus};

/// An operation a caller is about to apply to a parcel.
#[derive(Clone, Copy, Debug)]
pub struct OperationContext<'a> {
    pub parcel: &'a Parcel,
    pub event: LifecycleEvent,
}

impl<'a> OperationContext<'a> {
    pub fn new(parcel: &'a Parcel, event: LifecycleEvent) -> Self {
        Self { parcel, event }
    }

    /// Status the parcel would be in after the operation (pure).
    pub fn projected_status(&self) -> ParcelStatus {
        next_status(self.parcel.status(), self.event)
    }
}
