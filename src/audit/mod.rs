//! Opt-in protocol checks for callers driving parcels.
//!
//! Parcels accept any operation in any status. A proof attached without a
//! successful attempt, or an attempt on a parcel nobody scanned, goes through
//! without complaint. Callers that want those mistakes caught run
//! [`ProtocolRules`] before invoking the operation.
//!
//! Checks use `stillwater::Validation`, so a single call reports every
//! violation instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use parcel_lifecycle::audit::{OperationContext, ProtocolRules};
//! use parcel_lifecycle::{Customer, LifecycleEvent, Parcel, SystemClock};
//! use std::rc::Rc;
//!
//! let alice = Rc::new(Customer::new("C001", "Alice", "12 Park Street"));
//! let bob = Rc::new(Customer::new("C002", "Bob", "45 Lake Road"));
//! let mut parcel = Parcel::new("P001", alice, bob, 1.2, SystemClock::shared());
//!
//! let rules = ProtocolRules::recommended();
//! let ctx = OperationContext::new(&parcel, LifecycleEvent::ProofAttached);
//! assert!(rules.admit(&ctx).is_err());
//!
//! // The parcel itself does not care.
//! parcel.attach_proof("Bob", "XYZ123");
//! ```

pub mod builder;
pub mod context;
pub mod rules;
pub mod violations;

pub use builder::RulesBuilder;
pub use context::OperationContext;
pub use rules::{ProtocolCheck, ProtocolRules};
pub use violations::{ProtocolViolation, ViolationStrategy};
