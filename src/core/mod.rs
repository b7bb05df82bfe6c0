//! Generic status-machine building blocks.
//!
//! - `State`: classification of lifecycle statuses
//! - `Guard`: pure predicates over a status
//! - `StateHistory`: immutable log of status changes
//! - `state_enum!`: declares a status enum with its `State` impl
//!
//! Nothing in this module performs I/O or reads the clock.

mod guard;
mod history;
pub(crate) mod macros;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition, TransitionCause};
pub use state::State;
