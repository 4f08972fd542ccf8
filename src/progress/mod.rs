//! Game progression core
//!
//! The session state machine: one serializable snapshot, one reducer.
//! All progression rules (unlock frontier, score floor, victory) live
//! here. This module must stay pure - no rendering, no storage, no
//! platform dependencies.

pub mod reduce;
pub mod state;

pub use reduce::{Action, Effect, Reduced, reduce};
pub use state::{FRONTIER_COMPLETE, MAX_LEVEL, SessionState, View};
