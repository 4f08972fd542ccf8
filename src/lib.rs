//! Math Quest - a 100-level arithmetic adventure
//!
//! Core modules:
//! - `progress`: session state machine (views, unlock frontier, score)
//! - `level`: deterministic arithmetic challenge generation
//! - `persistence`: save/restore via LocalStorage
//! - `share`: progress sharing with clipboard fallback
//! - `celebration`: self-terminating victory confetti timer

pub mod celebration;
pub mod level;
pub mod persistence;
pub mod progress;
pub mod share;

pub use celebration::Celebration;
pub use level::Question;
pub use progress::{Action, Effect, SessionState, View, reduce};
