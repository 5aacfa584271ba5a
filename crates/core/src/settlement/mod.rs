//! Group settlement approval.
//!
//! A group moves from `active` to `settled` once every member has asked to settle it.
//! The transition is one-way.
//!
//! # Modules
//!
//! - `types` - Group status and approval progress
//! - `error` - Settlement-specific error types
//! - `gate` - The approval state machine

pub mod error;
pub mod gate;
pub mod types;

#[cfg(test)]
mod gate_props;

pub use error::SettlementError;
pub use gate::SettlementGate;
pub use types::{GroupStatus, SettlementOutcome, SettlementProgress};
