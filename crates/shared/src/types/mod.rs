//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{DISPLAY_DECIMAL_PLACES, SETTLEMENT_TOLERANCE};
