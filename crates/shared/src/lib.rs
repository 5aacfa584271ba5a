//! Shared types, errors, and configuration for Pay Me Back.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for users, groups and expenses
//! - Money helpers (settlement tolerance, display rounding, cents)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, BalanceConfig, SettlementMode};
pub use error::AppError;
