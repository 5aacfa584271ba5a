//! Core business logic for Pay Me Back.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `balance` - Net balances, settlement detail, and cross-group summaries
//! - `expense` - Validation applied when an expense is recorded
//! - `settlement` - All-members settlement approval gate
//! - `store` - The ledger store port and an in-memory implementation

pub mod balance;
pub mod expense;
pub mod settlement;
pub mod store;
