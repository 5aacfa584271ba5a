//! Expense recording rules.
//!
//! Expenses are validated once, when recorded, and are immutable afterwards. The
//! balance engine trusts stored expenses and does not re-check them.

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::ExpenseError;
pub use types::{NewExpense, ValidatedExpense};
pub use validation::ExpenseValidator;
