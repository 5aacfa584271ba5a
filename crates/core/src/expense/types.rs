//! Expense input types.

use paymeback_shared::types::{GroupId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An expense as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Group the expense belongs to.
    pub group_id: GroupId,
    /// Member who paid.
    pub paid_by: UserId,
    /// Total amount paid.
    pub amount: Decimal,
    /// Free-form description; may be empty.
    pub description: String,
    /// Members sharing the cost equally.
    pub participant_ids: Vec<UserId>,
}

/// An expense that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExpense {
    /// Group the expense belongs to.
    pub group_id: GroupId,
    /// Member who paid; always one of `participant_ids`.
    pub paid_by: UserId,
    /// Amount in cents, strictly positive.
    pub amount_cents: i64,
    /// Free-form description.
    pub description: String,
    /// Distinct participants in submission order.
    pub participant_ids: Vec<UserId>,
}
