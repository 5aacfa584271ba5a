//! Net balance calculation.
//!
//! Every expense credits its payer with the full amount and debits each participant an
//! equal share. When the payer is a participant (the normal case) that nets out to
//! `amount - share` for the payer, so nobody is charged twice.

use paymeback_shared::types::UserId;
use rust_decimal::Decimal;

use super::types::{ExpenseRecord, NetBalances};

/// Stateless calculator for per-member net balances.
pub struct NetBalanceCalculator;

impl NetBalanceCalculator {
    /// Computes every member's net balance for one group.
    ///
    /// # Arguments
    /// * `members` - All members of the group; every balance starts at zero
    /// * `expenses` - The group's recorded expenses
    ///
    /// Ids that are not in `members` contribute nothing. Expenses without participants
    /// are skipped. No rounding is applied.
    pub fn compute(
        members: impl IntoIterator<Item = UserId>,
        expenses: &[ExpenseRecord],
    ) -> NetBalances {
        let mut balances = NetBalances::zeroed(members);
        for expense in expenses {
            Self::apply_expense(&mut balances, expense);
        }
        balances
    }

    /// Applies a single expense to running balances.
    pub fn apply_expense(balances: &mut NetBalances, expense: &ExpenseRecord) {
        if expense.participants.is_empty() {
            return;
        }

        let share = Self::share(expense);
        balances.adjust(expense.paid_by, expense.amount);
        for participant in &expense.participants {
            balances.adjust(*participant, -share);
        }
    }

    /// The amount each participant owes for an expense.
    ///
    /// Zero when the expense has no participants.
    #[must_use]
    pub fn share(expense: &ExpenseRecord) -> Decimal {
        if expense.participants.is_empty() {
            return Decimal::ZERO;
        }
        expense.amount / Decimal::from(expense.participants.len())
    }
}
