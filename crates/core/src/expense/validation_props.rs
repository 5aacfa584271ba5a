//! Property-based tests for expense validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use paymeback_shared::types::money::from_cents;
use paymeback_shared::types::{GroupId, UserId};

use super::error::ExpenseError;
use super::types::NewExpense;
use super::validation::ExpenseValidator;

fn positive_cents() -> impl Strategy<Value = i64> {
    1_i64..100_000_000
}

/// Members 1..=n and a non-empty subset of them with a payer from the subset.
fn arb_split() -> impl Strategy<Value = (Vec<UserId>, Vec<UserId>, UserId)> {
    (1_i64..=10)
        .prop_flat_map(|n| {
            let members: Vec<UserId> = (1..=n).map(UserId).collect();
            let len = members.len();
            (
                Just(members.clone()),
                prop::sample::subsequence(members, 1..=len),
                any::<prop::sample::Index>(),
            )
        })
        .prop_map(|(members, participants, index)| {
            let payer = *index.get(&participants);
            (members, participants, payer)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Whole-cent amounts survive validation unchanged.
    #[test]
    fn prop_valid_expense_keeps_cents(cents in positive_cents(), (members, participants, payer) in arb_split()) {
        let input = NewExpense {
            group_id: GroupId(1),
            paid_by: payer,
            amount: from_cents(cents),
            description: String::new(),
            participant_ids: participants.clone(),
        };

        let validated = ExpenseValidator::validate(input, &members).unwrap();
        prop_assert_eq!(validated.amount_cents, cents);
        prop_assert_eq!(validated.participant_ids, participants);
    }

    /// Non-positive amounts are always refused.
    #[test]
    fn prop_non_positive_amount_rejected(cents in 0_i64..100_000_000) {
        let amount = -from_cents(cents);
        prop_assert_eq!(
            ExpenseValidator::amount_cents(amount),
            Err(ExpenseError::NonPositiveAmount)
        );
        prop_assert!(amount <= Decimal::ZERO);
    }

    /// A payer outside the participant list is always refused.
    #[test]
    fn prop_outside_payer_rejected((_, participants, _) in arb_split()) {
        let outsider = UserId(1_000);
        prop_assert_eq!(
            ExpenseValidator::check_participants(outsider, &participants),
            Err(ExpenseError::PayerNotParticipant)
        );
    }
}
