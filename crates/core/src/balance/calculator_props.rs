//! Property-based tests for net balance calculation.

use paymeback_shared::types::{ExpenseId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculator::NetBalanceCalculator;
use super::detail::SettlementResolver;
use super::types::{ExpenseRecord, Member};

const MAX_MEMBERS: i64 = 8;

/// Strategy for generating positive amounts in cents
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for an expense whose payer is among its participants
fn expense_strategy(member_count: i64) -> impl Strategy<Value = ExpenseRecord> {
    (
        amount_strategy(),
        prop::sample::subsequence(members(member_count), 1..=members(member_count).len()),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(amount, participants, payer_index)| {
            let paid_by = participants[payer_index.index(participants.len())];
            ExpenseRecord {
                id: ExpenseId(0),
                paid_by,
                amount,
                participants,
            }
        })
}

/// Strategy for a group: member count plus expenses among those members
fn group_strategy() -> impl Strategy<Value = (i64, Vec<ExpenseRecord>)> {
    (2i64..=MAX_MEMBERS).prop_flat_map(|count| {
        (
            Just(count),
            prop::collection::vec(expense_strategy(count), 0..30),
        )
    })
}

fn members(count: i64) -> Vec<UserId> {
    (1..=count).map(UserId).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Net balances of a group always sum to zero.
    #[test]
    fn prop_net_balances_sum_to_zero((count, expenses) in group_strategy()) {
        let net = NetBalanceCalculator::compute(members(count), &expenses);
        prop_assert!(
            net.total().abs() <= dec!(0.000001),
            "sum of balances should be zero, got {}",
            net.total()
        );
    }

    /// Expense order does not change the outcome beyond division noise.
    #[test]
    fn prop_expense_order_is_irrelevant((count, expenses) in group_strategy()) {
        let forward = NetBalanceCalculator::compute(members(count), &expenses);
        let mut reversed_expenses = expenses.clone();
        reversed_expenses.reverse();
        let reversed = NetBalanceCalculator::compute(members(count), &reversed_expenses);

        for (id, balance) in forward.iter() {
            prop_assert!((balance - reversed.net_of(id)).abs() <= dec!(0.000001));
        }
    }

    /// A payer who covers an expense alone never owes anything for it.
    #[test]
    fn prop_solo_expense_is_neutral(amount in amount_strategy()) {
        let expense = ExpenseRecord {
            id: ExpenseId(1),
            paid_by: UserId(1),
            amount,
            participants: vec![UserId(1)],
        };
        let net = NetBalanceCalculator::compute(members(2), &[expense]);
        prop_assert_eq!(net.net_of(UserId(1)), Decimal::ZERO);
        prop_assert_eq!(net.net_of(UserId(2)), Decimal::ZERO);
    }

    /// Detail entries never fall inside the settlement tolerance and always carry
    /// the opposite sign of the counterparty's balance.
    #[test]
    fn prop_detail_respects_threshold_and_sign((count, expenses) in group_strategy()) {
        let net = NetBalanceCalculator::compute(members(count), &expenses);
        let roster: Vec<Member> = members(count)
            .into_iter()
            .map(|id| Member::new(id, format!("member-{id}")))
            .collect();

        for member in &roster {
            let balance = SettlementResolver::pairwise(member.id, &net, &roster);
            for entry in &balance.detail {
                prop_assert!(entry.amount.abs() > dec!(0.01));
                prop_assert!(entry.counterparty_id != member.id);
                let counterparty_net = net.net_of(entry.counterparty_id);
                prop_assert!(entry.amount.is_sign_negative() == counterparty_net.is_sign_positive());
            }
        }
    }
}
