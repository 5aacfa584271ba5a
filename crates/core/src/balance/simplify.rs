//! Greedy debt simplification.
//!
//! Repeatedly matches the largest remaining creditor with the largest remaining
//! debtor. Every step zeroes at least one side, so a group of `n` members settles in
//! at most `n - 1` transfers.

use paymeback_shared::types::UserId;
use paymeback_shared::types::money::is_negligible;
use rust_decimal::Decimal;

use super::types::{NetBalances, Transfer};

/// Computes a settlement plan for a group.
///
/// # Arguments
/// * `net` - Net balances of the group
/// * `order` - Members to include; earlier members win ties
///
/// # Returns
/// Transfers in the order they were matched. Transfers within the settlement
/// tolerance are dropped.
#[must_use]
pub fn minimal_transfers(net: &NetBalances, order: &[UserId]) -> Vec<Transfer> {
    let mut creditors: Vec<(UserId, Decimal)> = Vec::new();
    let mut debtors: Vec<(UserId, Decimal)> = Vec::new();

    for id in order {
        let balance = net.net_of(*id);
        if balance > Decimal::ZERO {
            creditors.push((*id, balance));
        } else if balance < Decimal::ZERO {
            debtors.push((*id, balance.abs()));
        }
    }

    let mut transfers = Vec::new();
    while let (Some(ci), Some(di)) = (largest(&creditors), largest(&debtors)) {
        let amount = creditors[ci].1.min(debtors[di].1);
        creditors[ci].1 -= amount;
        debtors[di].1 -= amount;

        transfers.push(Transfer {
            from: debtors[di].0,
            to: creditors[ci].0,
            amount,
        });

        creditors.retain(|(_, remaining)| *remaining > Decimal::ZERO);
        debtors.retain(|(_, remaining)| *remaining > Decimal::ZERO);
    }

    transfers.retain(|transfer| !is_negligible(transfer.amount));
    transfers
}

/// Index of the entry with the largest amount; the first one wins ties.
fn largest(entries: &[(UserId, Decimal)]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .fold(None, |best: Option<usize>, (index, (_, amount))| match best {
            Some(current) if entries[current].1 >= *amount => Some(current),
            _ => Some(index),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn balances(entries: &[(i64, Decimal)]) -> (NetBalances, Vec<UserId>) {
        let net = entries.iter().map(|(id, b)| (UserId(*id), *b)).collect();
        let order = entries.iter().map(|(id, _)| UserId(*id)).collect();
        (net, order)
    }

    fn transfer(from: i64, to: i64, amount: Decimal) -> Transfer {
        Transfer {
            from: UserId(from),
            to: UserId(to),
            amount,
        }
    }

    #[test]
    fn test_single_creditor_two_debtors() {
        let (net, order) = balances(&[(1, dec!(60)), (2, dec!(-15)), (3, dec!(-45))]);

        let transfers = minimal_transfers(&net, &order);

        assert_eq!(
            transfers,
            vec![transfer(3, 1, dec!(45)), transfer(2, 1, dec!(15))]
        );
    }

    #[test]
    fn test_transfers_settle_every_balance() {
        let (net, order) = balances(&[
            (1, dec!(70)),
            (2, dec!(-20)),
            (3, dec!(30)),
            (4, dec!(-55)),
            (5, dec!(-25)),
        ]);

        let transfers = minimal_transfers(&net, &order);

        assert!(transfers.len() <= order.len() - 1);
        for id in &order {
            let paid: Decimal = transfers.iter().filter(|t| t.from == *id).map(|t| t.amount).sum();
            let received: Decimal = transfers.iter().filter(|t| t.to == *id).map(|t| t.amount).sum();
            assert_eq!(received - paid, net.net_of(*id), "member {id} not settled");
        }
    }

    #[test]
    fn test_ties_resolved_by_order() {
        let (net, order) = balances(&[(1, dec!(10)), (2, dec!(10)), (3, dec!(-10)), (4, dec!(-10))]);

        let transfers = minimal_transfers(&net, &order);

        assert_eq!(
            transfers,
            vec![transfer(3, 1, dec!(10)), transfer(4, 2, dec!(10))]
        );
    }

    #[test]
    fn test_settled_group_needs_no_transfers() {
        let (net, order) = balances(&[(1, dec!(0)), (2, dec!(0))]);
        assert!(minimal_transfers(&net, &order).is_empty());
    }

    #[test]
    fn test_negligible_residue_is_dropped() {
        let (net, order) = balances(&[(1, dec!(0.004)), (2, dec!(-0.004))]);
        assert!(minimal_transfers(&net, &order).is_empty());
    }

    #[test]
    fn test_members_outside_order_are_ignored() {
        let net: NetBalances = [(UserId(1), dec!(5)), (UserId(2), dec!(-5))]
            .into_iter()
            .collect();

        assert!(minimal_transfers(&net, &[UserId(1)]).is_empty());
    }
}
