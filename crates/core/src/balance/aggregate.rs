//! Cross-group balance summaries for a single user.

use paymeback_shared::types::GroupId;
use paymeback_shared::types::money::is_negligible;
use rust_decimal::Decimal;

use super::types::{BalanceLine, GROUP_TOTAL_LABEL, GroupSummary};

/// Stateless aggregator producing one summary line per unsettled group.
pub struct CrossGroupAggregator;

impl CrossGroupAggregator {
    /// Builds a user's balance lines across groups.
    ///
    /// # Arguments
    /// * `groups` - The user's groups, already filtered by status, in display order
    /// * `per_group_net` - The user's net balance in a given group
    ///
    /// # Returns
    /// One line per group whose net exceeds the settlement tolerance, in the order
    /// the groups were supplied.
    pub fn compute_user_balance_lines(
        groups: &[GroupSummary],
        mut per_group_net: impl FnMut(GroupId) -> Decimal,
    ) -> Vec<BalanceLine> {
        groups
            .iter()
            .filter_map(|group| {
                let net = per_group_net(group.id);
                (!is_negligible(net)).then(|| BalanceLine {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    counterparty: GROUP_TOTAL_LABEL.to_string(),
                    amount: net,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn group(id: i64, name: &str) -> GroupSummary {
        GroupSummary {
            id: GroupId(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_settled_groups_are_omitted() {
        let groups = [group(1, "Beach Trip"), group(2, "Flat"), group(3, "Ski Week")];
        let nets = HashMap::from([
            (GroupId(1), dec!(-45)),
            (GroupId(2), dec!(0.01)),
            (GroupId(3), dec!(12.5)),
        ]);

        let lines = CrossGroupAggregator::compute_user_balance_lines(&groups, |id| nets[&id]);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].group_name, "Beach Trip");
        assert_eq!(lines[0].amount, dec!(-45));
        assert_eq!(lines[1].group_id, GroupId(3));
        assert_eq!(lines[1].amount, dec!(12.5));
    }

    #[test]
    fn test_lines_keep_supplied_order_and_label() {
        let groups = [group(9, "Zeta"), group(4, "Alpha")];

        let lines = CrossGroupAggregator::compute_user_balance_lines(&groups, |_| dec!(-3));

        let ids: Vec<GroupId> = lines.iter().map(|line| line.group_id).collect();
        assert_eq!(ids, vec![GroupId(9), GroupId(4)]);
        assert!(lines.iter().all(|line| line.counterparty == GROUP_TOTAL_LABEL));
    }

    #[test]
    fn test_no_groups() {
        let lines = CrossGroupAggregator::compute_user_balance_lines(&[], |_| dec!(100));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_negative_tolerance_is_suppressed() {
        let groups = [group(1, "Dinner")];
        let lines = CrossGroupAggregator::compute_user_balance_lines(&groups, |_| dec!(-0.01));
        assert!(lines.is_empty());
    }
}
