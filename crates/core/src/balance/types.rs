//! Balance domain types.
//!
//! Everything here is derived on demand from ledger data and never stored.

use std::collections::BTreeMap;

use paymeback_shared::types::{ExpenseId, GroupId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Counterparty label used on cross-group summary lines.
pub const GROUP_TOTAL_LABEL: &str = "Group Total";

/// A group member as supplied by the ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

impl Member {
    /// Creates a new member.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The slice of an expense the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense ID.
    pub id: ExpenseId,
    /// Member who paid.
    pub paid_by: UserId,
    /// Total amount paid.
    pub amount: Decimal,
    /// Members sharing the cost equally.
    pub participants: Vec<UserId>,
}

/// Summary of a group a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
}

/// Signed net position of every member of one group.
///
/// Positive means the group owes the member; negative means the member owes the group.
/// Iteration is ordered by member ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalances {
    balances: BTreeMap<UserId, Decimal>,
}

impl NetBalances {
    /// Creates balances with every given member at zero.
    pub fn zeroed(members: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            balances: members.into_iter().map(|id| (id, Decimal::ZERO)).collect(),
        }
    }

    /// Adds `delta` to a member's balance.
    ///
    /// Members that were not part of the initial set are ignored.
    pub fn adjust(&mut self, member: UserId, delta: Decimal) {
        if let Some(balance) = self.balances.get_mut(&member) {
            *balance += delta;
        }
    }

    /// Returns a member's balance, if the member is known.
    #[must_use]
    pub fn get(&self, member: UserId) -> Option<Decimal> {
        self.balances.get(&member).copied()
    }

    /// Returns a member's balance, or zero for unknown members.
    #[must_use]
    pub fn net_of(&self, member: UserId) -> Decimal {
        self.get(member).unwrap_or(Decimal::ZERO)
    }

    /// Sum of all balances. Zero for consistent ledger data.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Iterates `(member, balance)` pairs in member ID order.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, Decimal)> + '_ {
        self.balances.iter().map(|(id, balance)| (*id, *balance))
    }

    /// Number of members tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns true if no members are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl FromIterator<(UserId, Decimal)> for NetBalances {
    fn from_iter<T: IntoIterator<Item = (UserId, Decimal)>>(iter: T) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

/// One counterparty line in a member's settlement detail.
///
/// Negative: the member owes the counterparty. Positive: the counterparty owes the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementDetail {
    /// The counterparty's user ID.
    pub counterparty_id: UserId,
    /// The counterparty's display name.
    pub counterparty: String,
    /// Signed amount, unrounded.
    pub amount: Decimal,
}

/// A member's position within one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBalance {
    /// The member's net balance, rounded to two decimal places.
    pub net: Decimal,
    /// Counterparty breakdown.
    pub detail: Vec<SettlementDetail>,
}

/// A directed payment that moves a debtor towards zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Member who pays.
    pub from: UserId,
    /// Member who receives.
    pub to: UserId,
    /// Amount paid.
    pub amount: Decimal,
}

/// A user's net position in one group, for cross-group listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    /// Group ID.
    pub group_id: GroupId,
    /// Group name.
    pub group_name: String,
    /// Always [`GROUP_TOTAL_LABEL`].
    pub counterparty: String,
    /// The user's net in this group.
    pub amount: Decimal,
}
