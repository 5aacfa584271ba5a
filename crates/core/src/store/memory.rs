//! In-memory ledger store.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use paymeback_shared::types::{GroupId, UserId};

use super::{GroupSnapshot, LedgerStore, StoreError};
use crate::balance::types::{ExpenseRecord, GroupSummary, Member};
use crate::settlement::types::GroupStatus;

#[derive(Debug, Default)]
struct GroupRow {
    name: String,
    status: GroupStatus,
    members: Vec<UserId>,
}

#[derive(Debug, Default)]
struct Ledger {
    users: BTreeMap<UserId, String>,
    groups: BTreeMap<GroupId, GroupRow>,
    expenses: Vec<(GroupId, ExpenseRecord)>,
}

/// A [`LedgerStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    ledger: RwLock<Ledger>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or renames a user.
    pub fn add_user(&self, id: UserId, name: impl Into<String>) {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        ledger.users.insert(id, name.into());
    }

    /// Adds an active group with the given members.
    pub fn add_group(&self, id: GroupId, name: impl Into<String>, members: &[UserId]) {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        let mut unique = members.to_vec();
        unique.sort_unstable();
        unique.dedup();
        ledger.groups.insert(
            id,
            GroupRow {
                name: name.into(),
                status: GroupStatus::Active,
                members: unique,
            },
        );
    }

    /// Records an expense against a group.
    pub fn add_expense(&self, group_id: GroupId, expense: ExpenseRecord) {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        ledger.expenses.push((group_id, expense));
    }

    /// Changes a group's status. Unknown groups are ignored.
    pub fn set_status(&self, group_id: GroupId, status: GroupStatus) {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(group) = ledger.groups.get_mut(&group_id) {
            group.status = status;
        }
    }

    fn members_of(ledger: &Ledger, group_id: GroupId) -> Vec<Member> {
        let Some(group) = ledger.groups.get(&group_id) else {
            return Vec::new();
        };
        let mut members: Vec<Member> = group
            .members
            .iter()
            .map(|id| {
                let name = ledger.users.get(id).cloned().unwrap_or_default();
                Member::new(*id, name)
            })
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        members
    }

    fn expenses_of(ledger: &Ledger, group_id: GroupId) -> Vec<ExpenseRecord> {
        ledger
            .expenses
            .iter()
            .filter(|(group, _)| *group == group_id)
            .map(|(_, expense)| expense.clone())
            .collect()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    async fn list_members(&self, group_id: GroupId) -> Result<Vec<Member>, StoreError> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Self::members_of(&ledger, group_id))
    }

    async fn list_expenses(&self, group_id: GroupId) -> Result<Vec<ExpenseRecord>, StoreError> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Self::expenses_of(&ledger, group_id))
    }

    async fn group_snapshot(&self, group_id: GroupId) -> Result<GroupSnapshot, StoreError> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        Ok(GroupSnapshot {
            members: Self::members_of(&ledger, group_id),
            expenses: Self::expenses_of(&ledger, group_id),
        })
    }

    async fn list_groups_for_user(
        &self,
        user_id: UserId,
        status: GroupStatus,
    ) -> Result<Vec<GroupSummary>, StoreError> {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        let mut groups: Vec<GroupSummary> = ledger
            .groups
            .iter()
            .filter(|(_, row)| row.status == status && row.members.contains(&user_id))
            .map(|(id, row)| GroupSummary {
                id: *id,
                name: row.name.clone(),
            })
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(groups)
    }
}
