//! Ledger store port.
//!
//! The balance engine reads groups, members and expenses through [`LedgerStore`].
//! The db crate implements it over SeaORM; [`memory::InMemoryLedgerStore`] backs
//! tests and embedding.

pub mod memory;

use paymeback_shared::types::{GroupId, UserId};
use thiserror::Error;

use crate::balance::types::{ExpenseRecord, GroupSummary, Member};
use crate::settlement::types::GroupStatus;

pub use memory::InMemoryLedgerStore;

/// Errors surfaced by a ledger store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed.
    #[error("Ledger store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "STORE_ERROR"
    }
}

/// Members and expenses of one group, read together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSnapshot {
    /// Members in display order.
    pub members: Vec<Member>,
    /// Every expense recorded in the group.
    pub expenses: Vec<ExpenseRecord>,
}

impl GroupSnapshot {
    /// Member ids in display order.
    #[must_use]
    pub fn member_ids(&self) -> Vec<UserId> {
        self.members.iter().map(|member| member.id).collect()
    }
}

/// Read access to persisted ledger data.
///
/// Unknown groups read as empty rather than failing.
pub trait LedgerStore: Send + Sync {
    /// Members of a group, ordered by name.
    fn list_members(
        &self,
        group_id: GroupId,
    ) -> impl std::future::Future<Output = Result<Vec<Member>, StoreError>> + Send;

    /// Expenses of a group with their participant ids.
    fn list_expenses(
        &self,
        group_id: GroupId,
    ) -> impl std::future::Future<Output = Result<Vec<ExpenseRecord>, StoreError>> + Send;

    /// Members and expenses of a group from one consistent read.
    fn group_snapshot(
        &self,
        group_id: GroupId,
    ) -> impl std::future::Future<Output = Result<GroupSnapshot, StoreError>> + Send;

    /// Groups the user belongs to with the given status, ordered by name.
    fn list_groups_for_user(
        &self,
        user_id: UserId,
        status: GroupStatus,
    ) -> impl std::future::Future<Output = Result<Vec<GroupSummary>, StoreError>> + Send;
}
