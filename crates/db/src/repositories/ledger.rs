//! Ledger store backed by the database.
//!
//! Implements the core `LedgerStore` port. Snapshots are read inside one
//! repeatable-read transaction so members and expenses always agree.

use std::collections::HashMap;

use paymeback_core::balance::{ExpenseRecord, GroupSummary, Member};
use paymeback_core::settlement::GroupStatus;
use paymeback_core::store::{GroupSnapshot, LedgerStore, StoreError};
use paymeback_shared::types::money::from_cents;
use paymeback_shared::types::{ExpenseId, GroupId, UserId};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::debug;

use crate::entities::{expense_participants, expenses, group_members, groups, users};

/// `LedgerStore` implementation over `SeaORM`.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Isolation level for multi-statement snapshot reads.
///
/// `SQLite` transactions are already serializable and do not take an explicit level.
fn snapshot_isolation(db: &DatabaseConnection) -> Option<IsolationLevel> {
    match db.get_database_backend() {
        DbBackend::Sqlite => None,
        DbBackend::Postgres | DbBackend::MySql => Some(IsolationLevel::RepeatableRead),
    }
}

impl LedgerStore for LedgerRepository {
    async fn list_members(&self, group_id: GroupId) -> Result<Vec<Member>, StoreError> {
        let rows = member_rows(&self.db, group_id).await.map_err(store_error)?;
        Ok(rows.into_iter().map(to_member).collect())
    }

    async fn list_expenses(&self, group_id: GroupId) -> Result<Vec<ExpenseRecord>, StoreError> {
        let rows = expense_rows(&self.db, group_id).await.map_err(store_error)?;
        let participants = participants_by_expense(&self.db, &rows)
            .await
            .map_err(store_error)?;
        Ok(to_records(rows, &participants))
    }

    async fn group_snapshot(&self, group_id: GroupId) -> Result<GroupSnapshot, StoreError> {
        let txn = self
            .db
            .begin_with_config(snapshot_isolation(&self.db), None)
            .await
            .map_err(store_error)?;

        let members = member_rows(&txn, group_id).await.map_err(store_error)?;
        let rows = expense_rows(&txn, group_id).await.map_err(store_error)?;
        let participants = participants_by_expense(&txn, &rows)
            .await
            .map_err(store_error)?;

        txn.commit().await.map_err(store_error)?;

        debug!(
            group_id = %group_id,
            members = members.len(),
            expenses = rows.len(),
            "Loaded group snapshot"
        );

        Ok(GroupSnapshot {
            members: members.into_iter().map(to_member).collect(),
            expenses: to_records(rows, &participants),
        })
    }

    async fn list_groups_for_user(
        &self,
        user_id: UserId,
        status: GroupStatus,
    ) -> Result<Vec<GroupSummary>, StoreError> {
        let rows = groups_for_user(&self.db, user_id, status)
            .await
            .map_err(store_error)?;
        Ok(rows
            .into_iter()
            .map(|group| GroupSummary {
                id: GroupId(group.id),
                name: group.name,
            })
            .collect())
    }
}

fn store_error(e: DbErr) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn to_member(user: users::Model) -> Member {
    Member::new(UserId(user.id), user.name)
}

fn to_records(
    rows: Vec<expenses::Model>,
    participants: &HashMap<i64, Vec<UserId>>,
) -> Vec<ExpenseRecord> {
    rows.into_iter()
        .map(|expense| ExpenseRecord {
            id: ExpenseId(expense.id),
            paid_by: UserId(expense.paid_by),
            amount: from_cents(expense.amount_cents),
            participants: participants.get(&expense.id).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Members of a group ordered by name.
pub(crate) async fn member_rows<C: ConnectionTrait>(
    conn: &C,
    group_id: GroupId,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .inner_join(group_members::Entity)
        .filter(group_members::Column::GroupId.eq(group_id.into_inner()))
        .order_by_asc(users::Column::Name)
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

/// Expenses of a group, newest first.
pub(crate) async fn expense_rows<C: ConnectionTrait>(
    conn: &C,
    group_id: GroupId,
) -> Result<Vec<expenses::Model>, DbErr> {
    expenses::Entity::find()
        .filter(expenses::Column::GroupId.eq(group_id.into_inner()))
        .order_by_desc(expenses::Column::CreatedAt)
        .order_by_desc(expenses::Column::Id)
        .all(conn)
        .await
}

/// Participant ids keyed by expense id.
pub(crate) async fn participants_by_expense<C: ConnectionTrait>(
    conn: &C,
    rows: &[expenses::Model],
) -> Result<HashMap<i64, Vec<UserId>>, DbErr> {
    if rows.is_empty() {
        return Ok(HashMap::new());
    }

    let links = expense_participants::Entity::find()
        .filter(expense_participants::Column::ExpenseId.is_in(rows.iter().map(|e| e.id)))
        .order_by_asc(expense_participants::Column::UserId)
        .all(conn)
        .await?;

    let mut map: HashMap<i64, Vec<UserId>> = HashMap::with_capacity(rows.len());
    for link in links {
        map.entry(link.expense_id)
            .or_default()
            .push(UserId(link.user_id));
    }
    Ok(map)
}

/// Groups a user belongs to with the given status, ordered by name.
pub(crate) async fn groups_for_user<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    status: GroupStatus,
) -> Result<Vec<groups::Model>, DbErr> {
    groups::Entity::find()
        .inner_join(group_members::Entity)
        .filter(group_members::Column::UserId.eq(user_id.into_inner()))
        .filter(groups::Column::Status.eq(status.as_str()))
        .order_by_asc(groups::Column::Name)
        .order_by_asc(groups::Column::Id)
        .all(conn)
        .await
}
