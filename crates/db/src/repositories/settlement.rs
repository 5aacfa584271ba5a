//! Settlement request persistence.

use chrono::Utc;
use paymeback_core::balance::Member;
use paymeback_core::settlement::{
    GroupStatus, SettlementError, SettlementGate, SettlementOutcome, SettlementProgress,
};
use paymeback_shared::types::{GroupId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use super::ledger::member_rows;
use crate::entities::{groups, settlement_requests};

/// Error types for settlement operations.
#[derive(Debug, Error)]
pub enum SettlementRepoError {
    /// Group not found.
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// The request was refused by the approval gate.
    #[error(transparent)]
    Rejected(#[from] SettlementError),

    /// The stored status is not recognised.
    #[error("Unknown group status '{0}'")]
    InvalidStatus(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Settlement status of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementStatus {
    /// Current group status.
    pub status: GroupStatus,
    /// Approvals so far.
    pub progress: SettlementProgress,
    /// Members who have approved, in approval order.
    pub approved_users: Vec<Member>,
}

/// Settlement repository.
#[derive(Debug, Clone)]
pub struct SettlementRepository {
    db: DatabaseConnection,
}

impl SettlementRepository {
    /// Creates a new settlement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a member's request to settle a group.
    ///
    /// Marks the group settled once every member has asked.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The group does not exist
    /// - The group is already settled
    /// - The user is not a member
    /// - Database operation fails
    pub async fn request(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<SettlementOutcome, SettlementRepoError> {
        let txn = self.db.begin().await?;

        // Concurrent approvals for one group queue on this row lock.
        let group = groups::Entity::find_by_id(group_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(SettlementRepoError::GroupNotFound(group_id))?;
        let status = parse_status(&group.status)?;
        let members = member_ids(&txn, group_id).await?;
        let approvals = approval_ids(&txn, group_id).await?;

        let outcome = SettlementGate::request(status, user_id, &members, &approvals)?;

        if outcome.newly_recorded {
            settlement_requests::ActiveModel {
                group_id: Set(group_id.into_inner()),
                user_id: Set(user_id.into_inner()),
                requested_at: Set(Utc::now()),
            }
            .insert(&txn)
            .await?;
        }

        if outcome.settled() {
            let mut active = group.into_active_model();
            active.status = Set(GroupStatus::Settled.as_str().to_string());
            active.update(&txn).await?;
        }

        txn.commit().await?;

        info!(
            group_id = %group_id,
            user_id = %user_id,
            approved = outcome.progress.approved_count(),
            total = outcome.progress.total_members,
            settled = outcome.settled(),
            "Settlement requested"
        );

        Ok(outcome)
    }

    /// Returns the settlement status of a group.
    ///
    /// # Errors
    ///
    /// Returns `GroupNotFound` if the group does not exist.
    pub async fn status(&self, group_id: GroupId) -> Result<SettlementStatus, SettlementRepoError> {
        let txn = self.db.begin().await?;

        let group = find_group(&txn, group_id).await?;
        let members: Vec<Member> = member_rows(&txn, group_id)
            .await?
            .into_iter()
            .map(|user| Member::new(UserId(user.id), user.name))
            .collect();
        let approvals = approval_ids(&txn, group_id).await?;

        txn.commit().await?;

        let member_ids: Vec<UserId> = members.iter().map(|member| member.id).collect();
        let progress = SettlementGate::progress(&member_ids, &approvals);
        let approved_users = progress
            .approved
            .iter()
            .filter_map(|id| members.iter().find(|member| member.id == *id).cloned())
            .collect();

        Ok(SettlementStatus {
            status: parse_status(&group.status)?,
            progress,
            approved_users,
        })
    }
}

fn parse_status(raw: &str) -> Result<GroupStatus, SettlementRepoError> {
    GroupStatus::parse(raw).ok_or_else(|| SettlementRepoError::InvalidStatus(raw.to_string()))
}

async fn find_group<C: ConnectionTrait>(
    conn: &C,
    group_id: GroupId,
) -> Result<groups::Model, SettlementRepoError> {
    groups::Entity::find_by_id(group_id.into_inner())
        .one(conn)
        .await?
        .ok_or(SettlementRepoError::GroupNotFound(group_id))
}

async fn member_ids<C: ConnectionTrait>(conn: &C, group_id: GroupId) -> Result<Vec<UserId>, DbErr> {
    Ok(member_rows(conn, group_id)
        .await?
        .into_iter()
        .map(|user| UserId(user.id))
        .collect())
}

async fn approval_ids<C: ConnectionTrait>(
    conn: &C,
    group_id: GroupId,
) -> Result<Vec<UserId>, DbErr> {
    Ok(settlement_requests::Entity::find()
        .filter(settlement_requests::Column::GroupId.eq(group_id.into_inner()))
        .order_by_asc(settlement_requests::Column::RequestedAt)
        .order_by_asc(settlement_requests::Column::UserId)
        .all(conn)
        .await?
        .into_iter()
        .map(|row| UserId(row.user_id))
        .collect())
}
