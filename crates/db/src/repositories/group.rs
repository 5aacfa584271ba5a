//! Group repository for group and membership operations.

use paymeback_core::settlement::GroupStatus;
use paymeback_shared::types::{GroupId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use super::ledger::{groups_for_user, member_rows};
use crate::entities::{group_members, groups, users};

/// Error types for group operations.
#[derive(Debug, Error)]
pub enum GroupError {
    /// Group not found.
    #[error("Group not found: {0}")]
    NotFound(GroupId),

    /// Group name is empty.
    #[error("Group name cannot be empty")]
    EmptyName,

    /// A listed member does not exist.
    #[error("User not found: {0}")]
    UnknownUser(UserId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a group.
#[derive(Debug, Clone)]
pub struct CreateGroupInput {
    /// Display name.
    pub name: String,
    /// Initial members; duplicates are ignored.
    pub member_ids: Vec<UserId>,
}

/// Group repository.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Creates a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active group together with its members.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is blank
    /// - A member id does not exist
    /// - Database operation fails
    pub async fn create(&self, input: CreateGroupInput) -> Result<groups::Model, GroupError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }

        let mut member_ids = input.member_ids;
        member_ids.sort_unstable();
        member_ids.dedup();

        let txn = self.db.begin().await?;

        for id in &member_ids {
            let exists = users::Entity::find_by_id(id.into_inner())
                .count(&txn)
                .await?;
            if exists == 0 {
                return Err(GroupError::UnknownUser(*id));
            }
        }

        let group = groups::ActiveModel {
            name: Set(name.to_string()),
            status: Set(GroupStatus::Active.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for id in &member_ids {
            group_members::ActiveModel {
                group_id: Set(group.id),
                user_id: Set(id.into_inner()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(group_id = group.id, members = member_ids.len(), "Group created");
        Ok(group)
    }

    /// Finds a group by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the group does not exist.
    pub async fn get(&self, id: GroupId) -> Result<groups::Model, GroupError> {
        groups::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(GroupError::NotFound(id))
    }

    /// Lists groups with the given status, optionally only those a user belongs to.
    ///
    /// Results are ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Option<UserId>,
        status: GroupStatus,
    ) -> Result<Vec<groups::Model>, GroupError> {
        let rows = match user_id {
            Some(user_id) => groups_for_user(&self.db, user_id, status).await?,
            None => {
                groups::Entity::find()
                    .filter(groups::Column::Status.eq(status.as_str()))
                    .order_by_asc(groups::Column::Name)
                    .order_by_asc(groups::Column::Id)
                    .all(&self.db)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Lists the members of a group ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the group does not exist.
    pub async fn members(&self, id: GroupId) -> Result<Vec<users::Model>, GroupError> {
        self.get(id).await?;
        Ok(member_rows(&self.db, id).await?)
    }
}
