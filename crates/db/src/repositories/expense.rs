//! Expense repository for recording and listing expenses.

use chrono::{DateTime, Utc};
use paymeback_core::expense::{ExpenseError, ExpenseValidator, NewExpense};
use paymeback_shared::types::{ExpenseId, GroupId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use super::ledger::{expense_rows, member_rows, participants_by_expense};
use crate::entities::{expense_participants, expenses, groups};

/// Error types for expense operations.
#[derive(Debug, Error)]
pub enum ExpenseRepoError {
    /// The expense broke a recording rule.
    #[error(transparent)]
    Invalid(#[from] ExpenseError),

    /// Group not found.
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A stored expense with its participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseWithParticipants {
    /// Expense id.
    pub id: ExpenseId,
    /// Owning group.
    pub group_id: GroupId,
    /// Payer.
    pub paid_by: UserId,
    /// Amount in cents.
    pub amount_cents: i64,
    /// Description.
    pub description: String,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
    /// Participants ordered by id.
    pub participant_ids: Vec<UserId>,
}

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and records an expense with its participants.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The group does not exist
    /// - The expense fails validation
    /// - Database operation fails
    pub async fn create(&self, input: NewExpense) -> Result<ExpenseWithParticipants, ExpenseRepoError> {
        let group_id = input.group_id;
        let txn = self.db.begin().await?;

        if groups::Entity::find_by_id(group_id.into_inner())
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ExpenseRepoError::GroupNotFound(group_id));
        }

        let members: Vec<UserId> = member_rows(&txn, group_id)
            .await?
            .into_iter()
            .map(|user| UserId(user.id))
            .collect();
        let expense = ExpenseValidator::validate(input, &members)?;

        let model = expenses::ActiveModel {
            group_id: Set(expense.group_id.into_inner()),
            paid_by: Set(expense.paid_by.into_inner()),
            amount_cents: Set(expense.amount_cents),
            description: Set(expense.description.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for user_id in &expense.participant_ids {
            expense_participants::ActiveModel {
                expense_id: Set(model.id),
                user_id: Set(user_id.into_inner()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(
            expense_id = model.id,
            group_id = %group_id,
            amount_cents = model.amount_cents,
            "Expense recorded"
        );

        let mut participant_ids = expense.participant_ids;
        participant_ids.sort_unstable();
        Ok(to_stored(model, participant_ids))
    }

    /// Lists the expenses of a group, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_group(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<ExpenseWithParticipants>, ExpenseRepoError> {
        let txn = self.db.begin().await?;
        let rows = expense_rows(&txn, group_id).await?;
        let mut participants = participants_by_expense(&txn, &rows).await?;
        txn.commit().await?;

        Ok(rows
            .into_iter()
            .map(|model| {
                let ids = participants.remove(&model.id).unwrap_or_default();
                to_stored(model, ids)
            })
            .collect())
    }

    /// Deletes an expense and its participant rows.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist.
    pub async fn delete(&self, id: ExpenseId) -> Result<(), ExpenseRepoError> {
        let txn = self.db.begin().await?;

        expense_participants::Entity::delete_many()
            .filter(expense_participants::Column::ExpenseId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        let result = expenses::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ExpenseRepoError::NotFound(id));
        }

        txn.commit().await?;
        info!(expense_id = %id, "Expense deleted");
        Ok(())
    }
}

fn to_stored(model: expenses::Model, participant_ids: Vec<UserId>) -> ExpenseWithParticipants {
    ExpenseWithParticipants {
        id: ExpenseId(model.id),
        group_id: GroupId(model.group_id),
        paid_by: UserId(model.paid_by),
        amount_cents: model.amount_cents,
        description: model.description,
        created_at: model.created_at,
        participant_ids,
    }
}
