//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use paymeback_core::expense::NewExpense;
use paymeback_db::ExpenseRepository;
use paymeback_db::repositories::{ExpenseRepoError, ExpenseWithParticipants};
use paymeback_shared::AppError;
use paymeback_shared::types::money::from_cents;
use paymeback_shared::types::{ExpenseId, GroupId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::{app_error_response, error_response};
use crate::AppState;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{expense_id}", delete(delete_expense))
}

/// Query parameters for listing expenses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpensesQuery {
    /// Group to list.
    pub group_id: i64,
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    /// Group ID.
    pub group_id: i64,
    /// Payer user ID.
    pub paid_by: i64,
    /// Amount paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Members sharing the cost.
    pub participant_ids: Vec<i64>,
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: i64,
    /// Group ID.
    pub group_id: i64,
    /// Payer user ID.
    pub paid_by: i64,
    /// Amount paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
    /// Members sharing the cost.
    pub participant_ids: Vec<i64>,
}

impl From<ExpenseWithParticipants> for ExpenseResponse {
    fn from(expense: ExpenseWithParticipants) -> Self {
        Self {
            id: expense.id.into_inner(),
            group_id: expense.group_id.into_inner(),
            paid_by: expense.paid_by.into_inner(),
            amount: from_cents(expense.amount_cents),
            description: expense.description,
            created_at: expense.created_at,
            participant_ids: expense
                .participant_ids
                .into_iter()
                .map(UserId::into_inner)
                .collect(),
        }
    }
}

/// GET `/expenses?groupId=` - List a group's expenses, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.list_by_group(GroupId(query.group_id)).await {
        Ok(expenses) => {
            let response: Vec<ExpenseResponse> =
                expenses.into_iter().map(ExpenseResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => map_expense_error(&e),
    }
}

/// POST `/expenses` - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    let input = NewExpense {
        group_id: GroupId(payload.group_id),
        paid_by: UserId(payload.paid_by),
        amount: payload.amount,
        description: payload.description,
        participant_ids: payload.participant_ids.into_iter().map(UserId).collect(),
    };

    match repo.create(input).await {
        Ok(expense) => (StatusCode::CREATED, Json(ExpenseResponse::from(expense))).into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// DELETE `/expenses/{expense_id}` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match repo.delete(ExpenseId(expense_id)).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Expense deleted successfully" })),
        )
            .into_response(),
        Err(e) => map_expense_error(&e),
    }
}

/// Maps expense errors to HTTP responses.
fn map_expense_error(e: &ExpenseRepoError) -> Response {
    match e {
        ExpenseRepoError::Invalid(invalid) => {
            warn!(error = %invalid, "Expense rejected");
            error_response(invalid.status_code(), invalid.error_code(), invalid.to_string())
        }
        ExpenseRepoError::GroupNotFound(_) | ExpenseRepoError::NotFound(_) => {
            app_error_response(&AppError::NotFound(e.to_string()))
        }
        ExpenseRepoError::Database(db) => app_error_response(&AppError::Database(db.to_string())),
    }
}
