//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use paymeback_shared::AppError;
use serde_json::json;
use tracing::error;

use crate::AppState;

pub mod balances;
pub mod expenses;
pub mod groups;
pub mod health;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .merge(groups::routes())
        .merge(expenses::routes())
        .merge(balances::routes())
}

/// Builds a JSON error body of the form `{error, message}`.
pub(crate) fn error_response(status: u16, code: &str, message: impl Into<String>) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": code.to_lowercase(),
            "message": message.into()
        })),
    )
        .into_response()
}

/// Maps an application error to a response, hiding server-side details.
pub(crate) fn app_error_response(e: &AppError) -> Response {
    if e.is_server_error() {
        error!(error = %e, "Request failed");
        return error_response(e.status_code(), e.error_code(), "An error occurred");
    }
    let message = match e {
        AppError::NotFound(m)
        | AppError::Validation(m)
        | AppError::Database(m)
        | AppError::Internal(m) => m.clone(),
    };
    error_response(e.status_code(), e.error_code(), message)
}
