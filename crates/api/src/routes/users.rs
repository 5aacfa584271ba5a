//! User routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use paymeback_db::UserRepository;
use paymeback_db::entities::users;
use paymeback_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::app_error_response;
use crate::AppState;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}

/// Query parameters for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserQuery {
    /// Display name.
    pub name: String,
}

/// Response for a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// GET `/users` - List users ordered by name.
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => app_error_response(&AppError::Database(e.to_string())),
    }
}

/// POST `/users?name=` - Create a user.
async fn create_user(
    State(state): State<AppState>,
    Query(query): Query<CreateUserQuery>,
) -> impl IntoResponse {
    if query.name.trim().is_empty() {
        return app_error_response(&AppError::Validation("Name cannot be empty".to_string()));
    }

    let repo = UserRepository::new((*state.db).clone());

    match repo.create(&query.name).await {
        Ok(user) => {
            info!(user_id = user.id, "User created");
            (StatusCode::CREATED, Json(UserResponse::from(user))).into_response()
        }
        Err(e) => app_error_response(&AppError::Database(e.to_string())),
    }
}
