//! User handlers: create and list.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::CreateUserRequest;
use crate::app_state::AppState;
use crate::domain::{User, UserWithPosts};
use crate::error::{ApiError, ErrorResponse};

/// `POST /api/users`: create a user.
///
/// The body is decoded into [`CreateUserRequest`] before the store is
/// touched; decode failures never reach storage.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] for a malformed body,
/// [`ApiError::ConstraintViolation`] when the store rejects the row (for
/// example a duplicate email), and [`ApiError::Internal`] otherwise.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    summary = "Create a user",
    description = "Persists a new user. The store assigns the id; a duplicate email is rejected with the store's message.",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Malformed body or constraint violation", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let user = state.users.create_user(request.into()).await?;

    tracing::info!(user_id = %user.id, "user created");
    Ok(Json(user))
}

/// `GET /api/users`: list all users with their posts.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    summary = "List users",
    description = "Returns every user in insertion order, each with its posts eagerly loaded. No pagination.",
    responses(
        (status = 200, description = "All users", body = Vec<UserWithPosts>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithPosts>>, ApiError> {
    let users = state.users.list_users_with_posts().await?;
    Ok(Json(users))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user))
}
