//! System endpoints: health check and the API miss error.

use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Health;
use crate::error::ApiError;

/// `GET /api/health`: liveness check.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    summary = "Health check",
    description = "Always succeeds. Returns `ok: true` and the current server time.",
    responses(
        (status = 200, description = "Service is up", body = Health),
    )
)]
pub async fn health_handler() -> Json<Health> {
    Json(Health::now())
}

/// Error for an unmatched `/api/*` path.
#[must_use]
pub fn api_not_found(path: &str) -> ApiError {
    ApiError::NotFound(format!("no API route for {path}"))
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
