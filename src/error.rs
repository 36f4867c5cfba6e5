//! API error type with HTTP status code mapping.
//!
//! [`ApiError`] is the single place where failures become HTTP statuses.
//! Every error response has the shape `{ "error": "<message>" }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

/// JSON error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message. For constraint violations this is the
    /// store's message verbatim.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant               | HTTP Status               |
/// |-----------------------|---------------------------|
/// | `InvalidRequest`      | 400 Bad Request           |
/// | `ConstraintViolation` | 400 Bad Request           |
/// | `NotFound`            | 404 Not Found             |
/// | `Internal`            | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be decoded into the expected shape.
    #[error("{0}")]
    InvalidRequest(String),

    /// The store rejected the write.
    #[error("{0}")]
    ConstraintViolation(String),

    /// No such resource or route.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::ConstraintViolation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(message) => Self::ConstraintViolation(message),
            StoreError::NotFound(message) => Self::NotFound(message),
            StoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Internal(message) => tracing::error!(%status, error = %message, "request failed"),
            Self::ConstraintViolation(message) => {
                tracing::warn!(%status, error = %message, "rejected by store");
            }
            Self::InvalidRequest(_) | Self::NotFound(_) => {
                tracing::debug!(%status, error = %self, "client error");
            }
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::InvalidRequest(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ConstraintViolation(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound(String::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_message_passes_through_verbatim() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"";
        let err = ApiError::from(StoreError::ConstraintViolation(message.to_string()));
        assert_eq!(err.to_string(), message);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn response_body_is_flat_error_object() {
        let response = ApiError::NotFound("no route".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let Ok(body) = serde_json::from_slice::<ErrorResponse>(&bytes) else {
            panic!("body is not an error object");
        };
        assert_eq!(body.error, "no route");
    }
}
