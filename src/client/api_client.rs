//! Typed `reqwest` client for the REST API.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::api::dto::CreateUserRequest;
use crate::domain::{Health, User, UserWithPosts};
use crate::error::ErrorResponse;

/// Failure talking to the server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status returned by the server.
        status: StatusCode,
        /// The server's `error` message, or the raw body if it had none.
        message: String,
    },
}

/// HTTP client bound to one server base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn health(&self) -> Result<Health, ClientError> {
        let response = self.http.get(self.url("/api/health")).send().await?;
        decode(response).await
    }

    /// `GET /api/users`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or non-success status.
    pub async fn list_users(&self) -> Result<Vec<UserWithPosts>, ClientError> {
        let response = self.http.get(self.url("/api/users")).send().await?;
        decode(response).await
    }

    /// `POST /api/users`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] with the server's message when the
    /// user cannot be created, for example on a duplicate email.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/api/users"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await?;
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(ClientError::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/users"), "http://localhost:5000/api/users");
    }
}
