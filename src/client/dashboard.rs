//! Dashboard view controller.
//!
//! Holds the last health status and user list fetched from the server.
//! Failed requests are logged and leave the view untouched; there is no
//! optimistic update and no retry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::ApiClient;
use crate::api::dto::CreateUserRequest;
use crate::domain::{Health, UserWithPosts};

/// What the dashboard currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Last successfully fetched health status.
    pub health: Option<Health>,
    /// Last successfully fetched user list.
    pub users: Vec<UserWithPosts>,
}

/// View controller over an [`ApiClient`].
///
/// Clones share the same view state, so several `add_user` sequences may
/// run concurrently; whichever refetch resolves last wins.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ApiClient,
    view: Arc<RwLock<ViewState>>,
}

impl Dashboard {
    /// Creates a dashboard with an empty view.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            view: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    /// Fetches health and users concurrently. Each result is stored as
    /// soon as it arrives, in whichever order they resolve.
    pub async fn load(&self) {
        let health = async {
            match self.client.health().await {
                Ok(health) => self.view.write().await.health = Some(health),
                Err(err) => tracing::warn!(error = %err, "health fetch failed"),
            }
        };
        tokio::join!(health, self.refresh_users());
    }

    /// Creates a user, then replaces the displayed list with a fresh fetch.
    ///
    /// A rejected create is logged and the list is still refetched.
    pub async fn add_user(&self, request: CreateUserRequest) {
        match self.client.create_user(&request).await {
            Ok(user) => tracing::info!(user_id = %user.id, "user added"),
            Err(err) => tracing::warn!(error = %err, email = %request.email, "add user failed"),
        }
        self.refresh_users().await;
    }

    /// Returns a copy of the current view.
    pub async fn snapshot(&self) -> ViewState {
        self.view.read().await.clone()
    }

    /// Renders the current view as text: the health status and the user
    /// list, each as pretty-printed JSON.
    pub async fn render(&self) -> String {
        let view = self.view.read().await;
        let health = serde_json::to_string_pretty(&view.health).unwrap_or_default();
        let users = serde_json::to_string_pretty(&view.users).unwrap_or_default();
        format!("health:\n{health}\n\nusers:\n{users}\n")
    }

    async fn refresh_users(&self) {
        match self.client.list_users().await {
            Ok(users) => self.view.write().await.users = users,
            Err(err) => tracing::warn!(error = %err, "user list fetch failed"),
        }
    }
}

/// The payload behind the dashboard's "add user" action: a throwaway email
/// derived from `now` so repeated clicks do not collide.
#[must_use]
pub fn generated_user(now: DateTime<Utc>) -> CreateUserRequest {
    CreateUserRequest {
        email: format!("user{}@test.com", now.timestamp_millis()),
        name: Some("New User".to_string()),
    }
}
