//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::store::UserStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// User storage backend.
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    /// Wraps a concrete store.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
