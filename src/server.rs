//! Application assembly: store selection and router composition.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::{AppConfig, StorageBackend};
use crate::store::{InMemoryUserStore, PostgresUserStore, StoreError, UserStore};

/// Builds the storage backend selected by `config`.
///
/// For PostgreSQL, connects the pool and applies migrations when
/// `run_migrations` is set.
///
/// # Errors
///
/// Returns [`StoreError::Internal`] if the database is unreachable or a
/// migration fails.
pub async fn build_state(config: &AppConfig) -> Result<AppState, StoreError> {
    let users: Arc<dyn UserStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let store = PostgresUserStore::connect(config).await?;
            if config.run_migrations {
                store.migrate().await?;
                tracing::info!("database migrations applied");
            }
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(InMemoryUserStore::new())
        }
    };
    Ok(AppState::new(users))
}

/// Builds the full HTTP application.
///
/// `/api/*` is served by the REST router; unmatched API paths answer 404
/// with an error body. Every other `GET`/`HEAD` is looked up in
/// `client_dist`, falling back to its `index.html` so client-side routes
/// resolve to the single-page app. Any other method on a non-API path gets
/// `index.html` directly.
pub fn build_app(state: AppState, client_dist: &Path) -> Router {
    let files = ClientFiles::new(client_dist);

    Router::new()
        .merge(api::build_router())
        .fallback(move |request: Request| fallback(files.clone(), request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Static services over the built client directory.
#[derive(Debug, Clone)]
struct ClientFiles {
    assets: ServeDir<ServeFile>,
    index: ServeFile,
}

impl ClientFiles {
    fn new(client_dist: &Path) -> Self {
        let index = ServeFile::new(client_dist.join("index.html"));
        Self {
            assets: ServeDir::new(client_dist).fallback(index.clone()),
            index,
        }
    }
}

async fn fallback(files: ClientFiles, mut request: Request) -> Response {
    let path = request.uri().path();
    if api::is_api_path(path) {
        return api::handlers::system::api_not_found(path).into_response();
    }

    let served = if matches!(*request.method(), Method::GET | Method::HEAD) {
        files.assets.oneshot(request).await
    } else {
        // Static file services only answer GET and HEAD.
        *request.method_mut() = Method::GET;
        files.index.oneshot(request).await
    };
    match served {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
