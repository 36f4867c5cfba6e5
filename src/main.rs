//! userboard server entry point.
//!
//! Starts the Axum HTTP server with the REST API and the client fallback.

use tracing_subscriber::EnvFilter;

use userboard::config::{AppConfig, LogFormat};
use userboard::server::{build_app, build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    let addr = config.listen_addr();
    tracing::info!(%addr, backend = %config.storage_backend, "starting userboard");

    // Build storage and router
    let state = build_state(&config).await?;
    let app = build_app(state, &config.client_dist_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
