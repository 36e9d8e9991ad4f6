//! Router construction and server loop.

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::handlers::{fill, health, index, predict};
use super::state::AppState;
use crate::{AppConfig, CardiodashError};

/// Icon served at `/favicon.ico`, relative to the static directory.
pub const FAVICON_FILE: &str = "favicon.png";

/// Build the application router.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/fill", post(fill))
        .route("/api/predict", post(predict))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join(FAVICON_FILE)))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Serve the dashboard until Ctrl-C.
///
/// # Errors
/// Returns error if the listener cannot bind or the server fails.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<(), CardiodashError> {
    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
