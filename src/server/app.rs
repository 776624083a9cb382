//! Axum server setup.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::ServerConfig;
use super::routes::api_router;
use super::state::AppState;

/// Builds the application around an existing state.
pub fn router(state: Arc<AppState>) -> Router {
    // The browser front end is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_router())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl-C
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let bind = config.bind;
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    log::info!("Server running on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, keep serving.
        std::future::pending::<()>().await;
    }
}
