//! HTTP API over a shared [`Assistant`].
//!
//! All handlers go through one mutex around the assistant, so a duplicate
//! check, insert and document rewrite run as a single critical section and
//! concurrent adds cannot interleave.
//!
//! Those writes (the document rewrite and the history append) are plain
//! blocking `std::fs` calls made on the runtime worker while the lock is held.
//! Documents are capped at 10 MiB and the server targets a single support desk,
//! so a write stalls at most one worker briefly. Requests queue on the lock
//! either way.

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::assistant::Assistant;
use crate::config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub assistant: Mutex<Assistant>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self { assistant: Mutex::new(assistant), start_time: Instant::now() }
    }
}

pub type SharedState = Arc<AppState>;

/// Build the API router around `assistant`
pub fn build_router(assistant: Assistant) -> Router {
    let state = Arc::new(AppState::new(assistant));

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::response_routes())
        .merge(routes::template_routes())
        .merge(routes::history_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl+C
pub async fn run(config: &Config, assistant: Assistant) -> Result<()> {
    info!(
        "Serving {} responses ({} mode) from {}",
        assistant.responses().len(),
        assistant.store_mode(),
        config.data_dir.display()
    );

    let app = build_router(assistant);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
