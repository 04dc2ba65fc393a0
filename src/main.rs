mod api;
mod roulette;
mod session;
mod storage;
mod utils;


use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use roulette::Analyzer;
use session::SessionManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    utils::init_logging();

    let config = utils::Config::from_env();

    tracing::info!(
        "Starting Roulette Sniper Bot (Rust) on port {}",
        config.api_port
    );

    // Initialize storage layer
    let store = Arc::new(storage::FileStore::new(&config.data_dir).await?);

    // Initialize analysis engine (static tables + thresholds)
    let analyzer = Analyzer::new(config.analysis.clone());

    // Initialize session manager
    let sessions = Arc::new(SessionManager::new(analyzer.clone(), store.clone()));

    // Initialize metrics
    let metrics = Arc::new(utils::Metrics::new());

    // Create application state for each router
    let session_state = Arc::new(api::SessionState {
        sessions: sessions.clone(),
        metrics: metrics.clone(),
    });

    let wheel_state = Arc::new(api::WheelState {
        wheel: analyzer.wheel().clone(),
    });

    let status_state = Arc::new(api::StatusState::new(sessions.clone(), store.clone()));

    // Build routers
    let app = Router::new()
        // Health & Admin Routes
        .nest("/api/admin", api::admin_router(metrics.clone()))
        // Session & Analysis Routes
        .nest("/api/session", api::session_router(session_state))
        // Wheel Data Routes (presentation contract)
        .nest("/api/wheel", api::wheel_router(wheel_state))
        // V1 Status & Settings Routes
        .nest("/api/v1", api::status_router(status_state))
        // Root health check
        .route("/health", get(health_check))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(logging_middleware)),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.api_port))
        .await?;

    tracing::info!("Server listening on port {}", config.api_port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Logging middleware
async fn logging_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}
