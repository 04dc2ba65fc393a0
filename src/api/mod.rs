pub mod session;
pub mod status;
pub mod wheel;

pub use session::{session_router, SessionState};
pub use status::{status_router, StatusState};
pub use wheel::{wheel_router, WheelState};

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::utils::Metrics;

/// Health Check Endpoint
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Readiness Check Endpoint
pub async fn ready() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "ready": true,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// Metrics Endpoint (Prometheus-Textformat)
pub async fn metrics(State(metrics): State<Arc<Metrics>>) -> (StatusCode, String) {
    (StatusCode::OK, metrics.export())
}

/// Router für Admin/Health Endpoints
pub fn admin_router(state: Arc<Metrics>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        .with_state(state)
}
