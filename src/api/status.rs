use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::session::SessionManager;
use crate::storage::FileStore;

/// Shared State für den Status-Endpunkt
pub struct StatusState {
    pub sessions: Arc<SessionManager>,
    pub store: Arc<FileStore>,
    /// Unix-Timestamp beim Start des Servers
    pub started_at: u64,
}

impl StatusState {
    pub fn new(sessions: Arc<SessionManager>, store: Arc<FileStore>) -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            sessions,
            store,
            started_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct BotStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub started_at: u64,
    pub timestamp: String,
    pub sessions: SessionStats,
    pub services: ServiceStatus,
}

#[derive(Serialize, Deserialize)]
pub struct SessionStats {
    pub loaded: usize,
    pub persisted: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct ServiceStatus {
    pub analysis: String,
    pub storage: String,
}

/// GET /api/v1/status - Vollständiger Bot-Status
pub async fn get_status(
    State(state): State<Arc<StatusState>>,
) -> (StatusCode, Json<BotStatus>) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let uptime = now.saturating_sub(state.started_at);

    // Storage-Health: Verzeichnis-Listing als schneller Ping
    let (storage_health, persisted) = match state.store.session_count().await {
        Ok(count) => ("operational".to_string(), Some(count)),
        Err(e) => {
            tracing::error!("Storage health check failed: {}", e);
            (format!("degraded: {}", e), None)
        }
    };

    let overall_healthy = persisted.is_some();

    let body = BotStatus {
        status: if overall_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        started_at: state.started_at,
        timestamp: chrono::Utc::now().to_rfc3339(),
        sessions: SessionStats {
            loaded: state.sessions.loaded_sessions().await,
            persisted,
        },
        services: ServiceStatus {
            analysis: "operational".to_string(),
            storage: storage_health,
        },
    };

    let http_status = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(body))
}

/// GET /api/v1/settings - Bot-Einstellungen (read-only)
pub async fn get_settings(State(state): State<Arc<StatusState>>) -> Json<serde_json::Value> {
    use serde_json::json;
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "roulette_api_port": std::env::var("ROULETTE_API_PORT").unwrap_or_else(|_| "8080".to_string()),
        "data_dir": std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        "log_level": std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        "analysis": state.sessions.analyzer().config(),
    }))
}

/// Router für V1 Endpunkte
pub fn status_router(state: Arc<StatusState>) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/settings", get(get_settings))
        .with_state(state)
}
