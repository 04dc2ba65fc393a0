use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::roulette::AnalysisResult;
use crate::session::{SessionError, SessionManager};
use crate::utils::Metrics;

pub struct SessionState {
    pub sessions: Arc<SessionManager>,
    pub metrics: Arc<Metrics>,
}

impl SessionState {
    /// Verbucht Analyse-Dauer und Ergebnis in den Metriken
    fn record(&self, result: &AnalysisResult, started: std::time::Instant) {
        self.metrics
            .analysis_duration
            .observe(started.elapsed().as_secs_f64());
        self.metrics.record_analysis(result);
    }
}

/// Mappt Sitzungs-Fehler auf HTTP Status Codes
fn map_error(err: SessionError) -> (StatusCode, String) {
    let status = match &err {
        SessionError::InvalidNumber(_) | SessionError::IndexOutOfBounds { .. } => {
            StatusCode::BAD_REQUEST
        }
        SessionError::EmptyHistory => StatusCode::CONFLICT,
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::Storage(e) => {
            tracing::error!("Storage error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, err.to_string())
}

#[derive(serde::Deserialize)]
pub struct NumberRequest {
    pub number: i64,
}

/// POST /api/session - Neue Sitzung anlegen
pub async fn create_session(
    State(state): State<Arc<SessionState>>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    let started = std::time::Instant::now();
    let (session_id, analysis) = state.sessions.create().await.map_err(map_error)?;
    state.record(&analysis, started);

    state
        .metrics
        .loaded_sessions
        .set(state.sessions.loaded_sessions().await as i64);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "session_id": session_id,
            "analysis": analysis,
        })),
    ))
}

/// GET /api/session/:id - Aktuelle Analyse
pub async fn get_analysis(
    State(state): State<Arc<SessionState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    let started = std::time::Instant::now();
    let analysis = state
        .sessions
        .analysis(session_id)
        .await
        .map_err(map_error)?;
    state.record(&analysis, started);

    Ok(Json(analysis))
}

/// POST /api/session/:id/numbers - Gefallene Zahl anhängen
pub async fn add_number(
    State(state): State<Arc<SessionState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<NumberRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    let started = std::time::Instant::now();
    let analysis = state
        .sessions
        .append(session_id, payload.number)
        .await
        .map_err(map_error)?;
    state.record(&analysis, started);

    Ok(Json(analysis))
}

/// DELETE /api/session/:id/numbers/last - Letzte Zahl zurücknehmen
pub async fn undo_last(
    State(state): State<Arc<SessionState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    let started = std::time::Instant::now();
    let analysis = state
        .sessions
        .undo(session_id)
        .await
        .map_err(map_error)?;
    state.record(&analysis, started);

    Ok(Json(analysis))
}

/// PUT /api/session/:id/numbers/:index - Eintrag korrigieren
pub async fn edit_number(
    State(state): State<Arc<SessionState>>,
    Path((session_id, index)): Path<(Uuid, usize)>,
    Json(payload): Json<NumberRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    let started = std::time::Instant::now();
    let analysis = state
        .sessions
        .edit(session_id, index, payload.number)
        .await
        .map_err(map_error)?;
    state.record(&analysis, started);

    Ok(Json(analysis))
}

/// DELETE /api/session/:id/numbers - Historie zurücksetzen
pub async fn clear_history(
    State(state): State<Arc<SessionState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnalysisResult>, (StatusCode, String)> {
    let started = std::time::Instant::now();
    let analysis = state
        .sessions
        .clear(session_id)
        .await
        .map_err(map_error)?;
    state.record(&analysis, started);

    Ok(Json(analysis))
}

/// Router für Session Endpoints
pub fn session_router(state: Arc<SessionState>) -> Router {
    Router::new()
        .route("/", post(create_session))
        .route("/:id", get(get_analysis))
        .route("/:id/numbers", post(add_number))
        .route("/:id/numbers", delete(clear_history))
        .route("/:id/numbers/last", delete(undo_last))
        .route("/:id/numbers/:index", put(edit_number))
        .with_state(state)
}
