use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::roulette::Wheel;

/// Read-only Kessel-Daten für die Präsentations-Schicht
pub struct WheelState {
    pub wheel: Wheel,
}

fn validate_number(number: i64) -> Result<u8, (StatusCode, String)> {
    if (0..=36).contains(&number) {
        Ok(number as u8)
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            format!("number {} is not a valid roulette outcome (expected 0-36)", number),
        ))
    }
}

/// GET /api/wheel/layout - Slot-Reihenfolge mit Farben
pub async fn get_layout(State(state): State<Arc<WheelState>>) -> Json<serde_json::Value> {
    let slots: Vec<serde_json::Value> = state
        .wheel
        .slots()
        .iter()
        .map(|&number| {
            json!({
                "number": number,
                "color": state.wheel.color(number).as_str(),
            })
        })
        .collect();

    Json(json!({ "slots": slots }))
}

/// GET /api/wheel/color/:number - Farbe eines Felds
pub async fn get_color(
    State(state): State<Arc<WheelState>>,
    Path(number): Path<i64>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let number = validate_number(number)?;

    Ok(Json(json!({
        "number": number,
        "color": state.wheel.color(number).as_str(),
    })))
}

#[derive(serde::Deserialize)]
pub struct NeighborParams {
    pub radius: Option<usize>,
}

/// GET /api/wheel/neighbors/:number?radius=n - Nachbarschafts-Expansion
pub async fn get_neighbors(
    State(state): State<Arc<WheelState>>,
    Path(number): Path<i64>,
    Query(params): Query<NeighborParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let number = validate_number(number)?;
    let radius = params.radius.unwrap_or(1);

    if radius > 18 {
        return Err((
            StatusCode::BAD_REQUEST,
            "radius must be at most 18 (half the wheel)".to_string(),
        ));
    }

    Ok(Json(json!({
        "number": number,
        "radius": radius,
        "neighbors": state.wheel.neighbors_within(number, radius),
    })))
}

/// Router für Wheel Endpoints
pub fn wheel_router(state: Arc<WheelState>) -> Router {
    Router::new()
        .route("/layout", get(get_layout))
        .route("/color/:number", get(get_color))
        .route("/neighbors/:number", get(get_neighbors))
        .with_state(state)
}
