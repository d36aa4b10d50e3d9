use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rooms: RoomInfo,
}

#[derive(Serialize)]
pub struct RoomInfo {
    pub active: usize,
    pub occupants: usize,
}

/// GET /health — server status and room counts as JSON.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (active, occupants) = state.rooms.stats();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        rooms: RoomInfo { active, occupants },
    })
}
