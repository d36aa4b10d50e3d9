pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod room_registry;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

use config::ServerConfig;
use state::AppState;

/// Build the axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);
    (build_router(state.clone()), state)
}

/// Build a router over pre-constructed state. Tests inject a fake clock and
/// a capturing event sink through `AppState::with_analytics` and come in
/// here.
pub fn build_router(state: AppState) -> Router<()> {
    Router::new()
        .route("/join/{room_id}", post(api::join))
        .route("/leave/{room_id}/{client_id}", post(api::leave))
        .route("/message/{room_id}/{client_id}", post(api::message))
        .route("/a/", post(analytics::record_event))
        .route("/health", get(health::health_check))
        .layer(DefaultBodyLimit::max(state.config.limits.max_message_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.limits.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Background task that periodically reaps idle rooms.
pub fn spawn_idle_room_reaper(state: AppState) {
    tokio::spawn(async move {
        let interval = Duration::from_secs(state.config.rooms.idle_check_interval_secs);
        let max_idle = Duration::from_secs(state.config.rooms.idle_timeout_secs);
        loop {
            tokio::time::sleep(interval).await;
            let removed = state.rooms.cleanup_idle_rooms(max_idle);
            if removed > 0 {
                tracing::info!(removed, "Reaped idle rooms");
            }
        }
    });
}
