use axum::extract::{Path, State};
use axum::response::Json;

use parley_core::signaling::{JoinParams, ResponseCode, SignalingResponse};

use crate::room_registry::JoinOutcome;
use crate::state::AppState;

/// POST /join/{room_id} — admit a caller or callee into a room.
pub async fn join(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Json<SignalingResponse> {
    match state.rooms.join(&room_id) {
        JoinOutcome::Joined(joined) => Json(SignalingResponse::joined(JoinParams {
            client_id: joined.client_id,
            is_initiator: joined.is_initiator,
            room_id,
            messages: joined.messages,
            error_messages: Vec::new(),
        })),
        JoinOutcome::Full => Json(SignalingResponse::code(ResponseCode::Full)),
    }
}

/// POST /message/{room_id}/{client_id} — accept an opaque signaling payload.
pub async fn message(
    State(state): State<AppState>,
    Path((room_id, client_id)): Path<(String, String)>,
    body: String,
) -> Json<SignalingResponse> {
    match state.rooms.send_message(&room_id, &client_id, body) {
        Ok(()) => Json(SignalingResponse::success()),
        Err(err) => {
            tracing::warn!(room = %room_id, client = %client_id, %err, "Message rejected");
            Json(SignalingResponse::code(err.into()))
        },
    }
}

/// POST /leave/{room_id}/{client_id} — idempotent departure; always SUCCESS.
pub async fn leave(
    State(state): State<AppState>,
    Path((room_id, client_id)): Path<(String, String)>,
) -> Json<SignalingResponse> {
    state.rooms.leave(&room_id, &client_id);
    Json(SignalingResponse::success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;

    async fn join_params(state: &AppState, room_id: &str) -> JoinParams {
        let resp = join(State(state.clone()), Path(room_id.to_string())).await;
        assert_eq!(resp.result, ResponseCode::Success);
        resp.0.params.expect("join response carries params")
    }

    #[tokio::test]
    async fn join_assigns_roles_and_ids() {
        let state = AppState::new(ServerConfig::default());

        let caller = join_params(&state, "foo").await;
        assert!(caller.is_initiator);
        assert_eq!(caller.room_id, "foo");
        assert!(!caller.client_id.is_empty());
        assert!(caller.messages.is_empty());
        assert!(caller.error_messages.is_empty());

        let callee = join_params(&state, "foo").await;
        assert!(!callee.is_initiator);
    }

    #[tokio::test]
    async fn third_join_reports_full() {
        let state = AppState::new(ServerConfig::default());
        join_params(&state, "foo").await;
        join_params(&state, "foo").await;

        let resp = join(State(state), Path("foo".to_string())).await;
        assert_eq!(resp.result, ResponseCode::Full);
        assert!(resp.0.params.is_none());
    }

    #[tokio::test]
    async fn message_buffers_for_second_joiner() {
        let state = AppState::new(ServerConfig::default());
        let caller = join_params(&state, "foo").await;

        for payload in ["1", "2", "3"] {
            let resp = message(
                State(state.clone()),
                Path(("foo".to_string(), caller.client_id.clone())),
                payload.to_string(),
            )
            .await;
            assert_eq!(resp.result, ResponseCode::Success);
        }

        let callee = join_params(&state, "foo").await;
        assert_eq!(callee.messages, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn message_from_stranger_rejected() {
        let state = AppState::new(ServerConfig::default());
        join_params(&state, "foo").await;

        let resp = message(
            State(state.clone()),
            Path(("foo".to_string(), "intruder".to_string())),
            "hi".to_string(),
        )
        .await;
        assert_eq!(resp.result, ResponseCode::UnknownClient);

        let resp = message(
            State(state),
            Path(("bar".to_string(), "anyone".to_string())),
            "hi".to_string(),
        )
        .await;
        assert_eq!(resp.result, ResponseCode::UnknownRoom);
    }

    #[tokio::test]
    async fn leave_always_acknowledges() {
        let state = AppState::new(ServerConfig::default());
        let caller = join_params(&state, "foo").await;

        for client in [caller.client_id.as_str(), caller.client_id.as_str(), "ghost"] {
            let resp = leave(
                State(state.clone()),
                Path(("foo".to_string(), client.to_string())),
            )
            .await;
            assert_eq!(resp.result, ResponseCode::Success);
        }
    }
}
