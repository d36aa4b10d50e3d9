use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use parley_core::signaling::{ResponseCode, SignalingResponse};

/// Request-level failures surfaced to HTTP clients. The wire contract carries
/// only the structured result envelope; details stay in the server log.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    #[allow(dead_code)]
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::Internal(m) => write!(f, "{m}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(SignalingResponse::code(ResponseCode::Error))).into_response()
    }
}
