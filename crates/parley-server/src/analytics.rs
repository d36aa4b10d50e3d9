use axum::extract::State;
use axum::response::Json;

use parley_core::events::{
    AnalyticsEvent, AnalyticsRequest, EventContent, EventSink, REQUEST_TYPE_EVENT,
};
use parley_core::signaling::SignalingResponse;

use crate::error::AppError;
use crate::state::AppState;

/// Why an analytics record was rejected. Every variant surfaces to the
/// client as HTTP 400 with an ERROR result; the detail is only logged.
#[derive(Debug, PartialEq, Eq)]
pub enum RecordError {
    Malformed,
    UnknownType(String),
    MissingField(&'static str),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed request body"),
            Self::UnknownType(t) => write!(f, "unknown request type: {t}"),
            Self::MissingField(name) => write!(f, "missing field: {name}"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Production sink: reports events to the tracing stream. Deployments with a
/// warehouse pipeline swap in their own `EventSink`.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn report_event(&self, event: AnalyticsEvent) {
        tracing::info!(
            event_type = %event.event_type,
            room = event.room_id.as_deref().unwrap_or("-"),
            time_ms = event.time_ms,
            client_time_ms = event.client_time_ms,
            "Analytics event"
        );
    }
}

/// POST /a/ — validate a client analytics record and forward it to the sink.
pub async fn record_event(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SignalingResponse>, AppError> {
    let received_ms = state.clock.now_ms();
    let event = parse_event(&body, received_ms).map_err(|err| {
        tracing::warn!(%err, "Analytics record rejected");
        AppError::BadRequest(err.to_string())
    })?;
    state.events.report_event(event);
    Ok(Json(SignalingResponse::success()))
}

/// Validate a raw analytics body and shift the event time into the server's
/// clock domain: the client's own timestamps cancel out its clock skew.
fn parse_event(body: &str, received_ms: f64) -> Result<AnalyticsEvent, RecordError> {
    let request: AnalyticsRequest =
        serde_json::from_str(body).map_err(|_| RecordError::Malformed)?;

    let kind = request.kind.ok_or(RecordError::MissingField("type"))?;
    if kind != REQUEST_TYPE_EVENT {
        return Err(RecordError::UnknownType(kind));
    }
    let request_time_ms = request
        .request_time_ms
        .ok_or(RecordError::MissingField("request_time_ms"))?;
    let content = request.content.ok_or(RecordError::MissingField("content"))?;

    // Clients send `content` as a JSON-encoded string; inline objects are
    // accepted too.
    let content: EventContent = match content {
        serde_json::Value::String(raw) => {
            serde_json::from_str(&raw).map_err(|_| RecordError::Malformed)?
        },
        other => serde_json::from_value(other).map_err(|_| RecordError::Malformed)?,
    };

    let event_type = content
        .event_type
        .ok_or(RecordError::MissingField("event_type"))?;
    let event_time_ms = content
        .event_time_ms
        .ok_or(RecordError::MissingField("event_time_ms"))?;

    Ok(AnalyticsEvent {
        event_type,
        room_id: content.room_id,
        time_ms: event_time_ms + (received_ms - request_time_ms),
        client_time_ms: event_time_ms,
    })
}
