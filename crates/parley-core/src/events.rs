use serde::Deserialize;

/// Request `type` value for event records.
pub const REQUEST_TYPE_EVENT: &str = "event";

/// Analytics record as posted by clients. Every field is optional at the
/// parse stage; the endpoint decides which absences are errors.
#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub request_time_ms: Option<f64>,
    /// Either a JSON object or a JSON-encoded string containing one.
    pub content: Option<serde_json::Value>,
}

/// `content` payload of an event record.
#[derive(Debug, Deserialize)]
pub struct EventContent {
    pub event_type: Option<String>,
    pub event_time_ms: Option<f64>,
    pub room_id: Option<String>,
}

/// A validated analytics event, shifted into the server's clock domain.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub room_id: Option<String>,
    /// Client event time corrected by the observed client/server clock skew.
    pub time_ms: f64,
    /// Event time as recorded by the client.
    pub client_time_ms: f64,
}

/// Reporting destination for validated analytics events. Injected at
/// construction; tests substitute a capturing implementation.
pub trait EventSink: Send + Sync {
    fn report_event(&self, event: AnalyticsEvent);
}
