use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parley_core::events::{AnalyticsEvent, EventSink};
use parley_core::time::Clock;

use parley_server::config::ServerConfig;
use parley_server::state::AppState;
use parley_server::{build_app, build_router};

/// Clock pinned to a fixed instant.
pub struct FixedClock {
    pub now_ms: f64,
}

impl Clock for FixedClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// Sink that captures every reported event for later assertions.
#[derive(Default)]
pub struct CapturingSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl CapturingSink {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<AnalyticsEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl EventSink for CapturingSink {
    fn report_event(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with default config and production analytics.
    pub async fn new() -> Self {
        let (app, _state) = build_app(ServerConfig::default());
        Self::serve(app).await
    }

    /// Start a test server with a fixed clock and a capturing analytics
    /// sink. Returns the sink for assertions.
    pub async fn with_analytics(now_ms: f64) -> (Self, Arc<CapturingSink>) {
        let sink = Arc::new(CapturingSink::default());
        let dyn_sink: Arc<dyn EventSink> = sink.clone();
        let state = AppState::with_analytics(
            ServerConfig::default(),
            Arc::new(FixedClock { now_ms }),
            dyn_sink,
        );
        (Self::serve(build_router(state)).await, sink)
    }

    async fn serve(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _server: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// POST /join/{room_id} and return the parsed body.
pub async fn join(client: &reqwest::Client, base: &str, room_id: &str) -> serde_json::Value {
    let resp = client
        .post(format!("{base}/join/{room_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

/// Assert a successful join response for `room_id` and return the client id.
pub fn verify_join_success(
    body: &serde_json::Value,
    is_initiator: &str,
    room_id: &str,
) -> String {
    assert_eq!(body["result"], "SUCCESS", "unexpected body: {body}");
    let params = &body["params"];
    let client_id = params["client_id"].as_str().unwrap();
    assert!(!client_id.is_empty());
    assert_eq!(params["is_initiator"], is_initiator);
    assert_eq!(params["room_id"], room_id);
    assert_eq!(params["error_messages"], serde_json::json!([]));
    client_id.to_string()
}

/// POST /leave/{room_id}/{client_id}.
pub async fn leave(client: &reqwest::Client, base: &str, room_id: &str, client_id: &str) {
    let resp = client
        .post(format!("{base}/leave/{room_id}/{client_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
