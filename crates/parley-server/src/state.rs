use std::sync::Arc;

use parley_core::events::EventSink;
use parley_core::time::{Clock, SystemClock};

use crate::analytics::TracingEventSink;
use crate::config::ServerConfig;
use crate::room_registry::RoomRegistry;

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomRegistry>,
    pub clock: Arc<dyn Clock>,
    pub events: Arc<dyn EventSink>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_analytics(config, Arc::new(SystemClock), Arc::new(TracingEventSink))
    }

    /// Construct with an explicit clock and event sink. Tests inject a fixed
    /// clock and a capturing sink here.
    pub fn with_analytics(
        config: ServerConfig,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::new()),
            clock,
            events,
            config: Arc::new(config),
        }
    }
}
