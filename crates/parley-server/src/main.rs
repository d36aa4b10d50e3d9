use tracing_subscriber::EnvFilter;

use parley_server::config::ServerConfig;
use parley_server::{build_app, spawn_idle_room_reaper};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::load();
    config.validate();
    let listen_addr = config.listen_addr.clone();

    let (app, state) = build_app(config);
    spawn_idle_room_reaper(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {listen_addr}: {e}"));

    tracing::info!("parley signaling server listening on {listen_addr}");

    axum::serve(listener, app).await.expect("Server error");
}
