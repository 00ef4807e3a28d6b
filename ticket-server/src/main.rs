use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ticket_server::rail::{RailClient, RailConfig};
use ticket_server::stations::{StationClient, StationClientConfig, fetch_index};
use ticket_server::web::{AppState, create_router};

/// Default bind address; override with TICKET_BIND.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Fetch the station table (fail fast if unavailable: without it no
    // ticket query can be answered).
    info!("fetching station table...");
    let station_client = StationClient::new(StationClientConfig::default())
        .expect("failed to create station client");
    let index = fetch_index(&station_client)
        .await
        .expect("failed to load station table");
    info!("loaded {} stations", index.len());

    let rail = RailClient::new(RailConfig::default()).expect("failed to create 12306 client");

    let state = AppState::new(index, rail);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("TICKET_BIND")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()
        .expect("TICKET_BIND is not a valid socket address");

    info!("ticket server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
