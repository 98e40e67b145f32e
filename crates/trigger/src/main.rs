//! Ridecast trigger server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ridecast_common::config::AppConfig;
use ridecast_gateway::fcm::FcmClient;
use ridecast_gateway::firestore::FirestoreDirectory;
use ridecast_gateway::http_client;
use ridecast_notifier::fanout::FanoutNotifier;

use ridecast_trigger::routes::create_router;
use ridecast_trigger::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("ridecast_trigger=info,ridecast_notifier=info,tower_http=info")
        }))
        .json()
        .init();

    tracing::info!("Starting Ridecast trigger server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Wire the notifier to its production collaborators
    let http = http_client(config.http_timeout_secs)?;
    let directory = Arc::new(FirestoreDirectory::new(http.clone(), &config));
    let transport = Arc::new(FcmClient::new(http, &config));
    let notifier = FanoutNotifier::new(directory, transport);

    // Build router
    let state = AppState::new(notifier);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Trigger server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
