//! restaurant-finder server entry point

use anyhow::Result;
use restaurant_finder::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting restaurant-finder v{}", restaurant_finder::VERSION);

    // Load configuration
    let settings = config::load()?;
    info!(
        "Export delivery: {:?} (dir: {})",
        settings.export.delivery,
        settings.export.dir.display()
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;

    // Create application state
    let state = AppState::new(settings.clone(), client)?;

    let app = create_router(state);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
