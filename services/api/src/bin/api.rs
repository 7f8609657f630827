//! services/api/src/bin/api.rs

use api_lib::{config::Config, error::ApiError, web, web::state::AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");
    info!(
        "{} users configured, datasets under {}",
        config.users.credentials.len(),
        config.data_dir.display()
    );

    // --- 2. Wire Adapters into the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone()));

    // --- 3. Create the Web Router & Start the Server ---
    let app = web::router(app_state);
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
