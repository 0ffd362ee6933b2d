//! services/dashboard/src/bin/dashboard.rs

use dashboard_lib::{
    adapters::BackendClient, app_state, config::Config, error::DashboardError, web::build_router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting dashboard...");

    // --- 2. Build the Backend Client ---
    let client = BackendClient::new(config.backend_url.clone(), config.backend_timeout)?;
    info!("Backend API at {}", client.base_url());

    // --- 3. Build the Shared AppState and Router ---
    let app = build_router(app_state(config.clone(), client));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
