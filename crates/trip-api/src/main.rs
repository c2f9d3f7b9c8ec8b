//! Trip planner HTTP server.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trip_api::{app, build_agent, ApiConfig, AppState};
use trip_core::Agent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ApiConfig::from_env()?;
    info!(addr = %config.addr, agent = ?config.agent, "Starting trip planner API");

    // Configuration failures leave the server up, answering queries with 503
    let state = match build_agent(config.agent) {
        Ok(agent) => {
            info!(agent = agent.name(), "Agent ready");
            AppState::new(agent)
        }
        Err(err) => {
            error!(error = %err, "Failed to build agent");
            AppState::unconfigured()
        }
    };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Trip planner API listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
