//! HTTP endpoint for the trip planner.
//!
//! Serves the chat page and forwards conversations to an [`Agent`]:
//!
//! - `POST /query` - answer a conversation, `{"messages": [...]}` in, `{"answer"}` out
//! - `GET /health` - liveness plus the serving agent's name
//! - `GET /graph` - Mermaid flowchart of the agent's reasoning loop
//! - `GET /` - browser chat page

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use mock_agent::EchoAgent;
use planner_agent::PlannerAgent;
use travel_tools::{default_registry, RegistryToolExecutor, ToolsConfig};
use trip_core::Agent;

pub use config::{AgentKind, ApiConfig, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Build the application with all routes and the given state.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}

/// Build the agent selected by configuration.
///
/// The planner gets every travel tool through a registry executor.
pub fn build_agent(kind: AgentKind) -> Result<Arc<dyn Agent>, Box<dyn std::error::Error>> {
    match kind {
        AgentKind::Echo => Ok(Arc::new(EchoAgent::with_prefix("Echo: "))),
        AgentKind::Planner => {
            let tools_config = ToolsConfig::from_env()?;
            let registry = default_registry(&tools_config)?;
            let executor = RegistryToolExecutor::new(registry);
            let agent = PlannerAgent::from_env(Arc::new(executor))?;
            Ok(Arc::new(agent))
        }
    }
}
