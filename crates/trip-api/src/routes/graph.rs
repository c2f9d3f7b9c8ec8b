//! Agent topology endpoint.

use axum::extract::State;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Mermaid flowchart of the agent's reasoning loop.
pub async fn graph(State(state): State<AppState>) -> Result<String> {
    state
        .agent
        .as_ref()
        .and_then(|agent| agent.topology())
        .ok_or_else(|| ApiError::NotFound("Agent has no topology to describe".to_string()))
}
