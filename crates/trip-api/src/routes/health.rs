//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub agent: Option<String>,
    pub ready: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let (agent, ready) = match &state.agent {
        Some(agent) => (Some(agent.name().to_string()), agent.is_ready().await),
        None => (None, false),
    };

    Json(Health {
        status: "ok".to_string(),
        agent,
        ready,
    })
}
