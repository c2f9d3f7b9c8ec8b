//! Conversation endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use trip_core::{ChatMessage, Conversation};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Body of `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Full conversation so far, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// Answer to a query.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// Run the agent over the posted conversation and return its reply.
pub async fn query(
    State(state): State<AppState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    if payload.messages.is_empty() {
        return Err(ApiError::InvalidRequest(
            "messages must contain at least one message".to_string(),
        ));
    }

    let agent = state
        .agent
        .ok_or_else(|| ApiError::Unavailable("No agent is configured".to_string()))?;

    info!(
        agent = agent.name(),
        messages = payload.messages.len(),
        "Received query"
    );

    let conversation = agent.invoke(Conversation::from(payload.messages)).await?;
    let answer = conversation
        .last()
        .map(|message| message.content.clone())
        .unwrap_or_default();

    info!(chars = answer.len(), "Answered query");
    Ok(Json(QueryResponse { answer }))
}
