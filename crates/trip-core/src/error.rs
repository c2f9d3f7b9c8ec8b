//! Error types for agent operations.

use thiserror::Error;

/// Errors that can occur while an agent processes a conversation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent could not be configured (e.g. missing credential).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The model provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The model provider answered, but the answer was unusable.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The conversation handed to the agent cannot be processed.
    #[error("invalid conversation: {0}")]
    InvalidConversation(String),

    /// The agent is temporarily unavailable.
    #[error("agent unavailable: {0}")]
    Unavailable(String),
}
