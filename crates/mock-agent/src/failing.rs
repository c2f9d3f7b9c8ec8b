//! Failing agent implementation - always returns an error.

use trip_core::{async_trait, Agent, AgentError, Conversation};

/// Which [`AgentError`] variant a [`FailingAgent`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Network,
    ProcessingFailed,
    Unavailable,
}

/// An agent whose every invocation fails.
///
/// Useful for testing how callers map agent errors.
#[derive(Debug, Clone)]
pub struct FailingAgent {
    kind: FailureKind,
    message: String,
}

impl FailingAgent {
    /// Create a new FailingAgent with the given error kind and message.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An agent that fails as if the model provider were unreachable.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Network, message)
    }

    fn error(&self) -> AgentError {
        let message = self.message.clone();
        match self.kind {
            FailureKind::Configuration => AgentError::Configuration(message),
            FailureKind::Network => AgentError::Network(message),
            FailureKind::ProcessingFailed => AgentError::ProcessingFailed(message),
            FailureKind::Unavailable => AgentError::Unavailable(message),
        }
    }
}

#[async_trait]
impl Agent for FailingAgent {
    async fn invoke(&self, _conversation: Conversation) -> Result<Conversation, AgentError> {
        Err(self.error())
    }

    fn name(&self) -> &str {
        "FailingAgent"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
