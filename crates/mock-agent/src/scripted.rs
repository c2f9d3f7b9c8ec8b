//! Scripted agent implementation - replies with canned answers in order.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use trip_core::{async_trait, Agent, AgentError, Conversation};

/// An agent that answers with a fixed sequence of replies.
///
/// Each invocation consumes the next reply. Once the script runs out the
/// agent reports itself unavailable.
pub struct ScriptedAgent {
    replies: Mutex<VecDeque<String>>,
    topology: Option<String>,
    delay: Duration,
}

impl ScriptedAgent {
    /// Create a new ScriptedAgent with the given replies.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            topology: None,
            delay: Duration::ZERO,
        }
    }

    /// Describe a topology for this agent.
    pub fn with_topology(mut self, topology: impl Into<String>) -> Self {
        self.topology = Some(topology.into());
        self
    }

    /// Wait before each reply, simulating model latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of replies left in the script.
    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    async fn invoke(&self, conversation: Conversation) -> Result<Conversation, AgentError> {
        if conversation.is_empty() {
            return Err(AgentError::InvalidConversation(
                "conversation has no messages".to_string(),
            ));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| AgentError::Unavailable("script exhausted".to_string()))?;

        Ok(conversation.with_reply(reply))
    }

    fn name(&self) -> &str {
        "ScriptedAgent"
    }

    fn topology(&self) -> Option<String> {
        self.topology.clone()
    }

    async fn is_ready(&self) -> bool {
        !self.replies.lock().await.is_empty()
    }
}
