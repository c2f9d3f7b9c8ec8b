//! Echo agent implementation - echoes the latest user message back.

use trip_core::{async_trait, Agent, AgentError, Conversation};

/// A simple agent that echoes the latest user message.
///
/// Useful for testing the request flow without any model calls.
#[derive(Debug, Clone, Default)]
pub struct EchoAgent {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoAgent {
    /// Create a new EchoAgent with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoAgent with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_agent::EchoAgent;
    ///
    /// let agent = EchoAgent::with_prefix("Echo: ");
    /// // Will respond with "Echo: <latest user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Agent for EchoAgent {
    async fn invoke(&self, conversation: Conversation) -> Result<Conversation, AgentError> {
        let text = conversation
            .last_user_text()
            .ok_or_else(|| AgentError::InvalidConversation("no user message".to_string()))?
            .to_string();

        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text,
        };

        Ok(conversation.with_reply(reply))
    }

    fn name(&self) -> &str {
        "EchoAgent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_core::{ChatMessage, Role};

    #[tokio::test]
    async fn test_echo_no_prefix() {
        let agent = EchoAgent::new();
        let input = Conversation::from(vec![ChatMessage::user("Hello!")]);

        let output = agent.invoke(input).await.unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.last().unwrap().role, Role::Assistant);
        assert_eq!(output.last().unwrap().content, "Hello!");
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let agent = EchoAgent::with_prefix("Echo: ");
        let input = Conversation::from(vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("ok"),
            ChatMessage::user("second"),
        ]);

        let output = agent.invoke(input).await.unwrap();
        assert_eq!(output.last().unwrap().content, "Echo: second");
    }

    #[tokio::test]
    async fn test_echo_empty_conversation() {
        let agent = EchoAgent::new();
        let result = agent.invoke(Conversation::new()).await;
        assert!(matches!(result, Err(AgentError::InvalidConversation(_))));
    }

    #[tokio::test]
    async fn test_agent_name_and_ready() {
        let agent = EchoAgent::new();
        assert_eq!(agent.name(), "EchoAgent");
        assert!(agent.is_ready().await);
        assert!(agent.topology().is_none());
    }
}
