//! The Agent trait definition.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Conversation;

/// A trait for agent runtimes that answer a conversation.
///
/// Implementations range from scripted test doubles to a full LLM loop
/// that calls tools. This trait is object-safe and can be used with
/// `Arc<dyn Agent>`.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Answer the conversation.
    ///
    /// # Returns
    ///
    /// The input conversation with the agent's assistant reply appended as
    /// the last message, or an error if processing failed.
    async fn invoke(&self, conversation: Conversation) -> Result<Conversation, AgentError>;

    /// Get a human-readable name for this agent implementation.
    fn name(&self) -> &str;

    /// Describe the agent's reasoning topology as a Mermaid flowchart.
    ///
    /// Default implementation has nothing to describe.
    fn topology(&self) -> Option<String> {
        None
    }

    /// Check if the agent is ready to process conversations.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
