//! Core trait and types for the trip planner.
//!
//! This crate provides the shared interface between the HTTP endpoint, the
//! agent runtime and the tool layer. It defines:
//!
//! - [`Agent`] - The trait every agent runtime implements
//! - [`ChatMessage`] / [`Conversation`] - The chat history exchanged with agents
//! - [`AgentError`] - Error types for agent operations
//! - [`ToolExecutor`] - Trait for executing the tools an agent calls
//!
//! # Example
//!
//! ```rust
//! use trip_core::{Agent, AgentError, ChatMessage, Conversation};
//! use async_trait::async_trait;
//!
//! struct HelloAgent;
//!
//! #[async_trait]
//! impl Agent for HelloAgent {
//!     async fn invoke(&self, conversation: Conversation) -> Result<Conversation, AgentError> {
//!         Ok(conversation.with_reply("Hello!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "HelloAgent"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod tools;
mod trait_def;

pub use error::AgentError;
pub use message::{ChatMessage, Conversation, Role};
pub use prompt::{hash_prompt, SYSTEM_PROMPT};
pub use tools::{
    FunctionDefinition, ToolDefinition, ToolExecutor, ToolRequest, ToolResult, ERROR_PREFIX,
};
pub use trait_def::Agent;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
