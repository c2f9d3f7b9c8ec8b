//! Mock agent implementations for the trip planner.
//!
//! This crate provides mock implementations of the `Agent` trait for testing:
//! - `EchoAgent` - Echoes the latest user message back
//! - `ScriptedAgent` - Replies with canned answers in order
//! - `FailingAgent` - Always fails with a chosen error
//!
//! For real planning, use the `planner-agent` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_agent::{Agent, ChatMessage, Conversation, EchoAgent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_agent::AgentError> {
//!     let agent = EchoAgent::new();
//!
//!     let conversation = Conversation::from(vec![ChatMessage::user("Hello!")]);
//!
//!     let answer = agent.invoke(conversation).await?;
//!     println!("Response: {}", answer.last().unwrap().content);
//!     Ok(())
//! }
//! ```

mod echo;
mod failing;
mod scripted;

// Re-export trip-core types for convenience
pub use trip_core::{async_trait, Agent, AgentError, ChatMessage, Conversation, Role};

pub use echo::EchoAgent;
pub use failing::{FailingAgent, FailureKind};
pub use scripted::ScriptedAgent;
