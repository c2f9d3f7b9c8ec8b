//! Tool-calling travel planner agent.
//!
//! This crate provides the agent runtime behind the trip planner. It talks
//! to any OpenAI-compatible chat completions endpoint (Google Gemini, Groq
//! or OpenAI) and lets the model call travel tools before it answers.
//!
//! # Features
//!
//! - Provider selection with Google to Groq fallback
//! - Per-provider model names from `config/config.toml`
//! - Bounded tool-calling loop over any [`ToolExecutor`]
//! - Mermaid description of the reasoning loop
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use planner_agent::{Agent, ChatMessage, Conversation, PlannerAgent};
//! use travel_tools::{default_registry, RegistryToolExecutor, ToolsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = default_registry(&ToolsConfig::from_env()?)?;
//!     let agent = PlannerAgent::from_env(Arc::new(RegistryToolExecutor::new(registry)))?;
//!
//!     let question = Conversation::from(vec![ChatMessage::user("Weather in Goa?")]);
//!     let answer = agent.invoke(question).await?;
//!     println!("{}", answer.last().map(|m| m.content.as_str()).unwrap_or_default());
//!     Ok(())
//! }
//! ```

mod agent;
mod api_types;
mod config;

pub use agent::PlannerAgent;
pub use config::{
    resolve_provider, LlmSettings, ModelProvider, PlannerConfig, PlannerConfigBuilder,
    ProviderSettings, DEFAULT_LLM_CONFIG, DEFAULT_MAX_TOOL_ROUNDS,
};

// Re-export trip-core types for convenience
pub use trip_core::{
    async_trait, Agent, AgentError, ChatMessage, Conversation, Role, ToolDefinition,
    ToolExecutor, ToolRequest, ToolResult,
};
