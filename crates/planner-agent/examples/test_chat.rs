//! Ask the travel planner a single question with all tools enabled.
//!
//! Run with: cargo run -p planner-agent --example test_chat
//! Or with a custom question: cargo run -p planner-agent --example test_chat -- "Plan 3 days in Goa"
//!
//! Make sure to set environment variables in .env:
//!   GOOGLE_API_KEY or GROQ_API_KEY - model provider credentials
//!   OPENWEATHERMAP_API_KEY - optional, mock weather is used without it

use std::env;
use std::sync::Arc;

use planner_agent::{Agent, ChatMessage, Conversation, PlannerAgent};
use travel_tools::{default_registry, RegistryToolExecutor, ToolsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planner_agent=debug,travel_tools=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let question = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "What's the weather in Paris, and what is 250 USD in EUR?".to_string()
    };

    let tools_config = ToolsConfig::from_env()?;
    let registry = default_registry(&tools_config)?;
    let executor = RegistryToolExecutor::new(registry);

    println!("Initializing PlannerAgent...");
    let agent = PlannerAgent::from_env(Arc::new(executor))?;

    println!("Agent initialized: {}", agent.name());
    println!("Provider: {}", agent.config().provider.as_str());
    println!("API URL: {}", agent.config().api_url);
    println!("Model: {}", agent.config().model);
    println!("Max tool rounds: {}", agent.config().max_tool_rounds);
    println!();

    println!("Sending: \"{}\"", question);
    println!("Waiting for response...\n");

    let conversation = Conversation::from(vec![ChatMessage::user(question)]);
    let reply = agent.invoke(conversation).await?;

    println!("=== Response ===");
    if let Some(message) = reply.last() {
        println!("{}", message.content);
    }
    println!("================");

    Ok(())
}
