//! Exposes a [`ToolRegistry`] to agent runtimes as a [`ToolExecutor`].

use std::sync::Arc;

use tracing::warn;
use trip_core::{ToolDefinition, ToolExecutor, ToolRequest, ToolResult};

use crate::ToolRegistry;

/// Runs registry tools on behalf of an agent.
///
/// Nothing escapes as an error: unknown tools, bad arguments and upstream
/// failures all come back as `Error: ...` results.
pub struct RegistryToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl RegistryToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

#[async_trait::async_trait]
impl ToolExecutor for RegistryToolExecutor {
    async fn execute(&self, request: ToolRequest) -> ToolResult {
        let id = request.id;
        let name = request.name;

        match self.registry.execute(&name, request.arguments).await {
            Ok(output) => ToolResult::success(id, output.content),
            Err(e) => {
                warn!("Tool '{}' failed: {}", name, e);
                ToolResult::error(id, e.to_string())
            }
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::tool::{object_schema, Tool, ToolArgs, ToolOutput};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records how often a rate was looked up.
    struct RateLookup {
        lookups: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for RateLookup {
        fn name(&self) -> &str {
            "get_exchange_rate"
        }

        fn description(&self) -> &str {
            "Fixed USD to EUR rate"
        }

        fn parameters(&self) -> Value {
            object_schema(&[("from_currency", "string", "Source currency")])
        }

        async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
            let from = args.get_string("from_currency")?;
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(ToolOutput::success(format!("1 {} = 0.8500 EUR", from)))
        }
    }

    struct BrokenUpstream;

    #[async_trait]
    impl Tool for BrokenUpstream {
        fn name(&self) -> &str {
            "search_hotels"
        }

        fn description(&self) -> &str {
            "Upstream always fails"
        }

        fn parameters(&self) -> Value {
            object_schema(&[])
        }

        async fn execute(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
            Err(ToolError::ExecutionFailed("upstream exploded".to_string()))
        }
    }

    fn call(name: &str, arguments: Value) -> ToolRequest {
        let arguments: HashMap<String, Value> = serde_json::from_value(arguments).unwrap();
        ToolRequest {
            id: "call_7".to_string(),
            name: name.to_string(),
            arguments,
        }
    }

    fn travel_registry(lookups: Arc<AtomicUsize>) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(RateLookup { lookups });
        registry.register(BrokenUpstream);
        registry
    }

    #[tokio::test]
    async fn test_success_keeps_call_id() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let executor = RegistryToolExecutor::new(travel_registry(lookups.clone()));

        let result = executor
            .execute(call("get_exchange_rate", json!({"from_currency": "USD"})))
            .await;
        assert!(result.success);
        assert_eq!(result.tool_call_id, "call_7");
        assert_eq!(result.content, "1 USD = 0.8500 EUR");
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_become_error_text() {
        let executor = RegistryToolExecutor::new(travel_registry(Arc::new(AtomicUsize::new(0))));

        let result = executor.execute(call("search_hotels", json!({}))).await;
        assert!(!result.success);
        assert_eq!(result.content, "Error: Execution failed: upstream exploded");

        let result = executor.execute(call("book_flight", json!({}))).await;
        assert_eq!(result.content, "Error: Tool not found: book_flight");

        let result = executor.execute(call("get_exchange_rate", json!({}))).await;
        assert!(!result.success);
        assert!(result.content.starts_with("Error: "));
        assert!(result.content.contains("from_currency"));
    }

    #[tokio::test]
    async fn test_definitions_follow_registry() {
        let executor = RegistryToolExecutor::new(travel_registry(Arc::new(AtomicUsize::new(0))));

        assert_eq!(
            executor.supported_tools(),
            vec!["get_exchange_rate".to_string(), "search_hotels".to_string()]
        );
        assert_eq!(executor.registry().len(), 2);
    }
}
