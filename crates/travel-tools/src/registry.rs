//! Name-indexed collection of travel tools.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};
use trip_core::ToolDefinition;

use crate::error::ToolError;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Tools by name, in the order they were registered.
///
/// That order is the order definitions are offered to the model.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A later tool with the same name replaces the earlier one.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_shared(Arc::new(tool));
    }

    pub fn register_shared(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!("Tool '{}' registered twice, keeping the latest", name);
        } else {
            debug!("Registered tool '{}'", name);
        }
    }

    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition::function(tool.name(), tool.description(), tool.parameters()))
            .collect()
    }

    /// Run the named tool.
    pub async fn execute(
        &self,
        name: &str,
        params: HashMap<String, Value>,
    ) -> Result<ToolOutput, ToolError> {
        let Some(tool) = self.tools.get(name) else {
            return Err(ToolError::NotFound(name.to_string()));
        };

        info!("Running tool '{}' ({} argument(s))", name, params.len());
        let output = tool.execute(ToolArgs::new(params)).await?;
        debug!("Tool '{}' finished: {} chars", name, output.content.len());

        Ok(output)
    }

    /// Run the named tool with arguments given as JSON text.
    pub async fn execute_json(&self, name: &str, args_json: &str) -> Result<ToolOutput, ToolError> {
        self.execute(name, parse_arguments(args_json)?).await
    }
}

/// Blank text is an empty argument object.
fn parse_arguments(args_json: &str) -> Result<HashMap<String, Value>, ToolError> {
    match args_json.trim() {
        "" => Ok(HashMap::new()),
        text => Ok(serde_json::from_str(text)?),
    }
}
