//! The contract between an agent runtime and the tools it may call.
//!
//! The runtime offers [`ToolDefinition`]s to the model. Each call the model
//! makes comes back as a [`ToolRequest`] and is handed to a
//! [`ToolExecutor`], which always answers with a [`ToolResult`]. A failed
//! tool is text starting with [`ERROR_PREFIX`]; the loop keeps going.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Prefix of every failed tool result.
pub const ERROR_PREFIX: &str = "Error: ";

/// What a tool call produced, addressed to the call that asked for it.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub tool_call_id: String,
    /// Text handed back to the model.
    pub content: String,
    pub success: bool,
}

impl ToolResult {
    pub fn success(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
            success: true,
        }
    }

    /// A failure, rendered as `Error: <message>`.
    pub fn error(tool_call_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            content: format!("{}{}", ERROR_PREFIX, message.into()),
            success: false,
        }
    }
}

/// One tool call requested by the model.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub id: String,
    pub name: String,
    pub arguments: HashMap<String, Value>,
}

impl ToolRequest {
    /// Build a request from a call whose arguments arrive as JSON text.
    ///
    /// Blank text (sent by some providers for parameterless tools) means
    /// no arguments.
    pub fn from_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments_json: &str,
    ) -> Result<Self, serde_json::Error> {
        let arguments = match arguments_json.trim() {
            "" => HashMap::new(),
            text => serde_json::from_str(text)?,
        };

        Ok(Self {
            id: id.into(),
            name: name.into(),
            arguments,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }

    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required parameter: {}", key))
    }
}

/// A callable function as advertised in a chat-completions `tools` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

/// Name, description and JSON Schema parameters of a function tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: Some(description.into()),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Runs the tools an agent calls.
///
/// ```ignore
/// use trip_core::{async_trait, ToolDefinition, ToolExecutor, ToolRequest, ToolResult};
///
/// struct Shout;
///
/// #[async_trait]
/// impl ToolExecutor for Shout {
///     async fn execute(&self, request: ToolRequest) -> ToolResult {
///         match request.require_string("text") {
///             Ok(text) => ToolResult::success(&request.id, text.to_uppercase()),
///             Err(e) => ToolResult::error(&request.id, e),
///         }
///     }
///
///     fn definitions(&self) -> Vec<ToolDefinition> {
///         vec![ToolDefinition::function("shout", "Upper-case text", serde_json::json!({}))]
///     }
/// }
/// ```
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Run one call. Failures are reported in the result, never raised.
    async fn execute(&self, request: ToolRequest) -> ToolResult;

    /// Every tool this executor will run.
    fn definitions(&self) -> Vec<ToolDefinition>;

    fn supported_tools(&self) -> Vec<String> {
        self.definitions()
            .into_iter()
            .map(|def| def.function.name)
            .collect()
    }
}
