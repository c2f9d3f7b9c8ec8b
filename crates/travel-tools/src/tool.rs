//! The `Tool` trait and the argument/output types tools exchange.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Arguments of one tool call, as decoded from the model's JSON.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    pub params: HashMap<String, Value>,
}

impl ToolArgs {
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self { params }
    }

    fn required(&self, key: &str) -> Result<&Value, ToolError> {
        match self.params.get(key) {
            None | Some(Value::Null) => Err(ToolError::MissingParameter(key.to_string())),
            Some(value) => Ok(value),
        }
    }

    /// Required text argument. Numbers are accepted and rendered as text.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        match self.required(key)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            }),
        }
    }

    /// Required numeric argument. Numeric strings such as `"3"` count.
    pub fn get_f64(&self, key: &str) -> Result<f64, ToolError> {
        let invalid = || ToolError::InvalidParameter {
            name: key.to_string(),
            reason: "expected number".to_string(),
        };

        match self.required(key)? {
            Value::Number(n) => n.as_f64().ok_or_else(invalid),
            Value::String(s) => s.trim().parse().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Get an integer parameter. Whole floats (`3.0`) and numeric strings
    /// are accepted.
    pub fn get_integer(&self, key: &str) -> Result<i64, ToolError> {
        let value = self.get_f64(key)?;
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected integer".to_string(),
            });
        }
        Ok(value as i64)
    }

    /// Get a list parameter given either as a JSON array or as a
    /// comma-separated string. Blank entries are dropped.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>, ToolError> {
        let items: Vec<String> = match self.required(key)? {
            Value::String(s) => s.split(',').map(|item| item.trim().to_string()).collect(),
            Value::Array(values) => values
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .collect(),
            Value::Number(n) => vec![n.to_string()],
            _ => {
                return Err(ToolError::InvalidParameter {
                    name: key.to_string(),
                    reason: "expected comma-separated list".to_string(),
                })
            }
        };

        Ok(items.into_iter().filter(|item| !item.is_empty()).collect())
    }
}

/// Text a tool hands back. Failures travel as [`ToolError`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: String,
}

impl ToolOutput {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A named, described capability the agent can call.
///
/// Implementations return typed errors; the executor turns them into
/// `Error: ...` text before the agent sees them.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls the tool by.
    fn name(&self) -> &str;

    /// Natural-language description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema of the tool's arguments.
    fn parameters(&self) -> Value;

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}

/// Build an object schema where every listed property is required.
///
/// Each entry is `(name, json type, description)`.
pub fn object_schema(properties: &[(&str, &str, &str)]) -> Value {
    let mut props = serde_json::Map::new();
    for (name, kind, description) in properties {
        props.insert(
            name.to_string(),
            serde_json::json!({"type": kind, "description": description}),
        );
    }
    let required: Vec<&str> = properties.iter().map(|(name, _, _)| *name).collect();

    serde_json::json!({
        "type": "object",
        "properties": Value::Object(props),
        "required": required,
    })
}
