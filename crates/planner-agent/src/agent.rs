//! PlannerAgent implementation over an OpenAI-compatible chat completions API.

use std::fmt::Write;
use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info, warn};
use trip_core::{
    async_trait, hash_prompt, Agent, AgentError, Conversation, Role, ToolDefinition,
    ToolExecutor, ToolRequest, ToolResult,
};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ToolCall, WireMessage,
};
use crate::config::PlannerConfig;

const EMPTY_REPLY: &str = "I apologize, but I couldn't generate a response.";

/// An agent that lets the model call travel tools before answering.
///
/// Each invocation prepends the system prompt to the conversation, offers
/// the executor's tools to the model and runs every requested call in
/// order. The loop ends at the first reply without tool calls, or after
/// `max_tool_rounds` rounds with one last request that offers no tools.
pub struct PlannerAgent {
    client: Client,
    config: PlannerConfig,
    tools: Arc<dyn ToolExecutor>,
    system_prompt_hash: String,
}

impl PlannerAgent {
    /// Create a new PlannerAgent with the given configuration and tools.
    pub fn new(config: PlannerConfig, tools: Arc<dyn ToolExecutor>) -> Result<Self, AgentError> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::Configuration(format!(
                "{} not set",
                config.provider.api_key_var()
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AgentError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let system_prompt_hash = hash_prompt(&config.system_prompt);
        info!("PlannerAgent system prompt fingerprint: {}", system_prompt_hash);
        info!(
            "PlannerAgent initialized with provider: {}, model: {}, tools: {}",
            config.provider.as_str(),
            config.model,
            tools.supported_tools().len()
        );

        Ok(Self {
            client,
            config,
            tools,
            system_prompt_hash,
        })
    }

    /// Create a PlannerAgent from environment variables.
    ///
    /// See [`PlannerConfig::from_env`] for the variables read.
    pub fn from_env(tools: Arc<dyn ToolExecutor>) -> Result<Self, AgentError> {
        Self::new(PlannerConfig::from_env()?, tools)
    }

    /// Get the configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Get the system prompt fingerprint.
    pub fn system_prompt_hash(&self) -> &str {
        &self.system_prompt_hash
    }

    /// Build the wire messages for a conversation.
    fn build_messages(&self, conversation: &Conversation) -> Vec<WireMessage> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(WireMessage::system(self.config.system_prompt.clone()));

        for msg in conversation.messages() {
            messages.push(match msg.role {
                Role::User => WireMessage::user(msg.content.clone()),
                Role::Assistant => WireMessage::assistant(msg.content.clone()),
            });
        }

        messages
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        messages: &[WireMessage],
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<ChatCompletionResponse, AgentError> {
        let url = format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'));

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            tools,
        };

        debug!(
            "Sending request to {} with {} messages",
            url,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AgentError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(AgentError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }

    /// Run the requested tool calls in order and append their results.
    async fn run_tool_calls(&self, calls: &[ToolCall], messages: &mut Vec<WireMessage>) {
        for call in calls {
            debug!("Model requested tool '{}'", call.function.name);

            let result = match ToolRequest::from_call(
                call.id.as_str(),
                call.function.name.as_str(),
                &call.function.arguments,
            ) {
                Ok(request) => self.tools.execute(request).await,
                Err(e) => {
                    warn!("Invalid arguments for tool '{}': {}", call.function.name, e);
                    ToolResult::error(call.id.as_str(), format!("Invalid tool arguments: {}", e))
                }
            };

            messages.push(WireMessage::tool(call.id.clone(), result.content));
        }
    }
}

/// Text of the first choice, or the stock apology when the model sent none.
fn reply_text(message: WireMessage) -> String {
    match message.content {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("No content in response, using default");
            EMPTY_REPLY.to_string()
        }
    }
}

fn first_message(completion: ChatCompletionResponse) -> Result<WireMessage, AgentError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| AgentError::ProcessingFailed("Response contained no choices".to_string()))
}

#[async_trait]
impl Agent for PlannerAgent {
    async fn invoke(&self, conversation: Conversation) -> Result<Conversation, AgentError> {
        if conversation.is_empty() {
            return Err(AgentError::InvalidConversation(
                "conversation has no messages".to_string(),
            ));
        }

        info!("Planning reply to a conversation of {} messages", conversation.len());

        let mut messages = self.build_messages(&conversation);
        let definitions = self.tools.definitions();
        let tools = (!definitions.is_empty()).then_some(definitions);

        for round in 1..=self.config.max_tool_rounds {
            let completion = self.chat_completion(&messages, tools.clone()).await?;
            let message = first_message(completion)?;

            let calls = message.tool_calls.clone().unwrap_or_default();
            if calls.is_empty() {
                debug!("Answer ready after {} round(s)", round);
                return Ok(conversation.with_reply(reply_text(message)));
            }

            info!("Round {}: executing {} tool call(s)", round, calls.len());
            messages.push(message);
            self.run_tool_calls(&calls, &mut messages).await;
        }

        warn!(
            "Tool round limit ({}) reached, requesting final answer",
            self.config.max_tool_rounds
        );
        let completion = self.chat_completion(&messages, None).await?;
        let message = first_message(completion)?;
        Ok(conversation.with_reply(reply_text(message)))
    }

    fn name(&self) -> &str {
        "PlannerAgent"
    }

    fn topology(&self) -> Option<String> {
        let mut graph = String::from("flowchart TD\n");
        graph.push_str("    start([start]) --> agent[agent]\n");
        graph.push_str("    agent -->|tool calls| tools\n");
        graph.push_str("    tools --> agent\n");
        graph.push_str("    agent -->|answer| finish([end])\n");

        let names = self.tools.supported_tools();
        if names.is_empty() {
            graph.push_str("    tools[[tools]]\n");
        } else {
            let _ = writeln!(graph, "    tools[[\"tools<br/>{}\"]]", names.join("<br/>"));
        }

        Some(graph)
    }

    async fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use trip_core::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    struct AddTool;

    #[async_trait]
    impl ToolExecutor for AddTool {
        async fn execute(&self, request: ToolRequest) -> ToolResult {
            let a = request.arguments.get("a").and_then(Value::as_f64);
            let b = request.arguments.get("b").and_then(Value::as_f64);
            match (a, b) {
                (Some(a), Some(b)) => {
                    ToolResult::success(&request.id, format!("Result: {} + {} = {}", a, b, a + b))
                }
                _ => ToolResult::error(&request.id, "Missing required parameter: a"),
            }
        }

        fn definitions(&self) -> Vec<ToolDefinition> {
            vec![ToolDefinition::function(
                "add_numbers",
                "Add two numbers together",
                json!({"type": "object"}),
            )]
        }
    }

    fn agent_for(server: &MockServer, rounds: usize) -> PlannerAgent {
        let config = PlannerConfig::builder()
            .api_key("test-key")
            .api_url(format!("{}/v1", server.uri()))
            .model("test-model")
            .system_prompt("You plan trips")
            .max_tool_rounds(rounds)
            .build();
        PlannerAgent::new(config, Arc::new(AddTool)).unwrap()
    }

    fn text_reply(text: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    fn tool_call_reply(arguments: &str) -> Value {
        json!({
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "add_numbers", "arguments": arguments}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })
    }

    /// Answers with a tool call until a tool result is present, then with text.
    struct ToolThenAnswer;

    impl Respond for ToolThenAnswer {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
            let tool_result = body["messages"]
                .as_array()
                .and_then(|messages| messages.iter().find(|m| m["role"] == "tool"))
                .and_then(|m| m["content"].as_str())
                .map(str::to_string);

            match tool_result {
                Some(result) => ResponseTemplate::new(200)
                    .set_body_json(text_reply(&format!("The tool said: {}", result))),
                None => ResponseTemplate::new(200)
                    .set_body_json(tool_call_reply(r#"{"a": 2, "b": 3}"#)),
            }
        }
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let config = PlannerConfig::builder().api_key("").build();
        let result = PlannerAgent::new(config, Arc::new(AddTool));
        assert!(matches!(result, Err(AgentError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_direct_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "You plan trips"},
                    {"role": "user", "content": "Hi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Hello, traveller!")))
            .expect(1)
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let input = Conversation::from(vec![ChatMessage::user("Hi")]);
        let output = agent.invoke(input.clone()).await.unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(&output.messages()[..1], input.messages());
        assert_eq!(output.last().unwrap(), &ChatMessage::assistant("Hello, traveller!"));
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ToolThenAnswer)
            .expect(2)
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let output = agent
            .invoke(Conversation::from(vec![ChatMessage::user("What is 2 + 3?")]))
            .await
            .unwrap();

        assert_eq!(
            output.last().unwrap().content,
            "The tool said: Result: 2 + 3 = 5"
        );
    }

    #[tokio::test]
    async fn test_invalid_arguments_reported_to_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(|request: &Request| {
                let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
                let has_tool = body["messages"]
                    .as_array()
                    .map(|m| m.iter().any(|m| m["role"] == "tool"))
                    .unwrap_or(false);
                if has_tool {
                    let content = body["messages"]
                        .as_array()
                        .and_then(|m| m.iter().find(|m| m["role"] == "tool"))
                        .and_then(|m| m["content"].as_str())
                        .unwrap_or_default()
                        .to_string();
                    ResponseTemplate::new(200).set_body_json(text_reply(&content))
                } else {
                    ResponseTemplate::new(200).set_body_json(tool_call_reply("{not json"))
                }
            })
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let output = agent
            .invoke(Conversation::from(vec![ChatMessage::user("add")]))
            .await
            .unwrap();

        assert!(output
            .last()
            .unwrap()
            .content
            .starts_with("Error: Invalid tool arguments"));
    }

    #[tokio::test]
    async fn test_round_limit_forces_final_answer() {
        let server = MockServer::start().await;
        // Requests offering tools always get another tool call
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"tools": [{"type": "function"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(tool_call_reply(r#"{"a": 1, "b": 1}"#)))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Final plan")))
            .expect(1)
            .mount(&server)
            .await;

        let agent = agent_for(&server, 2);
        let output = agent
            .invoke(Conversation::from(vec![ChatMessage::user("loop")]))
            .await
            .unwrap();

        assert_eq!(output.last().unwrap().content, "Final plan");
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API key", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let err = agent
            .invoke(Conversation::from(vec![ChatMessage::user("Hi")]))
            .await
            .unwrap_err();

        match err {
            AgentError::ProcessingFailed(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API key"));
            }
            other => panic!("Expected ProcessingFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_content_uses_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": ""}}]
            })))
            .mount(&server)
            .await;

        let agent = agent_for(&server, 8);
        let output = agent
            .invoke(Conversation::from(vec![ChatMessage::user("Hi")]))
            .await
            .unwrap();
        assert_eq!(output.last().unwrap().content, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_empty_conversation_rejected() {
        let server = MockServer::start().await;
        let agent = agent_for(&server, 8);
        let result = agent.invoke(Conversation::new()).await;
        assert!(matches!(result, Err(AgentError::InvalidConversation(_))));
    }

    #[tokio::test]
    async fn test_topology_names_tools() {
        let server = MockServer::start().await;
        let agent = agent_for(&server, 8);

        let graph = agent.topology().unwrap();
        assert!(graph.starts_with("flowchart TD\n"));
        assert!(graph.contains("agent -->|tool calls| tools"));
        assert!(graph.contains("add_numbers"));
        assert_eq!(agent.name(), "PlannerAgent");
        assert!(agent.is_ready().await);
    }
}
