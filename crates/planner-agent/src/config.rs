//! Configuration for PlannerAgent.

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};
use trip_core::{AgentError, SYSTEM_PROMPT};

/// Default location of the LLM settings file.
pub const DEFAULT_LLM_CONFIG: &str = "config/config.toml";

/// Default upper bound on tool-calling rounds per invocation.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// LLM vendor behind the OpenAI-compatible chat completions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelProvider {
    #[default]
    Google,
    Groq,
    OpenAi,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Groq => "groq",
            Self::OpenAi => "openai",
        }
    }

    /// Base URL of the provider's OpenAI-compatible endpoint.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Self::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::Google => "GOOGLE_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Model used when the settings file does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Google => "gemini-1.5-flash",
            Self::Groq => "llama3-8b-8192",
            Self::OpenAi => "gpt-4o-mini",
        }
    }
}

impl FromStr for ModelProvider {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "groq" => Ok(Self::Groq),
            "openai" => Ok(Self::OpenAi),
            other => Err(AgentError::Configuration(format!(
                "Unsupported model provider: {}",
                other
            ))),
        }
    }
}

/// Per-provider entry of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    /// Informational provider label.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    /// Override for the provider's base URL.
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProviderTable {
    #[serde(default)]
    google: Option<ProviderSettings>,
    #[serde(default)]
    groq: Option<ProviderSettings>,
    #[serde(default)]
    openai: Option<ProviderSettings>,
}

/// Contents of the LLM settings file.
///
/// ```toml
/// [llm.google]
/// provider = "google"
/// model_name = "gemini-1.5-flash"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    llm: ProviderTable,
}

impl LlmSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, AgentError> {
        toml::from_str(text)
            .map_err(|e| AgentError::Configuration(format!("Invalid LLM settings: {}", e)))
    }

    /// Load settings from a file. A missing file yields the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loaded LLM settings from {}", path.display());
                Self::from_toml_str(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No LLM settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(AgentError::Configuration(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn provider(&self, provider: ModelProvider) -> Option<&ProviderSettings> {
        match provider {
            ModelProvider::Google => self.llm.google.as_ref(),
            ModelProvider::Groq => self.llm.groq.as_ref(),
            ModelProvider::OpenAi => self.llm.openai.as_ref(),
        }
    }

    /// Model name for a provider.
    pub fn model_for(&self, provider: ModelProvider) -> String {
        self.provider(provider)
            .and_then(|p| p.model_name.clone())
            .unwrap_or_else(|| provider.default_model().to_string())
    }

    /// Base URL for a provider.
    pub fn api_url_for(&self, provider: ModelProvider) -> String {
        self.provider(provider)
            .and_then(|p| p.api_url.clone())
            .unwrap_or_else(|| provider.default_api_url().to_string())
    }
}

/// Pick the provider that will actually serve requests and its key.
///
/// Google without a key falls back to Groq; any other missing key is a
/// configuration error.
pub fn resolve_provider(
    requested: ModelProvider,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(ModelProvider, String), AgentError> {
    let key_for = |provider: ModelProvider| {
        lookup(provider.api_key_var()).filter(|key| !key.trim().is_empty())
    };

    if let Some(key) = key_for(requested) {
        return Ok((requested, key));
    }

    if requested == ModelProvider::Google {
        warn!("GOOGLE_API_KEY not set, falling back to Groq");
        return key_for(ModelProvider::Groq)
            .map(|key| (ModelProvider::Groq, key))
            .ok_or_else(|| {
                AgentError::Configuration(
                    "Neither GOOGLE_API_KEY nor GROQ_API_KEY is set".to_string(),
                )
            });
    }

    Err(AgentError::Configuration(format!(
        "{} not set",
        requested.api_key_var()
    )))
}

/// Configuration for PlannerAgent.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Provider serving requests (after fallback).
    pub provider: ModelProvider,

    /// Base URL; `/chat/completions` is appended.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// System prompt prepended to every conversation.
    pub system_prompt: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Tool-calling rounds before a final answer is forced.
    pub max_tool_rounds: usize,

    /// Timeout for each chat completion request.
    pub request_timeout: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let provider = ModelProvider::default();
        Self {
            provider,
            api_url: provider.default_api_url().to_string(),
            api_key: String::new(),
            model: provider.default_model().to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: None,
            temperature: Some(0.7),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl PlannerConfig {
    /// Create configuration from environment variables.
    ///
    /// Provider selection:
    /// - `TRIP_MODEL_PROVIDER` - `google` (default), `groq` or `openai`
    /// - `GOOGLE_API_KEY` / `GROQ_API_KEY` / `OPENAI_API_KEY` - provider keys
    /// - `TRIP_LLM_CONFIG` - settings file (default: config/config.toml)
    ///
    /// Optional overrides:
    /// - `TRIP_LLM_API_URL` - Base URL of the chat completions API
    /// - `TRIP_MAX_TOOL_ROUNDS` - Tool rounds per invocation (default: 8)
    /// - `TRIP_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `TRIP_PROMPT_FILE` - Path to a system prompt file
    /// - `TRIP_TEMPERATURE` - Temperature (default: 0.7)
    /// - `TRIP_MAX_TOKENS` - Max tokens (default: provider default)
    pub fn from_env() -> Result<Self, AgentError> {
        let requested = match env::var("TRIP_MODEL_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => ModelProvider::default(),
        };

        let settings_path =
            env::var("TRIP_LLM_CONFIG").unwrap_or_else(|_| DEFAULT_LLM_CONFIG.to_string());
        let settings = LlmSettings::load(&settings_path)?;

        let (provider, api_key) = resolve_provider(requested, |var| env::var(var).ok())?;

        let defaults = Self::default();

        let api_url = env::var("TRIP_LLM_API_URL").unwrap_or_else(|_| settings.api_url_for(provider));

        // System prompt: env var takes precedence, then the prompt file
        let system_prompt = env::var("TRIP_SYSTEM_PROMPT")
            .ok()
            .or_else(|| env::var("TRIP_PROMPT_FILE").ok().and_then(load_prompt_file))
            .unwrap_or(defaults.system_prompt);

        let max_tool_rounds = env::var("TRIP_MAX_TOOL_ROUNDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_tool_rounds);

        let temperature = env::var("TRIP_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let max_tokens = env::var("TRIP_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            provider,
            api_url,
            api_key,
            model: settings.model_for(provider),
            system_prompt,
            max_tokens,
            temperature,
            max_tool_rounds,
            request_timeout: defaults.request_timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> PlannerConfigBuilder {
        PlannerConfigBuilder::default()
    }
}

/// Builder for PlannerConfig.
#[derive(Debug, Default)]
pub struct PlannerConfigBuilder {
    config: PlannerConfig,
}

impl PlannerConfigBuilder {
    /// Set the provider, resetting URL and model to its defaults.
    pub fn provider(mut self, provider: ModelProvider) -> Self {
        self.config.provider = provider;
        self.config.api_url = provider.default_api_url().to_string();
        self.config.model = provider.default_model().to_string();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the maximum tool-calling rounds.
    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.config.max_tool_rounds = rounds;
        self
    }

    /// Set the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PlannerConfig {
        self.config
    }

    /// Load system prompt from a file.
    ///
    /// If the file exists and is non-empty, sets the system prompt.
    pub fn load_prompt_file(mut self, path: impl AsRef<Path>) -> Self {
        if let Some(prompt) = load_prompt_file(path) {
            self.config.system_prompt = prompt;
        }
        self
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let content = std::fs::read_to_string(path.as_ref()).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn keys(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.provider, ModelProvider::Google);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert!(config.api_key.is_empty());
        assert_eq!(config.system_prompt, SYSTEM_PROMPT);
        assert_eq!(config.max_tool_rounds, 8);
        assert_eq!(config.temperature, Some(0.7));
    }

    #[test]
    fn test_builder_all_options() {
        let config = PlannerConfig::builder()
            .provider(ModelProvider::OpenAi)
            .api_key("my-key")
            .api_url("http://localhost:8080/v1")
            .model("gpt-4o")
            .system_prompt("You plan trips")
            .max_tokens(512)
            .temperature(0.2)
            .max_tool_rounds(3)
            .request_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.provider, ModelProvider::OpenAi);
        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.system_prompt, "You plan trips");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_tool_rounds, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("Google".parse::<ModelProvider>().unwrap(), ModelProvider::Google);
        assert_eq!("openai".parse::<ModelProvider>().unwrap(), ModelProvider::OpenAi);
        assert!(matches!(
            "anthropic".parse::<ModelProvider>(),
            Err(AgentError::Configuration(_))
        ));
    }

    #[test]
    fn test_resolve_provider_fallback() {
        let (provider, key) =
            resolve_provider(ModelProvider::Google, keys(&[("GOOGLE_API_KEY", "g")])).unwrap();
        assert_eq!((provider, key.as_str()), (ModelProvider::Google, "g"));

        let (provider, key) =
            resolve_provider(ModelProvider::Google, keys(&[("GROQ_API_KEY", "q")])).unwrap();
        assert_eq!((provider, key.as_str()), (ModelProvider::Groq, "q"));

        let err = resolve_provider(ModelProvider::Google, keys(&[])).unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));

        // Only Google falls back
        let err = resolve_provider(ModelProvider::OpenAi, keys(&[("GROQ_API_KEY", "q")]))
            .unwrap_err();
        assert!(matches!(err, AgentError::Configuration(ref msg) if msg.contains("OPENAI_API_KEY")));

        let err = resolve_provider(ModelProvider::Groq, keys(&[("GROQ_API_KEY", "  ")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = LlmSettings::from_toml_str(
            r#"
            [llm.groq]
            provider = "groq"
            model_name = "llama-3.1-8b-instant"

            [llm.openai]
            api_url = "http://localhost:11434/v1"
            "#,
        )
        .unwrap();

        assert_eq!(settings.model_for(ModelProvider::Groq), "llama-3.1-8b-instant");
        assert_eq!(settings.model_for(ModelProvider::Google), "gemini-1.5-flash");
        assert_eq!(settings.model_for(ModelProvider::OpenAi), "gpt-4o-mini");
        assert_eq!(
            settings.api_url_for(ModelProvider::OpenAi),
            "http://localhost:11434/v1"
        );
        assert_eq!(
            settings.api_url_for(ModelProvider::Groq),
            "https://api.groq.com/openai/v1"
        );

        assert!(LlmSettings::from_toml_str("[llm.google\n").is_err());
    }

    #[test]
    fn test_settings_missing_file() {
        let settings = LlmSettings::load("/nonexistent/trip/config.toml").unwrap();
        assert_eq!(settings.model_for(ModelProvider::Google), "gemini-1.5-flash");
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_vars() {
            for var in [
                "TRIP_MODEL_PROVIDER",
                "TRIP_LLM_CONFIG",
                "TRIP_LLM_API_URL",
                "TRIP_MAX_TOOL_ROUNDS",
                "TRIP_SYSTEM_PROMPT",
                "TRIP_PROMPT_FILE",
                "TRIP_TEMPERATURE",
                "TRIP_MAX_TOKENS",
                "GOOGLE_API_KEY",
                "GROQ_API_KEY",
                "OPENAI_API_KEY",
            ] {
                std::env::remove_var(var);
            }
            std::env::set_var("TRIP_LLM_CONFIG", "/nonexistent/trip/config.toml");
        }

        // Scenario 1: no keys at all
        clear_all_vars();
        assert!(matches!(
            PlannerConfig::from_env(),
            Err(AgentError::Configuration(_))
        ));

        // Scenario 2: Google requested, only Groq available
        clear_all_vars();
        std::env::set_var("GROQ_API_KEY", "groq-key");
        let config = PlannerConfig::from_env().unwrap();
        assert_eq!(config.provider, ModelProvider::Groq);
        assert_eq!(config.api_key, "groq-key");
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.api_url, "https://api.groq.com/openai/v1");

        // Scenario 3: explicit provider and overrides
        clear_all_vars();
        std::env::set_var("TRIP_MODEL_PROVIDER", "openai");
        std::env::set_var("OPENAI_API_KEY", "openai-key");
        std::env::set_var("TRIP_LLM_API_URL", "http://localhost:9000/v1");
        std::env::set_var("TRIP_MAX_TOOL_ROUNDS", "3");
        std::env::set_var("TRIP_SYSTEM_PROMPT", "Test prompt");
        std::env::set_var("TRIP_TEMPERATURE", "0.1");
        std::env::set_var("TRIP_MAX_TOKENS", "256");
        let config = PlannerConfig::from_env().unwrap();
        assert_eq!(config.provider, ModelProvider::OpenAi);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_url, "http://localhost:9000/v1");
        assert_eq!(config.max_tool_rounds, 3);
        assert_eq!(config.system_prompt, "Test prompt");
        assert_eq!(config.temperature, Some(0.1));
        assert_eq!(config.max_tokens, Some(256));

        // Scenario 4: unknown provider
        clear_all_vars();
        std::env::set_var("TRIP_MODEL_PROVIDER", "llamacorp");
        std::env::set_var("GOOGLE_API_KEY", "g");
        assert!(PlannerConfig::from_env().is_err());

        clear_all_vars();
        std::env::remove_var("TRIP_LLM_CONFIG");
    }
}
