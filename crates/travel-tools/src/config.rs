//! Configuration for the travel data clients.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ToolError;

/// Default exchange-rate endpoint (`/{BASE}` is appended).
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Default Nominatim endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default OpenWeather endpoint.
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

/// User agent sent to upstream services. Nominatim's usage policy requires one.
pub const DEFAULT_USER_AGENT: &str = "TripPlanner/1.0 (travel planning assistant)";

/// What the weather client does when it cannot produce real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherFallback {
    /// Return deterministic mock readings when uncredentialed or offline.
    #[default]
    Mock,
    /// Report the failure.
    Error,
}

impl FromStr for WeatherFallback {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "error" => Ok(Self::Error),
            other => Err(ToolError::Configuration(format!(
                "unknown weather fallback '{}' (expected 'mock' or 'error')",
                other
            ))),
        }
    }
}

/// Settings shared by all travel data clients.
///
/// Built once at startup and handed to each client; clients never read the
/// environment themselves.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Exchange-rate API base URL.
    pub exchange_rate_url: String,

    /// Nominatim search API base URL.
    pub nominatim_url: String,

    /// OpenWeather API base URL.
    pub weather_url: String,

    /// OpenWeather API key. Without one the weather client serves mock data.
    pub weather_api_key: Option<String>,

    /// Fallback behaviour for the weather client.
    pub weather_fallback: WeatherFallback,

    /// Pause after every place search request.
    pub place_search_pause: Duration,

    /// Timeout for every upstream HTTP request.
    pub http_timeout: Duration,

    /// User agent for upstream requests.
    pub user_agent: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            exchange_rate_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            weather_url: DEFAULT_OPENWEATHER_URL.to_string(),
            weather_api_key: None,
            weather_fallback: WeatherFallback::Mock,
            place_search_pause: Duration::from_secs(1),
            http_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ToolsConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `EXCHANGE_RATE_API_URL` - Exchange-rate base URL
    /// - `NOMINATIM_URL` - Place search base URL
    /// - `OPENWEATHER_API_URL` - Weather base URL
    /// - `OPENWEATHERMAP_API_KEY` - Weather API key (mock data when unset)
    /// - `WEATHER_FALLBACK` - `mock` (default) or `error`
    /// - `PLACE_SEARCH_PAUSE_MS` - Pause after each place search (default: 1000)
    /// - `TOOLS_HTTP_TIMEOUT_SECS` - Upstream request timeout (default: 30)
    pub fn from_env() -> Result<Self, ToolError> {
        let defaults = Self::default();

        let weather_api_key = env::var("OPENWEATHERMAP_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let weather_fallback = match env::var("WEATHER_FALLBACK") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.weather_fallback,
        };

        let place_search_pause = env::var("PLACE_SEARCH_PAUSE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.place_search_pause);

        let http_timeout = env::var("TOOLS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Ok(Self {
            exchange_rate_url: env::var("EXCHANGE_RATE_API_URL")
                .unwrap_or(defaults.exchange_rate_url),
            nominatim_url: env::var("NOMINATIM_URL").unwrap_or(defaults.nominatim_url),
            weather_url: env::var("OPENWEATHER_API_URL").unwrap_or(defaults.weather_url),
            weather_api_key,
            weather_fallback,
            place_search_pause,
            http_timeout,
            user_agent: defaults.user_agent,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ToolsConfigBuilder {
        ToolsConfigBuilder::default()
    }

    /// Build an HTTP client with the configured timeout and user agent.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, ToolError> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.http_timeout)
            .build()
            .map_err(|e| ToolError::Configuration(format!("Failed to create HTTP client: {}", e)))
    }
}

/// Builder for ToolsConfig.
#[derive(Debug, Default)]
pub struct ToolsConfigBuilder {
    config: ToolsConfig,
}

impl ToolsConfigBuilder {
    /// Set the exchange-rate base URL.
    pub fn exchange_rate_url(mut self, url: impl Into<String>) -> Self {
        self.config.exchange_rate_url = url.into();
        self
    }

    /// Set the place search base URL.
    pub fn nominatim_url(mut self, url: impl Into<String>) -> Self {
        self.config.nominatim_url = url.into();
        self
    }

    /// Set the weather base URL.
    pub fn weather_url(mut self, url: impl Into<String>) -> Self {
        self.config.weather_url = url.into();
        self
    }

    /// Set the weather API key.
    pub fn weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.weather_api_key = Some(key.into());
        self
    }

    /// Set the weather fallback behaviour.
    pub fn weather_fallback(mut self, fallback: WeatherFallback) -> Self {
        self.config.weather_fallback = fallback;
        self
    }

    /// Set the pause after each place search request.
    pub fn place_search_pause(mut self, pause: Duration) -> Self {
        self.config.place_search_pause = pause;
        self
    }

    /// Set the upstream request timeout.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ToolsConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolsConfig::default();

        assert_eq!(config.exchange_rate_url, DEFAULT_EXCHANGE_RATE_URL);
        assert_eq!(config.nominatim_url, DEFAULT_NOMINATIM_URL);
        assert_eq!(config.weather_url, DEFAULT_OPENWEATHER_URL);
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.weather_fallback, WeatherFallback::Mock);
        assert_eq!(config.place_search_pause, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_all_options() {
        let config = ToolsConfig::builder()
            .exchange_rate_url("http://rates")
            .nominatim_url("http://places")
            .weather_url("http://weather")
            .weather_api_key("key")
            .weather_fallback(WeatherFallback::Error)
            .place_search_pause(Duration::ZERO)
            .http_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.exchange_rate_url, "http://rates");
        assert_eq!(config.nominatim_url, "http://places");
        assert_eq!(config.weather_url, "http://weather");
        assert_eq!(config.weather_api_key.as_deref(), Some("key"));
        assert_eq!(config.weather_fallback, WeatherFallback::Error);
        assert_eq!(config.place_search_pause, Duration::ZERO);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_weather_fallback_parse() {
        assert_eq!("mock".parse::<WeatherFallback>().unwrap(), WeatherFallback::Mock);
        assert_eq!(" ERROR ".parse::<WeatherFallback>().unwrap(), WeatherFallback::Error);
        assert!(matches!(
            "sometimes".parse::<WeatherFallback>(),
            Err(ToolError::Configuration(_))
        ));
    }

    // Environment-based scenarios share one test because env vars are process-global.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_vars() {
            for var in [
                "EXCHANGE_RATE_API_URL",
                "NOMINATIM_URL",
                "OPENWEATHER_API_URL",
                "OPENWEATHERMAP_API_KEY",
                "WEATHER_FALLBACK",
                "PLACE_SEARCH_PAUSE_MS",
                "TOOLS_HTTP_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        clear_vars();
        let config = ToolsConfig::from_env().unwrap();
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.weather_fallback, WeatherFallback::Mock);

        clear_vars();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "weather-key");
        std::env::set_var("WEATHER_FALLBACK", "error");
        std::env::set_var("PLACE_SEARCH_PAUSE_MS", "250");
        std::env::set_var("NOMINATIM_URL", "http://localhost:9999");
        let config = ToolsConfig::from_env().unwrap();
        assert_eq!(config.weather_api_key.as_deref(), Some("weather-key"));
        assert_eq!(config.weather_fallback, WeatherFallback::Error);
        assert_eq!(config.place_search_pause, Duration::from_millis(250));
        assert_eq!(config.nominatim_url, "http://localhost:9999");

        clear_vars();
        std::env::set_var("OPENWEATHERMAP_API_KEY", "  ");
        let config = ToolsConfig::from_env().unwrap();
        assert!(config.weather_api_key.is_none());

        clear_vars();
        std::env::set_var("WEATHER_FALLBACK", "maybe");
        assert!(ToolsConfig::from_env().is_err());

        clear_vars();
    }
}
