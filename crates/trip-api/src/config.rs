//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Which agent runtime answers queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgentKind {
    /// Tool-calling LLM planner.
    #[default]
    Planner,
    /// Echoes the latest user message; needs no credentials.
    Echo,
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planner" => Ok(Self::Planner),
            "echo" => Ok(Self::Echo),
            other => Err(ConfigError::InvalidAgent(other.to_string())),
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Agent runtime to serve.
    pub agent: AgentKind,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TRIP_API_ADDR` | Server bind address | `127.0.0.1:8000` |
    /// | `TRIP_AGENT` | `planner` or `echo` | `planner` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("TRIP_API_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let agent = match env::var("TRIP_AGENT") {
            Ok(value) => value.parse()?,
            Err(_) => AgentKind::default(),
        };

        Ok(Self { addr, agent })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TRIP_API_ADDR format")]
    InvalidAddr,

    #[error("Unknown TRIP_AGENT '{0}', expected planner or echo")]
    InvalidAgent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_kind_parse() {
        assert_eq!("planner".parse::<AgentKind>().unwrap(), AgentKind::Planner);
        assert_eq!(" ECHO ".parse::<AgentKind>().unwrap(), AgentKind::Echo);
        assert!(matches!(
            "graph".parse::<AgentKind>(),
            Err(ConfigError::InvalidAgent(ref name)) if name == "graph"
        ));
    }

    #[test]
    fn test_default_addr_parses() {
        let addr: SocketAddr = DEFAULT_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 8000);
    }
}
