//! Application state shared across handlers.

use std::sync::Arc;

use trip_core::Agent;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    /// The agent answering queries, absent when it failed to configure.
    pub agent: Option<Arc<dyn Agent>>,
}

impl AppState {
    /// Create state serving the given agent.
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent: Some(agent) }
    }

    /// Create state without an agent; queries answer 503.
    pub fn unconfigured() -> Self {
        Self::default()
    }
}
