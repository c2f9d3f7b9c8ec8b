//! Route handlers for the trip planner API.

pub mod graph;
pub mod health;
pub mod query;
pub mod ui;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Chat page
        .route("/", get(ui::chat_page))
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/query", post(query::query))
        .route("/graph", get(graph::graph))
}
