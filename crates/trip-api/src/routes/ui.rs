//! Chat page.

use axum::response::Html;

const CHAT_PAGE: &str = include_str!("../../static/index.html");

/// Serve the browser chat page.
pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}
