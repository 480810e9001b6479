//! Application handlers served behind the enforcer.
//!
//! `/` is public, `/ssl` and `/sslEcho` are SSL-only in the default
//! configuration. The handlers themselves know nothing about TLS.

use std::collections::BTreeMap;

use axum::{
    extract::Form,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

/// Routes of the demo application.
pub fn app_routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ssl", get(ssl_page))
        .route("/sslEcho", post(ssl_echo))
}

async fn index() -> impl IntoResponse {
    "Hello over any transport."
}

async fn ssl_page() -> impl IntoResponse {
    "Hello over HTTPS."
}

/// Echo a submitted form back as JSON.
async fn ssl_echo(Form(fields): Form<BTreeMap<String, String>>) -> Json<BTreeMap<String, String>> {
    tracing::debug!(fields = fields.len(), "Echoing form");
    Json(fields)
}
