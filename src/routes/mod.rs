// src/routes/mod.rs
pub mod chat;

use anyhow::Context;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{config::Config, state::SharedState};

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// Only `allowed_origin` may call in. Methods and headers are mirrored back because
/// credentialed CORS rejects the `*` wildcard.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("invalid CORS origin: {allowed_origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Router with state and CORS applied, ready to serve.
pub fn build_app(state: SharedState, config: &Config) -> anyhow::Result<Router> {
    Ok(create_router()
        .with_state(state)
        .layer(cors_layer(&config.allowed_origin)?))
}
