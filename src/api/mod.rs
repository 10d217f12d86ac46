//! Critique gateway API.
//!
//! Endpoints:
//! - GET /api/health - Health check
//! - POST /api/analyze - Critique a base64 image or data URI
//! - OPTIONS * - CORS preflight, answered by the CORS layer

mod handlers;
mod types;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::{Config, ConfigError, CorsConfig};
use crate::error::CriticError;
use crate::upstream::{ChatCompletions, UpstreamClient};

pub use handlers::{analyze, health_check};
pub use types::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn ChatCompletions>,
    pub model: String,
}

impl AppState {
    pub fn new(upstream: Arc<dyn ChatCompletions>, model: impl Into<String>) -> Self {
        Self {
            upstream,
            model: model.into(),
        }
    }

    /// Build the one upstream client the whole process shares.
    pub fn from_config(config: &Config) -> Result<Self, CriticError> {
        let client = UpstreamClient::from_config(&config.upstream)?;
        Ok(Self::new(Arc::new(client), config.upstream.model.clone()))
    }
}

/// CORS policy applied to every route.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, ConfigError> {
    let origin = config.origin_header()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_ALLOW_METHODS,
        ])
        .expose_headers([
            header::CONTENT_LENGTH,
            HeaderName::from_static("x-kuma-revision"),
        ])
        .max_age(config.max_age())
        .allow_credentials(true))
}

/// Images arrive inline as base64, so the body cap is off unless configured.
fn body_limit(max_body_bytes: Option<usize>) -> DefaultBodyLimit {
    match max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    }
}

/// Create the API router with custom state.
pub fn create_router(state: AppState, config: &Config) -> Result<Router, ConfigError> {
    let cors = cors_layer(&config.cors)?;

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Ok(Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/analyze", post(handlers::analyze))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(cors)
                .layer(body_limit(config.gateway.max_body_bytes)),
        ))
}
