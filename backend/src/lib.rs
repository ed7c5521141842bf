//! HTTP server aggregating remote ICS calendar feeds into a unified JSON
//! response and a server-rendered board page.
//!
//! Two entry points share the aggregation pipeline: `GET /` renders the
//! board, `GET /api/calendars` returns the raw JSON array. Configuration is
//! resolved per request, an optional shared token gates the page, and every
//! configured feed is fetched concurrently with per-feed failures degraded
//! to empty event lists.

pub mod aggregator;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ConfigSource;

/// Shared request state: where configuration is loaded from, plus one HTTP
/// client reused across requests. Both halves are immutable; cloning is
/// cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigSource,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ConfigSource) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Capture the process environment into a state usable for the lifetime
    /// of the server.
    pub fn from_env() -> Self {
        Self::new(ConfigSource::from_env())
    }
}

/// Build the application router with tracing and CORS applied.
pub fn create_app(state: AppState) -> Router {
    routes::app_routes()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state)
}

/// Build the CORS layer from CORS_ALLOWED_ORIGINS.
///
/// When the variable is unset or contains no parseable origin the layer is
/// permissive, which suits a single-operator deployment.
fn build_cors_layer() -> CorsLayer {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGINS") else {
        return CorsLayer::permissive();
    };

    let origins: Vec<_> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        tracing::info!("CORS configured for origins: {:?}", origins);
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}
