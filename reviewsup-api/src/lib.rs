//! reviewsup-api library - testimonial collection and showcase backend
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use crate::config::ServiceConfig;
pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::embed_verifier::{CssQuery, EmbedVerifier};
use crate::services::renderer_client::RendererClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service configuration
    pub config: Arc<ServiceConfig>,
    /// Embedding verifier (headless renderer + markup query)
    pub verifier: Arc<EmbedVerifier>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: ServiceConfig) -> anyhow::Result<Self> {
        let renderer = RendererClient::new(&config.renderer_url, config.renderer_timeout_secs)?;
        let verifier = EmbedVerifier::new(renderer, Arc::new(CssQuery), &config.app_url);

        Ok(Self {
            db,
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
///
/// Widgets embedded on third-party origins fetch the public composed view
/// cross-origin, hence the permissive CORS layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::showcase_routes())
        .merge(api::review_routes())
        .merge(api::user_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
