//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use jobs_cache::JobCache;
use monday_client::MondayClient;

use crate::config::Config;
use crate::server::routes::{flush_handler, health_handler, jobs_handler, jobs_json_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<JobCache<MondayClient>>,
}

pub fn build_app(config: Config) -> Router {
    let cache = Arc::new(JobCache::new(MondayClient::new()));
    let state = AppState {
        config: Arc::new(config),
        cache,
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/jobs", get(jobs_handler))
        .route("/jobs.json", get(jobs_json_handler))
        .route("/cache/flush", post(flush_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
