use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    cache: CacheHealth,
}

#[derive(Serialize)]
pub struct CacheHealth {
    state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    jobs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

/// Health check endpoint
///
/// Reports liveness plus the cache slot state. A cold cache is healthy —
/// it just means the next embed request pays for the fetch.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    let cache = match state.cache.snapshot().await {
        Some(snapshot) => CacheHealth {
            state: "warm".to_string(),
            jobs: Some(snapshot.jobs),
            expires_at: Some(snapshot.expires_at),
        },
        None => CacheHealth {
            state: "cold".to_string(),
            jobs: None,
            expires_at: None,
        },
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        cache,
    })
}
