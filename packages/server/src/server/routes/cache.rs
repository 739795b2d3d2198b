use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
};

use crate::config::Config;
use crate::server::app::AppState;

/// Explicit cache invalidation, e.g. right after editing the board.
///
/// Requires the admin token; the next embed request is guaranteed to hit
/// the monday API.
pub async fn flush_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> StatusCode {
    if !is_authorized(&state.config, &headers) {
        return StatusCode::UNAUTHORIZED;
    }

    state.cache.invalidate().await;
    StatusCode::NO_CONTENT
}

/// Admin requests carry the configured token in `X-Admin-Token`. With no
/// token configured, nothing is privileged.
pub(crate) fn is_authorized(config: &Config, headers: &HeaderMap) -> bool {
    match &config.admin_token {
        Some(token) => {
            headers.get("x-admin-token").and_then(|v| v.to_str().ok()) == Some(token.as_str())
        }
        None => false,
    }
}
