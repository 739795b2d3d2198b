use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::Html,
    Json,
};
use serde::Deserialize;

use monday_client::JobRecord;

use crate::render;
use crate::server::app::AppState;
use crate::server::routes::cache::is_authorized;

#[derive(Deserialize)]
pub struct JobsQuery {
    /// Present (any value) to request the privileged debug dump; only
    /// honored alongside a valid admin token.
    debug: Option<String>,
}

/// The embeddable jobs list as an HTML fragment.
///
/// Normal visitors see one of three states: the list, the configured
/// "no openings" text, or a generic failure message. Admins passing
/// `?debug=1` with the admin token additionally get a raw dump of the
/// result, error detail included.
pub async fn jobs_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(query): Query<JobsQuery>,
) -> Html<String> {
    let config = &state.config;
    let result = state.cache.get_jobs(&config.board).await;

    let mut html = String::new();
    if query.debug.is_some() && is_authorized(config, &headers) {
        let dump = match &result {
            Ok(jobs) => format!("Jobs count: {}\n\n{jobs:#?}", jobs.len()),
            Err(err) => format!("Error: {err}\n\n{err:#?}"),
        };
        html.push_str(&render::render_debug(&dump));
    }

    match result {
        Ok(jobs) if jobs.is_empty() => html.push_str(&render::render_empty(&config.display)),
        Ok(jobs) => html.push_str(&render::render_jobs_html(&jobs, &config.display)),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load jobs for embed");
            html.push_str(&render::render_error());
        }
    }

    Html(html)
}

/// The normalized records as JSON, for programmatic embeds.
pub async fn jobs_json_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<JobRecord>>, (StatusCode, Json<serde_json::Value>)> {
    match state.cache.get_jobs(&state.config.board).await {
        Ok(jobs) => Ok(Json(jobs)),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load jobs for JSON view");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "unable to load jobs" })),
            ))
        }
    }
}
