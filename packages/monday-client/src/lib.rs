//! Pure monday.com GraphQL API client.
//!
//! A minimal read-only client for pulling job postings off a single
//! monday.com board. Issues one fixed GraphQL query per call, then filters
//! and reshapes the returned rows into [`JobRecord`]s according to a
//! caller-supplied column mapping.
//!
//! # Example
//!
//! ```rust,ignore
//! use monday_client::{BoardConfig, MondayClient};
//!
//! let client = MondayClient::new();
//! let config = BoardConfig {
//!     token: "your-api-token".into(),
//!     board_id: "9491628586".into(),
//!     ..BoardConfig::default()
//! };
//!
//! let jobs = client.fetch_jobs(&config).await?;
//! for job in &jobs {
//!     println!("{} ({})", job.name, job.location);
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod types;

pub use error::{MondayError, Result};
pub use types::{BoardConfig, ColumnMap, JobRecord, RawColumnValue, RawItem};

use std::time::Duration;

use types::QueryResponse;

const API_URL: &str = "https://api.monday.com/v2";

/// Upper bound on one outbound call; there is no retry, a timeout surfaces
/// immediately as [`MondayError::Transport`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Default)]
pub struct MondayClient {
    client: reqwest::Client,
}

impl MondayClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the board and normalize its rows into job records.
    ///
    /// An absent board or an empty item list is a normal state and returns
    /// `Ok(vec![])`, distinct from every error variant. Row order from the
    /// API is preserved.
    pub async fn fetch_jobs(&self, config: &BoardConfig) -> Result<Vec<JobRecord>> {
        if config.token.is_empty() || config.board_id.is_empty() {
            return Err(MondayError::ConfigMissing);
        }

        let query = build_query(&config.board_id, config.limit);
        tracing::info!(
            board_id = %config.board_id,
            limit = config.limit,
            "Fetching jobs from monday board"
        );

        let resp = self
            .client
            .post(API_URL)
            .header("Authorization", &config.token)
            .json(&serde_json::json!({ "query": query }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let raw = resp.text().await?;

        let items = parse_items(status, &raw)?;
        let jobs = normalize::normalize_items(items, &config.columns);
        tracing::info!(count = jobs.len(), "Fetched open jobs");

        Ok(jobs)
    }
}

/// Render the fixed query template. `value` is requested alongside `text`
/// so Link columns can be resolved to real URLs.
fn build_query(board_id: &str, limit: u32) -> String {
    format!(
        "{{ boards(ids: {board_id}) {{ items_page(limit: {limit}) {{ items {{ id name column_values {{ id text value }} }} }} }} }}"
    )
}

/// Classify a raw HTTP response into either the board's rows or one of the
/// closed error variants. Pure, so the whole taxonomy is testable without a
/// live endpoint.
fn parse_items(status: u16, raw: &str) -> Result<Vec<RawItem>> {
    if status != 200 {
        return Err(MondayError::HttpStatus {
            status,
            body: raw.to_string(),
        });
    }

    let body: QueryResponse = serde_json::from_str(raw).map_err(|_| MondayError::InvalidJson {
        raw: raw.to_string(),
    })?;

    if let Some(errors) = body.graphql_errors() {
        return Err(MondayError::GraphQL {
            errors: errors.clone(),
        });
    }

    let items = body
        .data
        .and_then(|d| d.boards.into_iter().next())
        .and_then(|b| b.items_page)
        .map(|p| p.items)
        .unwrap_or_default();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_token_fails_without_network() {
        let client = MondayClient::new();
        let config = BoardConfig {
            board_id: "123".into(),
            ..BoardConfig::default()
        };

        let err = client.fetch_jobs(&config).await.unwrap_err();
        assert!(matches!(err, MondayError::ConfigMissing));
    }

    #[tokio::test]
    async fn empty_board_id_fails_without_network() {
        let client = MondayClient::new();
        let config = BoardConfig {
            token: "token".into(),
            ..BoardConfig::default()
        };

        let err = client.fetch_jobs(&config).await.unwrap_err();
        assert!(matches!(err, MondayError::ConfigMissing));
    }

    #[test]
    fn query_follows_template() {
        let q = build_query("9491628586", 25);
        assert_eq!(
            q,
            "{ boards(ids: 9491628586) { items_page(limit: 25) { items { id name column_values { id text value } } } } }"
        );
    }

    #[test]
    fn non_200_maps_to_http_status() {
        let err = parse_items(401, "unauthorized").unwrap_err();
        match err {
            MondayError::HttpStatus { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn garbage_body_maps_to_invalid_json() {
        let err = parse_items(200, "<html>oops</html>").unwrap_err();
        match err {
            MondayError::InvalidJson { raw } => assert_eq!(raw, "<html>oops</html>"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn graphql_errors_carried_verbatim() {
        let raw = r#"{"errors":[{"message":"Not authorized"}],"data":null}"#;
        let err = parse_items(200, raw).unwrap_err();
        match err {
            MondayError::GraphQL { errors } => {
                assert_eq!(errors[0]["message"], "Not authorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_errors_array_is_not_an_error() {
        let raw = r#"{"errors":[],"data":{"boards":[]}}"#;
        assert!(parse_items(200, raw).unwrap().is_empty());
    }

    #[test]
    fn missing_board_yields_empty_list() {
        assert!(parse_items(200, r#"{"data":{"boards":[]}}"#).unwrap().is_empty());
        assert!(parse_items(200, r#"{"data":{}}"#).unwrap().is_empty());
        assert!(parse_items(200, r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn items_parse_with_nullable_cells() {
        let raw = r#"{
            "data": {
                "boards": [{
                    "items_page": {
                        "items": [{
                            "id": "1",
                            "name": "Engineer",
                            "column_values": [
                                {"id": "status", "text": "Open", "value": null},
                                {"id": "link", "text": null, "value": "{\"url\":\"https://x.test/1\"}"}
                            ]
                        }]
                    }
                }]
            }
        }"#;

        let items = parse_items(200, raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Engineer");
        assert_eq!(items[0].column_values[0].text.as_deref(), Some("Open"));
        assert!(items[0].column_values[0].value.is_none());
    }
}
