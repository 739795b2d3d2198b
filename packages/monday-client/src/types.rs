use serde::{Deserialize, Serialize};

/// Everything needed to read one board: credentials, the board itself, and
/// how its columns map onto job fields.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Personal API token, sent as the `Authorization` header verbatim.
    pub token: String,
    /// Numeric board id, stringified.
    pub board_id: String,
    /// Max items requested per fetch (single page, no cursor following).
    pub limit: u32,
    pub columns: ColumnMap,
    /// TTL for the cached result set, in minutes.
    pub cache_minutes: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            board_id: String::new(),
            limit: 25,
            columns: ColumnMap::default(),
            cache_minutes: 30,
        }
    }
}

/// Column-id mapping from the board onto job fields. Every entry is
/// optional; an unset (or empty-string) entry simply never matches, so
/// boards can map as few fields as they like.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub location: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub apply: Option<String>,
    pub status: Option<String>,
}

impl ColumnMap {
    /// True when `mapped` is configured, non-empty, and equal to `id`.
    pub(crate) fn is(mapped: &Option<String>, id: &str) -> bool {
        matches!(mapped.as_deref(), Some(m) if !m.is_empty() && m == id)
    }
}

/// One normalized job posting, as consumed by the rendering side.
///
/// All fields default to the empty string; records are built fresh on every
/// fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Raw date text as monday reports it (usually `YYYY-MM-DD`); display
    /// formatting is the renderer's problem.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub apply_url: String,
}

/// One cell of a board row. `text` is the display text; `value` is the raw
/// JSON-encoded payload whose shape varies by column type (Link columns keep
/// the real URL here).
#[derive(Debug, Clone, Deserialize)]
pub struct RawColumnValue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// One board row as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub column_values: Vec<RawColumnValue>,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl QueryResponse {
    /// GraphQL errors are only meaningful when the array is non-empty; a
    /// present-but-empty array counts as success.
    pub fn graphql_errors(&self) -> Option<&serde_json::Value> {
        match &self.errors {
            Some(errors) if errors.as_array().map_or(true, |a| !a.is_empty()) => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseData {
    #[serde(default)]
    pub boards: Vec<BoardNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardNode {
    #[serde(default)]
    pub items_page: Option<ItemsPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsPage {
    #[serde(default)]
    pub items: Vec<RawItem>,
}
