use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

use monday_client::{BoardConfig, ColumnMap};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Board credentials, column mapping, and cache TTL.
    pub board: BoardConfig,
    pub display: DisplayOptions,
    /// Token guarding the debug view and the cache flush endpoint. When
    /// unset, both stay disabled.
    pub admin_token: Option<String>,
}

/// Presentation knobs for the embed. None of these affect what gets
/// fetched or cached.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// chrono strftime format for the posting date.
    pub date_format: String,
    /// Word cap for descriptions; 0 hides them entirely.
    pub desc_words: usize,
    pub apply_label: String,
    pub empty_text: String,
    pub show_count: bool,
    /// Emit JobPosting JSON-LD alongside the list.
    pub enable_schema: bool,
    /// hiringOrganization name for the JSON-LD output.
    pub org_name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let board_id: String = env::var("MONDAY_BOARD_ID")
            .context("MONDAY_BOARD_ID must be set")?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let board = BoardConfig {
            token: env::var("MONDAY_TOKEN").context("MONDAY_TOKEN must be set")?,
            board_id,
            limit: parsed_or("MONDAY_LIMIT", 25)?.max(1),
            columns: ColumnMap {
                location: env::var("MONDAY_COL_LOCATION").ok(),
                date: env::var("MONDAY_COL_DATE").ok(),
                description: env::var("MONDAY_COL_DESCRIPTION").ok(),
                apply: env::var("MONDAY_COL_APPLY").ok(),
                status: env::var("MONDAY_COL_STATUS").ok(),
            },
            cache_minutes: parsed_or("CACHE_MINUTES", 30)?.max(1),
        };

        let display = DisplayOptions {
            date_format: env::var("DATE_FORMAT").unwrap_or_else(|_| "%b %d, %Y".to_string()),
            desc_words: parsed_or("DESC_WORDS", 40)?,
            apply_label: env::var("APPLY_LABEL").unwrap_or_else(|_| "Apply".to_string()),
            empty_text: env::var("EMPTY_TEXT")
                .unwrap_or_else(|_| "No openings at this time.".to_string()),
            show_count: flag("SHOW_COUNT"),
            enable_schema: flag("ENABLE_SCHEMA"),
            org_name: env::var("ORG_NAME").unwrap_or_default(),
        };

        Ok(Self {
            port: parsed_or("PORT", 8080)?,
            board,
            display,
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
        })
    }
}

/// Parse an optional env var, failing loudly on malformed values rather
/// than silently falling back.
fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be a valid number")),
        Err(_) => Ok(default),
    }
}

fn flag(key: &str) -> bool {
    matches!(
        env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("yes") | Ok("on")
    )
}
