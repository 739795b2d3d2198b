//! Mapping from raw board rows to normalized [`JobRecord`]s.
//!
//! This is a pure function of (rows, column mapping) with no network or
//! clock involvement, which is what makes the filtering rules testable in
//! isolation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{ColumnMap, JobRecord, RawColumnValue, RawItem};

lazy_static! {
    /// Splits free text like "Engineering - https://x.test/apply" on `-`
    /// separators (whitespace around the dash included).
    static ref SEGMENT_SPLIT: Regex = Regex::new(r"\s*-\s*").expect("valid regex");
    static ref URL_PATTERN: Regex = Regex::new(r"(?i)https?://\S+").expect("valid regex");
}

/// Normalize raw board rows into job records.
///
/// Only rows with a non-empty name whose mapped status column's text trims
/// and lowercases to exactly `"open"` survive. Original API order is
/// preserved. When a column id appears twice on one row the later value
/// wins; upstream is expected to keep ids unique per row, so this is a
/// tiebreak, not a contract.
pub fn normalize_items(items: Vec<RawItem>, columns: &ColumnMap) -> Vec<JobRecord> {
    let mut jobs = Vec::new();

    for item in items {
        let mut record = JobRecord {
            id: item.id,
            name: item.name,
            location: String::new(),
            date: String::new(),
            description: String::new(),
            apply_url: String::new(),
        };
        let mut status_text = String::new();

        for cv in &item.column_values {
            if cv.id.is_empty() {
                continue;
            }

            if ColumnMap::is(&columns.status, &cv.id) {
                status_text = cv.text.as_deref().unwrap_or("").trim().to_lowercase();
            }
            if ColumnMap::is(&columns.location, &cv.id) {
                record.location = cv.text.clone().unwrap_or_default();
            }
            if ColumnMap::is(&columns.date, &cv.id) {
                record.date = cv.text.clone().unwrap_or_default();
            }
            if ColumnMap::is(&columns.description, &cv.id) {
                record.description = cv.text.clone().unwrap_or_default();
            }
            if ColumnMap::is(&columns.apply, &cv.id) {
                if let Some(url) = extract_apply_url(cv) {
                    record.apply_url = url;
                }
            }
        }

        if !record.name.is_empty() && status_text == "open" {
            jobs.push(record);
        }
    }

    jobs
}

/// Pull an apply URL out of a column value.
///
/// Link columns keep the real URL inside the JSON `value` payload, either as
/// a top-level `url` or as the first element of an array of links. Text
/// columns fall back to scanning the last `-`-separated segment of the
/// display text for an `http(s)://` match.
fn extract_apply_url(cv: &RawColumnValue) -> Option<String> {
    if let Some(raw) = cv.value.as_deref().filter(|v| !v.is_empty()) {
        if let Ok(val) = serde_json::from_str::<serde_json::Value>(raw) {
            if let Some(url) = val
                .get("url")
                .and_then(|u| u.as_str())
                .filter(|u| !u.is_empty())
            {
                return Some(url.to_string());
            }
            if let Some(url) = val
                .get(0)
                .and_then(|first| first.get("url"))
                .and_then(|u| u.as_str())
                .filter(|u| !u.is_empty())
            {
                return Some(url.to_string());
            }
        }
    }

    let text = cv.text.as_deref().unwrap_or("");
    if !text.is_empty() {
        let last = SEGMENT_SPLIT.split(text).last().unwrap_or("").trim();
        if let Some(m) = URL_PATTERN.find(last) {
            return Some(m.as_str().to_string());
        }
    }

    None
}
