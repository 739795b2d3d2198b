//! Error types for the monday.com client.

use thiserror::Error;

/// Result type for monday.com client operations.
pub type Result<T> = std::result::Result<T, MondayError>;

/// monday.com client errors.
///
/// Every failure mode of a fetch maps onto exactly one variant; callers can
/// rely on this set being closed. None of these are retried internally — the
/// caller decides whether to try again.
#[derive(Debug, Error)]
pub enum MondayError {
    /// API token or board id missing; no request was attempted.
    #[error("missing monday API token or board id")]
    ConfigMissing,

    /// Network-level failure reaching the API (DNS, connect, timeout).
    #[error("transport error contacting monday API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-200 status. Carries the raw body for
    /// diagnostics.
    #[error("monday API returned status {status}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("invalid JSON from monday API")]
    InvalidJson { raw: String },

    /// The API reported GraphQL-level errors. Carries the `errors` array
    /// verbatim.
    #[error("monday GraphQL error")]
    GraphQL { errors: serde_json::Value },
}
