//! Error types for the smoke test
//!
//! Only conditions that abort the run outright live here. A checkpoint
//! that answers with the wrong status is reported through
//! [`crate::scenario::Failure`] instead.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke test
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // === Record Errors ===
    #[error("Record year {year} cannot be advanced without overflowing")]
    YearOutOfRange { year: i64 },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a decode error for a response body from `url`
    pub fn decode(url: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            source,
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
