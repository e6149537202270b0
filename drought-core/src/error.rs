/// Error types for the drought dashboard core library
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the prediction dataset.
///
/// Every variant is recoverable: callers log it and continue with an empty
/// dataset (or the built-in fallback index) instead of aborting.
#[derive(Error, Debug)]
pub enum LoadError {
    /// HTTP transport failed (unreachable host, timeout, broken body)
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Bad response status {status} for {url}")]
    BadStatus { status: u16, url: String },

    /// Reading a local dataset file failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not JSON, or not an array of prediction objects
    #[error("Failed to decode prediction data: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL sources need the `api` feature
    #[error("Fetching {0} requires the `api` feature")]
    Unsupported(String),
}

/// Failure to load or validate a [`DashboardConfig`](crate::config::DashboardConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Failure to parse a `YYYY-M` period string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("Expected a period of the form YYYY-M, got {0:?}")]
    Malformed(String),

    #[error("Month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
}

/// Type alias for Results using LoadError
pub type Result<T> = std::result::Result<T, LoadError>;
