//! Error types for truthguard.

use thiserror::Error;

/// Result type alias using truthguard's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for truthguard operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid input (empty text, malformed URL)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream URL fetch failed (unreachable, timeout, not HTML)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Search provider failed (quota, network, parsing)
    #[error("Search error: {0}")]
    Search(String),

    /// Sentiment/heuristic analysis failed
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Fetch(e.to_string())
    }
}
