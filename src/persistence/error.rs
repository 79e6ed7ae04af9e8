//! Error types for portfolio storage backends.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Update of a record that does not exist
    #[error("portfolio not found: {0}")]
    Missing(String),

    /// Backend specific failure
    #[error("{0}")]
    Backend(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
