//! Error types for the catalog crate.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A document snapshot that is not an array of records
    #[error("Invalid catalog snapshot: {0}")]
    InvalidSnapshot(String),

    /// A review that fails submission rules
    #[error("Invalid review: {0}")]
    InvalidReview(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
