//! Error types for the proximity crate.

use thiserror::Error;

/// Result type alias for proximity operations.
pub type Result<T> = std::result::Result<T, ProximityError>;

/// Errors that can occur configuring or persisting the engine.
///
/// Evaluation itself never fails; bad samples take the no-op rejection path.
#[derive(Debug, Error)]
pub enum ProximityError {
    /// Configuration with impossible radii or cooldown
    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    /// Snapshot that cannot be decoded
    #[error("Invalid engine snapshot: {0}")]
    InvalidSnapshot(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
