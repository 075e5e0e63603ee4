//! Provider error types

use thiserror::Error;

/// Errors raised by the host-facing layer
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid attribute {key}: {message}")]
    InvalidAttribute { key: String, message: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
