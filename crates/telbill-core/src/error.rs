//! Error types for the telbill-core library.
//!
//! Structural problems in the bill text itself are never errors: a missing
//! landmark yields an empty field and a malformed row is skipped. Only
//! failures outside the text transform surface here.

use thiserror::Error;

/// Main error type for the telbill library.
#[derive(Error, Debug)]
pub enum BillError {
    /// The payload handed to the pipeline is not usable text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the telbill library.
pub type Result<T> = std::result::Result<T, BillError>;
