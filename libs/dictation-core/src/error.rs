//! Error types for dictation-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a level file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid question id {id} in level {level}")]
    InvalidId { level: String, id: i64 },

    #[error("duplicate question id {id} in level {level}")]
    DuplicateId { level: String, id: i64 },

    #[error("question {id} belongs to level {found}, expected {expected}")]
    LevelMismatch {
        id: i64,
        expected: String,
        found: String,
    },
}

/// Errors raised when validating checker thresholds.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}
