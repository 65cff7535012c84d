//! Error types for the schema module.

use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised at the data-construction boundary.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Malformed field '{field}': {message}")]
    Malformed { field: String, message: String },

    #[error("Expected {expected} for '{field}', found {found}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Schema validation failed: {0}")]
    ValidationFailed(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
