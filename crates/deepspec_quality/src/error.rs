//! Error types for the quality module.

use thiserror::Error;

/// Result type alias for quality operations.
pub type QualityResult<T> = Result<T, QualityError>;

/// Errors that can occur while building quality reports.
#[derive(Error, Debug)]
pub enum QualityError {
    #[error("Invalid quality report: {field} = {value} violates {constraint}")]
    InvalidReport {
        field: &'static str,
        value: f64,
        constraint: &'static str,
    },

    #[error("Schema error: {0}")]
    Schema(#[from] deepspec_schema::SchemaError),
}
