//! Error types for export.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while filling a document template.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Template placeholder '{{{0}}}' has no matching key in the aggregated data")]
    MissingKey(String),

    #[error("Unbalanced '{brace}' at byte {position} in template")]
    UnbalancedBrace { brace: char, position: usize },
}

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Missing required field: feature_name")]
    MissingFeatureName,

    #[error(
        "Document failed quality gate after {attempts} attempts. \
         Final score: {maturity_score}/10. Failures: {}",
        .failure_reasons.join("; ")
    )]
    QualityGate {
        attempts: u32,
        maturity_score: f64,
        failure_reasons: Vec<String>,
    },

    #[error("Invalid export configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Fix cycle failed: {0}")]
    FixCycle(String),

    #[error("Template error: {0}")]
    Render(#[from] RenderError),

    #[error("Schema error: {0}")]
    Schema(#[from] deepspec_schema::SchemaError),

    #[error("Quality error: {0}")]
    Quality(#[from] deepspec_quality::QualityError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
