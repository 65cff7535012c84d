//! CLI command definitions.
//!
//! Each subcommand maps to one stage of the DeepSpec quality pipeline.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deepspec_export::PipelineConfig;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

pub mod export;
pub mod score;
pub mod validate;

/// DeepSpec - quality gates for AI-generated design documents
#[derive(Parser)]
#[command(name = "deepspec")]
#[command(version, about = "DeepSpec - quality gates for AI-generated design documents")]
#[command(long_about = r#"
DeepSpec scores System Design Documents produced by multi-agent pipelines,
validates hierarchical stress-test results, and publishes documents only
when they pass the quality gate.

COMMANDS:
  score     → Score a document against the quality gate
  validate  → Validate a hierarchical workflow result
  export    → Render, gate and publish a design document

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation or quality gate failure
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a design document against the quality gate
    Score(score::ScoreArgs),

    /// Validate a hierarchical workflow result
    Validate(validate::ValidateArgs),

    /// Render, gate and publish a design document
    Export(export::ExportArgs),
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A gate or validation check failed. Maps to exit code 3.
#[derive(Debug, Error)]
#[error("{0} failed validation")]
pub struct GateFailure(pub String);

/// Load pipeline configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            PipelineConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))
        }
        None => Ok(PipelineConfig::default()),
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {:?}", path);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parses_export() {
        let cli = Cli::try_parse_from([
            "deepspec",
            "export",
            "--data",
            "data.json",
            "--template",
            "sdd.md",
            "--format",
            "json",
            "--no-enforce",
            "--max-retries",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.data, PathBuf::from("data.json"));
                assert!(args.no_enforce);
                assert_eq!(args.max_retries, Some(5));
                assert_eq!(args.format, Some(export::DocumentFormat::Json));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from([
            "deepspec", "score", "--content", "a.md", "--extracted", "b.json", "--format", "xml",
        ])
        .is_err());
    }

    #[test]
    fn test_export_rejects_unknown_document_format() {
        let err = Cli::try_parse_from([
            "deepspec", "export", "--data", "d.json", "--template", "t.md", "--format", "pdf",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_read_json_missing_file() {
        let err = read_json::<Value>(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deepspec.yaml");
        fs::write(&path, "export:\n  max_retries: 4\n").unwrap();

        assert_eq!(load_config(Some(&path)).unwrap().export.max_retries, 4);
    }
}
