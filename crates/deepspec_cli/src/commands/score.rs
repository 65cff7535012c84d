//! Score command - Run the quality gate over a design document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deepspec_quality::validate_quality_gate;
use deepspec_schema::ExtractedData;
use serde_json::{json, Value};
use tracing::info;

use super::{load_config, read_json, read_text, GateFailure, OutputFormat};

#[derive(Args)]
pub struct ScoreArgs {
    /// Markdown document to score
    #[arg(short, long)]
    content: PathBuf,

    /// Aggregated or extracted data as JSON
    #[arg(short, long)]
    extracted: PathBuf,

    /// Pipeline configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn execute(args: ScoreArgs) -> Result<()> {
    info!("Scoring document: {:?}", args.content);

    let config = load_config(args.config.as_deref())?;
    let content = read_text(&args.content)?;
    let value: Value = read_json(&args.extracted)?;
    let extracted = ExtractedData::from_aggregated(&value)
        .with_context(|| format!("Invalid extracted data in {:?}", args.extracted))?;

    let report = validate_quality_gate(&content, &extracted).context("Failed to score document")?;
    let passed = report.passed_with(&config.quality);

    match args.format {
        OutputFormat::Json => {
            let output = json!({
                "report": report,
                "passed_quality_gate": passed,
                "failure_reasons": report.failure_reasons_with(&config.quality),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", report.summary(&config.quality));
        }
    }

    if passed {
        Ok(())
    } else {
        Err(GateFailure(format!("{}", args.content.display())).into())
    }
}
