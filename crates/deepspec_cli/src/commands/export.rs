//! Export command - Render, gate and publish a design document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use deepspec_export::{AggregatedData, ExportFormat, ExportState};
use serde_json::Value;
use tracing::info;

use super::{load_config, read_json, read_text, OutputFormat};

#[derive(Args)]
pub struct ExportArgs {
    /// Aggregated data JSON (must include feature_name)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Markdown template with {placeholder} fields
    #[arg(short, long)]
    pub template: PathBuf,

    /// Output directory (overrides configuration)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Document format (overrides configuration)
    #[arg(long, value_enum)]
    pub format: Option<DocumentFormat>,

    /// Publish even when the quality gate fails
    #[arg(long)]
    pub no_enforce: bool,

    /// Total validation attempts (overrides configuration)
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Pipeline configuration (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub report: OutputFormat,
}

/// Document format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Md,
    Json,
}

impl From<DocumentFormat> for ExportFormat {
    fn from(format: DocumentFormat) -> Self {
        match format {
            DocumentFormat::Md => Self::Md,
            DocumentFormat::Json => Self::Json,
        }
    }
}

pub async fn execute(args: ExportArgs) -> Result<()> {
    info!("Exporting design document from: {:?}", args.data);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(output) = &args.output {
        config.export.output_dir = output.clone();
    }
    if let Some(format) = args.format {
        config.export.format = format.into();
    }
    if args.no_enforce {
        config.export.enforce_quality_gate = false;
    }
    if let Some(max_retries) = args.max_retries {
        config.export.max_retries = max_retries;
    }

    let value: Value = read_json(&args.data)?;
    let data: AggregatedData = match value {
        Value::Object(map) => map,
        _ => anyhow::bail!("Aggregated data in {:?} must be a JSON object", args.data),
    };
    let template = read_text(&args.template)?;

    let outcome = config
        .exporter()
        .export_sdd(&data, &template)
        .await
        .context("Export failed")?;

    match args.report {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => {
            println!("{}", outcome.quality_report.summary(&config.quality));
            println!("📄 Document:       {}", outcome.file_path.display());
            println!("📊 Quality report: {}", outcome.report_path.display());
            println!("   Attempts:       {}", outcome.attempts);
            println!();
            if outcome.state == ExportState::SoftPassed {
                println!("⚠️  Exported without passing the quality gate (enforcement disabled)");
            } else {
                println!("✅ Quality gate PASSED");
            }
        }
    }

    Ok(())
}
