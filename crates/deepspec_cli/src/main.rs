//! DeepSpec CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation or quality gate failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use deepspec_export::{ExportError, RenderError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "deepspec=debug"
    } else if cli.quiet {
        "deepspec=error"
    } else {
        "deepspec=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}", default_level)));

    // Already initialized is fine
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Score(args) => commands::score::execute(args).await,
        Commands::Validate(args) => commands::validate::execute(args).await,
        Commands::Export(args) => commands::export::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(export_error) = e.downcast_ref::<ExportError>() {
        return match export_error {
            ExportError::QualityGate { .. } => ExitCodes::VALIDATION_FAILURE,
            ExportError::Render(_) => ExitCodes::TEMPLATE_ERROR,
            ExportError::MissingFeatureName | ExportError::InvalidConfiguration(_) => {
                ExitCodes::INVALID_ARGS
            }
            _ => ExitCodes::GENERAL_ERROR,
        };
    }
    if e.downcast_ref::<RenderError>().is_some() {
        return ExitCodes::TEMPLATE_ERROR;
    }
    if e.downcast_ref::<commands::GateFailure>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("validation") || msg.contains("quality gate") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("template") {
        ExitCodes::TEMPLATE_ERROR
    } else if msg.contains("argument") || msg.contains("option") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_quality_gate_error_is_validation_failure() {
        let err = anyhow::Error::new(ExportError::QualityGate {
            attempts: 2,
            maturity_score: 1.25,
            failure_reasons: vec!["depth_score 0 < 8".to_string()],
        });
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);
    }

    #[test]
    fn test_render_error_is_template_error() {
        let err = anyhow::Error::new(ExportError::Render(RenderError::MissingKey("owner".into())));
        assert_eq!(categorize_error(&err), ExitCodes::TEMPLATE_ERROR);
    }

    #[test]
    fn test_context_does_not_hide_category() {
        let err = anyhow::Error::new(ExportError::MissingFeatureName).context("Export failed");
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);
    }

    #[test]
    fn test_gate_failure_marker() {
        let err = anyhow::Error::new(commands::GateFailure("document".into()));
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);
    }

    #[test]
    fn test_fallback_to_message() {
        assert_eq!(categorize_error(&anyhow!("File not found: x.json")), ExitCodes::INVALID_ARGS);
        assert_eq!(categorize_error(&anyhow!("disk on fire")), ExitCodes::GENERAL_ERROR);
    }
}
