//! Validate command - Validate a hierarchical workflow result.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use deepspec_schema::{HierarchicalResult, SchemaValidator};
use serde_json::json;
use tracing::info;

use super::{load_config, read_json, GateFailure, OutputFormat};

#[derive(Args)]
pub struct ValidateArgs {
    /// Hierarchical result JSON (happy path plus both stress-test reports)
    #[arg(short, long)]
    result: PathBuf,

    /// Skip schema-level checks (scenario IDs, score ranges)
    #[arg(long)]
    skip_schema: bool,

    /// Pipeline configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating hierarchical result: {:?}", args.result);

    let config = load_config(args.config.as_deref())?;
    let result: HierarchicalResult = read_json(&args.result)?;

    let schema = (!args.skip_schema).then(|| SchemaValidator::validate_hierarchical_result(&result));
    let validation = config.hierarchical_validator().validate(&result);

    let schema_valid = schema.as_ref().map_or(true, |s| s.valid);
    let all_passed = schema_valid && validation.is_valid;

    match args.format {
        OutputFormat::Json => {
            let schema_output = schema.as_ref().map(|s| {
                json!({
                    "valid": s.valid,
                    "errors": s.errors,
                    "warnings": s.warnings,
                })
            });
            let output = json!({
                "is_valid": all_passed,
                "schema": schema_output,
                "hierarchical": validation,
                "issues": validation.issues(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if let Some(schema) = &schema {
                println!("📋 Validating schema...");
                if schema.valid {
                    println!("   ✅ Schema validation passed");
                } else {
                    println!("   ❌ Schema validation failed:");
                    for error in &schema.errors {
                        println!("      - {}", error);
                    }
                }
                for warning in &schema.warnings {
                    println!("   ⚠️  {}", warning);
                }
            }

            println!("🔎 Validating hierarchy...");
            if validation.is_valid {
                println!("   ✅ Hierarchy validation passed");
            } else {
                println!("   ❌ Hierarchy validation failed:");
                for error in &validation.errors {
                    println!("      - {}", error);
                }
            }
            for warning in &validation.warnings {
                println!("   ⚠️  {}", warning);
            }

            println!();
            if all_passed {
                println!("✅ All validations passed!");
            } else {
                println!("❌ Some validations failed. Please fix the issues above.");
            }
        }
    }

    if all_passed {
        Ok(())
    } else {
        Err(GateFailure(format!("{}", args.result.display())).into())
    }
}
