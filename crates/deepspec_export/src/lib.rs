//! # deepspec_export
//!
//! Quality-gated publication of System Design Documents.
//!
//! This crate handles:
//!
//! - Template rendering from aggregated agent output
//! - The export retry state machine and the fix cycle run between attempts
//! - Quality gate badge injection
//! - Writing the document and its quality report sidecar
//! - Pipeline configuration loaded from YAML
//!
//! ## Example
//!
//! ```rust,no_run
//! use deepspec_export::{AggregatedData, ExportConfig, SddExporter};
//! use serde_json::json;
//!
//! # async fn run() -> deepspec_export::ExportResult<()> {
//! let data: AggregatedData = json!({"feature_name": "Checkout"})
//!     .as_object()
//!     .cloned()
//!     .unwrap_or_default();
//!
//! let exporter = SddExporter::new(ExportConfig::new().with_output_dir("./docs"));
//! let outcome = exporter.export_sdd(&data, "# {feature_name}\n").await?;
//! println!("Wrote {}", outcome.file_path.display());
//! # Ok(())
//! # }
//! ```

pub mod badge;
pub mod config;
pub mod error;
pub mod exporter;
pub mod fix_cycle;
pub mod render;
pub mod state;

pub use badge::{inject_quality_gate_badge, quality_gate_badge};
pub use config::PipelineConfig;
pub use error::{ExportError, ExportResult, RenderError};
pub use exporter::{ExportConfig, ExportFormat, ExportOutcome, SddExporter};
pub use fix_cycle::{FixCycle, NoopFixCycle};
pub use render::{AggregatedData, TemplateRenderer};
pub use state::{decide_next_state, ExportState, GateDecision};
