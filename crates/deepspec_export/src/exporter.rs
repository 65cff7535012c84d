//! Quality-gated export of System Design Documents.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::Local;
use deepspec_quality::{validate_quality_gate, QualityGateReport, QualityThresholds};
use deepspec_schema::ExtractedData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::badge::inject_quality_gate_badge;
use crate::error::{ExportError, ExportResult};
use crate::fix_cycle::{FixCycle, NoopFixCycle};
use crate::render::{AggregatedData, TemplateRenderer};
use crate::state::{decide_next_state, ExportState, GateDecision};

/// Output format of the published document. Also used as the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Md,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Md => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Md),
            "json" => Ok(Self::Json),
            other => Err(ExportError::InvalidConfiguration(format!(
                "unknown export format '{}', expected md or json",
                other
            ))),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the document and its report are written to
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    /// Refuse to publish documents that fail the gate
    pub enforce_quality_gate: bool,
    /// Total number of validation attempts, including the first
    pub max_retries: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            format: ExportFormat::Md,
            enforce_quality_gate: true,
            max_retries: 3,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_quality_gate = enforce;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Result of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub file_path: PathBuf,
    pub report_path: PathBuf,
    pub quality_report: QualityGateReport,
    pub passed: bool,
    /// Number of validation attempts used
    pub attempts: u32,
    pub state: ExportState,
}

/// Sidecar written next to the document.
#[derive(Serialize)]
struct ReportSidecar<'a> {
    #[serde(flatten)]
    report: &'a QualityGateReport,
    passed_quality_gate: bool,
    failure_reasons: Vec<String>,
}

/// Envelope for the `json` export format.
#[derive(Serialize)]
struct JsonDocument<'a> {
    feature_name: &'a str,
    content: &'a str,
    quality_report: ReportSidecar<'a>,
}

/// Renders, scores, and publishes design documents.
pub struct SddExporter {
    config: ExportConfig,
    thresholds: QualityThresholds,
    renderer: TemplateRenderer,
    fix_cycle: Arc<dyn FixCycle>,
}

impl SddExporter {
    /// Create an exporter with default thresholds and no fix cycle.
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            thresholds: QualityThresholds::default(),
            renderer: TemplateRenderer::new(),
            fix_cycle: Arc::new(NoopFixCycle),
        }
    }

    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_fix_cycle(mut self, fix_cycle: Arc<dyn FixCycle>) -> Self {
        self.fix_cycle = fix_cycle;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Export a design document built from `data` and `template`.
    ///
    /// Each attempt renders the template, scores the result and either
    /// publishes, retries through the fix cycle, or gives up with
    /// [`ExportError::QualityGate`].
    pub async fn export_sdd(&self, data: &AggregatedData, template: &str) -> ExportResult<ExportOutcome> {
        let feature_name = feature_name(data)?;
        let max_attempts = self.config.max_retries;
        if max_attempts == 0 {
            return Err(ExportError::InvalidConfiguration(
                "max_retries must allow at least one attempt".to_string(),
            ));
        }

        let mut current = data.clone();
        let mut attempt = 0;

        loop {
            attempt += 1;
            info!(feature = %feature_name, attempt, max_attempts, "Validating design document");

            let content = self.renderer.render(template, &current)?;
            let extracted = ExtractedData::from_map(&current)?;
            let report = validate_quality_gate(&content, &extracted)?;

            let decision = decide_next_state(
                &report,
                &self.thresholds,
                self.config.enforce_quality_gate,
                max_attempts - attempt,
            );

            match decision {
                GateDecision::Passed => {
                    info!(maturity = report.maturity_score(), "Quality gate passed");
                }
                GateDecision::SoftPassed => {
                    warn!(
                        maturity = report.maturity_score(),
                        failures = ?report.failure_reasons_with(&self.thresholds),
                        "Document failed quality gate but enforcement is off, exporting anyway"
                    );
                }
                GateDecision::FailedRetryable => {
                    warn!(
                        attempt,
                        max_attempts,
                        failures = ?report.failure_reasons_with(&self.thresholds),
                        "Quality gate failed, running fix cycle"
                    );
                    current = self.fix_cycle.revise(&current, &report, attempt).await?;
                    continue;
                }
                GateDecision::FailedTerminal => {
                    for gap in report.threshold_gaps(&self.thresholds) {
                        error!(
                            metric = gap.metric.as_str(),
                            actual = gap.actual,
                            threshold = gap.threshold,
                            gap = gap.gap(),
                            "Quality gate metric failed"
                        );
                    }
                    return Err(ExportError::QualityGate {
                        attempts: attempt,
                        maturity_score: report.maturity_score(),
                        failure_reasons: report.failure_reasons_with(&self.thresholds),
                    });
                }
            }

            return self.publish(feature_name, &content, report, attempt, decision.into());
        }
    }

    fn publish(
        &self,
        feature_name: &str,
        content: &str,
        report: QualityGateReport,
        attempts: u32,
        state: ExportState,
    ) -> ExportResult<ExportOutcome> {
        let passed = report.passed_with(&self.thresholds);
        let document = inject_quality_gate_badge(content, &report, &self.thresholds);
        let sidecar = ReportSidecar {
            report: &report,
            passed_quality_gate: passed,
            failure_reasons: report.failure_reasons_with(&self.thresholds),
        };

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| ExportError::Write {
            path: output_dir.clone(),
            source,
        })?;

        let stem = format!(
            "{}_{}_{}",
            file_safe(feature_name),
            if passed { "PASSED" } else { "FAILED" },
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let file_path = output_dir.join(format!("{}.{}", stem, self.config.format.extension()));
        let report_path = output_dir.join(format!("{}_quality_report.json", stem));

        let body = match self.config.format {
            ExportFormat::Md => document,
            ExportFormat::Json => serde_json::to_string_pretty(&JsonDocument {
                feature_name,
                content: &document,
                quality_report: ReportSidecar {
                    report: &report,
                    passed_quality_gate: passed,
                    failure_reasons: sidecar.failure_reasons.clone(),
                },
            })?,
        };

        write_file(&file_path, &body)?;
        write_file(&report_path, &serde_json::to_string_pretty(&sidecar)?)?;

        info!(
            path = %file_path.display(),
            report = %report_path.display(),
            passed,
            "Exported design document"
        );

        Ok(ExportOutcome {
            file_path,
            report_path,
            quality_report: report,
            passed,
            attempts,
            state,
        })
    }
}

fn feature_name(data: &AggregatedData) -> ExportResult<&str> {
    data.get("feature_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ExportError::MissingFeatureName)
}

/// Keep letters, digits, `-` and `_`; everything else becomes `_`.
///
/// Separators and dots never survive, so the file stays inside the output directory.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn write_file(path: &Path, contents: &str) -> ExportResult<()> {
    fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
