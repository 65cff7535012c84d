//! Pipeline configuration loaded from YAML.
//!
//! ```yaml
//! quality:
//!   depth_score_min: 7.5
//! hierarchical:
//!   min_quality_score: 80
//! export:
//!   output_dir: ./docs/sdd
//!   format: json
//!   max_retries: 5
//! ```
//!
//! Every section and field is optional and falls back to its default.

use std::path::Path;

use deepspec_quality::{HierarchicalThresholds, HierarchicalValidator, QualityThresholds};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::exporter::{ExportConfig, SddExporter};

/// Thresholds and export settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub quality: QualityThresholds,
    pub hierarchical: HierarchicalThresholds,
    pub export: ExportConfig,
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> ExportResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading pipeline configuration");
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Exporter using these thresholds and export settings.
    pub fn exporter(&self) -> SddExporter {
        SddExporter::new(self.export.clone()).with_thresholds(self.quality.clone())
    }

    pub fn hierarchical_validator(&self) -> HierarchicalValidator {
        HierarchicalValidator::new(self.hierarchical.clone())
    }

    fn validate(&self) -> ExportResult<()> {
        if self.export.max_retries == 0 {
            return Err(ExportError::InvalidConfiguration(
                "export.max_retries must be at least 1".to_string(),
            ));
        }
        if !(0.0..=10.0).contains(&self.quality.depth_score_min) {
            return Err(ExportError::InvalidConfiguration(format!(
                "quality.depth_score_min must be within 0-10, got {}",
                self.quality.depth_score_min
            )));
        }
        if !(0.0..=100.0).contains(&self.quality.technical_feasibility_min) {
            return Err(ExportError::InvalidConfiguration(format!(
                "quality.technical_feasibility_min must be within 0-100, got {}",
                self.quality.technical_feasibility_min
            )));
        }
        Ok(())
    }
}
