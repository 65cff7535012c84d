//! Quality gate report.
//!
//! The report is an immutable value object. Its maturity score is derived from
//! the sub-scores before the value exists, and construction fails when any
//! sub-score is out of range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QualityError, QualityResult};
use crate::primitives::round2;
use crate::thresholds::QualityThresholds;

/// Scores for one validation pass over a design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReport")]
pub struct QualityGateReport {
    depth_score: f64,
    edge_case_coverage: u32,
    technical_feasibility: f64,
    logic_consistency: f64,
    ai_speak_instances: u32,
    maturity_score: f64,
}

impl QualityGateReport {
    /// Validate the sub-scores and derive the maturity score.
    pub fn new(
        depth_score: f64,
        edge_case_coverage: u32,
        technical_feasibility: f64,
        logic_consistency: f64,
        ai_speak_instances: u32,
    ) -> QualityResult<Self> {
        check_range("depth_score", depth_score, 0.0, 10.0, "0 <= depth_score <= 10")?;
        check_range(
            "technical_feasibility",
            technical_feasibility,
            0.0,
            100.0,
            "0 <= technical_feasibility <= 100",
        )?;
        check_range(
            "logic_consistency",
            logic_consistency,
            0.0,
            f64::INFINITY,
            "logic_consistency >= 0 and finite",
        )?;

        let maturity_score = maturity_score(
            depth_score,
            edge_case_coverage,
            technical_feasibility,
            logic_consistency,
            ai_speak_instances,
        );

        Ok(Self {
            depth_score,
            edge_case_coverage,
            technical_feasibility,
            logic_consistency,
            ai_speak_instances,
            maturity_score,
        })
    }

    pub fn depth_score(&self) -> f64 {
        self.depth_score
    }

    pub fn edge_case_coverage(&self) -> u32 {
        self.edge_case_coverage
    }

    pub fn technical_feasibility(&self) -> f64 {
        self.technical_feasibility
    }

    /// Number of contradictions found. Higher is worse.
    pub fn logic_consistency(&self) -> f64 {
        self.logic_consistency
    }

    pub fn ai_speak_instances(&self) -> u32 {
        self.ai_speak_instances
    }

    pub fn maturity_score(&self) -> f64 {
        self.maturity_score
    }

    /// Whether the report meets the default publication thresholds.
    pub fn passed_quality_gate(&self) -> bool {
        self.passed_with(&QualityThresholds::default())
    }

    /// One message per violated default threshold.
    pub fn failure_reasons(&self) -> Vec<String> {
        self.failure_reasons_with(&QualityThresholds::default())
    }

    pub fn passed_with(&self, thresholds: &QualityThresholds) -> bool {
        self.threshold_gaps(thresholds).is_empty()
    }

    pub fn failure_reasons_with(&self, thresholds: &QualityThresholds) -> Vec<String> {
        self.threshold_gaps(thresholds)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Every violated threshold with its distance from passing.
    pub fn threshold_gaps(&self, thresholds: &QualityThresholds) -> Vec<MetricGap> {
        let mut gaps = Vec::new();

        if self.depth_score < thresholds.depth_score_min {
            gaps.push(MetricGap::new(
                GateMetric::DepthScore,
                self.depth_score,
                thresholds.depth_score_min,
            ));
        }

        if self.edge_case_coverage < thresholds.edge_case_min {
            gaps.push(MetricGap::new(
                GateMetric::EdgeCases,
                self.edge_case_coverage as f64,
                thresholds.edge_case_min as f64,
            ));
        }

        if self.technical_feasibility < thresholds.technical_feasibility_min {
            gaps.push(MetricGap::new(
                GateMetric::TechnicalFeasibility,
                self.technical_feasibility,
                thresholds.technical_feasibility_min,
            ));
        }

        if self.logic_consistency > thresholds.max_logic_contradictions {
            gaps.push(MetricGap::new(
                GateMetric::LogicContradictions,
                self.logic_consistency,
                thresholds.max_logic_contradictions,
            ));
        }

        if self.ai_speak_instances > thresholds.max_ai_speak {
            gaps.push(MetricGap::new(
                GateMetric::AiSpeak,
                self.ai_speak_instances as f64,
                thresholds.max_ai_speak as f64,
            ));
        }

        gaps
    }

    /// Human-readable summary against the given thresholds.
    pub fn summary(&self, thresholds: &QualityThresholds) -> String {
        let passed = self.passed_with(thresholds);
        let mut report = String::new();

        report.push_str("╔══════════════════════════════════════════════════════════════╗\n");
        report.push_str("║                     QUALITY GATE REPORT                      ║\n");
        report.push_str("╚══════════════════════════════════════════════════════════════╝\n");
        report.push_str(&format!(
            "  Status:                {}\n",
            if passed { "✅ PASSED" } else { "❌ FAILED" }
        ));
        report.push_str(&format!("  Maturity score:        {}/10\n", self.maturity_score));
        report.push_str(&format!("  Depth score:           {}/10\n", self.depth_score));
        report.push_str(&format!("  Edge cases:            {}\n", self.edge_case_coverage));
        report.push_str(&format!("  Technical feasibility: {}%\n", self.technical_feasibility));
        report.push_str(&format!("  Contradictions:        {}\n", self.logic_consistency));
        report.push_str(&format!("  AI-speak instances:    {}\n", self.ai_speak_instances));

        let reasons = self.failure_reasons_with(thresholds);
        if !reasons.is_empty() {
            report.push_str("\nFailures:\n");
            for reason in reasons {
                report.push_str(&format!("  - {}\n", reason));
            }
        }

        report
    }
}

/// Weighted maturity score on a 0-10 scale, rounded to two decimals.
fn maturity_score(
    depth_score: f64,
    edge_case_coverage: u32,
    technical_feasibility: f64,
    logic_consistency: f64,
    ai_speak_instances: u32,
) -> f64 {
    // 5+ edge cases earn the full 10 points
    let edge_score = f64::min(edge_case_coverage as f64 / 5.0 * 10.0, 10.0);
    // each contradiction costs 2 points
    let consistency_score = f64::max(10.0 - logic_consistency * 2.0, 0.0);
    // each AI-speak hit costs 1 point
    let clarity_score = f64::max(5.0 - ai_speak_instances as f64, 0.0);

    let maturity = depth_score * 0.40
        + edge_score * 0.25
        + technical_feasibility / 10.0 * 0.20
        + consistency_score * 0.10
        + clarity_score * 0.05;

    round2(maturity)
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    constraint: &'static str,
) -> QualityResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(QualityError::InvalidReport {
            field,
            value,
            constraint,
        });
    }
    Ok(())
}

/// Wire form of a report. Any serialized maturity score is ignored and recomputed.
#[derive(Deserialize)]
struct RawReport {
    depth_score: f64,
    edge_case_coverage: u32,
    technical_feasibility: f64,
    logic_consistency: f64,
    ai_speak_instances: u32,
}

impl TryFrom<RawReport> for QualityGateReport {
    type Error = QualityError;

    fn try_from(raw: RawReport) -> Result<Self, Self::Error> {
        Self::new(
            raw.depth_score,
            raw.edge_case_coverage,
            raw.technical_feasibility,
            raw.logic_consistency,
            raw.ai_speak_instances,
        )
    }
}

/// Metrics checked by the quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMetric {
    DepthScore,
    EdgeCases,
    TechnicalFeasibility,
    LogicContradictions,
    AiSpeak,
}

impl GateMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepthScore => "depth_score",
            Self::EdgeCases => "edge_cases",
            Self::TechnicalFeasibility => "technical_feasibility",
            Self::LogicContradictions => "logic_consistency",
            Self::AiSpeak => "ai_speak_instances",
        }
    }

    /// Whether the threshold is a ceiling rather than a floor.
    pub fn is_ceiling(&self) -> bool {
        matches!(self, Self::LogicContradictions | Self::AiSpeak)
    }
}

/// A violated threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGap {
    pub metric: GateMetric,
    pub actual: f64,
    pub threshold: f64,
}

impl MetricGap {
    pub fn new(metric: GateMetric, actual: f64, threshold: f64) -> Self {
        Self {
            metric,
            actual,
            threshold,
        }
    }

    /// How far the actual value is from passing.
    pub fn gap(&self) -> f64 {
        round2((self.actual - self.threshold).abs())
    }
}

impl fmt::Display for MetricGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.metric {
            GateMetric::DepthScore => {
                write!(f, "depth_score {} < {:.1}", self.actual, self.threshold)
            }
            GateMetric::EdgeCases => write!(f, "edge_cases {} < {}", self.actual, self.threshold),
            GateMetric::TechnicalFeasibility => write!(
                f,
                "technical_feasibility {}% < {}%",
                self.actual, self.threshold
            ),
            GateMetric::LogicContradictions => write!(
                f,
                "logic_consistency: found {} logic contradictions (max {})",
                self.actual, self.threshold
            ),
            GateMetric::AiSpeak => write!(
                f,
                "ai_speak_instances: found {} AI-speak instances (max {})",
                self.actual, self.threshold
            ),
        }
    }
}
