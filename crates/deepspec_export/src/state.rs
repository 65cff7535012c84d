//! Export retry state machine.

use deepspec_quality::{QualityGateReport, QualityThresholds};
use serde::{Deserialize, Serialize};

/// Where an export attempt stands after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    #[default]
    Attempting,
    Passed,
    /// Failed the gate but enforcement is off, so the document is published anyway.
    SoftPassed,
    FailedRetryable,
    FailedTerminal,
}

impl ExportState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Passed | Self::SoftPassed | Self::FailedTerminal)
    }

    /// Whether the document gets written in this state.
    pub fn publishes(&self) -> bool {
        matches!(self, Self::Passed | Self::SoftPassed)
    }
}

/// Outcome of judging one attempt. Every variant is a state an attempt can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Passed,
    SoftPassed,
    FailedRetryable,
    FailedTerminal,
}

impl From<GateDecision> for ExportState {
    fn from(decision: GateDecision) -> Self {
        match decision {
            GateDecision::Passed => Self::Passed,
            GateDecision::SoftPassed => Self::SoftPassed,
            GateDecision::FailedRetryable => Self::FailedRetryable,
            GateDecision::FailedTerminal => Self::FailedTerminal,
        }
    }
}

/// Decide the next state from a validation report.
///
/// `attempts_left` counts the attempts still available after this one.
pub fn decide_next_state(
    report: &QualityGateReport,
    thresholds: &QualityThresholds,
    enforce: bool,
    attempts_left: u32,
) -> GateDecision {
    if report.passed_with(thresholds) {
        GateDecision::Passed
    } else if !enforce {
        GateDecision::SoftPassed
    } else if attempts_left > 0 {
        GateDecision::FailedRetryable
    } else {
        GateDecision::FailedTerminal
    }
}
