//! Data models for design-document artifacts produced by the agent crew.

use serde::{Deserialize, Serialize};

/// Ordinal risk level used for severity, likelihood and complexity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

/// A single step in a happy-path flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowStep {
    pub step_number: u32,
    pub actor: String,
    pub action: String,
    pub outcome: String,
    #[serde(default)]
    pub involved_components: Vec<String>,
    /// What happens if this step fails
    #[serde(default)]
    pub error_scenario: Option<String>,
    /// Step number to execute on failure
    #[serde(default)]
    pub fallback_step: Option<u32>,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub retry_count: Option<u32>,
}

impl FlowStep {
    pub fn new(
        step_number: u32,
        actor: impl Into<String>,
        action: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            step_number,
            actor: actor.into(),
            action: action.into(),
            outcome: outcome.into(),
            involved_components: Vec::new(),
            error_scenario: None,
            fallback_step: None,
            is_critical: false,
            retry_count: None,
        }
    }

    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    pub fn with_fallback(mut self, error_scenario: impl Into<String>, fallback_step: u32) -> Self {
        self.error_scenario = Some(error_scenario.into());
        self.fallback_step = Some(fallback_step);
        self
    }
}

/// The nominal flow of a feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HappyPath {
    pub feature_id: String,
    pub feature_name: String,
    pub description: String,
    pub steps: Vec<FlowStep>,
    #[serde(default)]
    pub pre_conditions: Vec<String>,
    #[serde(default)]
    pub post_conditions: Vec<String>,
    #[serde(default)]
    pub business_value: String,
}

impl HappyPath {
    pub fn new(
        feature_id: impl Into<String>,
        feature_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            feature_id: feature_id.into(),
            feature_name: feature_name.into(),
            description: description.into(),
            steps: Vec::new(),
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
            business_value: String::new(),
        }
    }

    /// Append a step, numbering it after the current last step.
    pub fn with_step(
        mut self,
        actor: impl Into<String>,
        action: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        let number = self.steps.len() as u32 + 1;
        self.steps.push(FlowStep::new(number, actor, action, outcome));
        self
    }
}

/// How an edge case is handled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MitigationStrategy {
    pub description: String,
    pub technical_implementation: String,
    #[serde(default)]
    pub implementation_complexity: RiskLevel,
    #[serde(default)]
    pub estimated_effort: Option<String>,
}

impl MitigationStrategy {
    pub fn new(description: impl Into<String>, technical_implementation: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            technical_implementation: technical_implementation.into(),
            implementation_complexity: RiskLevel::Medium,
            estimated_effort: None,
        }
    }
}

/// A failure scenario found while stress-testing a happy path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeCase {
    /// Display identifier, e.g. `EDGE-checkout-01`
    pub scenario_id: String,
    pub description: String,
    pub trigger_condition: String,
    #[serde(default)]
    pub expected_failure: String,
    #[serde(default)]
    pub severity: RiskLevel,
    #[serde(default)]
    pub likelihood: RiskLevel,
    #[serde(default)]
    pub detection_method: Option<String>,
    #[serde(default)]
    pub related_components: Vec<String>,
    #[serde(default)]
    pub related_step: Option<u32>,
    pub mitigation: MitigationStrategy,
}

impl EdgeCase {
    pub fn new(
        scenario_id: impl Into<String>,
        description: impl Into<String>,
        trigger_condition: impl Into<String>,
        mitigation: MitigationStrategy,
    ) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            description: description.into(),
            trigger_condition: trigger_condition.into(),
            expected_failure: String::new(),
            severity: RiskLevel::Medium,
            likelihood: RiskLevel::Medium,
            detection_method: None,
            related_components: Vec::new(),
            related_step: None,
            mitigation,
        }
    }

    pub fn with_risk(mut self, severity: RiskLevel, likelihood: RiskLevel) -> Self {
        self.severity = severity;
        self.likelihood = likelihood;
        self
    }
}

/// An auditor's stress-test report over one happy path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressTestReport {
    pub report_id: String,
    pub happy_path_id: String,
    pub feature_name: String,
    pub edge_cases: Vec<EdgeCase>,
    /// Estimated resilience, 0-100
    pub resilience_score: u32,
    /// Edge case coverage percentage, 0-100
    pub coverage_score: u32,
    #[serde(default)]
    pub review_summary: String,
    #[serde(default)]
    pub critical_findings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl StressTestReport {
    pub fn new(
        report_id: impl Into<String>,
        happy_path: &HappyPath,
        edge_cases: Vec<EdgeCase>,
        resilience_score: u32,
        coverage_score: u32,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            happy_path_id: happy_path.feature_id.clone(),
            feature_name: happy_path.feature_name.clone(),
            edge_cases,
            resilience_score,
            coverage_score,
            review_summary: String::new(),
            critical_findings: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Output of the hierarchical workflow: one flow, two categories of stress tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchicalResult {
    pub happy_path: HappyPath,
    pub business_exceptions: StressTestReport,
    pub technical_edge_cases: StressTestReport,
}
