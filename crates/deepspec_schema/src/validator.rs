//! Schema-boundary validation for agent artifacts.

use crate::error::{SchemaError, SchemaResult};
use crate::models::{EdgeCase, HappyPath, HierarchicalResult, StressTestReport};

/// Prefix every edge case scenario ID must carry.
pub const SCENARIO_ID_PREFIX: &str = "EDGE-";

/// Minimum number of edge cases a stress-test report must identify.
pub const MIN_EDGE_CASES: usize = 5;

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Turn accumulated errors into a single [`SchemaError`].
    pub fn into_result(self) -> SchemaResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed(self.errors.join("; ")))
        }
    }
}

/// Validator for artifacts crossing into the quality core.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a happy path.
    pub fn validate_happy_path(path: &HappyPath) -> ValidationResult {
        let mut result = ValidationResult::new();

        if path.feature_id.is_empty() {
            result.add_error(format!("Happy path '{}' has empty feature_id", path.feature_name));
        }

        if path.steps.is_empty() {
            result.add_error(format!("Happy path '{}' has no steps", path.feature_id));
        }

        for step in &path.steps {
            if step.step_number == 0 {
                result.add_error(format!(
                    "Step '{}' in '{}' must be numbered from 1",
                    step.action, path.feature_id
                ));
            }
            if step.fallback_step == Some(0) {
                result.add_error(format!(
                    "Step {} in '{}' has fallback_step 0",
                    step.step_number, path.feature_id
                ));
            }
        }

        if path.post_conditions.is_empty() {
            result.add_warning(format!("Happy path '{}' has no post-conditions", path.feature_id));
        }

        result
    }

    /// Validate an edge case.
    pub fn validate_edge_case(case: &EdgeCase) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !case.scenario_id.starts_with(SCENARIO_ID_PREFIX) {
            result.add_error(format!(
                "Scenario ID '{}' must start with '{}'",
                case.scenario_id, SCENARIO_ID_PREFIX
            ));
        }

        if case.mitigation.description.is_empty() {
            result.add_error(format!("Edge case '{}' has empty mitigation description", case.scenario_id));
        }

        if case.mitigation.technical_implementation.is_empty() {
            result.add_error(format!(
                "Edge case '{}' has empty mitigation technical_implementation",
                case.scenario_id
            ));
        }

        if case.related_step == Some(0) {
            result.add_error(format!("Edge case '{}' references step 0", case.scenario_id));
        }

        result
    }

    /// Validate a stress-test report and every edge case in it.
    pub fn validate_stress_report(report: &StressTestReport) -> ValidationResult {
        let mut result = ValidationResult::new();

        if report.edge_cases.len() < MIN_EDGE_CASES {
            result.add_error(format!(
                "Report '{}' must identify at least {} edge cases, got {}",
                report.report_id,
                MIN_EDGE_CASES,
                report.edge_cases.len()
            ));
        }

        if report.resilience_score > 100 {
            result.add_error(format!(
                "Report '{}' resilience_score {} exceeds 100",
                report.report_id, report.resilience_score
            ));
        }

        if report.coverage_score > 100 {
            result.add_error(format!(
                "Report '{}' coverage_score {} exceeds 100",
                report.report_id, report.coverage_score
            ));
        }

        for case in &report.edge_cases {
            result.merge(Self::validate_edge_case(case));
        }

        result
    }

    /// Validate all three artifacts of a hierarchical result.
    pub fn validate_hierarchical_result(result: &HierarchicalResult) -> ValidationResult {
        let mut combined = Self::validate_happy_path(&result.happy_path);
        combined.merge(Self::validate_stress_report(&result.business_exceptions));
        combined.merge(Self::validate_stress_report(&result.technical_edge_cases));
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MitigationStrategy;

    fn edge_case(id: &str) -> EdgeCase {
        EdgeCase::new(
            id,
            "Payment provider declines",
            "Issuer returns decline code",
            MitigationStrategy::new("Offer another method", "Map decline codes to retry hints"),
        )
    }

    #[test]
    fn test_validate_edge_case_prefix() {
        assert!(SchemaValidator::validate_edge_case(&edge_case("EDGE-pay-1")).valid);

        let result = SchemaValidator::validate_edge_case(&edge_case("CASE-1"));
        assert!(!result.valid);
        assert!(result.errors[0].contains("EDGE-"));
    }

    #[test]
    fn test_validate_stress_report_min_cases() {
        let path = HappyPath::new("pay", "Payment", "Pay for order").with_step("User", "Pay", "Paid");
        let report = StressTestReport::new("R1", &path, vec![edge_case("EDGE-pay-1")], 80, 80);

        let result = SchemaValidator::validate_stress_report(&report);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("at least 5 edge cases")));
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_validate_happy_path_warns_without_post_conditions() {
        let path = HappyPath::new("pay", "Payment", "Pay for order").with_step("User", "Pay", "Paid");
        let result = SchemaValidator::validate_happy_path(&path);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 1);
    }
}
