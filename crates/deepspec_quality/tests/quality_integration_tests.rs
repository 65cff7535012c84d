//! Integration tests for the quality gate and the hierarchical validator.

use deepspec_quality::{validate_quality_gate, HierarchicalValidator, QualityGateReport};
use deepspec_schema::{
    EdgeCase, ExtractedData, HappyPath, HierarchicalResult, MitigationStrategy, StressTestReport,
};
use serde_json::json;

fn happy_path(steps: usize) -> HappyPath {
    (1..=steps).fold(
        HappyPath::new("checkout", "Checkout", "Customer buys the cart"),
        |path, i| path.with_step("Customer", format!("Perform checkout step {i}"), "Step done"),
    )
}

fn business_case(i: usize, description: &str) -> EdgeCase {
    EdgeCase::new(
        format!("EDGE-checkout-b{i}"),
        description,
        "Customer changes their mind",
        MitigationStrategy::new("Offer store credit", "Refund workflow with approval step"),
    )
}

fn technical_case(i: usize, description: &str) -> EdgeCase {
    EdgeCase::new(
        format!("EDGE-checkout-t{i}"),
        description,
        "Infrastructure degraded",
        MitigationStrategy::new("Degrade gracefully", "Retry with exponential backoff"),
    )
}

fn clean_business_cases() -> Vec<EdgeCase> {
    vec![
        business_case(1, "Customer cancels order after shipping"),
        business_case(2, "Coupon expired during purchase"),
        business_case(3, "Item out of stock after adding to cart"),
        business_case(4, "Gift card balance insufficient"),
        business_case(5, "Customer disputes the final price"),
    ]
}

fn technical_report(path: &HappyPath) -> StressTestReport {
    let cases = vec![
        technical_case(1, "Payment service times out under load"),
        technical_case(2, "Inventory replica lags behind primary"),
        technical_case(3, "Duplicate webhook delivery from provider"),
        technical_case(4, "Cache stampede on flash sale"),
        technical_case(5, "Disk full on order log volume"),
    ];
    StressTestReport::new("R-tech", path, cases, 85, 80)
}

fn result_with(steps: usize, business_cases: Vec<EdgeCase>) -> HierarchicalResult {
    let path = happy_path(steps);
    HierarchicalResult {
        business_exceptions: StressTestReport::new("R-biz", &path, business_cases, 80, 75),
        technical_edge_cases: technical_report(&path),
        happy_path: path,
    }
}

#[test]
fn test_valid_result_has_no_issues() {
    let (is_valid, issues) =
        HierarchicalValidator::default().validate_hierarchical_result(&result_with(4, clean_business_cases()));

    assert!(is_valid, "unexpected issues: {issues:?}");
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn test_short_happy_path_is_invalid() {
    let (is_valid, issues) =
        HierarchicalValidator::default().validate_hierarchical_result(&result_with(2, clean_business_cases()));

    assert!(!is_valid);
    assert!(issues.iter().any(|issue| issue.contains("at least 3 steps")));
}

#[test]
fn test_business_leakage_is_only_a_warning() {
    let mut cases = clean_business_cases();
    cases[0] = business_case(1, "database connection fails while customer pays");

    let validation = HierarchicalValidator::default().validate(&result_with(4, cases));

    assert!(validation.is_valid);
    assert!(validation.errors.is_empty());
    assert_eq!(validation.warnings.len(), 1);
    assert!(validation.warnings[0].contains("database"));
    assert!(validation.warnings[0].contains("connection"));
}

#[test]
fn test_all_errors_are_accumulated() {
    let path = happy_path(1);
    let short = vec![business_case(1, "Customer cancels order")];
    let result = HierarchicalResult {
        business_exceptions: StressTestReport::new("R-biz", &path, short.clone(), 10, 20),
        technical_edge_cases: StressTestReport::new("R-tech", &path, short, 30, 40),
        happy_path: path,
    };

    let validation = HierarchicalValidator::default().validate(&result);
    assert!(!validation.is_valid);
    // 1 happy path + 3 business + 3 technical
    assert_eq!(validation.errors.len(), 7);
    assert!(validation.errors[1].starts_with("Business report"));
    assert!(validation.errors[4].starts_with("Technical report"));
}

#[test]
fn test_issues_put_errors_before_warnings() {
    let mut cases = clean_business_cases();
    cases[0] = business_case(1, "Network partition during checkout");

    let (is_valid, issues) =
        HierarchicalValidator::default().validate_hierarchical_result(&result_with(2, cases));

    assert!(!is_valid);
    assert_eq!(issues.len(), 2);
    assert!(issues[0].contains("at least 3 steps"));
    assert!(issues[1].contains("network"));
}

#[test]
fn test_valid_implies_error_checks_pass() {
    for steps in [1, 3, 6] {
        for resilience in [50, 70, 95] {
            let mut result = result_with(steps, clean_business_cases());
            result.business_exceptions.resilience_score = resilience;

            let validation = HierarchicalValidator::default().validate(&result);
            if validation.is_valid {
                assert!(result.happy_path.steps.len() >= 3);
                assert!(result.business_exceptions.resilience_score >= 70);
            }
            assert_eq!(validation.is_valid, validation.errors.is_empty());
        }
    }
}

#[test]
fn test_quality_gate_from_aggregated_data() {
    let aggregated = json!({
        "feature_name": "Login",
        "happy_path": [
            {"action": "Login", "description": "User enters credentials"},
            {"action": "Validate", "description": "System validates input format and length"},
            {"action": "Verify", "description": "Check against database"}
        ],
        "edge_cases": [
            {"scenario": "Invalid email", "mitigation": "Show error"},
            {"scenario": "Wrong password", "mitigation": "Return 401"},
            {"scenario": "Database timeout", "mitigation": "Retry with circuit breaker"},
            {"scenario": "Concurrent login", "mitigation": "Use distributed lock"},
            {"scenario": "Account locked", "mitigation": "Return 403"}
        ],
        "tech_stack": {
            "FastAPI": {"rationale": "Async support"},
            "PostgreSQL": {"rationale": "ACID compliant"}
        }
    });
    let content = "# System Design Document\n## Happy Path\nUser logs in.\n";

    let extracted = ExtractedData::from_aggregated(&aggregated).unwrap();
    let report = validate_quality_gate(content, &extracted).unwrap();

    assert_eq!(report.depth_score(), 3.0);
    assert_eq!(report.edge_case_coverage(), 5);
    assert_eq!(report.technical_feasibility(), 100.0);
    assert_eq!(report.logic_consistency(), 0.0);
    assert_eq!(report.ai_speak_instances(), 0);
    assert!(!report.passed_quality_gate());
    assert_eq!(report.failure_reasons().len(), 1);
}

#[test]
fn test_report_json_roundtrip_keeps_verdict() {
    let report = QualityGateReport::new(9.0, 7, 100.0, 0.0, 0).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["maturity_score"], json!(report.maturity_score()));

    let restored: QualityGateReport = serde_json::from_value(json).unwrap();
    assert_eq!(restored, report);
    assert!(restored.passed_quality_gate());
}
