//! Integration tests for the artifact schema and the extracted projection.

use deepspec_schema::{
    ExtractedData, HierarchicalResult, RiskLevel, SchemaError, SchemaValidator,
};
use serde_json::json;

fn edge_case_json(id: usize, description: &str) -> serde_json::Value {
    json!({
        "scenario_id": format!("EDGE-auction-{id}"),
        "description": description,
        "trigger_condition": "Bidder acts near the closing second",
        "expected_failure": "Bid lost",
        "severity": "High",
        "likelihood": "Medium",
        "mitigation": {
            "description": "Extend the auction window",
            "technical_implementation": "Soft-close timer reset on late bids",
            "implementation_complexity": "Medium",
            "estimated_effort": "2 days"
        }
    })
}

fn hierarchical_json() -> serde_json::Value {
    let business: Vec<_> = (1..=5)
        .map(|i| edge_case_json(i, &format!("Bidder retracts offer number {i}")))
        .collect();
    let technical: Vec<_> = (6..=10)
        .map(|i| edge_case_json(i, &format!("Replica lag hides bid {i}")))
        .collect();

    json!({
        "happy_path": {
            "feature_id": "auction",
            "feature_name": "Realtime Auction",
            "description": "Users bid on items in real time",
            "steps": [
                {"step_number": 1, "actor": "User", "action": "Open auction", "outcome": "Auction visible"},
                {"step_number": 2, "actor": "User", "action": "Place bid", "outcome": "Bid recorded"},
                {"step_number": 3, "actor": "System", "action": "Close auction", "outcome": "Winner notified"}
            ],
            "post_conditions": ["Winner charged"],
            "business_value": "Revenue"
        },
        "business_exceptions": {
            "report_id": "R-biz",
            "happy_path_id": "auction",
            "feature_name": "Realtime Auction",
            "edge_cases": business,
            "resilience_score": 82,
            "coverage_score": 75,
            "review_summary": "Solid"
        },
        "technical_edge_cases": {
            "report_id": "R-tech",
            "happy_path_id": "auction",
            "feature_name": "Realtime Auction",
            "edge_cases": technical,
            "resilience_score": 90,
            "coverage_score": 88,
            "review_summary": "Solid"
        }
    })
}

#[test]
fn test_hierarchical_result_parses_and_validates() {
    let result: HierarchicalResult = serde_json::from_value(hierarchical_json()).unwrap();

    assert_eq!(result.happy_path.steps.len(), 3);
    assert_eq!(result.business_exceptions.edge_cases[0].severity, RiskLevel::High);

    let validation = SchemaValidator::validate_hierarchical_result(&result);
    assert!(validation.valid, "Validation failed: {:?}", validation.errors);
    assert!(validation.into_result().is_ok());
}

#[test]
fn test_hierarchical_projection_combines_reports() {
    let result: HierarchicalResult = serde_json::from_value(hierarchical_json()).unwrap();
    let extracted = ExtractedData::from_hierarchical(&result);

    assert_eq!(extracted.happy_path.len(), 3);
    assert_eq!(extracted.edge_cases.len(), 10);
    assert!(extracted.edge_cases.iter().all(|c| c.has_mitigation()));
    assert!(extracted.tech_stack.is_empty());
}

#[test]
fn test_bad_scenario_ids_are_rejected_at_boundary() {
    let mut value = hierarchical_json();
    value["technical_edge_cases"]["edge_cases"][0]["scenario_id"] = json!("TECH-1");
    let result: HierarchicalResult = serde_json::from_value(value).unwrap();

    let err = SchemaValidator::validate_hierarchical_result(&result)
        .into_result()
        .unwrap_err();
    assert!(matches!(err, SchemaError::ValidationFailed(ref msg) if msg.contains("TECH-1")));
}

#[test]
fn test_aggregated_edge_cases_must_be_a_list() {
    let data = json!({
        "feature_name": "Auction",
        "edge_cases": {"scenario": "not a list"}
    });

    let err = ExtractedData::from_aggregated(&data).unwrap_err();
    assert!(err.to_string().contains("edge_cases"));
}
