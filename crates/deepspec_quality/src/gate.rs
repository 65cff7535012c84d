//! Quality gate validation.

use deepspec_schema::ExtractedData;
use tracing::debug;

use crate::error::QualityResult;
use crate::primitives::{
    calculate_depth_score, check_technical_feasibility, detect_ai_speak, find_logic_contradictions,
};
use crate::report::QualityGateReport;

/// Score a document and its extracted data.
///
/// Pure: no I/O, and identical inputs always produce identical reports.
pub fn validate_quality_gate(content: &str, extracted: &ExtractedData) -> QualityResult<QualityGateReport> {
    let depth_score = calculate_depth_score(extracted);
    let edge_case_coverage = extracted.edge_cases.len() as u32;
    let feasibility = check_technical_feasibility(extracted);
    let contradictions = find_logic_contradictions(content, extracted);
    let ai_speak = detect_ai_speak(content);

    let report = QualityGateReport::new(
        depth_score,
        edge_case_coverage,
        feasibility,
        contradictions as f64,
        ai_speak,
    )?;

    debug!(
        maturity = report.maturity_score(),
        passed = report.passed_quality_gate(),
        "Quality gate evaluated"
    );

    Ok(report)
}
