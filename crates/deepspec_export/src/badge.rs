//! Quality gate badge injected into published documents.

use deepspec_quality::{QualityGateReport, QualityThresholds};

/// Render the badge block for a report.
pub fn quality_gate_badge(report: &QualityGateReport, thresholds: &QualityThresholds) -> String {
    let status = if report.passed_with(thresholds) {
        "✅ PASSED"
    } else {
        "❌ FAILED"
    };

    format!(
        "\n\n> **Quality Gate Report**\n\
         > - **Maturity Score**: {}/10\n\
         > - **Depth Score**: {}/10\n\
         > - **Edge Cases**: {} scenarios\n\
         > - **Technical Feasibility**: {}%\n\
         > - **Status**: {}\n\
         \n---\n\n",
        report.maturity_score(),
        report.depth_score(),
        report.edge_case_coverage(),
        report.technical_feasibility(),
        status,
    )
}

/// Insert the badge right after the first `# ` heading.
///
/// Without a top-level heading the badge goes after the first line.
pub fn inject_quality_gate_badge(
    content: &str,
    report: &QualityGateReport,
    thresholds: &QualityThresholds,
) -> String {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    let insert_at = lines
        .iter()
        .position(|line| line.starts_with("# "))
        .map(|index| index + 1)
        .unwrap_or(1)
        .min(lines.len());

    lines.insert(insert_at, quality_gate_badge(report, thresholds));
    lines.join("\n")
}
