//! Score primitives.
//!
//! Each function is a deliberately simple text heuristic over the extracted
//! projection. They are literal substring and count checks; changing them to
//! anything smarter changes every historical score.

use deepspec_schema::ExtractedData;
use tracing::debug;

/// Meta-commentary phrases counted as AI-speak, matched case-insensitively.
pub const AI_SPEAK_PATTERNS: &[&str] = &[
    "here is",
    "i hope",
    "as mentioned",
    "in this document",
    "let me",
    "let's",
    "dưới đây là",
    "tôi hy vọng",
    "như đã đề cập",
    "trong tài liệu này",
    "tôi sẽ",
    "hãy để tôi",
    "chúng ta hãy",
];

/// Depth of analysis on a 0-10 scale.
///
/// - Happy path detail, up to 3 points
/// - Edge case quality, up to 3 points
/// - Technical specificity, up to 4 points
pub fn calculate_depth_score(data: &ExtractedData) -> f64 {
    let mut score = 0.0;

    // Happy path detail
    if data.happy_path.len() >= 5 {
        score += 1.0;
    }
    if data.happy_path.iter().any(|step| space_count(&step.description) > 10) {
        score += 1.0;
    }
    // Whole step, field names included
    if data
        .happy_path
        .iter()
        .any(|step| step.text().to_lowercase().contains("validation"))
    {
        score += 1.0;
    }

    // Edge case quality
    if data.edge_cases.len() >= 5 {
        score += 1.0;
    }
    if data.edge_cases.iter().any(|case| case.has_mitigation()) {
        score += 1.0;
    }
    if data.edge_cases.iter().any(|case| space_count(&case.scenario) > 5) {
        score += 1.0;
    }

    // Technical specificity
    if data.tech_stack.len() >= 3 {
        score += 1.0;
    }
    if data.tech_stack.values().any(|choice| choice.mentions_rationale()) {
        score += 1.0;
    }
    if data.data_models {
        score += 1.0;
    }
    if data.api_spec {
        score += 1.0;
    }

    let score = f64::min(score, 10.0);
    debug!(score, "Calculated depth score");
    score
}

/// Percentage of tech-stack entries and edge cases that carry a justification.
///
/// Returns 0 when there is nothing to examine.
pub fn check_technical_feasibility(data: &ExtractedData) -> f64 {
    let total = data.tech_stack.len() + data.edge_cases.len();
    if total == 0 {
        return 0.0;
    }

    let feasible = data.tech_stack.values().filter(|c| c.has_rationale()).count()
        + data.edge_cases.iter().filter(|c| c.has_mitigation()).count();

    let percentage = round2(feasible as f64 / total as f64 * 100.0);
    debug!(feasible, total, percentage, "Checked technical feasibility");
    percentage
}

/// Count edge cases describing a failure while the happy path claims success.
///
/// Approximate: any failing scenario is flagged as soon as one step action
/// mentions "success", regardless of which step the scenario relates to.
pub fn find_logic_contradictions(_content: &str, data: &ExtractedData) -> u32 {
    let happy_succeeds = data
        .happy_path
        .iter()
        .any(|step| step.action.to_lowercase().contains("success"));

    if !happy_succeeds {
        return 0;
    }

    let count = data
        .edge_cases
        .iter()
        .filter(|case| case.scenario.to_lowercase().contains("fail"))
        .count() as u32;

    debug!(count, "Found logic contradictions");
    count
}

/// Count occurrences of canned meta-commentary phrases in the document.
pub fn detect_ai_speak(content: &str) -> u32 {
    let lowered = content.to_lowercase();
    AI_SPEAK_PATTERNS
        .iter()
        .map(|&pattern| lowered.matches(pattern).count() as u32)
        .sum()
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn space_count(text: &str) -> usize {
    text.matches(' ').count()
}
