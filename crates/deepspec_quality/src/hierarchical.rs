//! Validation of hierarchical workflow results.
//!
//! Checks a happy path against its business and technical stress-test reports.
//! Structural and score minimums are errors; vocabulary leakage and overlap
//! between the two categories are warnings and never invalidate a result.

use std::collections::HashSet;

use deepspec_schema::{EdgeCase, HappyPath, HierarchicalResult, StressTestReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::thresholds::HierarchicalThresholds;

/// Terms that mark an edge case as technical rather than business.
pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "database",
    "network",
    "concurrency",
    "timeout",
    "connection",
    "api",
    "race condition",
    "transaction",
    "circuit breaker",
    "pool",
    "latency",
    "throughput",
    "scalability",
    "availability",
    "consistency",
    "replication",
    "sharding",
    "caching",
    "load balancer",
    "microservice",
    "container",
    "deployment",
    "monitoring",
    "logging",
    "authentication",
    "authorization",
    "encryption",
    "ssl",
    "tls",
    "http",
    "https",
    "grpc",
    "websocket",
    "queue",
    "message",
    "event",
    "async",
    "synchronous",
    "blocking",
    "non-blocking",
];

/// Category of a stress-test report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Business,
    Technical,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Technical => "Technical",
        }
    }
}

/// Outcome of validating a hierarchical result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl HierarchicalValidation {
    /// Errors followed by warnings.
    pub fn issues(&self) -> Vec<String> {
        self.errors.iter().chain(self.warnings.iter()).cloned().collect()
    }
}

/// Validator for hierarchical workflow results.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalValidator {
    thresholds: HierarchicalThresholds,
}

impl HierarchicalValidator {
    pub fn new(thresholds: HierarchicalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HierarchicalThresholds {
        &self.thresholds
    }

    /// Validate a result, returning the verdict and all issues (errors first).
    pub fn validate_hierarchical_result(&self, result: &HierarchicalResult) -> (bool, Vec<String>) {
        let validation = self.validate(result);
        let issues = validation.issues();
        (validation.is_valid, issues)
    }

    /// Validate a result, keeping errors and warnings apart.
    pub fn validate(&self, result: &HierarchicalResult) -> HierarchicalValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let happy_path_errors = self.check_happy_path(&result.happy_path);
        let happy_path_valid = happy_path_errors.is_empty();
        errors.extend(happy_path_errors);

        let business_errors = self.check_stress_report(&result.business_exceptions, ReportKind::Business);
        let business_valid = business_errors.is_empty();
        errors.extend(business_errors);

        let technical_errors =
            self.check_stress_report(&result.technical_edge_cases, ReportKind::Technical);
        let technical_valid = technical_errors.is_empty();
        errors.extend(technical_errors);

        let leaked = technical_keywords_in(&result.business_exceptions.edge_cases);
        if !leaked.is_empty() {
            warnings.push(format!(
                "Business edge cases contain technical keywords: {}. \
                 These should be in technical edge cases instead.",
                leaked.join(", ")
            ));
        }

        warnings.extend(self.check_overlap(
            &result.business_exceptions.edge_cases,
            &result.technical_edge_cases.edge_cases,
        ));

        let is_valid = happy_path_valid && business_valid && technical_valid;

        if !warnings.is_empty() {
            warn!(count = warnings.len(), "Hierarchical result has warnings");
        }
        debug!(is_valid, errors = errors.len(), "Validated hierarchical result");

        HierarchicalValidation {
            is_valid,
            errors,
            warnings,
        }
    }

    fn check_happy_path(&self, happy_path: &HappyPath) -> Vec<String> {
        let min = self.thresholds.min_happy_path_steps;
        if happy_path.steps.len() < min {
            return vec![format!(
                "Happy path must have at least {} steps, got {}",
                min,
                happy_path.steps.len()
            )];
        }
        Vec::new()
    }

    fn check_stress_report(&self, report: &StressTestReport, kind: ReportKind) -> Vec<String> {
        let mut errors = Vec::new();
        let label = kind.label();
        let min_cases = self.thresholds.min_edge_cases_per_report;
        let min_score = self.thresholds.min_quality_score;

        if report.edge_cases.len() < min_cases {
            errors.push(format!(
                "{} report must have at least {} edge cases, got {}",
                label,
                min_cases,
                report.edge_cases.len()
            ));
        }

        if report.resilience_score < min_score {
            errors.push(format!(
                "{} report resilience score ({}) is below minimum threshold ({})",
                label, report.resilience_score, min_score
            ));
        }

        if report.coverage_score < min_score {
            errors.push(format!(
                "{} report coverage score ({}) is below minimum threshold ({})",
                label, report.coverage_score, min_score
            ));
        }

        errors
    }

    /// At most one warning per technical case: the first business case sharing
    /// more than the configured number of words.
    fn check_overlap(&self, business_cases: &[EdgeCase], technical_cases: &[EdgeCase]) -> Vec<String> {
        let business: Vec<(String, HashSet<String>)> = business_cases
            .iter()
            .map(|case| {
                let lowered = case.description.to_lowercase();
                let words = word_set(&lowered);
                (lowered, words)
            })
            .collect();

        let mut warnings = Vec::new();
        for tech_case in technical_cases {
            let tech_words = word_set(&tech_case.description.to_lowercase());

            let overlapping = business.iter().find(|(_, biz_words)| {
                tech_words.intersection(biz_words).count() > self.thresholds.overlap_word_limit
            });

            if let Some((biz_desc, _)) = overlapping {
                warnings.push(format!(
                    "Possible overlap detected: Technical case '{}' shares significant words \
                     with business case '{}'. Consider consolidating or clarifying the distinction.",
                    tech_case.description, biz_desc
                ));
            }
        }

        warnings
    }
}

/// Technical keywords found in business edge cases, deduplicated in first-found order.
pub fn technical_keywords_in(edge_cases: &[EdgeCase]) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();

    for case in edge_cases {
        let text = format!("{} {}", case.description, case.trigger_condition).to_lowercase();
        for &keyword in TECHNICAL_KEYWORDS {
            if text.contains(keyword) && !found.contains(&keyword) {
                found.push(keyword);
            }
        }
    }

    found
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}
