//! Threshold configuration for the quality gate and the hierarchical validator.

use serde::{Deserialize, Serialize};

/// Publication thresholds a design document must meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Minimum depth score (0-10)
    pub depth_score_min: f64,
    /// Minimum number of edge cases
    pub edge_case_min: u32,
    /// Minimum technical feasibility percentage
    pub technical_feasibility_min: f64,
    /// Maximum logic contradictions allowed
    pub max_logic_contradictions: f64,
    /// Maximum AI-speak instances allowed
    pub max_ai_speak: u32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            depth_score_min: 8.0,
            edge_case_min: 5,
            technical_feasibility_min: 100.0,
            max_logic_contradictions: 0.0,
            max_ai_speak: 0,
        }
    }
}

impl QualityThresholds {
    pub fn with_depth_score_min(mut self, min: f64) -> Self {
        self.depth_score_min = min;
        self
    }

    pub fn with_edge_case_min(mut self, min: u32) -> Self {
        self.edge_case_min = min;
        self
    }
}

/// Structural and score minimums for hierarchical workflow results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicalThresholds {
    pub min_happy_path_steps: usize,
    pub min_edge_cases_per_report: usize,
    /// Minimum resilience and coverage score (0-100)
    pub min_quality_score: u32,
    /// Shared-word count above which two descriptions are reported as overlapping
    pub overlap_word_limit: usize,
}

impl Default for HierarchicalThresholds {
    fn default() -> Self {
        Self {
            min_happy_path_steps: 3,
            min_edge_cases_per_report: 5,
            min_quality_score: 70,
            overlap_word_limit: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_thresholds_fill_defaults() {
        let thresholds: QualityThresholds =
            serde_json::from_str(r#"{"depth_score_min": 7.0}"#).unwrap();
        assert_eq!(thresholds.depth_score_min, 7.0);
        assert_eq!(thresholds.edge_case_min, 5);
        assert_eq!(thresholds.technical_feasibility_min, 100.0);
    }

    #[test]
    fn test_hierarchical_defaults() {
        let thresholds = HierarchicalThresholds::default();
        assert_eq!(thresholds.min_happy_path_steps, 3);
        assert_eq!(thresholds.min_quality_score, 70);
    }
}
