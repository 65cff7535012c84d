//! # deepspec_quality
//!
//! Quality gate scoring and hierarchical result validation for DeepSpec.
//!
//! This crate provides:
//! - **Score Primitives**: depth, technical feasibility, logic contradictions, AI-speak
//! - **Quality Gate Report**: immutable sub-scores with a derived maturity score
//! - **Quality Gate Validator**: scores a document and its extracted data
//! - **Hierarchical Validator**: cross-checks a happy path against business and
//!   technical stress-test reports
//!
//! ## Example
//!
//! ```rust
//! use deepspec_quality::QualityGateReport;
//!
//! let report = QualityGateReport::new(8.5, 6, 100.0, 0.0, 0).unwrap();
//! assert!(report.passed_quality_gate());
//! assert!((report.maturity_score() - 9.15).abs() < 1e-9);
//! ```

pub mod error;
pub mod gate;
pub mod hierarchical;
pub mod primitives;
pub mod report;
pub mod thresholds;

pub use error::{QualityError, QualityResult};
pub use gate::validate_quality_gate;
pub use hierarchical::{
    technical_keywords_in, HierarchicalValidation, HierarchicalValidator, ReportKind,
    TECHNICAL_KEYWORDS,
};
pub use primitives::{
    calculate_depth_score, check_technical_feasibility, detect_ai_speak, find_logic_contradictions,
    AI_SPEAK_PATTERNS,
};
pub use report::{GateMetric, MetricGap, QualityGateReport};
pub use thresholds::{HierarchicalThresholds, QualityThresholds};
