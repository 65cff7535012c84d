//! # deepspec_schema
//!
//! Data model for the artifacts the agent crew produces while writing a
//! System Design Document, plus the typed projection the quality gate reads.
//!
//! ## Features
//!
//! - **Artifacts**: happy paths, stress-test reports, edge cases, mitigations
//! - **Extracted Data**: the read-only scoring projection, built by an explicit adapter
//! - **Schema Validation**: boundary checks that reject malformed artifacts
//!
//! ## Example
//!
//! ```rust
//! use deepspec_schema::ExtractedData;
//! use serde_json::json;
//!
//! let aggregated = json!({
//!     "feature_name": "Login",
//!     "edge_cases": [{"scenario": "Wrong password", "mitigation": "Return 401"}],
//! });
//! let extracted = ExtractedData::from_aggregated(&aggregated).unwrap();
//! assert_eq!(extracted.edge_cases.len(), 1);
//! ```

pub mod error;
pub mod extracted;
pub mod models;
pub mod validator;

pub use error::{SchemaError, SchemaResult};
pub use extracted::{
    ExtractedData, ExtractedEdgeCase, ExtractedStep, MitigationNote, TechChoice, TechDetail,
};
pub use models::*;
pub use validator::{SchemaValidator, ValidationResult, MIN_EDGE_CASES, SCENARIO_ID_PREFIX};
