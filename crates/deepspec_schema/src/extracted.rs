//! Typed projection of aggregated agent output.
//!
//! The quality gate never reads the loosely-shaped aggregated data directly.
//! [`ExtractedData::from_aggregated`] is the single adapter between the two, and
//! it rejects malformed shapes instead of coercing them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::models::{EdgeCase, FlowStep, HierarchicalResult, MitigationStrategy};

/// A happy-path step as seen by the scoring heuristics.
///
/// Fields other than `action`, `description` and `outcome` are kept in `extra`
/// so that text checks see the whole step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedStep {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub outcome: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ExtractedStep {
    pub fn new(action: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    /// Serialized form of the whole step, field names included.
    pub fn text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<&FlowStep> for ExtractedStep {
    fn from(step: &FlowStep) -> Self {
        let mut extracted = Self::new(&step.action, &step.outcome).with_outcome(&step.outcome);
        extracted
            .extra
            .insert("actor".to_string(), Value::String(step.actor.clone()));
        if let Some(error_scenario) = &step.error_scenario {
            extracted
                .extra
                .insert("error_scenario".to_string(), Value::String(error_scenario.clone()));
        }
        extracted
    }
}

/// A mitigation: a free-text note, a full strategy record, or any other JSON value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MitigationNote {
    Text(String),
    Strategy(MitigationStrategy),
    Other(Value),
}

impl MitigationNote {
    /// Empty by JSON truthiness: `""`, `{}`, `[]`, `0`, `false` and `null`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Strategy(_) => false,
            Self::Other(value) => !is_truthy(value),
        }
    }
}

/// An edge case as seen by the scoring heuristics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedEdgeCase {
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub mitigation: Option<MitigationNote>,
}

impl ExtractedEdgeCase {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            mitigation: None,
        }
    }

    pub fn with_mitigation(mut self, note: impl Into<String>) -> Self {
        self.mitigation = Some(MitigationNote::Text(note.into()));
        self
    }

    pub fn has_mitigation(&self) -> bool {
        self.mitigation.as_ref().is_some_and(|m| !m.is_empty())
    }
}

impl From<&EdgeCase> for ExtractedEdgeCase {
    fn from(case: &EdgeCase) -> Self {
        Self {
            scenario: case.description.clone(),
            mitigation: Some(MitigationNote::Strategy(case.mitigation.clone())),
        }
    }
}

/// Detail record attached to a technology choice.
///
/// `rationale` is `Some(Value::Null)` when the key is present with a null value,
/// so the key still shows up in the serialized form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TechDetail {
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub rationale: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A tech-stack entry: a detail record, a bare note, or any other JSON value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TechChoice {
    Detailed(TechDetail),
    Note(String),
    Other(Value),
}

impl TechChoice {
    pub fn with_rationale(rationale: impl Into<String>) -> Self {
        Self::Detailed(TechDetail {
            rationale: Some(Value::String(rationale.into())),
            extra: BTreeMap::new(),
        })
    }

    /// True for a detail record whose rationale is truthy.
    pub fn has_rationale(&self) -> bool {
        match self {
            Self::Detailed(detail) => detail.rationale.as_ref().is_some_and(is_truthy),
            Self::Note(_) | Self::Other(_) => false,
        }
    }

    /// True when the serialized form of the entry contains "rationale" anywhere.
    ///
    /// This is a literal text match: a record with an empty or null `rationale`
    /// key matches, and so does a note that merely uses the word.
    pub fn mentions_rationale(&self) -> bool {
        serde_json::to_string(self)
            .unwrap_or_default()
            .to_lowercase()
            .contains("rationale")
    }
}

/// Read-only projection consumed by the score primitives.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ExtractedData {
    pub happy_path: Vec<ExtractedStep>,
    pub edge_cases: Vec<ExtractedEdgeCase>,
    pub tech_stack: BTreeMap<String, TechChoice>,
    pub data_models: bool,
    pub api_spec: bool,
}

impl ExtractedData {
    /// Build the projection from an aggregated JSON document.
    pub fn from_aggregated(value: &Value) -> SchemaResult<Self> {
        let map = value.as_object().ok_or_else(|| SchemaError::UnexpectedShape {
            field: "<root>".to_string(),
            expected: "an object",
            found: kind_of(value),
        })?;
        Self::from_map(map)
    }

    /// Build the projection from the fields of an aggregated JSON object.
    pub fn from_map(map: &Map<String, Value>) -> SchemaResult<Self> {
        let extracted = Self {
            happy_path: field(map, "happy_path")?,
            edge_cases: field(map, "edge_cases")?,
            tech_stack: field(map, "tech_stack")?,
            data_models: map.get("data_models").is_some_and(is_truthy),
            api_spec: map.get("api_spec").is_some_and(is_truthy),
        };

        debug!(
            steps = extracted.happy_path.len(),
            edge_cases = extracted.edge_cases.len(),
            tech_stack = extracted.tech_stack.len(),
            "Extracted scoring projection"
        );

        Ok(extracted)
    }

    /// Project a hierarchical workflow result; both stress reports contribute edge cases.
    pub fn from_hierarchical(result: &HierarchicalResult) -> Self {
        Self {
            happy_path: result.happy_path.steps.iter().map(ExtractedStep::from).collect(),
            edge_cases: result
                .business_exceptions
                .edge_cases
                .iter()
                .chain(result.technical_edge_cases.edge_cases.iter())
                .map(ExtractedEdgeCase::from)
                .collect(),
            ..Self::default()
        }
    }
}

fn field<T: DeserializeOwned + Default>(map: &Map<String, Value>, key: &str) -> SchemaResult<T> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value).map_err(|e| SchemaError::Malformed {
            field: key.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Deserialize a present key as `Some`, even when its value is null.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
