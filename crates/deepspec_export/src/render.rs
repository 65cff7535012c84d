//! Document template rendering.
//!
//! Templates use `{name}` placeholders filled from the aggregated data.
//! `{{` and `}}` produce literal braces. A placeholder without a matching key
//! is an error, never an empty substitution.

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RenderError;

/// Aggregated agent output, keyed by field name.
pub type AggregatedData = Map<String, Value>;

/// Renderer for document templates.
pub struct TemplateRenderer {
    token_pattern: Regex,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a new template renderer.
    pub fn new() -> Self {
        Self {
            // Escaped braces, {placeholder}, or a stray brace
            token_pattern: Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}|[{}]")
                .expect("template token pattern is valid"),
        }
    }

    /// Fill every placeholder in `template` from `data`.
    pub fn render(&self, template: &str, data: &AggregatedData) -> Result<String, RenderError> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in self.token_pattern.captures_iter(template) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            rendered.push_str(&template[last..token.start()]);

            if let Some(name) = caps.get(1) {
                let value = data
                    .get(name.as_str())
                    .ok_or_else(|| RenderError::MissingKey(name.as_str().to_string()))?;
                rendered.push_str(&display_value(value));
            } else {
                match token.as_str() {
                    "{{" => rendered.push('{'),
                    "}}" => rendered.push('}'),
                    stray => {
                        return Err(RenderError::UnbalancedBrace {
                            brace: stray.chars().next().unwrap_or('{'),
                            position: token.start(),
                        })
                    }
                }
            }

            last = token.end();
        }

        rendered.push_str(&template[last..]);
        debug!(bytes = rendered.len(), "Rendered document template");
        Ok(rendered)
    }
}

/// Strings render bare; everything else renders as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
