use serde::Serialize;
use serde_json::Value;

use crate::analysis::{json_depth, json_size};
use crate::config::PolicyContext;
use crate::result::{Assessment, ValidationResult};
use crate::rules::json::DANGEROUS_KEYS;

use super::Validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMetadata {
    pub raw_length: usize,
    pub max_depth: usize,
    /// `None` when the text did not parse.
    pub depth: Option<usize>,
    pub size: Option<usize>,
    pub root_type: Option<&'static str>,
}

pub type JsonValidationResult = ValidationResult<Value, JsonMetadata>;

impl Validator {
    /// Scan, parse and measure a JSON document.
    ///
    /// `max_depth` falls back to the configured `json_max_depth`.
    pub fn validate_json(
        &self,
        raw: &str,
        max_depth: Option<usize>,
        policy: &PolicyContext,
    ) -> JsonValidationResult {
        let max_depth = max_depth.unwrap_or(self.config().json_max_depth);
        let trimmed = raw.trim();
        let mut metadata = JsonMetadata {
            raw_length: raw.len(),
            max_depth,
            depth: None,
            size: None,
            root_type: None,
        };
        if trimmed.is_empty() {
            return Assessment::reject("JSON input must be a non-empty string", metadata);
        }

        let mut assessment = Assessment::scored();
        let mut matched = Vec::new();
        for rule in self.registry().json_injection() {
            if rule.is_match(trimmed) {
                matched.push(rule.id.as_str());
                assessment.rule_match(rule, "JSON contains dangerous pattern", true, policy);
            }
        }

        let value: Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "json input did not parse");
                return Assessment::reject(format!("Invalid JSON: {e}"), metadata);
            }
        };

        // Escaped keys such as `"\u005f_proto__"` only show up once parsed.
        let mut keys = Vec::new();
        find_dangerous_keys(&value, "", &mut keys);
        for (field, key) in keys {
            let rule = if key == "__proto__" { "JSON-001" } else { "JSON-002" };
            if !matched.contains(&rule) {
                assessment.blocking(format!("JSON key '{field}' is not allowed"), 50, policy);
            }
        }

        let depth = json_depth(&value, 0);
        if depth > max_depth {
            assessment.error(
                format!("JSON depth {depth} exceeds maximum allowed depth of {max_depth}"),
                30,
            );
        }
        let size = json_size(&value);
        let threshold = self.config().json_size_warning;
        if size > threshold {
            assessment.warning(
                format!("JSON has {size} elements; payloads above {threshold} may degrade performance"),
                10,
            );
        }

        metadata.depth = Some(depth);
        metadata.size = Some(size);
        metadata.root_type = Some(value_type(&value));
        assessment.finish(Some(strip_dangerous_keys(value)), metadata)
    }
}

pub(crate) fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collect the dotted path and name of every prototype-pollution key.
fn find_dangerous_keys<'a>(value: &'a Value, prefix: &str, found: &mut Vec<(String, &'a str)>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let field = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                if DANGEROUS_KEYS.contains(&key.as_str()) {
                    found.push((field, key.as_str()));
                } else {
                    find_dangerous_keys(value, &field, found);
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                find_dangerous_keys(item, &format!("{prefix}[{i}]"), found);
            }
        }
        _ => {}
    }
}

/// Remove prototype-pollution keys at every level.
pub fn strip_dangerous_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !DANGEROUS_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key, strip_dangerous_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_dangerous_keys).collect()),
        other => other,
    }
}
