use serde::Serialize;
use serde_json::{Map, Value};

use crate::analysis::json_depth;
use crate::config::PolicyContext;
use crate::result::{Assessment, ValidationResult};
use crate::rules::json::DANGEROUS_KEYS;
use crate::rules::Severity;
use crate::sanitize::strip_control_chars;

use super::api_key::ApiProvider;
use super::json::value_type;
use super::Validator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMetadata {
    pub key_count: usize,
    pub depth: usize,
    /// Dotted paths of fields that got a path, URL or API key check.
    pub checked_fields: Vec<String>,
}

pub type ConfigValidationResult = ValidationResult<Value, ConfigMetadata>;

/// What a field name says about its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRole {
    Path,
    Url,
    ApiKey,
    Other,
}

impl FieldRole {
    fn of(key: &str) -> Self {
        let key = key.to_ascii_lowercase().replace(['-', '_'], "");
        if ["path", "dir", "directory", "file"].iter().any(|s| key.ends_with(s)) {
            FieldRole::Path
        } else if ["url", "uri", "endpoint"].iter().any(|s| key.ends_with(s)) {
            FieldRole::Url
        } else if key.contains("apikey") || key.ends_with("token") || key.ends_with("secretkey") {
            FieldRole::ApiKey
        } else {
            FieldRole::Other
        }
    }
}

impl Validator {
    /// Parse `raw` as JSON and validate it as a configuration object.
    pub fn validate_config_str(&self, raw: &str, policy: &PolicyContext) -> ConfigValidationResult {
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => self.validate_config(&value, policy),
            Err(e) => Assessment::reject(
                format!("Configuration must be valid JSON: {e}"),
                ConfigMetadata::default(),
            ),
        }
    }

    /// Validate a settings object before it is persisted.
    pub fn validate_config(&self, config: &Value, policy: &PolicyContext) -> ConfigValidationResult {
        let Value::Object(map) = config else {
            return Assessment::reject(
                format!("Configuration must be a JSON object, got {}", value_type(config)),
                ConfigMetadata::default(),
            );
        };

        let mut assessment = Assessment::scored();
        let mut metadata = ConfigMetadata {
            key_count: map.len(),
            depth: json_depth(config, 0),
            checked_fields: Vec::new(),
        };
        let max_depth = self.config().json_max_depth;
        if metadata.depth > max_depth {
            assessment.error(
                format!(
                    "Configuration depth {} exceeds maximum allowed depth of {max_depth}",
                    metadata.depth
                ),
                30,
            );
        }

        self.check_object(map, "", &mut assessment, &mut metadata, policy);
        let sanitized = sanitize_config(config.clone());
        assessment.finish(Some(sanitized), metadata)
    }

    fn check_object(
        &self,
        map: &Map<String, Value>,
        prefix: &str,
        assessment: &mut Assessment,
        metadata: &mut ConfigMetadata,
        policy: &PolicyContext,
    ) {
        for (key, value) in map {
            let field = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            if DANGEROUS_KEYS.contains(&key.as_str()) {
                assessment.blocking(format!("Configuration key '{field}' is not allowed"), 50, policy);
                continue;
            }
            self.check_value(key, value, &field, assessment, metadata, policy);
        }
    }

    fn check_value(
        &self,
        key: &str,
        value: &Value,
        field: &str,
        assessment: &mut Assessment,
        metadata: &mut ConfigMetadata,
        policy: &PolicyContext,
    ) {
        match value {
            Value::Object(map) => self.check_object(map, field, assessment, metadata, policy),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let field = format!("{field}[{i}]");
                    self.check_value(key, item, &field, assessment, metadata, policy);
                }
            }
            Value::String(s) => self.check_string(key, s, field, assessment, metadata, policy),
            _ => {}
        }
    }

    fn check_string(
        &self,
        key: &str,
        value: &str,
        field: &str,
        assessment: &mut Assessment,
        metadata: &mut ConfigMetadata,
        policy: &PolicyContext,
    ) {
        let registry = self.registry();
        let label = format!("Configuration value '{field}' contains dangerous pattern");
        for rule in registry.code_threats() {
            if rule.severity == Severity::Critical && rule.is_match(value) {
                assessment.rule_match(rule, &label, true, policy);
            }
        }
        if value.trim().is_empty() {
            return;
        }

        match FieldRole::of(key) {
            FieldRole::Path => {
                metadata.checked_fields.push(field.to_string());
                if let Some(rule) = registry.path_traversal().iter().find(|r| r.is_match(value)) {
                    assessment.rule_match(rule, &format!("Configuration path '{field}'"), true, policy);
                }
            }
            FieldRole::Url => {
                metadata.checked_fields.push(field.to_string());
                let result = self.validate_url(value);
                for error in result.errors() {
                    assessment.error(format!("{field}: {error}"), 20);
                }
                for warning in result.warnings() {
                    assessment.warning(format!("{field}: {warning}"), 5);
                }
            }
            FieldRole::ApiKey if value.starts_with("sk-") => {
                metadata.checked_fields.push(field.to_string());
                let provider = if value.starts_with("sk-ant-") {
                    ApiProvider::Anthropic
                } else {
                    ApiProvider::OpenAi
                };
                let result = self.validate_api_key(value, provider);
                for error in result.errors() {
                    assessment.error(format!("{field}: {error}"), 20);
                }
                for warning in result.warnings() {
                    assessment.warning(format!("{field}: {warning}"), 5);
                }
            }
            FieldRole::ApiKey | FieldRole::Other => {}
        }
    }
}

/// Drop dangerous keys and strip control characters from every string.
fn sanitize_config(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !DANGEROUS_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key, sanitize_config(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_config).collect()),
        Value::String(s) => Value::String(strip_control_chars(&s)),
        other => other,
    }
}
