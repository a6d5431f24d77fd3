use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::PolicyContext;
use crate::result::{Assessment, ValidationResult};
use crate::sanitize::strip_control_chars;

use super::Validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMetadata {
    pub length: usize,
    pub line_count: usize,
    pub subject: String,
    pub conventional: bool,
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub breaking: bool,
}

pub type CommitValidationResult = ValidationResult<String, CommitMetadata>;

impl Validator {
    /// Check a commit message for length, leaked credentials, information
    /// disclosure and conventional-commit shape.
    ///
    /// The sanitized value is the message with credentials redacted.
    pub fn validate_commit_message(
        &self,
        message: &str,
        policy: &PolicyContext,
    ) -> CommitValidationResult {
        let clean = strip_control_chars(message);
        let trimmed = clean.trim();
        let subject = trimmed.lines().next().unwrap_or_default().trim().to_string();
        let mut metadata = CommitMetadata {
            length: trimmed.chars().count(),
            line_count: trimmed.lines().count(),
            subject,
            conventional: false,
            commit_type: None,
            scope: None,
            breaking: false,
        };
        if trimmed.is_empty() {
            return Assessment::reject("Commit message cannot be empty", metadata);
        }

        let config = self.config();
        let registry = self.registry();
        let mut assessment = Assessment::scored();

        if metadata.length < config.commit_min_length {
            assessment.error(
                format!(
                    "Commit message too short (minimum {} characters)",
                    config.commit_min_length
                ),
                20,
            );
        }
        if metadata.length > config.commit_max_length {
            assessment.error(
                format!(
                    "Commit message too long (maximum {} characters)",
                    config.commit_max_length
                ),
                10,
            );
        }

        for rule in registry.commit_credentials() {
            if rule.is_match(trimmed) {
                assessment.rule_match(rule, "Commit message contains sensitive content", true, policy);
            }
        }

        let prefixes: BTreeSet<String> = registry
            .secret_prefixes()
            .find(trimmed)
            .into_iter()
            .map(|hit| hit.prefix)
            .collect();
        for prefix in prefixes {
            assessment.blocking(
                format!("Commit message contains a credential with known prefix '{prefix}'"),
                50,
                policy,
            );
        }

        for rule in registry.commit_disclosure() {
            if rule.is_match(trimmed) {
                assessment.rule_match(rule, "Commit message may disclose", false, policy);
            }
        }
        if !self.entropy.opaque_tokens(trimmed).is_empty() {
            assessment.warning("Commit message may disclose: long opaque token", 10);
        }

        if let Some(caps) = registry.conventional_commit().captures(&metadata.subject) {
            metadata.conventional = true;
            metadata.commit_type = caps.get(1).map(|m| m.as_str().to_string());
            metadata.scope = caps.get(2).map(|m| m.as_str().to_string());
            metadata.breaking = caps.get(3).is_some();
        } else {
            assessment.warning(
                "Commit message does not follow conventional commit format (type(scope): description)",
                5,
            );
        }

        let sanitized = self.redactor.sanitize(trimmed);
        assessment.finish(Some(sanitized), metadata)
    }
}
