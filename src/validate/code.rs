use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::{complexity, nesting_depth};
use crate::config::PolicyContext;
use crate::language::Language;
use crate::result::{Assessment, ValidationResult};
use crate::rules::Severity;
use crate::sanitize::{strip_comments, strip_control_chars};

use super::Validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMetadata {
    pub original_length: usize,
    pub line_count: usize,
    pub complexity: u32,
    pub nesting_depth: u32,
    pub language: Option<Language>,
    /// The language came from [`Language::infer`] rather than the caller.
    pub language_inferred: bool,
    /// Ids of every threat and heuristic rule that matched.
    pub matched_rules: Vec<String>,
}

pub type CodeValidationResult = ValidationResult<String, CodeMetadata>;

impl CodeMetadata {
    fn new(code: &str) -> Self {
        Self {
            original_length: code.chars().count(),
            line_count: code.lines().count(),
            complexity: 0,
            nesting_depth: 0,
            language: None,
            language_inferred: false,
            matched_rules: Vec::new(),
        }
    }
}

impl Validator {
    /// Scan code (or generated script text) for threat patterns.
    ///
    /// `language` scopes the secondary heuristics; when absent it is
    /// inferred from the text.
    pub fn validate_code_content(
        &self,
        code: &str,
        language: Option<Language>,
        policy: &PolicyContext,
    ) -> CodeValidationResult {
        let mut metadata = CodeMetadata::new(code);
        // Scans run on the text with invisible characters removed, so
        // `ev\u{200B}al(` is seen as the call it sanitizes to.
        let clean = strip_control_chars(code);
        let trimmed = clean.trim();
        if trimmed.is_empty() {
            return Assessment::reject("Code content must be a non-empty string", metadata);
        }
        let max = self.config().max_code_length;
        if metadata.original_length > max {
            return Assessment::reject(
                format!("Code content exceeds maximum length of {max} characters"),
                metadata,
            );
        }

        let sanitized = if policy.strict_mode {
            strip_comments(&clean)
        } else {
            clean.clone()
        };

        let registry = self.registry();
        let mut assessment = Assessment::scored();

        for rule in registry.code_threats() {
            if !rule.is_match_any(&[trimmed, sanitized.as_str()]) {
                continue;
            }
            metadata.matched_rules.push(rule.id.clone());
            if rule.severity == Severity::Critical {
                assessment.rule_match(rule, "Dangerous pattern detected", true, policy);
            } else {
                assessment.rule_match(rule, "Potentially risky pattern", false, policy);
            }
        }

        let prefixes: BTreeSet<String> = registry
            .secret_prefixes()
            .find(trimmed)
            .into_iter()
            .map(|hit| hit.prefix)
            .collect();
        for prefix in prefixes {
            assessment.warning(
                format!("Possible hard-coded credential with known prefix '{prefix}'"),
                20,
            );
        }

        metadata.complexity = complexity(trimmed, registry.complexity());
        metadata.nesting_depth = nesting_depth(trimmed);
        if let Some(max) = policy.max_complexity {
            if metadata.complexity > max {
                assessment.warning(
                    format!(
                        "Code complexity {} exceeds maximum of {max}",
                        metadata.complexity
                    ),
                    10,
                );
            }
        }

        let (language, inferred) = match language {
            Some(lang) => (Some(lang), false),
            None => (Language::infer(trimmed), true),
        };
        metadata.language = language;
        metadata.language_inferred = inferred && language.is_some();
        for heuristic in registry.language_heuristics() {
            if heuristic.applies_to(language) && heuristic.rule.is_match(trimmed) {
                metadata.matched_rules.push(heuristic.rule.id.clone());
                assessment.warning(
                    format!("Language heuristic: {}", heuristic.rule.description),
                    heuristic.rule.penalty,
                );
            }
        }

        assessment.finish(Some(sanitized), metadata)
    }
}
