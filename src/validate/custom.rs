use serde::Serialize;

use crate::config::PolicyContext;
use crate::result::{Assessment, ValidationResult};
use crate::rules::{RuleSpec, Severity};

use super::Validator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetMetadata {
    pub evaluated: usize,
    pub matched_rules: Vec<String>,
    /// Ids of rules that failed to compile and were not applied.
    pub skipped_rules: Vec<String>,
}

pub type RuleSetValidationResult = ValidationResult<String, RuleSetMetadata>;

impl Validator {
    /// Apply caller-supplied rules to `input`.
    ///
    /// A rule that fails to compile is logged and skipped; the rest still
    /// run. Critical matches are blocking, everything else warns.
    pub fn apply_rules(
        &self,
        input: &str,
        specs: &[RuleSpec],
        policy: &PolicyContext,
    ) -> RuleSetValidationResult {
        let mut assessment = Assessment::scored();
        let mut metadata = RuleSetMetadata::default();

        for spec in specs {
            let rule = match spec.compile() {
                Ok(rule) => rule,
                Err(e) => {
                    tracing::warn!(rule = %spec.id, error = %e, "skipping rule that failed to compile");
                    metadata.skipped_rules.push(spec.id.clone());
                    continue;
                }
            };
            metadata.evaluated += 1;
            if rule.is_match(input) {
                metadata.matched_rules.push(rule.id.clone());
                assessment.rule_match(&rule, "Rule matched", rule.severity == Severity::Critical, policy);
            }
        }

        assessment.finish(Some(input.to_string()), metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, pattern: &str, severity: Severity) -> RuleSpec {
        RuleSpec {
            id: id.into(),
            pattern: pattern.into(),
            description: format!("{id} description"),
            severity,
            penalty: 20,
        }
    }

    #[test]
    fn broken_rule_is_skipped_not_fatal() {
        let specs = [
            spec("bad", "(unclosed", Severity::Critical),
            spec("todo", r"\bTODO\b", Severity::Low),
        ];
        let result = Validator::new().apply_rules("TODO: fix", &specs, &PolicyContext::default());
        assert!(result.is_valid());
        assert_eq!(result.metadata().skipped_rules, ["bad"]);
        assert_eq!(result.metadata().matched_rules, ["todo"]);
        assert_eq!(result.security_score(), Some(80));
    }

    #[test]
    fn critical_match_is_an_error() {
        let specs = [spec("drop", r"(?i)drop\s+table", Severity::Critical)];
        let result =
            Validator::new().apply_rules("DROP TABLE users", &specs, &PolicyContext::default());
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0], "Rule matched: drop description");
    }

    #[test]
    fn policy_softens_critical_match() {
        let specs = [spec("drop", r"(?i)drop\s+table", Severity::Critical)];
        let policy = PolicyContext::default().allow_dangerous_patterns(true);
        let result = Validator::new().apply_rules("drop table t", &specs, &policy);
        assert!(result.is_valid());
        assert_eq!(result.security_score(), Some(90));
    }
}
