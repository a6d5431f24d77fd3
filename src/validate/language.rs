use serde::Serialize;

use crate::language::Language;
use crate::result::{Assessment, ValidationResult};

use super::Validator;

const MAX_IDENTIFIER_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageMetadata {
    pub input: String,
    /// The input was an alias (`py`, `c++`) rather than the canonical name.
    pub alias: bool,
}

pub type LanguageValidationResult = ValidationResult<Language, LanguageMetadata>;

impl Validator {
    /// Resolve a language identifier to its canonical form. Format check only.
    pub fn validate_language(&self, name: &str) -> LanguageValidationResult {
        let trimmed = name.trim();
        let mut metadata = LanguageMetadata {
            input: trimmed.to_string(),
            alias: false,
        };
        if trimmed.is_empty() {
            return Assessment::reject("Language identifier must be a non-empty string", metadata);
        }

        let mut assessment = Assessment::unscored();
        if trimmed.len() > MAX_IDENTIFIER_LEN
            || !trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '.' | '_'))
        {
            assessment.error("Language identifier contains invalid characters", 0);
            return assessment.finish(None, metadata);
        }

        match Language::from_alias(trimmed) {
            Some(language) => {
                metadata.alias = !trimmed.eq_ignore_ascii_case(language.as_str());
                assessment.finish(Some(language), metadata)
            }
            None => {
                assessment.error(format!("Unsupported language: {trimmed}"), 0);
                assessment.finish(None, metadata)
            }
        }
    }
}
