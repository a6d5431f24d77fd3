use serde::Serialize;

use crate::result::{Assessment, ValidationResult};
use crate::sanitize::{self, text::contains_markup, strip_control_chars, SanitizeOptions};

use super::Validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputMetadata {
    pub original_length: usize,
    pub sanitized_length: usize,
    pub control_chars_removed: bool,
    pub markup_removed: bool,
    pub truncated: bool,
}

pub type UserInputValidationResult = ValidationResult<String, UserInputMetadata>;

impl Validator {
    /// Sanitize free-form text. Empty input is valid; everything the
    /// sanitizer had to change is reported as a warning.
    ///
    /// `options` defaults to the configured `user_input` options.
    pub fn validate_user_input(
        &self,
        input: &str,
        options: Option<&SanitizeOptions>,
    ) -> UserInputValidationResult {
        let options = options.unwrap_or(&self.config().user_input);
        let mut assessment = Assessment::scored();

        let control_chars_removed =
            options.remove_control_chars && strip_control_chars(input) != input;
        if control_chars_removed {
            assessment.warning("Control characters were removed from input", 10);
        }
        let markup_removed = !options.allow_markup && contains_markup(input);
        if markup_removed {
            assessment.warning("Markup was removed from input", 15);
        }

        let untruncated = sanitize::sanitize(
            input,
            &SanitizeOptions {
                max_length: None,
                ..options.clone()
            },
        );
        let sanitized = sanitize::sanitize(input, options);
        let truncated = sanitized.chars().count() < untruncated.chars().count();
        if let (true, Some(max)) = (truncated, options.max_length) {
            assessment.warning(format!("Input was truncated to {max} characters"), 5);
        }

        let metadata = UserInputMetadata {
            original_length: input.chars().count(),
            sanitized_length: sanitized.chars().count(),
            control_chars_removed,
            markup_removed,
            truncated,
        };
        assessment.finish(Some(sanitized), metadata)
    }
}
