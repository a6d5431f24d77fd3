use serde::Serialize;

use crate::result::ValidationResult;
use crate::validate::Verdict;

/// The parts of a result the human-readable output shows.
#[derive(Debug)]
pub struct Summary<'a> {
    pub kind: &'a str,
    pub valid: bool,
    pub errors: &'a [String],
    pub warnings: &'a [String],
    pub score: Option<u8>,
    pub sanitized: Option<String>,
}

impl<'a> Summary<'a> {
    pub fn of_verdict(kind: &'a str, verdict: &'a Verdict) -> Self {
        Self {
            kind,
            valid: verdict.is_valid(),
            errors: verdict.errors(),
            warnings: verdict.warnings(),
            score: verdict.security_score(),
            sanitized: verdict.sanitized_text(),
        }
    }

    pub fn of_result(kind: &'a str, result: &'a ValidationResult<String, impl Sized>) -> Self {
        Self {
            kind,
            valid: result.is_valid(),
            errors: result.errors(),
            warnings: result.warnings(),
            score: result.security_score(),
            sanitized: None,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let status = if self.valid { "valid" } else { "INVALID" };
        out.push_str(&format!("{}: {status}", self.kind));
        if let Some(score) = self.score {
            out.push_str(&format!(" (security score {score}/100)"));
        }
        out.push('\n');
        for error in self.errors {
            out.push_str(&format!("  error: {error}\n"));
        }
        for warning in self.warnings {
            out.push_str(&format!("  warning: {warning}\n"));
        }
        if let Some(sanitized) = &self.sanitized {
            out.push_str(&format!("  sanitized: {sanitized}\n"));
        }
        out
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
