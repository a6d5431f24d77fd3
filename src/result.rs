//! The verdict shape shared by every validator.
//!
//! `ValidationResult` has no public constructor; it is produced by
//! [`Assessment::finish`] or [`Assessment::reject`], which keeps
//! `is_valid == errors.is_empty()` and the score clamp true by construction.

use serde::Serialize;

use crate::config::PolicyContext;
use crate::rules::Rule;

pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult<V, M> {
    is_valid: bool,
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sanitized_value: Option<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_score: Option<u8>,
    metadata: M,
}

impl<V, M> ValidationResult<V, M> {
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn sanitized_value(&self) -> Option<&V> {
        self.sanitized_value.as_ref()
    }

    pub fn into_sanitized_value(self) -> Option<V> {
        self.sanitized_value
    }

    /// 0-100, 100 meaning nothing risky was found. `None` for pure format checks.
    pub fn security_score(&self) -> Option<u8> {
        self.security_score
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }
}

/// Accumulates findings for one validation call.
#[derive(Debug, Clone, Default)]
pub struct Assessment {
    errors: Vec<String>,
    warnings: Vec<String>,
    penalty: u32,
    scored: bool,
}

impl Assessment {
    /// Findings that produce a security score.
    pub fn scored() -> Self {
        Self {
            scored: true,
            ..Self::default()
        }
    }

    /// Findings for format-only checks (no score).
    pub fn unscored() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>, penalty: u32) {
        self.errors.push(message.into());
        self.penalty = self.penalty.saturating_add(penalty);
    }

    pub fn warning(&mut self, message: impl Into<String>, penalty: u32) {
        self.warnings.push(message.into());
        self.penalty = self.penalty.saturating_add(penalty);
    }

    /// Record a blocking finding: an error with the full penalty, or, when
    /// the policy allows dangerous patterns, a warning at half penalty.
    pub fn blocking(&mut self, message: impl Into<String>, penalty: u32, policy: &PolicyContext) {
        let message = message.into();
        if policy.allow_dangerous_patterns {
            self.warning(format!("{message} (allowed by policy)"), penalty / 2);
        } else {
            self.error(message, penalty);
        }
    }

    /// Record a rule match with `label` as message prefix. `blocking`
    /// selects [`Self::blocking`]; otherwise the match is a full-penalty warning.
    pub fn rule_match(&mut self, rule: &Rule, label: &str, blocking: bool, policy: &PolicyContext) {
        let message = format!("{label}: {}", rule.description);
        if blocking {
            self.blocking(message, rule.penalty, policy);
        } else {
            self.warning(message, rule.penalty);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Total penalty so far.
    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// `max(0, 100 - penalty)`.
    pub fn score(&self) -> u8 {
        let score = MAX_SCORE.saturating_sub(self.penalty).min(MAX_SCORE);
        u8::try_from(score).unwrap_or(0)
    }

    /// Fold another assessment's findings into this one, prefixing messages.
    pub fn absorb(&mut self, prefix: &str, other: Assessment) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{prefix}: {e}")));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{prefix}: {w}")));
        self.penalty = self.penalty.saturating_add(other.penalty);
    }

    pub fn finish<V, M>(self, sanitized_value: Option<V>, metadata: M) -> ValidationResult<V, M> {
        let security_score = self.scored.then(|| self.score());
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            sanitized_value,
            security_score,
            metadata,
        }
    }

    /// Guard failure: a single error and a zero score.
    pub fn reject<V, M>(message: impl Into<String>, metadata: M) -> ValidationResult<V, M> {
        ValidationResult {
            is_valid: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
            sanitized_value: None,
            security_score: Some(0),
            metadata,
        }
    }
}
