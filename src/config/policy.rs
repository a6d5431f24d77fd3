use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;

/// Per-call policy that changes how rule matches are penalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyContext {
    /// Downgrade would-be errors to warnings at half penalty.
    #[serde(default)]
    pub allow_dangerous_patterns: bool,

    /// Complexity above this adds a warning.
    #[serde(default)]
    pub max_complexity: Option<u32>,

    /// Extra sanitization passes (comment stripping for code).
    #[serde(default)]
    pub strict_mode: bool,

    /// Caller-level allow-list. Passed through, never interpreted here.
    #[serde(default)]
    pub trusted_sources: BTreeSet<String>,
}

impl PolicyContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a policy from YAML. Returns default if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        super::load_yaml_or_default(path)
    }

    pub fn allow_dangerous_patterns(mut self, allow: bool) -> Self {
        self.allow_dangerous_patterns = allow;
        self
    }

    pub fn max_complexity(mut self, max: u32) -> Self {
        self.max_complexity = Some(max);
        self
    }

    pub fn strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn trusted_source(mut self, source: impl Into<String>) -> Self {
        self.trusted_sources.insert(source.into());
        self
    }

    pub fn is_trusted(&self, source: &str) -> bool {
        self.trusted_sources.contains(source)
    }
}
