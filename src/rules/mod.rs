pub mod code;
pub mod commit;
pub mod heuristics;
pub mod json;
pub mod path;

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{InputGuardError, Result};
use crate::sanitize::aho::SecretPrefixScanner;

pub use heuristics::LanguageHeuristic;

/// Upper bound on the compiled size of a single rule pattern.
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table entry for a built-in rule, compiled once by [`RuleRegistry`].
pub(crate) struct RuleDef {
    pub id: &'static str,
    pub pattern: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub penalty: u32,
}

/// A compiled detection rule: one category of risky content.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub penalty: u32,
    pattern: Regex,
}

impl Rule {
    /// Compile a rule. The regex is size-bounded so a pathological pattern
    /// fails here instead of blowing up at match time.
    pub fn compile(
        id: impl Into<String>,
        pattern: &str,
        description: impl Into<String>,
        severity: Severity,
        penalty: u32,
    ) -> Result<Self> {
        let id = id.into();
        let pattern = RegexBuilder::new(pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| InputGuardError::InvalidPattern {
                id: id.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            id,
            description: description.into(),
            severity,
            penalty,
            pattern,
        })
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    /// True if any of the given renderings of one input matches.
    pub fn is_match_any(&self, inputs: &[&str]) -> bool {
        inputs.iter().any(|input| self.pattern.is_match(input))
    }

    /// Number of non-overlapping matches in `input`.
    pub fn count(&self, input: &str) -> usize {
        self.pattern.find_iter(input).count()
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

pub(crate) fn compile_table(defs: &[RuleDef]) -> Vec<Rule> {
    defs.iter()
        .map(|def| {
            Rule::compile(
                def.id,
                def.pattern,
                def.description,
                def.severity,
                def.penalty,
            )
            .expect("built-in rule patterns should compile")
        })
        .collect()
}

/// A caller-supplied rule as written in YAML, compiled on use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    pub pattern: String,
    pub description: String,
    #[serde(default = "default_spec_severity")]
    pub severity: Severity,
    #[serde(default = "default_spec_penalty")]
    pub penalty: u32,
}

fn default_spec_severity() -> Severity {
    Severity::Medium
}
fn default_spec_penalty() -> u32 {
    10
}

impl RuleSpec {
    pub fn compile(&self) -> Result<Rule> {
        Rule::compile(
            self.id.clone(),
            &self.pattern,
            self.description.clone(),
            self.severity,
            self.penalty,
        )
    }

    /// Load a YAML list of rule specs.
    pub fn load_all(path: &Path) -> Result<Vec<Self>> {
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| InputGuardError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Immutable rule tables for every input domain.
///
/// Built once and shared read-only; holds no interior mutability, so a
/// single instance behind an `Arc` serves any number of threads.
#[derive(Debug)]
pub struct RuleRegistry {
    path_traversal: Vec<Rule>,
    executable_extension: Rule,
    code_threats: Vec<Rule>,
    commit_credentials: Vec<Rule>,
    commit_disclosure: Vec<Rule>,
    json_injection: Vec<Rule>,
    language_heuristics: Vec<LanguageHeuristic>,
    complexity: Vec<Rule>,
    conventional_commit: Regex,
    secret_prefixes: SecretPrefixScanner,
}

impl RuleRegistry {
    /// Build the registry from the built-in tables.
    pub fn builtin() -> Self {
        Self {
            path_traversal: path::rules(),
            executable_extension: path::executable_extension(),
            code_threats: code::rules(),
            commit_credentials: commit::credential_rules(),
            commit_disclosure: commit::disclosure_rules(),
            json_injection: json::rules(),
            language_heuristics: heuristics::rules(),
            complexity: crate::analysis::complexity::rules(),
            conventional_commit: commit::conventional_format(),
            secret_prefixes: SecretPrefixScanner::new(SecretPrefixScanner::default_prefixes()),
        }
    }

    /// Ordered traversal table; evaluation stops at the first hit.
    pub fn path_traversal(&self) -> &[Rule] {
        &self.path_traversal
    }

    pub fn executable_extension(&self) -> &Rule {
        &self.executable_extension
    }

    pub fn code_threats(&self) -> &[Rule] {
        &self.code_threats
    }

    pub fn commit_credentials(&self) -> &[Rule] {
        &self.commit_credentials
    }

    pub fn commit_disclosure(&self) -> &[Rule] {
        &self.commit_disclosure
    }

    pub fn json_injection(&self) -> &[Rule] {
        &self.json_injection
    }

    pub fn language_heuristics(&self) -> &[LanguageHeuristic] {
        &self.language_heuristics
    }

    /// Control-flow patterns counted by the complexity analyzer.
    pub fn complexity(&self) -> &[Rule] {
        &self.complexity
    }

    pub fn conventional_commit(&self) -> &Regex {
        &self.conventional_commit
    }

    pub fn secret_prefixes(&self) -> &SecretPrefixScanner {
        &self.secret_prefixes
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
