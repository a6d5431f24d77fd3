//! Domain validators.
//!
//! Every validator is a method on [`Validator`] that takes raw input (and,
//! for the risk-scoring ones, a [`PolicyContext`]) and returns a typed
//! [`ValidationResult`](crate::result::ValidationResult). Bad input is never
//! an `Err`.

pub mod api_key;
pub mod code;
pub mod commit;
pub mod config_object;
pub mod custom;
pub mod json;
pub mod language;
pub mod path;
pub mod url;
pub mod user_input;

use std::path::PathBuf;
use std::sync::Arc;

use globset::GlobSet;
use serde::Serialize;

use crate::config::{EngineConfig, PolicyContext};
use crate::error::Result;
use crate::language::Language;
use crate::rules::RuleRegistry;
use crate::sanitize::entropy::EntropyDetector;
use crate::sanitize::SanitizePipeline;

pub use api_key::{ApiKeyMetadata, ApiKeyValidationResult, ApiProvider};
pub use code::{CodeMetadata, CodeValidationResult};
pub use commit::{CommitMetadata, CommitValidationResult};
pub use config_object::{ConfigMetadata, ConfigValidationResult};
pub use custom::{RuleSetMetadata, RuleSetValidationResult};
pub use json::{strip_dangerous_keys, JsonMetadata, JsonValidationResult};
pub use language::{LanguageMetadata, LanguageValidationResult};
pub use path::{normalize_path, sanitize_path, PathMetadata, PathValidationResult};
pub use url::{UrlMetadata, UrlValidationResult};
pub use user_input::{UserInputMetadata, UserInputValidationResult};

/// The input domains understood by [`Validator::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Path,
    CodeContent { language: Option<Language> },
    CommitMessage,
    Language,
    Url,
    /// A JSON object holding application settings.
    Config,
    UserInput,
    ApiKey(ApiProvider),
    Json { max_depth: Option<usize> },
}

impl InputKind {
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Path => "path",
            InputKind::CodeContent { .. } => "code",
            InputKind::CommitMessage => "commit",
            InputKind::Language => "language",
            InputKind::Url => "url",
            InputKind::Config => "config",
            InputKind::UserInput => "user_input",
            InputKind::ApiKey(_) => "api_key",
            InputKind::Json { .. } => "json",
        }
    }
}

/// Result of [`Validator::validate`], one variant per input domain.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Path(PathValidationResult),
    Code(CodeValidationResult),
    Commit(CommitValidationResult),
    Language(LanguageValidationResult),
    Url(UrlValidationResult),
    Config(ConfigValidationResult),
    UserInput(UserInputValidationResult),
    ApiKey(ApiKeyValidationResult),
    Json(JsonValidationResult),
}

macro_rules! each_verdict {
    ($verdict:expr, $r:ident => $body:expr) => {
        match $verdict {
            Verdict::Path($r) => $body,
            Verdict::Code($r) => $body,
            Verdict::Commit($r) => $body,
            Verdict::Language($r) => $body,
            Verdict::Url($r) => $body,
            Verdict::Config($r) => $body,
            Verdict::UserInput($r) => $body,
            Verdict::ApiKey($r) => $body,
            Verdict::Json($r) => $body,
        }
    };
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        each_verdict!(self, r => r.is_valid())
    }

    pub fn errors(&self) -> &[String] {
        each_verdict!(self, r => r.errors())
    }

    pub fn warnings(&self) -> &[String] {
        each_verdict!(self, r => r.warnings())
    }

    pub fn security_score(&self) -> Option<u8> {
        each_verdict!(self, r => r.security_score())
    }

    /// The sanitized value rendered as text, if there is one.
    pub fn sanitized_text(&self) -> Option<String> {
        match self {
            Verdict::Path(r) => r.sanitized_value().cloned(),
            Verdict::Code(r) => r.sanitized_value().cloned(),
            Verdict::Commit(r) => r.sanitized_value().cloned(),
            Verdict::Language(r) => r.sanitized_value().map(|l| l.to_string()),
            Verdict::Url(r) => r.sanitized_value().cloned(),
            Verdict::Config(r) => r.sanitized_value().map(|v| v.to_string()),
            Verdict::UserInput(r) => r.sanitized_value().cloned(),
            Verdict::ApiKey(r) => r.sanitized_value().cloned(),
            Verdict::Json(r) => r.sanitized_value().map(|v| v.to_string()),
        }
    }
}

/// Runs the domain validators against one shared rule registry.
///
/// Holds no mutable state; a single instance may serve concurrent callers.
pub struct Validator {
    registry: Arc<RuleRegistry>,
    config: EngineConfig,
    sensitive_paths: GlobSet,
    redactor: SanitizePipeline,
    entropy: EntropyDetector,
    workspace_root: Option<PathBuf>,
}

impl Validator {
    /// Built-in rules and default limits.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let sensitive_paths = config
            .compile_sensitive_paths()
            .expect("default sensitive path globs should compile");
        Self::assemble(Arc::new(RuleRegistry::builtin()), config, sensitive_paths)
    }

    /// Built-in rules with caller-supplied limits.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Self::with_registry(Arc::new(RuleRegistry::builtin()), config)
    }

    /// Share an already-built registry.
    pub fn with_registry(registry: Arc<RuleRegistry>, config: EngineConfig) -> Result<Self> {
        let sensitive_paths = config.compile_sensitive_paths()?;
        Ok(Self::assemble(registry, config, sensitive_paths))
    }

    fn assemble(registry: Arc<RuleRegistry>, config: EngineConfig, sensitive_paths: GlobSet) -> Self {
        Self {
            registry,
            config,
            sensitive_paths,
            redactor: SanitizePipeline::redaction(),
            entropy: EntropyDetector::default(),
            workspace_root: None,
        }
    }

    /// Paths must stay inside `root` once normalized.
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// Validate `input` as `kind`.
    pub fn validate(&self, kind: InputKind, input: &str, policy: &PolicyContext) -> Verdict {
        let verdict = match kind {
            InputKind::Path => Verdict::Path(self.validate_path(input, policy)),
            InputKind::CodeContent { language } => {
                Verdict::Code(self.validate_code_content(input, language, policy))
            }
            InputKind::CommitMessage => Verdict::Commit(self.validate_commit_message(input, policy)),
            InputKind::Language => Verdict::Language(self.validate_language(input)),
            InputKind::Url => Verdict::Url(self.validate_url(input)),
            InputKind::Config => Verdict::Config(self.validate_config_str(input, policy)),
            InputKind::UserInput => Verdict::UserInput(self.validate_user_input(input, None)),
            InputKind::ApiKey(provider) => Verdict::ApiKey(self.validate_api_key(input, provider)),
            InputKind::Json { max_depth } => {
                Verdict::Json(self.validate_json(input, max_depth, policy))
            }
        };
        tracing::debug!(
            kind = kind.name(),
            valid = verdict.is_valid(),
            errors = verdict.errors().len(),
            warnings = verdict.warnings().len(),
            score = ?verdict.security_score(),
            "validated input"
        );
        verdict
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
