//! Input validation and security-risk scoring.
//!
//! Untrusted strings (paths, code, commit messages, API keys, JSON, URLs,
//! free text) go in; a typed [`ValidationResult`] with validity, a
//! sanitized value, warnings and a 0-100 security score comes out.
//!
//! ```
//! use inputguard::{PolicyContext, Validator};
//!
//! let validator = Validator::new();
//! let result = validator.validate_path("../../../etc/passwd", &PolicyContext::default());
//! assert!(!result.is_valid());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod result;
pub mod rules;
pub mod sanitize;
pub mod validate;

pub use config::{EngineConfig, PolicyContext};
pub use error::{InputGuardError, Result};
pub use language::Language;
pub use result::{Assessment, ValidationResult};
pub use rules::{Rule, RuleRegistry, RuleSpec, Severity};
pub use sanitize::{sanitize, sanitize_html, SanitizeOptions};
pub use validate::{ApiProvider, InputKind, Validator, Verdict};
