use std::path::PathBuf;

/// Operator-level failures: loading configuration or compiling caller rules.
///
/// Bad *input* never surfaces here; validators report it through
/// [`crate::result::ValidationResult`].
#[derive(Debug, thiserror::Error)]
pub enum InputGuardError {
    #[error("invalid rule pattern {id}: {reason}")]
    InvalidPattern { id: String, reason: String },

    #[error("config parse error in {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("glob pattern error: {pattern}: {reason}")]
    GlobPattern { pattern: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InputGuardError>;
