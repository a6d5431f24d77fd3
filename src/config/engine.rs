use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InputGuardError, Result};
use crate::sanitize::SanitizeOptions;

/// Limits and lists that shape the validators. Loaded once, shared by
/// every call a [`crate::validate::Validator`] makes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Paths longer than this get a warning. Default: 260.
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,

    /// Globs for paths that warrant a warning when targeted.
    #[serde(default = "default_sensitive_paths")]
    pub sensitive_paths: Vec<String>,

    /// Default: 10.
    #[serde(default = "default_commit_min_length")]
    pub commit_min_length: usize,

    /// Default: 500.
    #[serde(default = "default_commit_max_length")]
    pub commit_max_length: usize,

    /// Depth limit used when the caller doesn't pass one. Default: 10.
    #[serde(default = "default_json_max_depth")]
    pub json_max_depth: usize,

    /// Node count above which JSON gets a warning. Default: 10 000.
    #[serde(default = "default_json_size_warning")]
    pub json_size_warning: usize,

    /// Code longer than this (in characters) is rejected outright.
    #[serde(default = "default_max_code_length")]
    pub max_code_length: usize,

    /// Default: 2048.
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,

    #[serde(default = "default_url_schemes")]
    pub allowed_url_schemes: Vec<String>,

    /// Sanitizer settings for generic user input.
    #[serde(default = "default_user_input")]
    pub user_input: SanitizeOptions,
}

fn default_max_path_length() -> usize {
    260
}
fn default_sensitive_paths() -> Vec<String> {
    vec![
        ".env*".into(),
        "**/.env*".into(),
        ".git/**".into(),
        "**/.git/**".into(),
        "**/.ssh/**".into(),
        "**/id_rsa*".into(),
        "**/*.pem".into(),
        "**/*.key".into(),
        "**/secrets/**".into(),
    ]
}
fn default_commit_min_length() -> usize {
    10
}
fn default_commit_max_length() -> usize {
    500
}
fn default_json_max_depth() -> usize {
    10
}
fn default_json_size_warning() -> usize {
    10_000
}
fn default_max_code_length() -> usize {
    1_000_000
}
fn default_max_url_length() -> usize {
    2048
}
fn default_url_schemes() -> Vec<String> {
    vec!["http".into(), "https".into()]
}
fn default_user_input() -> SanitizeOptions {
    SanitizeOptions {
        max_length: Some(10_000),
        ..SanitizeOptions::default()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_path_length: default_max_path_length(),
            sensitive_paths: default_sensitive_paths(),
            commit_min_length: default_commit_min_length(),
            commit_max_length: default_commit_max_length(),
            json_max_depth: default_json_max_depth(),
            json_size_warning: default_json_size_warning(),
            max_code_length: default_max_code_length(),
            max_url_length: default_max_url_length(),
            allowed_url_schemes: default_url_schemes(),
            user_input: default_user_input(),
        }
    }
}

impl EngineConfig {
    /// Load from YAML. Returns default if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        super::load_yaml_or_default(path)
    }

    /// Compile `sensitive_paths` into a matcher.
    pub fn compile_sensitive_paths(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.sensitive_paths {
            let glob = Glob::new(pattern).map_err(|e| InputGuardError::GlobPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| InputGuardError::GlobPattern {
            pattern: self.sensitive_paths.join(","),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventions() {
        let config = EngineConfig::default();
        assert_eq!(config.max_path_length, 260);
        assert_eq!(config.commit_min_length, 10);
        assert_eq!(config.commit_max_length, 500);
        assert_eq!(config.user_input.max_length, Some(10_000));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: EngineConfig = serde_yaml::from_str("json_max_depth: 3\n").unwrap();
        assert_eq!(config.json_max_depth, 3);
        assert_eq!(config.max_url_length, 2048);
        assert!(!config.sensitive_paths.is_empty());
    }

    #[test]
    fn sensitive_globs_compile_and_match() {
        let set = EngineConfig::default().compile_sensitive_paths().unwrap();
        assert!(set.is_match(".env.local"));
        assert!(set.is_match("config/.env"));
        assert!(set.is_match("home/u/.ssh/config"));
        assert!(!set.is_match("src/main.rs"));
    }

    #[test]
    fn bad_glob_is_reported() {
        let config = EngineConfig {
            sensitive_paths: vec!["a[".into()],
            ..EngineConfig::default()
        };
        assert!(config.compile_sensitive_paths().is_err());
    }
}
