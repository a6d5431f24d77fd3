use serde::{Deserialize, Serialize};

use crate::result::{Assessment, ValidationResult};
use crate::sanitize::entropy::shannon_entropy;

use super::Validator;

/// Substrings that mark a key as a stand-in rather than a real credential.
const PLACEHOLDER_MARKERS: &[&str] = &["test", "dummy", "fake", "placeholder", "example", "xxxx"];

/// Bodies with less entropy than this (bits per byte) get a warning.
const MIN_KEY_ENTROPY: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[value(name = "openai")]
    OpenAi,
    Anthropic,
}

impl ApiProvider {
    pub fn name(&self) -> &'static str {
        match self {
            ApiProvider::OpenAi => "OpenAI",
            ApiProvider::Anthropic => "Anthropic",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            ApiProvider::OpenAi => "sk-",
            ApiProvider::Anthropic => "sk-ant-",
        }
    }

    /// Inclusive character bounds for a whole key.
    pub fn length_bounds(&self) -> (usize, usize) {
        match self {
            ApiProvider::OpenAi => (20, 200),
            ApiProvider::Anthropic => (40, 200),
        }
    }

    fn has_prefix(&self, key: &str) -> bool {
        match self {
            ApiProvider::OpenAi => key.starts_with("sk-") && !key.starts_with("sk-ant-"),
            ApiProvider::Anthropic => key.starts_with("sk-ant-"),
        }
    }
}

impl std::fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ApiProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "open-ai" => Ok(ApiProvider::OpenAi),
            "anthropic" => Ok(ApiProvider::Anthropic),
            other => Err(format!("unknown API provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyMetadata {
    pub provider: ApiProvider,
    pub length: usize,
    /// First few and last four characters; never the full key.
    pub masked: String,
}

pub type ApiKeyValidationResult = ValidationResult<String, ApiKeyMetadata>;

impl Validator {
    pub fn validate_api_key(&self, key: &str, provider: ApiProvider) -> ApiKeyValidationResult {
        let trimmed = key.trim();
        let length = trimmed.chars().count();
        let metadata = ApiKeyMetadata {
            provider,
            length,
            masked: mask_key(trimmed),
        };
        if trimmed.is_empty() {
            return Assessment::reject("API key must be a non-empty string", metadata);
        }

        let mut assessment = Assessment::scored();
        if trimmed.chars().any(char::is_whitespace) {
            assessment.error("API key must not contain whitespace", 30);
        }
        if !provider.has_prefix(trimmed) {
            assessment.error(
                format!("{provider} API keys must start with '{}'", provider.prefix()),
                50,
            );
        }
        let (min, max) = provider.length_bounds();
        if !(min..=max).contains(&length) {
            assessment.error(
                format!("{provider} API key length must be between {min} and {max} characters"),
                30,
            );
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            assessment.warning("API key contains unexpected characters", 10);
        }
        let lower = trimmed.to_ascii_lowercase();
        if PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m)) {
            assessment.warning("API key looks like a placeholder value", 20);
        }
        let body = trimmed.strip_prefix(provider.prefix()).unwrap_or(trimmed);
        if body.len() >= 16 && shannon_entropy(body) < MIN_KEY_ENTROPY {
            assessment.warning("API key has low randomness", 10);
        }

        assessment.finish(Some(trimmed.to_string()), metadata)
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
