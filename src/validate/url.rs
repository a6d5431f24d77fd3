use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::result::{Assessment, ValidationResult};

use super::Validator;

/// Schemes that can execute or read local content when followed.
const FORBIDDEN_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript"];

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme pattern should compile")
});

/// `scheme://[userinfo@]host[:port][/path|?query|#fragment]`
static AUTHORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?:([^/?#@]*)@)?(\[[0-9A-Fa-f:.]+\]|[^/?#:\[\]]+)(?::(\d+))?(?:[/?#].*)?$")
        .expect("authority pattern should compile")
});

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.?$")
        .expect("hostname pattern should compile")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMetadata {
    pub length: usize,
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub type UrlValidationResult = ValidationResult<String, UrlMetadata>;

impl Validator {
    /// Format and scheme checks for a URL. Unscored.
    pub fn validate_url(&self, url: &str) -> UrlValidationResult {
        let trimmed = url.trim();
        let mut metadata = UrlMetadata {
            length: trimmed.chars().count(),
            scheme: None,
            host: None,
            port: None,
        };
        if trimmed.is_empty() {
            return Assessment::reject("URL must be a non-empty string", metadata);
        }

        let mut assessment = Assessment::unscored();
        let max = self.config().max_url_length;
        if metadata.length > max {
            assessment.error(format!("URL exceeds maximum length of {max} characters"), 0);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            assessment.error("URL must not contain whitespace or control characters", 0);
        }

        let Some(scheme) = SCHEME
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_ascii_lowercase())
        else {
            assessment.error("URL must include a scheme (e.g. https://)", 0);
            return assessment.finish(None, metadata);
        };
        metadata.scheme = Some(scheme.clone());

        if FORBIDDEN_SCHEMES.contains(&scheme.as_str()) {
            assessment.error(format!("URL scheme '{scheme}' is not allowed"), 0);
            return assessment.finish(None, metadata);
        }
        let allowed = &self.config().allowed_url_schemes;
        if !allowed.iter().any(|s| s.eq_ignore_ascii_case(&scheme)) {
            assessment.error(
                format!(
                    "URL scheme '{scheme}' is not allowed (expected one of: {})",
                    allowed.join(", ")
                ),
                0,
            );
        }

        let Some(caps) = AUTHORITY.captures(trimmed) else {
            assessment.error("URL has a missing or malformed host", 0);
            return assessment.finish(None, metadata);
        };
        let host = caps.get(2).map_or("", |m| m.as_str()).to_ascii_lowercase();
        let ipv4 = host.parse::<Ipv4Addr>().ok();
        let bracketed = host.starts_with('[');
        if ipv4.is_none() && !bracketed && !HOSTNAME.is_match(&host) {
            assessment.error(format!("URL host '{host}' is not a valid hostname"), 0);
        }
        if let Some(port) = caps.get(3) {
            match port.as_str().parse::<u16>() {
                Ok(port) => metadata.port = Some(port),
                Err(_) => assessment.error("URL port is out of range", 0),
            }
        }

        if scheme == "http" {
            assessment.warning("URL does not use HTTPS", 0);
        }
        if caps.get(1).is_some() {
            assessment.warning("URL contains embedded credentials", 0);
        }
        let loopback = host == "localhost"
            || host == "[::1]"
            || ipv4.is_some_and(|ip| ip.is_loopback() || ip.is_unspecified());
        if loopback {
            assessment.warning("URL points to a loopback address", 0);
        } else if ipv4.is_some() || bracketed {
            assessment.warning("URL uses an IP address instead of a hostname", 0);
        }

        metadata.host = Some(host);
        assessment.finish(Some(trimmed.to_string()), metadata)
    }
}
