use serde::Serialize;

use crate::config::PolicyContext;
use crate::result::{Assessment, ValidationResult};
use crate::sanitize::strip_control_chars;

use super::Validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetadata {
    pub original_length: usize,
    /// Percent-decoded, normalized form used for the workspace check. Only
    /// set when decoding changed the path.
    pub decoded: Option<String>,
    pub extension: Option<String>,
    pub is_absolute: bool,
    /// Number of segments after normalization.
    pub depth: usize,
    pub hidden: bool,
}

pub type PathValidationResult = ValidationResult<String, PathMetadata>;

impl Validator {
    pub fn validate_path(&self, path: &str, policy: &PolicyContext) -> PathValidationResult {
        let trimmed = path.trim();
        let mut metadata = PathMetadata {
            original_length: path.chars().count(),
            decoded: None,
            extension: None,
            is_absolute: false,
            depth: 0,
            hidden: false,
        };
        if trimmed.is_empty() {
            return Assessment::reject("Path must be a non-empty string", metadata);
        }

        let registry = self.registry();
        let mut assessment = Assessment::scored();

        // Null bytes only show in the raw text; `./~` only after normalization.
        let stripped = strip_control_chars(trimmed);
        let sanitized = sanitize_path(trimmed);
        let renderings = [trimmed, stripped.as_str(), sanitized.as_str()];

        if let Some(rule) = registry
            .path_traversal()
            .iter()
            .find(|r| r.is_match_any(&renderings))
        {
            assessment.rule_match(rule, "Path contains dangerous pattern", true, policy);
        }
        if registry.executable_extension().is_match_any(&renderings) {
            assessment.rule_match(
                registry.executable_extension(),
                "Suspicious path",
                false,
                policy,
            );
        }

        // The remaining checks look at the real target, so `%2e%2e/`
        // resolves before containment is decided.
        let decoded = percent_decode_fully(&sanitized);
        let target = normalize_path(&decoded);
        let absolute = is_absolute(&target);
        if target != sanitized {
            metadata.decoded = Some(target.clone());
        }

        if let Some(root) = self.workspace_root() {
            let root = normalize_path(&root.to_string_lossy());
            let resolved = if absolute {
                target.clone()
            } else {
                normalize_path(&format!("{root}/{target}"))
            };
            if !is_within(&resolved, &root) {
                tracing::debug!(path = %resolved, root = %root, "path escapes workspace root");
                assessment.blocking(
                    format!("Path resolves outside the workspace root: {resolved}"),
                    40,
                    policy,
                );
            }
        }

        let max = self.config().max_path_length;
        if trimmed.chars().count() > max {
            assessment.warning(format!("Path exceeds recommended length of {max} characters"), 5);
        }

        let segments: Vec<&str> = target
            .split('/')
            .filter(|s| !s.is_empty() && !is_drive(s))
            .collect();
        let hidden = segments
            .iter()
            .any(|s| s.starts_with('.') && *s != "." && *s != "..");
        if hidden {
            assessment.warning("Path contains a hidden file or directory", 5);
        }

        if self.sensitive_paths.is_match(target.trim_start_matches('/')) {
            assessment.warning("Path targets a sensitive location", 10);
        }

        metadata.extension = std::path::Path::new(&target)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        metadata.is_absolute = absolute;
        metadata.depth = segments.len();
        metadata.hidden = hidden;
        assessment.finish(Some(sanitized), metadata)
    }
}

/// The value a path validates to: control characters stripped, trimmed and
/// lexically normalized, repeated until nothing changes. Percent-encoding is
/// left alone.
pub fn sanitize_path(path: &str) -> String {
    let mut current = normalize_path(strip_control_chars(path).trim());
    loop {
        let next = normalize_path(current.trim());
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Decode until no `%XX` escape is left, so `%252e` ends up as `.`.
fn percent_decode_fully(input: &str) -> String {
    let mut current = input.to_string();
    while current.contains('%') {
        let next = match urlencoding::decode(&current) {
            Ok(next) if next != current => next.into_owned(),
            _ => break,
        };
        current = next;
    }
    current
}

fn is_drive(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn is_absolute(normalized: &str) -> bool {
    normalized.starts_with('/')
        || (normalized.get(..2).is_some_and(is_drive)
            && normalized.get(2..).is_some_and(|rest| rest.starts_with('/')))
}

fn is_within(path: &str, root: &str) -> bool {
    if root == "/" {
        return path.starts_with('/');
    }
    path == root || path.strip_prefix(root).is_some_and(|rest| rest.starts_with('/'))
}

/// Lexical normalization: `\` becomes `/`, `.` segments and repeated
/// separators are dropped, and `..` pops the previous segment. A `..` that
/// would climb above an absolute root is discarded; on a relative path it
/// is kept. The filesystem is never consulted.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let (drive, rest) = match (unified.get(..2), unified.get(2..)) {
        (Some(head), Some(rest)) if is_drive(head) && (rest.is_empty() || rest.starts_with('/')) => {
            (head, rest)
        }
        _ => ("", unified.as_str()),
    };
    let absolute = rest.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("{drive}/{joined}")
    } else if joined.is_empty() {
        if drive.is_empty() {
            ".".to_string()
        } else {
            drive.to_string()
        }
    } else {
        format!("{drive}{joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new()
    }

    #[test]
    fn normalizes_lexically() {
        assert_eq!(normalize_path("a/./b//c/../d"), "a/b/d");
        assert_eq!(normalize_path("/a/../../b"), "/b");
        assert_eq!(normalize_path("../a"), "../a");
        assert_eq!(normalize_path("C:\\Users\\x\\..\\y"), "C:/Users/y");
        assert_eq!(normalize_path("./"), ".");
    }

    #[test]
    fn traversal_is_an_error() {
        let result = validator().validate_path("../../../etc/passwd", &PolicyContext::default());
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("dangerous pattern"));
        assert_eq!(result.errors().len(), 1, "first traversal hit short-circuits");
    }

    #[test]
    fn clean_relative_path() {
        let result = validator().validate_path("src/lib.rs", &PolicyContext::default());
        assert!(result.is_valid());
        assert_eq!(result.security_score(), Some(100));
        assert_eq!(result.metadata().extension.as_deref(), Some("rs"));
        assert_eq!(result.metadata().depth, 2);
    }

    #[test]
    fn executable_extension_is_a_warning() {
        let result = validator().validate_path("bin/setup.exe", &PolicyContext::default());
        assert!(result.is_valid());
        assert!(result.warnings().iter().any(|w| w.contains("executable")));
        assert_eq!(result.security_score(), Some(80));
    }

    #[test]
    fn hidden_and_sensitive_paths_warn() {
        let result = validator().validate_path("config/.env", &PolicyContext::default());
        assert!(result.is_valid());
        assert!(result.metadata().hidden);
        assert!(result.warnings().iter().any(|w| w.contains("hidden")));
        assert!(result.warnings().iter().any(|w| w.contains("sensitive")));
    }

    #[test]
    fn long_path_warns() {
        let long = "a/".repeat(200);
        let result = validator().validate_path(&long, &PolicyContext::default());
        assert!(result.is_valid());
        assert!(result.warnings().iter().any(|w| w.contains("260")));
    }

    #[test]
    fn absolute_path_outside_workspace() {
        let v = validator().with_workspace_root("/home/dev/project");
        let policy = PolicyContext::default();
        assert!(v.validate_path("/home/dev/project/src/main.rs", &policy).is_valid());
        let outside = v.validate_path("/etc/hosts", &policy);
        assert!(!outside.is_valid());
        assert!(outside.errors()[0].contains("outside the workspace"));
    }

    #[test]
    fn prefix_sibling_is_not_inside() {
        let v = validator().with_workspace_root("/srv/app");
        assert!(!v.validate_path("/srv/app2/x", &PolicyContext::default()).is_valid());
    }

    #[test]
    fn policy_downgrades_traversal() {
        let policy = PolicyContext::default().allow_dangerous_patterns(true);
        let result = validator().validate_path("../notes.txt", &policy);
        assert!(result.is_valid());
        assert_eq!(result.security_score(), Some(80));
    }

    #[test]
    fn empty_path_rejected() {
        let result = validator().validate_path("   ", &PolicyContext::default());
        assert!(!result.is_valid());
        assert_eq!(result.security_score(), Some(0));
    }

    #[test]
    fn sanitized_value_keeps_percent_encoding() {
        let v = validator();
        let policy = PolicyContext::default();
        let once = v.validate_path("a%2525b", &policy);
        assert_eq!(once.sanitized_value().map(String::as_str), Some("a%2525b"));
        assert_eq!(once.metadata().decoded.as_deref(), Some("a%b"));
        let twice = v.validate_path(once.sanitized_value().unwrap(), &policy);
        assert_eq!(twice.sanitized_value(), once.sanitized_value());
    }

    #[test]
    fn sanitize_path_reaches_a_fixed_point() {
        assert_eq!(sanitize_path("a/ \u{200B}"), "a");
        assert_eq!(sanitize_path("./ a"), "a");
        assert_eq!(sanitize_path("\u{200B}"), ".");
        assert_eq!(sanitize_path("src//lib.rs"), "src/lib.rs");
    }

    #[test]
    fn zero_width_split_traversal_is_caught() {
        let result = validator().validate_path(".\u{200B}./.\u{200B}./etc/passwd", &PolicyContext::default());
        assert!(!result.is_valid());
        assert!(result.errors()[0].contains("dangerous pattern"));
        assert_eq!(result.sanitized_value().map(String::as_str), Some("../../etc/passwd"));
    }

    #[test]
    fn encoded_traversal_resolves_for_containment() {
        let v = validator().with_workspace_root("/srv/app");
        let policy = PolicyContext::default().allow_dangerous_patterns(true);
        let result = v.validate_path("%2e%2e/%2e%2e/etc/passwd", &policy);
        assert_eq!(result.metadata().decoded.as_deref(), Some("../../etc/passwd"));
        assert!(result.warnings().iter().any(|w| w.contains("outside the workspace root: /etc/passwd")));
    }

    #[test]
    fn plain_path_has_no_decoded_form() {
        let result = validator().validate_path("docs/guide.md", &PolicyContext::default());
        assert_eq!(result.metadata().decoded, None);
    }

    #[test]
    fn null_byte_caught_first() {
        let result = validator().validate_path("file.txt\0.jpg", &PolicyContext::default());
        assert!(result.errors()[0].contains("null byte"));
    }
}
