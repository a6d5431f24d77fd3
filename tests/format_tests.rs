//! Language, URL, user input and configuration object validation.

use inputguard::sanitize::SanitizeOptions;
use inputguard::{InputKind, Language, PolicyContext, Validator, Verdict};
use serde_json::json;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[test]
fn language_aliases_resolve() {
    let validator = Validator::new();
    for (input, expected) in [
        ("py", Language::Python),
        ("c++", Language::Cpp),
        ("JS", Language::JavaScript),
        ("bash", Language::Shell),
    ] {
        let result = validator.validate_language(input);
        assert_eq!(result.sanitized_value(), Some(&expected), "input: {input}");
    }
}

#[test]
fn language_rejects_injection_characters() {
    let result = Validator::new().validate_language("python; rm -rf /");
    assert!(!result.is_valid());
    assert!(result.errors()[0].contains("invalid characters"));
}

// ---------------------------------------------------------------------------
// URL
// ---------------------------------------------------------------------------

#[test]
fn javascript_url_is_rejected() {
    let result = Validator::new().validate_url("javascript:alert(1)");
    assert!(!result.is_valid());
    assert_eq!(result.sanitized_value(), None);
}

#[test]
fn url_warnings_do_not_invalidate() {
    let result = Validator::new().validate_url("http://user:pw@127.0.0.1:8080/admin");
    assert!(result.is_valid());
    assert_eq!(
        result.warnings(),
        [
            "URL does not use HTTPS",
            "URL contains embedded credentials",
            "URL points to a loopback address",
        ]
    );
    assert_eq!(result.security_score(), None);
}

#[test]
fn url_without_scheme_is_rejected() {
    let result = Validator::new().validate_url("example.com/path");
    assert!(!result.is_valid());
    assert!(result.errors()[0].contains("scheme"));
}

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

#[test]
fn script_tag_removed_from_user_input() {
    let result = Validator::new().validate_user_input("<script>alert(1)</script>hello", None);
    assert!(result.is_valid());
    let sanitized = result.sanitized_value().unwrap();
    assert!(!sanitized.contains("<script>"));
    assert!(result.metadata().markup_removed);
}

#[test]
fn empty_user_input_is_valid() {
    let result = Validator::new().validate_user_input("", None);
    assert!(result.is_valid());
    assert_eq!(result.sanitized_value().map(String::as_str), Some(""));
    assert_eq!(result.security_score(), Some(100));
}

#[test]
fn caller_options_override_config() {
    let options = SanitizeOptions {
        allow_markup: true,
        ..SanitizeOptions::default()
    };
    let result = Validator::new().validate_user_input("<b>bold</b>", Some(&options));
    assert_eq!(result.sanitized_value().map(String::as_str), Some("<b>bold</b>"));
    assert!(result.warnings().is_empty());
}

// ---------------------------------------------------------------------------
// Configuration objects
// ---------------------------------------------------------------------------

#[test]
fn config_fields_checked_by_role() {
    let config = json!({
        "name": "svc",
        "dataDir": "../../var/lib",
        "upstream": { "baseUrl": "javascript:alert(1)" },
    });
    let result = Validator::new().validate_config(&config, &PolicyContext::default());
    assert!(!result.is_valid());
    assert_eq!(result.metadata().checked_fields, ["dataDir", "upstream.baseUrl"]);
    assert!(result.errors().iter().any(|e| e.starts_with("upstream.baseUrl:")));
}

#[test]
fn config_dangerous_keys_stripped() {
    let policy = PolicyContext::default().allow_dangerous_patterns(true);
    let config = json!({ "theme": "dark", "__proto__": { "isAdmin": true } });
    let result = Validator::new().validate_config(&config, &policy);
    assert!(result.is_valid());
    assert_eq!(result.sanitized_value(), Some(&json!({ "theme": "dark" })));
}

#[test]
fn config_kind_parses_json_text() {
    let verdict = Validator::new().validate(InputKind::Config, "[1, 2]", &PolicyContext::default());
    assert!(matches!(verdict, Verdict::Config(_)));
    assert!(!verdict.is_valid());
    assert_eq!(verdict.security_score(), Some(0));
}
