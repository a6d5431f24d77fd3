//! CLI integration tests using assert_cmd to exercise the actual binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn inputguard() -> Command {
    Command::cargo_bin("inputguard").unwrap()
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[test]
fn cli_valid_input_exits_zero() {
    inputguard()
        .args(["path", "src/lib.rs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path: valid (security score 100/100)"));
}

#[test]
fn cli_invalid_input_exits_one() {
    inputguard()
        .args(["path", "../../../etc/passwd"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("path: INVALID"))
        .stdout(predicate::str::contains("error: Path contains dangerous pattern"));
}

#[test]
fn cli_unreadable_file_exits_two() {
    inputguard()
        .args(["commit", "--file", "/nonexistent/COMMIT_EDITMSG"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read /nonexistent/COMMIT_EDITMSG"));
}

#[test]
fn cli_unknown_provider_is_a_usage_error() {
    inputguard()
        .args(["api-key", "--provider", "cohere", "sk-whatever"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ---------------------------------------------------------------------------
// Input sources
// ---------------------------------------------------------------------------

#[test]
fn cli_reads_stdin() {
    inputguard()
        .arg("code")
        .write_stdin("import os\nos.system('rm -rf /')\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("os-level command execution"));
}

#[test]
fn cli_commit_hook_file_ignores_git_comments() {
    let tmp = TempDir::new().unwrap();
    let msg = tmp.path().join("COMMIT_EDITMSG");
    fs::write(
        &msg,
        "feat(cli): add json output\n\n# Please enter the commit message for your changes.\n# password=hunter2\n",
    )
    .unwrap();

    inputguard()
        .arg("commit")
        .arg("--file")
        .arg(&msg)
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Output formats
// ---------------------------------------------------------------------------

#[test]
fn cli_json_output_is_parseable() {
    let output = inputguard()
        .args(["--json", "json", "--max-depth", "2", r#"{"a":{"b":{"c":1}}}"#])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["kind"], "json");
    assert_eq!(value["isValid"], false);
    assert_eq!(value["metadata"]["depth"], 3);
}

#[test]
fn cli_sanitize_prints_clean_text() {
    inputguard()
        .args(["sanitize", "<b>hello</b>   world"])
        .assert()
        .success()
        .stdout("hello world\n")
        .stderr(predicate::str::contains("Markup was removed"));
}

#[test]
fn cli_sanitize_html_escapes() {
    inputguard()
        .args(["sanitize", "--html", "<script>x()</script>a < b"])
        .assert()
        .success()
        .stdout("a &lt; b\n");
}

#[test]
fn cli_language_prints_canonical_name() {
    inputguard()
        .args(["language", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sanitized: cpp"));
}

// ---------------------------------------------------------------------------
// Policy and config files
// ---------------------------------------------------------------------------

#[test]
fn cli_allow_dangerous_flag_downgrades() {
    inputguard()
        .args(["--allow-dangerous", "code", "eval(input)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(allowed by policy)"));
}

#[test]
fn cli_policy_file_is_applied() {
    let tmp = TempDir::new().unwrap();
    let policy = tmp.path().join("policy.yaml");
    fs::write(&policy, "allow_dangerous_patterns: true\n").unwrap();

    inputguard()
        .arg("--policy")
        .arg(&policy)
        .args(["path", "../notes.txt"])
        .assert()
        .success();
}

#[test]
fn cli_workspace_root_rejects_escape() {
    let tmp = TempDir::new().unwrap();
    inputguard()
        .arg("--workspace-root")
        .arg(tmp.path())
        .args(["path", "/etc/hosts"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("outside the workspace root"));
}

#[test]
fn cli_custom_rules_file() {
    let tmp = TempDir::new().unwrap();
    let rules = tmp.path().join("rules.yaml");
    fs::write(
        &rules,
        "- id: ORG-001\n  pattern: 'DROP\\s+TABLE'\n  description: destructive SQL\n  severity: critical\n  penalty: 60\n",
    )
    .unwrap();

    inputguard()
        .arg("rules")
        .arg("--rules")
        .arg(&rules)
        .arg("DROP TABLE users")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Rule matched: destructive SQL"))
        .stdout(predicate::str::contains("security score 40/100"));
}

#[test]
fn cli_broken_config_exits_two() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("engine.yaml");
    fs::write(&config, "max_path_length: [nope\n").unwrap();

    inputguard()
        .arg("--config")
        .arg(&config)
        .args(["path", "a.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to load config"));
}
