use std::process::ExitCode;

use anyhow::Context;

use crate::config::{EngineConfig, PolicyContext};
use crate::rules::RuleSpec;
use crate::sanitize::{sanitize_html, SanitizeOptions};
use crate::validate::{InputKind, Validator};

use super::report::{print_json, Summary};
use super::{input, Cli, Command};

/// Exit status for an input that failed validation.
const EXIT_INVALID: u8 = 1;

/// Run the selected command. `Ok` carries the exit status: 0 when the input
/// is valid, 1 when it is not.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let validator = build_validator(cli)?;
    let policy = build_policy(cli)?;

    let (name, kind, text) = match &cli.command {
        Command::Path(input) => ("path", InputKind::Path, input::read(input)?),
        Command::Code { input, language } => (
            "code",
            InputKind::CodeContent {
                language: *language,
            },
            input::read(input)?,
        ),
        Command::Commit(input) => ("commit", InputKind::CommitMessage, input::read(input)?),
        Command::Json { input, max_depth } => (
            "json",
            InputKind::Json {
                max_depth: *max_depth,
            },
            input::read(input)?,
        ),
        Command::ApiKey { input, provider } => {
            ("api-key", InputKind::ApiKey(*provider), input::read(input)?)
        }
        Command::Url(input) => ("url", InputKind::Url, input::read(input)?),
        Command::Language(input) => ("language", InputKind::Language, input::read(input)?),
        Command::Config(input) => ("config", InputKind::Config, input::read(input)?),
        Command::Sanitize {
            input,
            allow_markup,
            max_length,
            html,
        } => {
            let text = input::read(input)?;
            if *html {
                return emit_html(cli, &text);
            }
            let options = SanitizeOptions {
                allow_markup: *allow_markup,
                max_length: max_length.or(validator.config().user_input.max_length),
                ..validator.config().user_input.clone()
            };
            let result = validator.validate_user_input(&text, Some(&options));
            if cli.json {
                print_json(&result)?;
            } else if let Some(sanitized) = result.sanitized_value() {
                println!("{sanitized}");
                for warning in result.warnings() {
                    eprintln!("inputguard: {warning}");
                }
            }
            return Ok(exit_for(result.is_valid()));
        }
        Command::Rules { input, rules } => {
            let text = input::read(input)?;
            let specs = RuleSpec::load_all(rules)
                .with_context(|| format!("failed to load rules from {}", rules.display()))?;
            let result = validator.apply_rules(&text, &specs, &policy);
            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", Summary::of_result("rules", &result).render());
            }
            return Ok(exit_for(result.is_valid()));
        }
    };

    // Hook-managed commit message files carry a trailing newline and
    // comment lines that git strips itself.
    let text = match kind {
        InputKind::CommitMessage => strip_git_comments(&text),
        _ => text.trim_end_matches(['\n', '\r']).to_string(),
    };

    let verdict = validator.validate(kind, &text, &policy);
    if cli.json {
        print_json(&verdict)?;
    } else {
        print!("{}", Summary::of_verdict(name, &verdict).render());
    }
    Ok(exit_for(verdict.is_valid()))
}

fn emit_html(cli: &Cli, text: &str) -> anyhow::Result<ExitCode> {
    let escaped = sanitize_html(text);
    if cli.json {
        print_json(&serde_json::json!({ "sanitizedValue": escaped }))?;
    } else {
        println!("{escaped}");
    }
    Ok(ExitCode::SUCCESS)
}

fn build_validator(cli: &Cli) -> anyhow::Result<Validator> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let validator = Validator::with_config(config).context("invalid engine config")?;
    Ok(match &cli.workspace_root {
        Some(root) => validator.with_workspace_root(root),
        None => validator,
    })
}

fn build_policy(cli: &Cli) -> anyhow::Result<PolicyContext> {
    let mut policy = match &cli.policy {
        Some(path) => PolicyContext::load_from(path)
            .with_context(|| format!("failed to load policy {}", path.display()))?,
        None => PolicyContext::default(),
    };
    if cli.allow_dangerous {
        policy.allow_dangerous_patterns = true;
    }
    if cli.strict {
        policy.strict_mode = true;
    }
    if let Some(max) = cli.max_complexity {
        policy.max_complexity = Some(max);
    }
    Ok(policy)
}

fn strip_git_comments(message: &str) -> String {
    message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn git_comment_lines_dropped() {
        let message = "feat: add thing\n\nbody line\n# Please enter the commit message\n#\n";
        assert_eq!(strip_git_comments(message), "feat: add thing\n\nbody line");
    }

    #[test]
    fn flags_override_policy_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"max_complexity: 50\nstrict_mode: false\n").unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "inputguard",
            "--policy",
            path,
            "--strict",
            "--max-complexity",
            "5",
            "url",
            "https://example.com",
        ])
        .unwrap();
        let policy = build_policy(&cli).unwrap();
        assert!(policy.strict_mode);
        assert_eq!(policy.max_complexity, Some(5));
        assert!(!policy.allow_dangerous_patterns);
    }

    #[test]
    fn broken_policy_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"max_complexity: [oops\n").unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["inputguard", "--policy", path, "url", "x"]).unwrap();
        assert!(build_policy(&cli).is_err());
    }
}
