//! Command-line front end for the `inputguard` binary.

pub mod check;
pub mod input;
pub mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::language::Language;
use crate::validate::ApiProvider;

#[derive(Parser, Debug)]
#[command(
    name = "inputguard",
    version,
    about = "Validate and risk-score untrusted input",
    long_about = "inputguard checks paths, code, commit messages, API keys, JSON, URLs and free text \
                  for dangerous patterns and reports a 0-100 security score."
)]
pub struct Cli {
    /// Engine limits (YAML). Missing file means defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Policy context (YAML). Flags below override it.
    #[arg(long, global = true, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Downgrade dangerous-pattern errors to half-penalty warnings
    #[arg(long, global = true)]
    pub allow_dangerous: bool,

    /// Extra sanitization passes (comment stripping for code)
    #[arg(long, global = true)]
    pub strict: bool,

    /// Warn when code complexity exceeds this
    #[arg(long, global = true, value_name = "N")]
    pub max_complexity: Option<u32>,

    /// Reject paths that resolve outside this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the text to check comes from.
#[derive(Args, Debug, Clone)]
pub struct TextInput {
    /// Text to check. Read from stdin when neither this nor --file is given.
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text", value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a file path
    Path(TextInput),

    /// Scan code or script text for threat patterns
    Code {
        #[command(flatten)]
        input: TextInput,

        /// Source language (inferred when omitted)
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Validate a commit message (works as a commit-msg hook with --file)
    Commit(TextInput),

    /// Validate a JSON document
    Json {
        #[command(flatten)]
        input: TextInput,

        /// Maximum nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Check an API key's format
    ApiKey {
        #[command(flatten)]
        input: TextInput,

        #[arg(short, long, value_enum)]
        provider: ApiProvider,
    },

    /// Validate a URL
    Url(TextInput),

    /// Resolve a language identifier
    Language(TextInput),

    /// Validate a JSON configuration object
    Config(TextInput),

    /// Sanitize free text
    Sanitize {
        #[command(flatten)]
        input: TextInput,

        /// Keep markup instead of stripping it
        #[arg(long, conflicts_with = "html")]
        allow_markup: bool,

        /// Truncate to this many characters
        #[arg(long)]
        max_length: Option<usize>,

        /// Drop script/style blocks and tags, then HTML-escape
        #[arg(long)]
        html: bool,
    },

    /// Apply custom rules from a YAML file
    Rules {
        #[command(flatten)]
        input: TextInput,

        /// YAML list of rules (id, pattern, description, severity, penalty)
        #[arg(short, long, value_name = "FILE")]
        rules: PathBuf,
    },
}
