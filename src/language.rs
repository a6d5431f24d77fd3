use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Languages the engine knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Kotlin,
    Go,
    Rust,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Swift,
    Shell,
    PowerShell,
    Sql,
    Html,
    Css,
    Json,
    Yaml,
    Markdown,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::Kotlin,
        Language::Go,
        Language::Rust,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Ruby,
        Language::Php,
        Language::Swift,
        Language::Shell,
        Language::PowerShell,
        Language::Sql,
        Language::Html,
        Language::Css,
        Language::Json,
        Language::Yaml,
        Language::Markdown,
    ];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Shell => "shell",
            Language::PowerShell => "powershell",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Markdown => "markdown",
        }
    }

    /// Resolve a canonical name or common alias (case-insensitive, trimmed).
    pub fn from_alias(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let lang = match lower.as_str() {
            "javascript" | "js" | "node" | "nodejs" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "typescript" | "ts" | "tsx" => Language::TypeScript,
            "python" | "py" | "python3" => Language::Python,
            "java" => Language::Java,
            "kotlin" | "kt" => Language::Kotlin,
            "go" | "golang" => Language::Go,
            "rust" | "rs" => Language::Rust,
            "c" | "h" => Language::C,
            "cpp" | "c++" | "cxx" | "cc" | "hpp" => Language::Cpp,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "ruby" | "rb" => Language::Ruby,
            "php" => Language::Php,
            "swift" => Language::Swift,
            "shell" | "sh" | "bash" | "zsh" => Language::Shell,
            "powershell" | "ps1" | "pwsh" => Language::PowerShell,
            "sql" => Language::Sql,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            "markdown" | "md" => Language::Markdown,
            _ => return None,
        };
        Some(lang)
    }

    /// Best-effort guess from source text. Order matters: more specific
    /// signatures are tried first.
    pub fn infer(code: &str) -> Option<Self> {
        SIGNATURES
            .iter()
            .find(|(_, re)| re.is_match(code))
            .map(|(lang, _)| *lang)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Language::from_alias(s).ok_or_else(|| format!("unknown language: {s}"))
    }
}

static SIGNATURES: LazyLock<Vec<(Language, Regex)>> = LazyLock::new(|| {
    [
        (Language::Shell, r"\A#!\s*/(?:usr/)?bin/(?:env\s+)?(?:ba|z|da)?sh\b"),
        (Language::Python, r"\A#!\s*/usr/bin/(?:env\s+)?python"),
        (Language::JavaScript, r"\A#!\s*/usr/bin/(?:env\s+)?node"),
        (Language::Php, r"<\?php"),
        (Language::Rust, r"\bfn\s+\w+\s*(?:<[^>]*>)?\s*\(|\blet\s+mut\b|\buse\s+std::"),
        (Language::Go, r"(?m)^package\s+\w+\s*$|\bfunc\s+(?:\([^)]*\)\s*)?\w+\s*\("),
        (Language::Java, r"\bpublic\s+(?:static\s+)?(?:class|void)\b|\bSystem\.out\."),
        (Language::Cpp, r"#include\s*<(?:iostream|vector|string)>|\bstd::\w+"),
        (Language::C, r"(?m)^#include\s*[<\x22]"),
        (Language::TypeScript, r"\binterface\s+\w+\s*\{|:\s*(?:string|number|boolean)\b"),
        (
            Language::Python,
            r"(?m)^\s*def\s+\w+\s*\(.*\)\s*(?:->\s*[^:]+)?:\s*$|^\s*(?:from\s+[\w.]+\s+)?import\s+[\w.]+(?:\s+as\s+\w+)?\s*$",
        ),
        (
            Language::JavaScript,
            r"\brequire\s*\(|\bconsole\.log\s*\(|\bfunction\s+\w+\s*\(|\b(?:const|let|var)\s+\w+\s*=",
        ),
    ]
    .into_iter()
    .map(|(lang, pattern)| {
        (
            lang,
            Regex::new(pattern).expect("language signatures should compile"),
        )
    })
    .collect()
});
