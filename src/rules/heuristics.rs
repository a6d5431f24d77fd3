//! Language-aware secondary checks for code content.

use crate::language::Language;

use super::{Rule, Severity};

/// A heuristic rule scoped to a set of languages (`None` = any language).
#[derive(Debug, Clone)]
pub struct LanguageHeuristic {
    pub rule: Rule,
    pub languages: Option<&'static [Language]>,
}

impl LanguageHeuristic {
    pub fn applies_to(&self, language: Option<Language>) -> bool {
        match (self.languages, language) {
            (None, _) => true,
            (Some(langs), Some(lang)) => langs.contains(&lang),
            (Some(_), None) => false,
        }
    }
}

const JS_FAMILY: &[Language] = &[Language::JavaScript, Language::TypeScript];
const PYTHON: &[Language] = &[Language::Python];
const RUST: &[Language] = &[Language::Rust];
const JVM: &[Language] = &[Language::Java, Language::Kotlin];
const NATIVE: &[Language] = &[Language::C, Language::Cpp, Language::Php, Language::Go];
const SHELL: &[Language] = &[Language::Shell];

const TABLE: &[(&str, &str, &str, Option<&[Language]>)] = &[
    (
        "HEUR-001",
        r#"\brequire\s*\(\s*['"](?:child_process|fs|os|net|http|https|vm|worker_threads)['"]\s*\)|\bfrom\s+['"](?:node:)?(?:child_process|fs|os|net|vm)['"]"#,
        "imports an OS-level module",
        Some(JS_FAMILY),
    ),
    (
        "HEUR-002",
        r"(?m)^\s*(?:import|from)\s+(?:os|subprocess|sys|shutil|socket|ctypes|pty)\b",
        "imports an OS-level module",
        Some(PYTHON),
    ),
    (
        "HEUR-003",
        r"\bprocess\.env\b",
        "reads environment variables",
        Some(JS_FAMILY),
    ),
    (
        "HEUR-004",
        r"\bos\.environ\b|\bos\.getenv\s*\(",
        "reads environment variables",
        Some(PYTHON),
    ),
    (
        "HEUR-005",
        r"\benv::var(?:_os)?\s*\(|\bstd::process::Command\b",
        "reads environment variables or spawns processes",
        Some(RUST),
    ),
    (
        "HEUR-006",
        r"\bSystem\.getenv\s*\(",
        "reads environment variables",
        Some(JVM),
    ),
    (
        "HEUR-007",
        r"\bgetenv\s*\(|\bos\.Getenv\s*\(|\$_(?:ENV|SERVER)\b",
        "reads environment variables",
        Some(NATIVE),
    ),
    (
        "HEUR-008",
        r"\b(?:printenv|env)\s*(?:$|\|)|\bexport\s+[A-Z_]+=",
        "reads or exports environment variables",
        Some(SHELL),
    ),
    (
        "HEUR-009",
        r#"(?i)["'](?:SELECT|INSERT|UPDATE|DELETE)\b[^"']*["']\s*(?:\+|\.|%|\|\|)"#,
        "SQL built by string concatenation",
        None,
    ),
    (
        "HEUR-010",
        r#"(?i)\bf["'](?:SELECT|INSERT|UPDATE|DELETE)\b[^"']*\{|`(?:SELECT|INSERT|UPDATE|DELETE)\b[^`]*\$\{"#,
        "SQL built by string interpolation",
        None,
    ),
];

const HEURISTIC_PENALTY: u32 = 5;

pub fn rules() -> Vec<LanguageHeuristic> {
    TABLE
        .iter()
        .map(|&(id, pattern, description, languages)| LanguageHeuristic {
            rule: Rule::compile(id, pattern, description, Severity::Low, HEURISTIC_PENALTY)
                .expect("built-in rule patterns should compile"),
            languages,
        })
        .collect()
}
