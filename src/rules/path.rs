use super::{compile_table, Rule, RuleDef, Severity};

/// Traversal and injection sequences, most specific first.
const TRAVERSAL: &[RuleDef] = &[
    RuleDef {
        id: "PATH-001",
        pattern: r"\x00",
        description: "null byte in path",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "PATH-002",
        pattern: r"(?i)%2e|%2f|%5c|%252e|%252f|%c0%ae|%c0%af|%c1%9c",
        description: "URL-encoded traversal sequence",
        severity: Severity::Critical,
        penalty: 40,
    },
    RuleDef {
        id: "PATH-003",
        pattern: r"\x{2024}|\x{FF0E}|\x{FF0F}",
        description: "Unicode look-alike dot or slash",
        severity: Severity::Critical,
        penalty: 40,
    },
    RuleDef {
        id: "PATH-004",
        pattern: r"\.\.",
        description: "parent directory traversal (..)",
        severity: Severity::Critical,
        penalty: 40,
    },
    RuleDef {
        id: "PATH-005",
        pattern: r"^~",
        description: "home directory shortcut (~)",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "PATH-006",
        pattern: r"\$\{?[A-Za-z_][A-Za-z0-9_]*\}?|%[A-Za-z_][A-Za-z0-9_]*%",
        description: "environment variable expansion",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "PATH-007",
        pattern: r"[/\\]{2,}",
        description: "repeated path separators",
        severity: Severity::Medium,
        penalty: 15,
    },
];

pub fn rules() -> Vec<Rule> {
    compile_table(TRAVERSAL)
}

pub fn executable_extension() -> Rule {
    Rule::compile(
        "PATH-008",
        r"(?i)\.(exe|bat|cmd|com|scr|ps1|vbs|msi|dll|jar|app)$",
        "executable file extension",
        Severity::High,
        20,
    )
    .expect("built-in rule patterns should compile")
}
