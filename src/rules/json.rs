use super::{compile_table, Rule, RuleDef, Severity};

/// Prototype-pollution and code-in-JSON markers, scanned on raw text.
const INJECTION: &[RuleDef] = &[
    RuleDef {
        id: "JSON-001",
        pattern: r#""__proto__"\s*:"#,
        description: "__proto__ key (prototype pollution)",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "JSON-002",
        pattern: r#""constructor"\s*:\s*\{[^}]*"prototype"\s*:"#,
        description: "constructor.prototype key (prototype pollution)",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "JSON-003",
        pattern: r"(?i)<script\b",
        description: "script tag in JSON value",
        severity: Severity::Critical,
        penalty: 40,
    },
    RuleDef {
        id: "JSON-004",
        pattern: r"(?i)javascript\s*:",
        description: "javascript: URI in JSON value",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "JSON-005",
        pattern: r"\beval\s*\(|\bnew\s+Function\s*\(",
        description: "dynamic evaluation in JSON value",
        severity: Severity::Critical,
        penalty: 40,
    },
    RuleDef {
        id: "JSON-006",
        pattern: r"\bfunction\s*\w*\s*\([^)]*\)\s*\{",
        description: "function body in JSON value",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "JSON-007",
        pattern: r"\brequire\s*\(\s*['\x22]",
        description: "module require in JSON value",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "JSON-008",
        pattern: r#""\$where"\s*:"#,
        description: "query operator carrying code ($where)",
        severity: Severity::High,
        penalty: 30,
    },
];

pub fn rules() -> Vec<Rule> {
    compile_table(INJECTION)
}

/// Object keys removed from sanitized JSON values.
pub const DANGEROUS_KEYS: &[&str] = &["__proto__", "constructor", "prototype"];
