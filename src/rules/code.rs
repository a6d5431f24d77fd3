//! Threat patterns for source-code snippets and generated scripts.
//!
//! Critical entries are treated as errors by the code validator; everything
//! else is advisory. Penalties are summed for every matching rule.

use super::{compile_table, Rule, RuleDef, Severity};

const THREATS: &[RuleDef] = &[
    // Script / markup injection
    RuleDef {
        id: "CODE-001",
        pattern: r"(?i)<script\b[^>]*>",
        description: "script tag injection",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-002",
        pattern: r"(?i)javascript\s*:",
        description: "javascript: URI",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "CODE-003",
        pattern: r"(?i)\bon(?:load|error|click|mouseover|focus|blur|submit)\s*=",
        description: "inline event handler attribute",
        severity: Severity::Medium,
        penalty: 20,
    },
    RuleDef {
        id: "CODE-004",
        pattern: r"(?i)<(?:iframe|object|embed)\b",
        description: "embedded frame or object element",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "CODE-005",
        pattern: r"\bdocument\.write\s*\(|\.innerHTML\s*=|\.outerHTML\s*=",
        description: "direct DOM HTML injection",
        severity: Severity::High,
        penalty: 25,
    },
    // Dynamic evaluation
    RuleDef {
        id: "CODE-006",
        pattern: r"\beval\s*\(",
        description: "eval() call",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-007",
        pattern: r"\bnew\s+Function\s*\(",
        description: "Function constructor",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-008",
        pattern: r#"\bset(?:Timeout|Interval)\s*\(\s*["'`]"#,
        description: "string passed to setTimeout/setInterval",
        severity: Severity::High,
        penalty: 25,
    },
    RuleDef {
        id: "CODE-009",
        pattern: r"\bexec\s*\(",
        description: "exec() call",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-010",
        pattern: r"\b__import__\s*\(|\bcompile\s*\([^)]*['\x22]exec['\x22]",
        description: "dynamic module import or code compilation",
        severity: Severity::High,
        penalty: 30,
    },
    // Process / OS command execution
    RuleDef {
        id: "CODE-011",
        pattern: r"\bchild_process\b",
        description: "child_process module usage",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-012",
        pattern: r"\b(?:spawn|spawnSync|execSync|execFile|execFileSync)\s*\(",
        description: "process spawn call",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "CODE-013",
        pattern: r"\bos\.(?:system|popen|exec[lv]p?e?)\s*\(",
        description: "os-level command execution",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-014",
        pattern: r"\bsubprocess\.(?:call|run|Popen|check_output|check_call)\b",
        description: "subprocess invocation",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "CODE-015",
        pattern: r"\brm\s+-[a-zA-Z]*r[a-zA-Z]*f?[a-zA-Z]*\s+(?:/|~|\*|\$HOME)",
        description: "recursive delete of root, home or wildcard",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-016",
        pattern: r"\bRuntime\.getRuntime\(\)\.exec\b|\bProcessBuilder\s*\(",
        description: "JVM process execution",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "CODE-017",
        pattern: r"\b(?:curl|wget)\b[^\n|]*\|\s*(?:ba|z|da)?sh\b",
        description: "remote script piped to a shell",
        severity: Severity::Critical,
        penalty: 50,
    },
    // Filesystem access
    RuleDef {
        id: "CODE-018",
        pattern: r"\bfs\.(?:writeFile|appendFile|unlink|rmdir|rm|chmod|chown)(?:Sync)?\s*\(",
        description: "filesystem mutation",
        severity: Severity::Medium,
        penalty: 15,
    },
    RuleDef {
        id: "CODE-019",
        pattern: r#"\bopen\s*\([^)]*,\s*["'](?:w|a|wb|ab|w\+|a\+)["']"#,
        description: "file opened for writing",
        severity: Severity::Medium,
        penalty: 10,
    },
    RuleDef {
        id: "CODE-020",
        pattern: r"/etc/(?:passwd|shadow|sudoers)|\.ssh/(?:id_[a-z0-9]+|authorized_keys)",
        description: "access to sensitive system files",
        severity: Severity::High,
        penalty: 30,
    },
    // Outbound network
    RuleDef {
        id: "CODE-021",
        pattern: r#"\bfetch\s*\(\s*["'`]https?://"#,
        description: "outbound fetch request",
        severity: Severity::Medium,
        penalty: 10,
    },
    RuleDef {
        id: "CODE-022",
        pattern: r"\bXMLHttpRequest\b|\bnew\s+WebSocket\s*\(",
        description: "browser network request",
        severity: Severity::Medium,
        penalty: 10,
    },
    RuleDef {
        id: "CODE-023",
        pattern: r"\b(?:requests|httpx)\.(?:get|post|put|delete|request)\s*\(|\burllib\.request\.urlopen\b",
        description: "HTTP client request",
        severity: Severity::Medium,
        penalty: 10,
    },
    RuleDef {
        id: "CODE-024",
        pattern: r"\b(?:curl|wget|nc|ncat|netcat)\s+[^\s]",
        description: "network command-line tool",
        severity: Severity::Medium,
        penalty: 15,
    },
    // Template / string injection
    RuleDef {
        id: "CODE-025",
        pattern: r"\$\{[^}]*\}",
        description: "template interpolation",
        severity: Severity::Low,
        penalty: 5,
    },
    RuleDef {
        id: "CODE-026",
        pattern: r"\{\{[^}]*\}\}|\{%[^%]*%\}",
        description: "server-side template expression",
        severity: Severity::Low,
        penalty: 5,
    },
    // Hard-coded secrets
    RuleDef {
        id: "CODE-027",
        pattern: r#"(?i)\b(?:password|passwd|pwd)\s*[=:]\s*["'][^"']{4,}["']"#,
        description: "hard-coded password",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "CODE-028",
        pattern: r#"(?i)\b(?:api[_-]?key|secret[_-]?key|access[_-]?token|auth[_-]?token)\s*[=:]\s*["'][^"']{8,}["']"#,
        description: "hard-coded API key or token",
        severity: Severity::High,
        penalty: 30,
    },
    RuleDef {
        id: "CODE-029",
        pattern: r"-----BEGIN (?:[A-Z]+ )*PRIVATE KEY-----",
        description: "embedded private key",
        severity: Severity::Critical,
        penalty: 50,
    },
    // Obfuscation
    RuleDef {
        id: "CODE-030",
        pattern: r"(?:\\x[0-9a-fA-F]{2}){4,}",
        description: "hex escape sequence run",
        severity: Severity::Medium,
        penalty: 15,
    },
    RuleDef {
        id: "CODE-031",
        pattern: r"(?:\\u[0-9a-fA-F]{4}){3,}",
        description: "unicode escape sequence run",
        severity: Severity::Medium,
        penalty: 15,
    },
    RuleDef {
        id: "CODE-032",
        pattern: r"\bString\.fromCharCode\s*\(|\bchr\s*\(\s*\d+\s*\)\s*\+",
        description: "character-code string construction",
        severity: Severity::Medium,
        penalty: 20,
    },
    RuleDef {
        id: "CODE-033",
        pattern: r"\b(?:atob|btoa)\s*\(|\bbase64\.b64decode\s*\(|\bBuffer\.from\s*\([^)]*['\x22]base64['\x22]",
        description: "base64 decoding",
        severity: Severity::Medium,
        penalty: 15,
    },
    RuleDef {
        id: "CODE-034",
        pattern: r"[A-Za-z0-9+/]{80,}={0,2}",
        description: "long base64-like blob",
        severity: Severity::Low,
        penalty: 10,
    },
];

pub fn rules() -> Vec<Rule> {
    compile_table(THREATS)
}
