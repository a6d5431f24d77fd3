use regex::Regex;

use super::{compile_table, Rule, RuleDef, Severity};

/// Credential leaks and profanity. Every hit is an error.
const CREDENTIALS: &[RuleDef] = &[
    RuleDef {
        id: "COMMIT-001",
        pattern: r"(?i)\b(?:password|passwd|pwd)\s*[:=]\s*\S+",
        description: "password assignment",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "COMMIT-002",
        pattern: r"(?i)\b(?:api[_-]?key|apikey)\s*[:=]\s*\S+",
        description: "API key assignment",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "COMMIT-003",
        pattern: r#"(?i)\b(?:token|secret|access[_-]?key|client[_-]?secret)\s*[:=]\s*(?:"[^"\s]{4,}"|'[^'\s]{4,}'|[^\s"']{8,})"#,
        description: "token or secret assignment",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "COMMIT-004",
        pattern: r"(?i)\b(?:mysql|postgres(?:ql)?|mongodb(?:\+srv)?|redis|amqp|mssql)://[^\s:/@]+:[^\s@]+@",
        description: "database credentials in connection string",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "COMMIT-005",
        pattern: r"-----BEGIN (?:[A-Z]+ )*(?:PRIVATE KEY|CERTIFICATE)-----",
        description: "certificate or private key block",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "COMMIT-006",
        pattern: r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b",
        description: "AWS access key id",
        severity: Severity::Critical,
        penalty: 50,
    },
    RuleDef {
        id: "COMMIT-007",
        pattern: r"(?i)\b(?:fuck|shit|bitch|bastard|asshole|cunt)\w*",
        description: "profanity",
        severity: Severity::High,
        penalty: 30,
    },
];

/// Information-disclosure heuristics. Hits are warnings.
const DISCLOSURE: &[RuleDef] = &[
    RuleDef {
        id: "COMMIT-101",
        pattern: r"\b(?:25[0-5]|2[0-4]\d|1?\d?\d)(?:\.(?:25[0-5]|2[0-4]\d|1?\d?\d)){3}\b",
        description: "IP address",
        severity: Severity::Medium,
        penalty: 10,
    },
    RuleDef {
        id: "COMMIT-102",
        pattern: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        description: "email address",
        severity: Severity::Low,
        penalty: 10,
    },
    RuleDef {
        id: "COMMIT-103",
        pattern: r"(?i)\blocalhost(?::\d+)?\b|\b127\.0\.0\.1\b|\b0\.0\.0\.0\b",
        description: "loopback host",
        severity: Severity::Low,
        penalty: 10,
    },
];

/// Subject line of a conventional commit. Groups: type, scope, breaking marker.
const CONVENTIONAL: &str =
    r"^(feat|fix|docs|style|refactor|perf|test|build|ci|chore|revert)(?:\(([\w\-./ ]+)\))?(!)?: \S.*";

pub fn credential_rules() -> Vec<Rule> {
    compile_table(CREDENTIALS)
}

pub fn disclosure_rules() -> Vec<Rule> {
    compile_table(DISCLOSURE)
}

pub fn conventional_format() -> Regex {
    Regex::new(CONVENTIONAL).expect("built-in rule patterns should compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_colon_form() {
        let rules = credential_rules();
        assert!(rules.iter().any(|r| r.is_match(r#"add api_key: "abcd1234""#)));
    }

    #[test]
    fn token_assignment_needs_a_value() {
        let rules = credential_rules();
        let token = rules.iter().find(|r| r.id == "COMMIT-003").unwrap();
        assert!(token.is_match("set token=f3a9c1e7b2d4"));
        assert!(token.is_match(r#"client_secret: "abcd""#));
        assert!(!token.is_match("fix(auth): refresh token: handle expiry"));
        assert!(!token.is_match("secret: none"));
    }

    #[test]
    fn connection_string_needs_password() {
        let rules = credential_rules();
        let db = rules.iter().find(|r| r.id == "COMMIT-004").unwrap();
        assert!(db.is_match("postgres://admin:pw@db:5432/app"));
        assert!(!db.is_match("postgres://db:5432/app"));
    }

    #[test]
    fn ip_address_boundaries() {
        let rules = disclosure_rules();
        let ip = rules.iter().find(|r| r.id == "COMMIT-101").unwrap();
        assert!(ip.is_match("deploy to 10.0.0.12"));
        assert!(!ip.is_match("bump to 1.2.3"));
    }

    #[test]
    fn conventional_subjects() {
        let re = conventional_format();
        assert!(re.is_match("feat(parser): support tabs"));
        assert!(re.is_match("fix!: drop legacy flag"));
        assert!(!re.is_match("Updated stuff"));
        assert!(!re.is_match("feat:missing space"));
    }
}
