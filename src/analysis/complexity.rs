use crate::rules::{compile_table, Rule, RuleDef, Severity};

/// Control-flow constructs, each adding one per occurrence.
const CONTROL_FLOW: &[RuleDef] = &[
    RuleDef {
        id: "CPX-if",
        pattern: r"\bif\b|\belif\b",
        description: "conditional",
        severity: Severity::Low,
        penalty: 0,
    },
    RuleDef {
        id: "CPX-loop",
        pattern: r"\bfor\b|\bwhile\b|\bloop\b",
        description: "loop",
        severity: Severity::Low,
        penalty: 0,
    },
    RuleDef {
        id: "CPX-case",
        pattern: r"\bcase\b|=>",
        description: "switch/match arm",
        severity: Severity::Low,
        penalty: 0,
    },
    RuleDef {
        id: "CPX-catch",
        pattern: r"\bcatch\b|\bexcept\b|\brescue\b",
        description: "exception handler",
        severity: Severity::Low,
        penalty: 0,
    },
    RuleDef {
        id: "CPX-ternary",
        pattern: r"\?[^:;?\n]+:",
        description: "ternary",
        severity: Severity::Low,
        penalty: 0,
    },
    RuleDef {
        id: "CPX-logic",
        pattern: r"&&|\|\||\band\b|\bor\b",
        description: "short-circuit operator",
        severity: Severity::Low,
        penalty: 0,
    },
];

pub fn rules() -> Vec<Rule> {
    compile_table(CONTROL_FLOW)
}

/// Cyclomatic-style complexity: 1, plus one per control-flow match, plus
/// twice the bracket nesting depth.
pub fn complexity(text: &str, patterns: &[Rule]) -> u32 {
    let branches: usize = patterns.iter().map(|rule| rule.count(text)).sum();
    let branches = u32::try_from(branches).unwrap_or(u32::MAX);
    1u32.saturating_add(branches)
        .saturating_add(nesting_depth(text).saturating_mul(2))
}

/// Maximum `{`/`(` nesting seen in a single left-to-right scan. Closers
/// never drive the counter below zero.
pub fn nesting_depth(text: &str) -> u32 {
    let mut depth: u32 = 0;
    let mut max_depth: u32 = 0;
    for ch in text.chars() {
        match ch {
            '{' | '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            '}' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_base_complexity() {
        assert_eq!(complexity("", &rules()), 1);
    }

    #[test]
    fn nesting_tracks_maximum() {
        assert_eq!(nesting_depth("a(b{c}(d))"), 2);
        assert_eq!(nesting_depth("((()))()"), 3);
    }

    #[test]
    fn unmatched_closers_floor_at_zero() {
        assert_eq!(nesting_depth(")))(("), 2);
    }

    #[test]
    fn counts_keywords_and_nesting() {
        // if + && + two levels of nesting
        let code = "if (a && b) { run() }";
        // base 1 + if 1 + && 1 + 2 * depth 2
        assert_eq!(complexity(code, &rules()), 7);
    }

    #[test]
    fn keywords_inside_strings_still_count() {
        let code = r#"let s = "if while for";"#;
        assert_eq!(complexity(code, &rules()), 4);
    }
}
