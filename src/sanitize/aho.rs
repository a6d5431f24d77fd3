use aho_corasick::AhoCorasick;

use super::Sanitizer;

/// Minimum number of characters after the prefix for a token to count.
const MIN_BODY_LEN: usize = 8;

/// A vendor-prefixed token found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixHit {
    pub prefix: String,
    pub start: usize,
    pub end: usize,
}

/// Literal prefix matching of well-known credential formats via aho-corasick.
#[derive(Debug)]
pub struct SecretPrefixScanner {
    automaton: AhoCorasick,
    prefixes: Vec<String>,
}

impl SecretPrefixScanner {
    pub fn new(prefixes: Vec<String>) -> Self {
        let automaton = AhoCorasick::new(&prefixes).expect("valid aho-corasick patterns");
        Self {
            automaton,
            prefixes,
        }
    }

    /// Prefixes distinctive enough to flag on sight.
    pub fn default_prefixes() -> Vec<String> {
        vec![
            // Anthropic
            "sk-ant-".into(),
            // OpenAI
            "sk-proj-".into(),
            // GitHub
            "ghp_".into(),
            "gho_".into(),
            "ghs_".into(),
            "github_pat_".into(),
            // AWS
            "AKIA".into(),
            "ASIA".into(),
            // Slack
            "xoxb-".into(),
            "xoxp-".into(),
            "xoxs-".into(),
            "xoxa-".into(),
            // GitLab
            "glpat-".into(),
            // Package registries
            "npm_".into(),
            "pypi-".into(),
            "AGE-SECRET-KEY-".into(),
            // Stripe
            "whsec_".into(),
            "sk_live_".into(),
            "rk_live_".into(),
            "dop_v1_".into(),
            "NRAK-".into(),
            "hvs.".into(),
            // Google
            "AIzaSy".into(),
            "ya29.".into(),
        ]
    }

    /// Tokens that start with a known prefix at a token boundary and carry
    /// a body of at least [`MIN_BODY_LEN`] characters.
    pub fn find(&self, input: &str) -> Vec<PrefixHit> {
        let mut hits = Vec::new();
        if self.prefixes.is_empty() {
            return hits;
        }

        let mut covered = 0;
        for mat in self.automaton.find_iter(input) {
            let start = mat.start();
            // Inside a token already reported.
            if start < covered {
                continue;
            }
            let at_boundary = input[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '-'));
            if !at_boundary {
                continue;
            }

            let rest = &input[start..];
            let token_len = rest
                .find(|c: char| {
                    c.is_whitespace()
                        || matches!(c, '"' | '\'' | ',' | ';' | '}' | ']' | ')' | '`' | '<' | '>')
                })
                .unwrap_or(rest.len());
            let prefix_len = mat.end() - mat.start();
            if token_len >= prefix_len + MIN_BODY_LEN {
                covered = start + token_len;
                hits.push(PrefixHit {
                    prefix: self.prefixes[mat.pattern().as_usize()].clone(),
                    start,
                    end: start + token_len,
                });
            }
        }
        hits
    }
}

impl Sanitizer for SecretPrefixScanner {
    fn sanitize(&self, input: &str) -> String {
        let mut result = input.to_string();
        // find_iter yields non-overlapping spans in order; replace back to front.
        for hit in self.find(input).iter().rev() {
            result.replace_range(hit.start..hit.end, "<REDACTED>");
        }
        result
    }

    fn name(&self) -> &str {
        "aho-corasick"
    }
}
