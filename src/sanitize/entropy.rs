/// Shannon entropy of the bytes of `s`, in bits per byte.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    let mut freq = [0u32; 256];
    for &b in s.as_bytes() {
        freq[b as usize] += 1;
    }
    let len = s.len() as f64;
    freq.iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = f64::from(c) / len;
            -p * p.log2()
        })
        .sum()
}

/// Finds long, random-looking tokens in free text.
#[derive(Debug, Clone)]
pub struct EntropyDetector {
    /// Minimum token length to consider.
    pub min_length: usize,
    /// Minimum Shannon entropy to flag.
    pub min_entropy: f64,
}

impl Default for EntropyDetector {
    fn default() -> Self {
        Self::new(32, 3.5)
    }
}

impl EntropyDetector {
    pub fn new(min_length: usize, min_entropy: f64) -> Self {
        Self {
            min_length,
            min_entropy,
        }
    }

    /// Tokens that look like opaque credentials. Git object ids (7-40 hex
    /// digits) and tokens without both letters and digits are skipped.
    pub fn opaque_tokens<'a>(&self, input: &'a str) -> Vec<&'a str> {
        input
            .split(|c: char| {
                c.is_whitespace()
                    || matches!(
                        c,
                        '"' | '\'' | ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>' | '='
                            | ':' | '`'
                    )
            })
            .filter(|token| token.len() >= self.min_length)
            .filter(|token| !is_git_object_id(token))
            .filter(|token| {
                token.chars().any(|c| c.is_ascii_digit())
                    && token.chars().any(|c| c.is_ascii_alphabetic())
            })
            .filter(|token| shannon_entropy(token) >= self.min_entropy)
            .collect()
    }
}

fn is_git_object_id(token: &str) -> bool {
    (7..=40).contains(&token.len()) && token.chars().all(|c| c.is_ascii_hexdigit())
}
