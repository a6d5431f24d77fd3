use std::sync::LazyLock;

use regex::Regex;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern should compile"));

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("script block pattern should compile")
});

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern should compile"));

static TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+//.*$").expect("comment pattern should compile"));

/// Preprocessor directives and attributes that start with `#` but are code.
const HASH_CODE_PREFIXES: &[&str] = &[
    "#!", "#[", "#include", "#define", "#undef", "#if", "#ifdef", "#ifndef", "#elif", "#else",
    "#endif", "#pragma", "#error",
];

fn is_invisible_format(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{2069}' | '\u{FEFF}'
    )
}

/// Remove C0/C1 control characters (keeping `\t`, `\n`, `\r`) and invisible
/// bidi/zero-width format characters.
pub fn strip_control_chars(input: &str) -> String {
    input
        .chars()
        .filter(|&c| {
            let control = c.is_control() && !matches!(c, '\t' | '\n' | '\r');
            !control && !is_invisible_format(c)
        })
        .collect()
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn contains_markup(input: &str) -> bool {
    MARKUP.is_match(input)
}

/// Remove anything that looks like a tag.
pub fn strip_markup(input: &str) -> String {
    MARKUP.replace_all(input, "").into_owned()
}

/// Entity-encode `& < > " '`. Not idempotent: `&` is always re-encoded.
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Drop `<script>`/`<style>` blocks with their content, strip remaining
/// tags, then escape what is left.
pub fn sanitize_html(input: &str) -> String {
    let without_blocks = SCRIPT_BLOCK.replace_all(input, "");
    html_escape(&strip_markup(&without_blocks))
}

/// Remove block comments, whole-line `//` and `#` comments, and trailing
/// `//` comments. Shebangs, attributes and preprocessor lines are kept.
pub fn strip_comments(code: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(code, "");
    let mut lines = Vec::new();
    for line in without_blocks.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") {
            continue;
        }
        if trimmed.starts_with('#') && !HASH_CODE_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            continue;
        }
        lines.push(TRAILING_COMMENT.replace(line, "").into_owned());
    }
    lines.join("\n")
}

/// First `max` characters of `input`.
pub fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => input[..idx].to_string(),
        None => input.to_string(),
    }
}
