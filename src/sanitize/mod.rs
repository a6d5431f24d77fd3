pub mod aho;
pub mod entropy;
pub mod regex_san;
pub mod text;

use serde::{Deserialize, Serialize};

pub use text::{
    html_escape, normalize_whitespace, sanitize_html, strip_comments, strip_control_chars,
    strip_markup, truncate_chars,
};

/// A single sanitization layer.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> String;

    /// Name of this layer (for logging/debugging).
    fn name(&self) -> &str;
}

/// Toggles for the generic text sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeOptions {
    /// Keep `<...>` markup instead of stripping it.
    #[serde(default)]
    pub allow_markup: bool,

    /// Truncate to this many characters.
    #[serde(default)]
    pub max_length: Option<usize>,

    #[serde(default = "default_true")]
    pub remove_control_chars: bool,

    #[serde(default = "default_true")]
    pub normalize_whitespace: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            allow_markup: false,
            max_length: None,
            remove_control_chars: true,
            normalize_whitespace: true,
        }
    }
}

struct ControlCharLayer;

impl Sanitizer for ControlCharLayer {
    fn sanitize(&self, input: &str) -> String {
        strip_control_chars(input)
    }

    fn name(&self) -> &str {
        "control-chars"
    }
}

struct MarkupLayer;

impl Sanitizer for MarkupLayer {
    fn sanitize(&self, input: &str) -> String {
        strip_markup(input)
    }

    fn name(&self) -> &str {
        "markup"
    }
}

struct WhitespaceLayer;

impl Sanitizer for WhitespaceLayer {
    fn sanitize(&self, input: &str) -> String {
        normalize_whitespace(input)
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// Truncation. When whitespace is normalized the cut is re-trimmed so a
/// second pass leaves the value unchanged.
struct TruncateLayer {
    max_length: usize,
    trim_end: bool,
}

impl Sanitizer for TruncateLayer {
    fn sanitize(&self, input: &str) -> String {
        let cut = truncate_chars(input, self.max_length);
        if self.trim_end {
            cut.trim_end().to_string()
        } else {
            cut
        }
    }

    fn name(&self) -> &str {
        "truncate"
    }
}

/// An ordered chain of sanitization layers.
pub struct SanitizePipeline {
    layers: Vec<Box<dyn Sanitizer>>,
}

impl SanitizePipeline {
    /// Create a pipeline from custom layers.
    pub fn new(layers: Vec<Box<dyn Sanitizer>>) -> Self {
        Self { layers }
    }

    /// Text pipeline for the given options.
    /// Order: control chars -> markup -> whitespace -> truncate.
    pub fn from_options(options: &SanitizeOptions) -> Self {
        let mut layers: Vec<Box<dyn Sanitizer>> = Vec::new();
        if options.remove_control_chars {
            layers.push(Box::new(ControlCharLayer));
        }
        if !options.allow_markup {
            layers.push(Box::new(MarkupLayer));
        }
        if options.normalize_whitespace {
            layers.push(Box::new(WhitespaceLayer));
        }
        if let Some(max_length) = options.max_length {
            layers.push(Box::new(TruncateLayer {
                max_length,
                trim_end: options.normalize_whitespace,
            }));
        }
        Self { layers }
    }

    /// Secret redaction: known vendor prefixes, then contextual patterns.
    pub fn redaction() -> Self {
        let prefixes = aho::SecretPrefixScanner::new(aho::SecretPrefixScanner::default_prefixes());
        let patterns = regex_san::RegexRedactor::new(regex_san::RegexRedactor::default_patterns())
            .expect("default regex patterns should compile");
        Self {
            layers: vec![Box::new(prefixes), Box::new(patterns)],
        }
    }

    /// Run all layers in sequence.
    pub fn sanitize(&self, input: &str) -> String {
        let mut result = input.to_string();
        for layer in &self.layers {
            result = layer.sanitize(&result);
        }
        result
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}

/// Apply the text sanitizer with `options`.
pub fn sanitize(input: &str, options: &SanitizeOptions) -> String {
    SanitizePipeline::from_options(options).sanitize(input)
}
