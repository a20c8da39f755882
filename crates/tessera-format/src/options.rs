//! Formatting options for JSON output.

/// Options for JSON serialization.
///
/// The default is compact output with no whitespace, UTF-8 passed through
/// unescaped, members in insertion order and shortest round-trip floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Indentation per nesting level; 0 means compact (default: 0)
    pub indent_width: usize,

    /// Character repeated `indent_width` times per level (default: ' ')
    pub indent_char: char,

    /// Escape every non-ASCII character as `\uXXXX` (default: false)
    pub ensure_ascii: bool,

    /// Write object members sorted by key (default: false)
    ///
    /// Only the output is sorted; the value keeps its insertion order.
    pub sort_keys: bool,

    /// Significant digits for floats; `None` writes the shortest text that
    /// reads back to the same `f64` (default: None)
    pub float_precision: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 0,
            indent_char: ' ',
            ensure_ascii: false,
            sort_keys: false,
            float_precision: None,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Four-space indentation.
    pub fn pretty() -> Self {
        Self::default().indent(4)
    }

    /// Set the indentation width. 0 selects compact output.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the indentation character.
    pub fn indent_char(mut self, c: char) -> Self {
        self.indent_char = c;
        self
    }

    /// Escape non-ASCII characters.
    pub fn ensure_ascii(mut self, yes: bool) -> Self {
        self.ensure_ascii = yes;
        self
    }

    /// Sort object members by key on output.
    pub fn sort_keys(mut self, yes: bool) -> Self {
        self.sort_keys = yes;
        self
    }

    /// Write floats with `digits` significant digits.
    pub fn float_precision(mut self, digits: usize) -> Self {
        self.float_precision = Some(digits);
        self
    }

    /// Whether output spans multiple lines.
    pub fn is_pretty(&self) -> bool {
        self.indent_width > 0
    }
}
