//! Parser options.

use tessera_tokenizer::{LexOptions, Utf8Policy};

/// Options for the parser.
///
/// Everything is off by default, giving strict RFC 8259 parsing of a single
/// document with unbounded nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Maximum container nesting depth (default: unbounded)
    pub max_depth: Option<usize>,

    /// Malformed UTF-8 handling inside strings (default: reject)
    pub utf8: Utf8Policy,

    /// Treat `//` and `/* */` comments as whitespace (default: false)
    pub ignore_comments: bool,

    /// Accept a comma before `]` or `}` (default: false)
    pub allow_trailing_commas: bool,

    /// Accept several whitespace-separated top-level values (default: false)
    pub allow_multiple_values: bool,

    /// Record the path to the failing node in errors (default: false)
    pub track_path: bool,
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit container nesting to `depth` levels.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the nesting limit.
    pub fn unbounded_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Set the malformed UTF-8 policy.
    pub fn utf8(mut self, policy: Utf8Policy) -> Self {
        self.utf8 = policy;
        self
    }

    /// Skip comments.
    pub fn ignore_comments(mut self, yes: bool) -> Self {
        self.ignore_comments = yes;
        self
    }

    /// Accept trailing commas.
    pub fn allow_trailing_commas(mut self, yes: bool) -> Self {
        self.allow_trailing_commas = yes;
        self
    }

    /// Accept a stream of concatenated top-level values.
    pub fn allow_multiple_values(mut self, yes: bool) -> Self {
        self.allow_multiple_values = yes;
        self
    }

    /// Annotate errors with the path of the failing node.
    pub fn track_path(mut self, yes: bool) -> Self {
        self.track_path = yes;
        self
    }

    /// The subset of options the tokenizer cares about.
    pub fn lex_options(&self) -> LexOptions {
        LexOptions::new()
            .utf8(self.utf8)
            .ignore_comments(self.ignore_comments)
    }
}
