//! Tokenizer options.

/// What to do with malformed UTF-8 inside string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    /// Fail with a lexical error at the offending byte.
    #[default]
    Reject,
    /// Replace each maximal invalid subsequence with U+FFFD.
    Substitute,
}

/// Options for the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexOptions {
    /// Malformed UTF-8 handling (default: reject)
    pub utf8: Utf8Policy,

    /// Skip `// ...` and `/* ... */` comments as whitespace (default: false)
    pub ignore_comments: bool,
}

impl LexOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the malformed UTF-8 policy.
    pub fn utf8(mut self, policy: Utf8Policy) -> Self {
        self.utf8 = policy;
        self
    }

    /// Treat comments as whitespace.
    pub fn ignore_comments(mut self, yes: bool) -> Self {
        self.ignore_comments = yes;
        self
    }
}
