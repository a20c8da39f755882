//! Parse errors.

use std::fmt;

use tessera_tokenizer::{LexError, LexErrorKind, Position, Span, TokenKind};

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Any JSON value.
    Value,
    /// An object key.
    Key,
    /// An object key or `}`.
    KeyOrEndObject,
    /// `:` after an object key.
    Colon,
    /// `,` or `}` after an object member.
    CommaOrEndObject,
    /// `,` or `]` after an array element.
    CommaOrEndArray,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Value => "value",
            Expected::Key => "object key",
            Expected::KeyOrEndObject => "object key or '}'",
            Expected::Colon => "':'",
            Expected::CommaOrEndObject => "',' or '}'",
            Expected::CommaOrEndArray => "',' or ']'",
        })
    }
}

/// Kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The tokenizer rejected the input.
    Lexical(LexErrorKind),
    /// A well-formed token in the wrong place.
    UnexpectedToken {
        found: TokenKind,
        expected: Expected,
    },
    /// Input ended before the document was complete.
    UnexpectedEof { expected: Expected },
    /// Nesting went past the configured limit.
    DepthLimitExceeded { limit: usize },
    /// Something other than whitespace after the top-level value.
    TrailingContent { found: TokenKind },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Lexical(kind) => write!(f, "{kind}"),
            ParseErrorKind::UnexpectedToken { found, expected } => {
                write!(f, "unexpected {found}, expected {expected}")
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            ParseErrorKind::DepthLimitExceeded { limit } => {
                write!(f, "nesting depth exceeds limit of {limit}")
            }
            ParseErrorKind::TrailingContent { found } => {
                write!(f, "unexpected {found} after top-level value")
            }
        }
    }
}

/// A parse error with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Position of the offending token or byte.
    pub position: Position,
    /// Bytes covered by the offending token.
    pub span: Span,
    /// JSON Pointer to the node being parsed, when path tracking is on.
    pub path: Option<String>,
}

impl ParseError {
    /// Create a new parse error without a path.
    pub fn new(kind: ParseErrorKind, position: Position, span: Span) -> Self {
        Self {
            kind,
            position,
            span,
            path: None,
        }
    }

    /// Attach a JSON Pointer path.
    pub fn with_path(mut self, path: Option<String>) -> Self {
        self.path = path;
        self
    }

    /// Byte offset of the error.
    pub fn offset(&self) -> usize {
        self.position.offset()
    }

    /// Whether the tokenizer rejected the input.
    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lexical(_))
    }

    /// Whether the tokens were fine but their arrangement was not.
    pub fn is_syntax(&self) -> bool {
        !self.is_lexical()
    }

    /// Short label for the category, used as a diagnostic title.
    pub fn category(&self) -> &'static str {
        if self.is_lexical() {
            "lexical error"
        } else {
            "syntax error"
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.category(), self.position, self.kind)?;
        match self.path.as_deref() {
            Some("") => write!(f, " (at document root)"),
            Some(path) => write!(f, " (at {path})"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lexical(err.kind), err.position, err.span)
    }
}
