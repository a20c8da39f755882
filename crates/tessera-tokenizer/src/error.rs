//! Lexical errors.

use std::fmt;

use crate::{Position, Span};

/// Kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A byte that cannot start any token.
    UnexpectedByte(u8),
    /// A `true`/`false`/`null` literal with the wrong spelling.
    InvalidLiteral,
    /// Number does not match the numeric grammar.
    InvalidNumber(&'static str),
    /// Number literal overflows to an infinite float.
    NumberOutOfRange,
    /// Input ended inside a string literal.
    UnterminatedString,
    /// Raw control character (below U+0020) inside a string literal.
    ControlCharacter(u8),
    /// Unknown escape sequence, e.g. `\q`.
    InvalidEscape(char),
    /// `\u` not followed by four hexadecimal digits.
    InvalidUnicodeEscape,
    /// High surrogate without a low surrogate, or a lone low surrogate.
    UnpairedSurrogate(u16),
    /// Malformed UTF-8 inside a string literal.
    InvalidUtf8,
    /// Input ended inside a `/* ... */` comment.
    UnterminatedComment,
    /// `/` not followed by `/` or `*` while comments are enabled.
    InvalidComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedByte(b) if b.is_ascii_graphic() => {
                write!(f, "unexpected character '{}'", *b as char)
            }
            LexErrorKind::UnexpectedByte(b) => write!(f, "unexpected byte 0x{b:02x}"),
            LexErrorKind::InvalidLiteral => write!(f, "invalid literal"),
            LexErrorKind::InvalidNumber(reason) => write!(f, "invalid number: {reason}"),
            LexErrorKind::NumberOutOfRange => write!(f, "number out of range"),
            LexErrorKind::UnterminatedString => write!(f, "unterminated string"),
            LexErrorKind::ControlCharacter(b) => {
                write!(f, "control character U+{:04X} must be escaped", *b as u32)
            }
            LexErrorKind::InvalidEscape(c) => write!(f, "invalid escape sequence '\\{c}'"),
            LexErrorKind::InvalidUnicodeEscape => {
                write!(f, "'\\u' must be followed by 4 hex digits")
            }
            LexErrorKind::UnpairedSurrogate(unit) => {
                write!(f, "unpaired surrogate \\u{unit:04X}")
            }
            LexErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8 in string"),
            LexErrorKind::UnterminatedComment => write!(f, "unterminated comment"),
            LexErrorKind::InvalidComment => write!(f, "expected '//' or '/*'"),
        }
    }
}

/// A lexical error with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// The kind of error.
    pub kind: LexErrorKind,
    /// Position of the offending byte.
    pub position: Position,
    /// Bytes covered by the offending construct.
    pub span: Span,
}

impl LexError {
    /// Create a new lexical error.
    pub fn new(kind: LexErrorKind, position: Position, span: Span) -> Self {
        Self {
            kind,
            position,
            span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

impl std::error::Error for LexError {}
