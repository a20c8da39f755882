//! Token types for the JSON tokenizer.

use std::borrow::Cow;
use std::fmt;

use crate::{Position, Span};

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural tokens
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,

    // Scalar tokens
    /// String literal, escapes already decoded.
    String,
    /// Integer literal that fits `i64`.
    Integer,
    /// Non-negative integer literal that only fits `u64`.
    Unsigned,
    /// Number with a fraction or exponent, or an integer too large for 64 bits.
    Float,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // Special tokens
    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether this token can start a value.
    pub fn is_value_start(&self) -> bool {
        matches!(
            self,
            TokenKind::LBrace
                | TokenKind::LBracket
                | TokenKind::String
                | TokenKind::Integer
                | TokenKind::Unsigned
                | TokenKind::Float
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    /// Whether this token is a number literal.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer | TokenKind::Unsigned | TokenKind::Float
        )
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String => "string literal",
            TokenKind::Integer | TokenKind::Unsigned | TokenKind::Float => "number literal",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Decoded payload carried by scalar tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue<'src> {
    /// Structural tokens, literals and end of input.
    None,
    /// Decoded string contents (borrowed when no escapes were present).
    String(Cow<'src, str>),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    Unsigned(u64),
    /// Floating point number.
    Float(f64),
}

/// A token with its kind, location, and decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte span in the source input.
    pub span: Span,
    /// Position of the first byte of the token.
    pub position: Position,
    /// Decoded payload for scalar tokens.
    pub value: TokenValue<'src>,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, position: Position, value: TokenValue<'src>) -> Self {
        Self {
            kind,
            span,
            position,
            value,
        }
    }
}
