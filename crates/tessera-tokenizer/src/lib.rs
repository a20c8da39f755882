//! A position-tracking JSON tokenizer.
//!
//! Turns a byte slice into [`Token`]s, decoding string escapes and
//! classifying number literals as signed, unsigned or floating point.

mod span;
pub use span::{Position, Span};

mod token;
pub use token::{Token, TokenKind, TokenValue};

mod error;
pub use error::{LexError, LexErrorKind};

mod options;
pub use options::{LexOptions, Utf8Policy};

mod tokenizer;
pub use tokenizer::Tokenizer;
