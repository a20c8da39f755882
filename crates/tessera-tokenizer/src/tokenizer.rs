//! Tokenizer for JSON text.

use std::borrow::Cow;

use tracing::trace;

use crate::{
    LexError, LexErrorKind, LexOptions, Position, Span, Token, TokenKind, TokenValue, Utf8Policy,
};

/// A tokenizer that produces tokens from JSON bytes.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The input being tokenized.
    source: &'src [u8],
    /// Current byte position in `source`.
    pos: usize,
    /// Byte offset where the current line starts.
    line_start: usize,
    /// Number of `\n` consumed so far.
    lines: usize,
    options: LexOptions,
    /// Set once the iterator has yielded end of input or an error.
    done: bool,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer with default options.
    pub fn new(source: &'src [u8]) -> Self {
        Self::with_options(source, LexOptions::default())
    }

    /// Create a new tokenizer with the given options.
    pub fn with_options(source: &'src [u8], options: LexOptions) -> Self {
        Self {
            source,
            pos: 0,
            line_start: 0,
            lines: 0,
            options,
            done: false,
        }
    }

    /// The options this tokenizer was created with.
    pub fn options(&self) -> LexOptions {
        self.options
    }

    /// Get the current position.
    #[inline]
    pub fn current_position(&self) -> Position {
        self.position_at(self.pos)
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Position of an offset on the current line.
    ///
    /// Only valid for offsets that are not separated from `pos` by a newline,
    /// which holds for every offset inside a single token.
    #[inline]
    fn position_at(&self, offset: usize) -> Position {
        Position {
            chars_read_total: offset,
            chars_read_current_line: offset.saturating_sub(self.line_start),
            lines_read: self.lines,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<u8> {
        self.source.get(self.pos + n).copied()
    }

    /// Advance by one byte and return it, tracking line breaks.
    #[inline]
    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.lines += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    /// One-byte span at `offset`, or empty at end of input.
    #[inline]
    fn span_at(&self, offset: usize) -> Span {
        Span::new(offset, (offset + 1).min(self.source.len()).max(offset))
    }

    /// Error located at the current byte.
    fn error_here(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.current_position(), self.span_at(self.pos))
    }

    fn token(
        &self,
        kind: TokenKind,
        start: usize,
        position: Position,
        value: TokenValue<'src>,
    ) -> Token<'src> {
        let span = Span::new(start, self.pos);
        trace!("Token {:?} at {:?}", kind, span);
        Token::new(kind, span, position, value)
    }

    /// Get the next token.
    ///
    /// Returns a token of kind [`TokenKind::Eof`] at end of input; calling
    /// again keeps returning it.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_trivia()?;

        let start = self.pos;
        let position = self.current_position();
        let Some(b) = self.peek() else {
            return Ok(self.token(TokenKind::Eof, start, position, TokenValue::None));
        };

        match b {
            b'{' => Ok(self.punct(TokenKind::LBrace, start, position)),
            b'}' => Ok(self.punct(TokenKind::RBrace, start, position)),
            b'[' => Ok(self.punct(TokenKind::LBracket, start, position)),
            b']' => Ok(self.punct(TokenKind::RBracket, start, position)),
            b':' => Ok(self.punct(TokenKind::Colon, start, position)),
            b',' => Ok(self.punct(TokenKind::Comma, start, position)),
            b'"' => self.tokenize_string(start, position),
            b'-' | b'0'..=b'9' => self.tokenize_number(start, position),
            b't' => self.tokenize_literal(b"true", TokenKind::True, start, position),
            b'f' => self.tokenize_literal(b"false", TokenKind::False, start, position),
            b'n' => self.tokenize_literal(b"null", TokenKind::Null, start, position),
            _ => Err(self.error_here(LexErrorKind::UnexpectedByte(b))),
        }
    }

    fn punct(&mut self, kind: TokenKind, start: usize, position: Position) -> Token<'src> {
        self.bump();
        self.token(kind, start, position, TokenValue::None)
    }

    /// Skip whitespace and, when enabled, comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.bump();
                }
                Some(b'/') if self.options.ignore_comments => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let position = self.current_position();

        // Consume `/`
        self.bump();

        match self.peek() {
            Some(b'/') => {
                while let Some(b) = self.bump() {
                    if b == b'\n' {
                        break;
                    }
                }
                Ok(())
            }
            Some(b'*') => {
                self.bump();
                loop {
                    match self.bump() {
                        None => {
                            return Err(LexError::new(
                                LexErrorKind::UnterminatedComment,
                                position,
                                Span::new(start, self.pos),
                            ));
                        }
                        Some(b'*') if self.peek() == Some(b'/') => {
                            self.bump();
                            return Ok(());
                        }
                        Some(_) => {}
                    }
                }
            }
            _ => Err(LexError::new(
                LexErrorKind::InvalidComment,
                position,
                self.span_at(start),
            )),
        }
    }

    fn tokenize_literal(
        &mut self,
        expected: &'static [u8],
        kind: TokenKind,
        start: usize,
        position: Position,
    ) -> Result<Token<'src>, LexError> {
        for &want in expected {
            if self.peek() != Some(want) {
                let end = (self.pos + 1).min(self.source.len()).max(self.pos);
                return Err(LexError::new(
                    LexErrorKind::InvalidLiteral,
                    position,
                    Span::new(start, end),
                ));
            }
            self.bump();
        }
        Ok(self.token(kind, start, position, TokenValue::None))
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.bump();
        }
    }

    /// Tokenize a number literal and classify it.
    fn tokenize_number(&mut self, start: usize, position: Position) -> Result<Token<'src>, LexError> {
        let mut is_float = false;

        if self.peek() == Some(b'-') {
            self.bump();
        }

        match self.peek() {
            Some(b'0') => {
                self.bump();
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(self.error_here(LexErrorKind::InvalidNumber(
                        "leading zeros are not allowed",
                    )));
                }
            }
            Some(b'1'..=b'9') => {
                self.bump();
                self.skip_digits();
            }
            _ => return Err(self.error_here(LexErrorKind::InvalidNumber("expected digit"))),
        }

        if self.peek() == Some(b'.') {
            self.bump();
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_here(LexErrorKind::InvalidNumber(
                    "expected digit after '.'",
                )));
            }
            self.skip_digits();
            is_float = true;
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error_here(LexErrorKind::InvalidNumber(
                    "expected digit in exponent",
                )));
            }
            self.skip_digits();
            is_float = true;
        }

        let span = Span::new(start, self.pos);
        let text = std::str::from_utf8(&self.source[start..self.pos]).map_err(|_| {
            LexError::new(LexErrorKind::InvalidNumber("not ASCII"), position, span)
        })?;
        let (kind, value) = classify_number(text, is_float)
            .ok_or_else(|| LexError::new(LexErrorKind::NumberOutOfRange, position, span))?;
        Ok(self.token(kind, start, position, value))
    }

    /// Tokenize a string literal, decoding escapes.
    fn tokenize_string(&mut self, start: usize, position: Position) -> Result<Token<'src>, LexError> {
        // Consume opening quote
        self.bump();
        let content_start = self.pos;

        // Fast path: no escapes and valid UTF-8 borrows straight from the input.
        loop {
            match self.peek() {
                None => return Err(self.unterminated(start, position)),
                Some(b'"') => {
                    if let Ok(text) = std::str::from_utf8(&self.source[content_start..self.pos]) {
                        self.bump();
                        return Ok(self.token(
                            TokenKind::String,
                            start,
                            position,
                            TokenValue::String(Cow::Borrowed(text)),
                        ));
                    }
                    break;
                }
                Some(b'\\') => break,
                Some(b) if b < 0x20 => {
                    return Err(self.error_here(LexErrorKind::ControlCharacter(b)));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        // Slow path. Nothing between `content_start` and `pos` is a newline,
        // so rewinding keeps the line counters valid.
        self.pos = content_start;
        let mut out = String::with_capacity(16);
        loop {
            let at = self.pos;
            match self.peek() {
                None => return Err(self.unterminated(start, position)),
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(b'\\') => {
                    self.bump();
                    let c = self.tokenize_escape(at, start, position)?;
                    out.push(c);
                }
                Some(b) if b < 0x20 => {
                    return Err(self.error_here(LexErrorKind::ControlCharacter(b)));
                }
                Some(b) if b < 0x80 => {
                    self.bump();
                    out.push(b as char);
                }
                Some(_) => match decode_utf8(&self.source[at..]) {
                    Ok(c) => {
                        self.pos += c.len_utf8();
                        out.push(c);
                    }
                    Err(invalid_len) => match self.options.utf8 {
                        Utf8Policy::Reject => {
                            return Err(LexError::new(
                                LexErrorKind::InvalidUtf8,
                                self.position_at(at),
                                Span::new(at, at + invalid_len),
                            ));
                        }
                        Utf8Policy::Substitute => {
                            self.pos += invalid_len;
                            out.push(char::REPLACEMENT_CHARACTER);
                        }
                    },
                },
            }
        }

        Ok(self.token(
            TokenKind::String,
            start,
            position,
            TokenValue::String(Cow::Owned(out)),
        ))
    }

    fn unterminated(&self, start: usize, position: Position) -> LexError {
        LexError::new(
            LexErrorKind::UnterminatedString,
            position,
            Span::new(start, self.pos),
        )
    }

    /// Decode the escape after a backslash at `backslash`.
    fn tokenize_escape(
        &mut self,
        backslash: usize,
        start: usize,
        position: Position,
    ) -> Result<char, LexError> {
        let at = self.pos;
        let Some(b) = self.bump() else {
            return Err(self.unterminated(start, position));
        };
        let c = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.tokenize_unicode_escape(backslash),
            other => {
                let shown = if other.is_ascii() {
                    other as char
                } else {
                    char::REPLACEMENT_CHARACTER
                };
                return Err(LexError::new(
                    LexErrorKind::InvalidEscape(shown),
                    self.position_at(at),
                    Span::new(backslash, at + 1),
                ));
            }
        };
        Ok(c)
    }

    /// Decode `\uXXXX`, reassembling surrogate pairs.
    fn tokenize_unicode_escape(&mut self, backslash: usize) -> Result<char, LexError> {
        let first = self.read_hex4()?;

        match first {
            0xD800..=0xDBFF => {
                if self.peek() != Some(b'\\') || self.peek_nth(1) != Some(b'u') {
                    return Err(self.unpaired(first, backslash));
                }
                self.bump();
                self.bump();
                let second = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.unpaired(first, backslash));
                }
                let code =
                    0x10000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00);
                char::from_u32(code).ok_or_else(|| self.unpaired(first, backslash))
            }
            0xDC00..=0xDFFF => Err(self.unpaired(first, backslash)),
            _ => char::from_u32(u32::from(first)).ok_or_else(|| self.unpaired(first, backslash)),
        }
    }

    fn unpaired(&self, unit: u16, backslash: usize) -> LexError {
        LexError::new(
            LexErrorKind::UnpairedSurrogate(unit),
            self.position_at(backslash),
            Span::new(backslash, self.pos),
        )
    }

    fn read_hex4(&mut self) -> Result<u16, LexError> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                _ => return Err(self.error_here(LexErrorKind::InvalidUnicodeEscape)),
            };
            self.bump();
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Result<Token<'src>, LexError>;

    /// Yields tokens up to (not including) end of input, then stops.
    /// Stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Classify a grammatically valid number literal.
///
/// Integers that fit `i64` stay signed, non-negative integers that only fit
/// `u64` become unsigned, everything else is a float. Returns `None` when
/// the float overflows to infinity.
fn classify_number(text: &str, is_float: bool) -> Option<(TokenKind, TokenValue<'static>)> {
    if !is_float {
        if let Ok(n) = text.parse::<i64>() {
            return Some((TokenKind::Integer, TokenValue::Integer(n)));
        }
        if !text.starts_with('-')
            && let Ok(n) = text.parse::<u64>()
        {
            return Some((TokenKind::Unsigned, TokenValue::Unsigned(n)));
        }
    }
    let f: f64 = text.parse().ok()?;
    f.is_finite()
        .then_some((TokenKind::Float, TokenValue::Float(f)))
}

/// Decode one UTF-8 scalar at the start of `bytes`.
///
/// On failure returns the length of the maximal invalid subsequence.
fn decode_utf8(bytes: &[u8]) -> Result<char, usize> {
    let window = &bytes[..bytes.len().min(4)];
    let (valid, error_len) = match std::str::from_utf8(window) {
        Ok(s) => (s.len(), None),
        Err(e) => (e.valid_up_to(), e.error_len()),
    };
    if valid > 0
        && let Some(c) = std::str::from_utf8(&window[..valid])
            .ok()
            .and_then(|s| s.chars().next())
    {
        return Ok(c);
    }
    Err(error_len.unwrap_or(window.len()).max(1))
}
