//! Source locations: byte spans and line-aware positions.

use std::fmt;

/// A span representing a byte range in the source input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start (inclusive)
    pub start: usize,
    /// Byte offset of the end (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Length of this span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether this span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extend this span to include another span.
    #[inline]
    pub fn extend(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Get the source bytes covered by this span.
    ///
    /// Out-of-range spans are clamped to the input.
    #[inline]
    pub fn slice<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        let end = self.end.min(source.len());
        let start = self.start.min(end);
        &source[start..end]
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Progress marker through the input, used for diagnostics.
///
/// All counters are in bytes. `\n` is the only line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Total number of bytes consumed.
    pub chars_read_total: usize,
    /// Number of bytes consumed on the current line.
    pub chars_read_current_line: usize,
    /// Number of line terminators consumed.
    pub lines_read: usize,
}

impl Position {
    /// Byte offset from the start of the input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.chars_read_total
    }

    /// 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.lines_read + 1
    }

    /// 1-based column number (in bytes).
    #[inline]
    pub fn column(&self) -> usize {
        self.chars_read_current_line + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line(), self.column())
    }
}

impl From<Position> for usize {
    fn from(position: Position) -> Self {
        position.chars_read_total
    }
}
