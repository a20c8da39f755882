//! Writer misuse errors.

use std::fmt;
use std::io;

/// A call sequence that would produce malformed JSON.
///
/// [`JsonWriter`](crate::JsonWriter) rejects the call and leaves its output
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureError {
    /// A value was written inside an object where a key belongs.
    MissingKey,
    /// A key was written outside an object, or twice in a row.
    UnexpectedKey,
    /// A closing call does not match the innermost open container.
    MismatchedClose {
        /// `"object"` or `"array"`, whichever the call tried to close.
        closing: &'static str,
    },
    /// Output was finished with containers still open.
    Unclosed { depth: usize },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::MissingKey => write!(f, "object member written without a key"),
            StructureError::UnexpectedKey => write!(f, "key written where a value belongs"),
            StructureError::MismatchedClose { closing } => {
                write!(f, "end of {closing} without a matching begin")
            }
            StructureError::Unclosed { depth } => {
                write!(f, "{depth} container(s) left open")
            }
        }
    }
}

impl std::error::Error for StructureError {}

impl From<StructureError> for io::Error {
    fn from(err: StructureError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
