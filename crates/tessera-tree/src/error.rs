//! Errors raised by value access and document loading.

use std::fmt;
use std::io;

use tessera_parse::ParseError;

use crate::{BuildError, Kind};

/// A failed access on a [`Value`](crate::Value).
///
/// These are local and recoverable; the non-failing accessors (`get`,
/// `get_index`, indexing) return a default instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The value is not of the kind the operation needs.
    Type {
        expected: &'static str,
        actual: Kind,
    },
    /// Array index past the end.
    IndexOutOfRange { index: usize, len: usize },
    /// Object has no member with this key.
    KeyNotFound { key: String },
    /// Number does not fit the requested type.
    NumberOutOfRange { target: &'static str },
}

impl AccessError {
    /// Whether the value had the wrong kind.
    pub fn is_type_error(&self) -> bool {
        matches!(self, AccessError::Type { .. })
    }

    /// Whether an index, key or numeric range was violated.
    pub fn is_range_error(&self) -> bool {
        !self.is_type_error()
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::Type { expected, actual } => {
                write!(f, "type error: expected {expected}, found {actual}")
            }
            AccessError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            AccessError::KeyNotFound { key } => write!(f, "key {key:?} not found"),
            AccessError::NumberOutOfRange { target } => {
                write!(f, "number out of range for {target}")
            }
        }
    }
}

impl std::error::Error for AccessError {}

/// Failure loading a document.
#[derive(Debug)]
pub enum Error {
    /// The input is not valid JSON.
    Parse(ParseError),
    /// The event stream did not form the expected number of values.
    Build(BuildError),
    /// Reading failed.
    Io(io::Error),
}

impl Error {
    /// The parse error, if that is what this is.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "{err}"),
            Error::Build(err) => write!(f, "{err}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Build(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Error::Build(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
