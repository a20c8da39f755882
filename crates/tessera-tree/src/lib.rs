//! In-memory JSON documents.
//!
//! This crate turns parse events into a [`Value`] tree, provides checked and
//! unchecked access to it, and walks it with a single [`Cursor`] type that
//! works the same over objects, arrays and scalars.
//!
//! ```
//! let v = tessera_tree::parse(r#"{"name": "tessera", "tags": ["json"]}"#).unwrap();
//! assert_eq!(v["name"].as_str(), Some("tessera"));
//! assert_eq!(v["tags"][0].as_str(), Some("json"));
//! assert!(v["missing"].is_null());
//! ```

use std::io::Read;

use tessera_parse::Parser;
use tracing::debug;

mod builder;
mod cursor;
mod diagnostic;
mod error;
mod iter;
mod map;
mod replay;
mod value;

pub use builder::{BuildError, TreeBuilder};
pub use cursor::{Cursor, Item, UsageError};
pub use diagnostic::Diagnostic;
pub use error::{AccessError, Error};
pub use iter::Iter;
pub use map::Map;
pub use replay::replay;
pub use tessera_parse::{ParseError, ParseErrorKind, ParseOptions, ParseOutcome};
pub use value::{Binary, Kind, Value};

/// Parse a single JSON document.
pub fn parse(source: impl AsRef<[u8]>) -> Result<Value, Error> {
    parse_with(source, ParseOptions::default())
}

/// Parse a single JSON document with the given options.
///
/// `allow_multiple_values` is ignored; use [`parse_many`] for streams.
pub fn parse_with(source: impl AsRef<[u8]>, options: ParseOptions) -> Result<Value, Error> {
    let builder = build(source.as_ref(), options.allow_multiple_values(false))?;
    Ok(builder.finish()?)
}

/// Parse a whitespace-separated stream of JSON values.
///
/// ```
/// use tessera_tree::{ParseOptions, Value, parse_many};
///
/// let values = parse_many("1 [2]\n{}", ParseOptions::default()).unwrap();
/// assert_eq!(values, [Value::from(1), Value::from(vec![2]), Value::object()]);
/// ```
pub fn parse_many(source: impl AsRef<[u8]>, options: ParseOptions) -> Result<Vec<Value>, Error> {
    let builder = build(source.as_ref(), options.allow_multiple_values(true))?;
    Ok(builder.finish_many()?)
}

/// Read `reader` to the end and parse it as a single document.
pub fn from_reader<R: Read>(reader: R) -> Result<Value, Error> {
    from_reader_with(reader, ParseOptions::default())
}

/// Read `reader` to the end and parse it with the given options.
pub fn from_reader_with<R: Read>(mut reader: R, options: ParseOptions) -> Result<Value, Error> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    parse_with(source, options)
}

fn build(source: &[u8], options: ParseOptions) -> Result<TreeBuilder, ParseError> {
    debug!(len = source.len(), "building tree");
    let mut builder = TreeBuilder::new();
    Parser::with_options(source, options).parse(&mut builder)?;
    Ok(builder)
}

#[cfg(test)]
mod tests;
