//! JSON text output.
//!
//! Serializes [`Value`] trees and parse event streams as JSON, compact or
//! indented, through one [`JsonWriter`].
//!
//! ```
//! use tessera_format::{FormatOptions, to_string, to_string_with};
//!
//! let v = tessera_tree::parse(r#"{"b": [1, 2.0], "a": "é"}"#).unwrap();
//! assert_eq!(to_string(&v), r#"{"b":[1,2.0],"a":"é"}"#);
//!
//! let options = FormatOptions::new().sort_keys(true).ensure_ascii(true);
//! assert_eq!(to_string_with(&v, options), r#"{"a":"\u00e9","b":[1,2.0]}"#);
//! ```

use std::io;

use tessera_parse::{ParseError, ParseOptions, Parser};
use tessera_tree::Value;
use tracing::debug;

mod error;
mod event_writer;
mod options;
mod scalar;
mod serializer;
mod writer;

pub use error::StructureError;
pub use event_writer::EventWriter;
pub use options::FormatOptions;
pub use scalar::{escape_str, format_float};
pub use writer::JsonWriter;

/// Serialize a value as compact JSON.
pub fn to_string(value: &Value) -> String {
    to_string_with(value, FormatOptions::default())
}

/// Serialize a value as JSON indented by four spaces.
pub fn to_string_pretty(value: &Value) -> String {
    to_string_with(value, FormatOptions::pretty())
}

/// Serialize a value with the given options.
pub fn to_string_with(value: &Value, options: FormatOptions) -> String {
    let mut writer = JsonWriter::with_options(options);
    let result = serializer::write_value(&mut writer, value, None);
    debug_assert!(result.is_ok(), "tree traversal is always well nested");
    writer.finish()
}

/// Serialize a value with the given options as UTF-8 bytes.
pub fn to_vec_with(value: &Value, options: FormatOptions) -> Vec<u8> {
    to_string_with(value, options).into_bytes()
}

/// Serialize a value into `sink`.
///
/// Output is streamed in chunks rather than built whole. Only the sink's
/// own errors are returned.
pub fn to_writer<W: io::Write>(
    mut sink: W,
    value: &Value,
    options: FormatOptions,
) -> io::Result<()> {
    debug!(?options, "serializing to writer");
    let mut writer = JsonWriter::with_options(options);
    serializer::write_value(&mut writer, value, Some(&mut sink as &mut dyn io::Write))?;
    writer.flush_to(&mut sink)?;
    sink.flush()
}

/// Reformat JSON text without building a tree.
///
/// The source is parsed with `parse_options` and written back with
/// `format_options`, so this both minifies and pretty-prints.
///
/// ```
/// use tessera_format::{FormatOptions, reformat};
/// use tessera_parse::ParseOptions;
///
/// let source = br#"[1,{"a":null}]"#;
/// let pretty = reformat(source, ParseOptions::default(), FormatOptions::pretty()).unwrap();
/// assert_eq!(pretty, "[\n    1,\n    {\n        \"a\": null\n    }\n]");
/// ```
pub fn reformat(
    source: &[u8],
    parse_options: ParseOptions,
    format_options: FormatOptions,
) -> Result<String, ParseError> {
    let mut out = EventWriter::new(format_options);
    Parser::with_options(source, parse_options).parse(&mut out)?;
    let text = out.finish();
    debug_assert!(text.is_ok(), "parser events are always well nested");
    Ok(text.unwrap_or_default())
}
