//! Low-level JSON output writer.
//!
//! Provides a structured way to build JSON text with separators and
//! indentation handled in one place, independent of where the values come
//! from. Both the tree serializer and [`EventWriter`](crate::EventWriter)
//! drive it.

use std::io;

use crate::FormatOptions;
use crate::StructureError;
use crate::scalar::{escape_str, format_float};

/// Context for tracking serialization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Inside an object
    Object {
        /// Members started so far
        count: usize,
        /// A key was written and its value is next
        awaiting_value: bool,
    },
    /// Inside an array
    Array { count: usize },
}

/// Low-level JSON output writer.
///
/// Values are written depth-first with `begin_*`/`end_*` calls around
/// containers and [`JsonWriter::key`] before each object member. Calls that
/// would produce malformed text return a [`StructureError`] and write
/// nothing. Several top-level values are separated by newlines.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    out: String,
    stack: Vec<Context>,
    options: FormatOptions,
    roots: usize,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    /// Create a new writer with default (compact) options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
            options,
            roots: 0,
        }
    }

    /// The options this writer formats with.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of top-level values started.
    pub fn roots(&self) -> usize {
        self.roots
    }

    /// Bytes written and not yet flushed.
    pub fn buffered(&self) -> usize {
        self.out.len()
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Consume the writer, failing if a container is still open.
    pub fn finish_checked(self) -> Result<String, StructureError> {
        match self.stack.len() {
            0 => Ok(self.out),
            depth => Err(StructureError::Unclosed { depth }),
        }
    }

    /// Move the buffered output into `sink`.
    pub fn flush_to<W: io::Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.out.as_bytes())?;
        self.out.clear();
        Ok(())
    }

    fn write_newline_indent(&mut self) {
        if !self.options.is_pretty() {
            return;
        }
        self.out.push('\n');
        let width = self.stack.len() * self.options.indent_width;
        self.out.extend(std::iter::repeat_n(self.options.indent_char, width));
    }

    fn write_quoted(&mut self, s: &str) {
        self.out.push('"');
        self.out.push_str(&escape_str(s, self.options.ensure_ascii));
        self.out.push('"');
    }

    /// Write separators for the next value at the current position.
    fn before_value(&mut self) -> Result<(), StructureError> {
        match self.stack.last_mut() {
            None => {
                if self.roots > 0 {
                    self.out.push('\n');
                }
                self.roots += 1;
            }
            Some(Context::Object { awaiting_value, .. }) => {
                if !*awaiting_value {
                    return Err(StructureError::MissingKey);
                }
                *awaiting_value = false;
            }
            Some(Context::Array { count }) => {
                *count += 1;
                if *count > 1 {
                    self.out.push(',');
                }
                self.write_newline_indent();
            }
        }
        Ok(())
    }

    /// Begin an object.
    pub fn begin_object(&mut self) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push('{');
        self.stack.push(Context::Object {
            count: 0,
            awaiting_value: false,
        });
        Ok(())
    }

    /// Write the key of the next object member.
    pub fn key(&mut self, key: &str) -> Result<(), StructureError> {
        let Some(Context::Object {
            count,
            awaiting_value,
        }) = self.stack.last_mut()
        else {
            return Err(StructureError::UnexpectedKey);
        };
        if *awaiting_value {
            return Err(StructureError::UnexpectedKey);
        }
        *count += 1;
        *awaiting_value = true;
        if *count > 1 {
            self.out.push(',');
        }
        self.write_newline_indent();
        self.write_quoted(key);
        self.out.push(':');
        if self.options.is_pretty() {
            self.out.push(' ');
        }
        Ok(())
    }

    /// End an object.
    pub fn end_object(&mut self) -> Result<(), StructureError> {
        match self.stack.last() {
            Some(&Context::Object {
                count,
                awaiting_value: false,
            }) => {
                self.stack.pop();
                if count > 0 {
                    self.write_newline_indent();
                }
                self.out.push('}');
                Ok(())
            }
            _ => Err(StructureError::MismatchedClose { closing: "object" }),
        }
    }

    /// Begin an array.
    pub fn begin_array(&mut self) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push('[');
        self.stack.push(Context::Array { count: 0 });
        Ok(())
    }

    /// End an array.
    pub fn end_array(&mut self) -> Result<(), StructureError> {
        match self.stack.last() {
            Some(&Context::Array { count }) => {
                self.stack.pop();
                if count > 0 {
                    self.write_newline_indent();
                }
                self.out.push(']');
                Ok(())
            }
            _ => Err(StructureError::MismatchedClose { closing: "array" }),
        }
    }

    /// Write `null`.
    pub fn write_null(&mut self) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push_str("null");
        Ok(())
    }

    /// Write a boolean value.
    pub fn write_bool(&mut self, v: bool) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    /// Write an i64 value.
    pub fn write_i64(&mut self, v: i64) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push_str(&v.to_string());
        Ok(())
    }

    /// Write a u64 value.
    pub fn write_u64(&mut self, v: u64) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push_str(&v.to_string());
        Ok(())
    }

    /// Write an f64 value, honoring `float_precision`.
    pub fn write_f64(&mut self, v: f64) -> Result<(), StructureError> {
        self.before_value()?;
        self.out.push_str(&format_float(v, self.options.float_precision));
        Ok(())
    }

    /// Write a string value.
    pub fn write_str(&mut self, s: &str) -> Result<(), StructureError> {
        self.before_value()?;
        self.write_quoted(s);
        Ok(())
    }

    /// Write a byte string as `{"bytes": [...], "subtype": n}`.
    ///
    /// JSON has no byte strings; this object form keeps the subtype and
    /// reads back as an ordinary object.
    pub fn write_binary(
        &mut self,
        bytes: &[u8],
        subtype: Option<u64>,
    ) -> Result<(), StructureError> {
        self.begin_object()?;
        self.key("bytes")?;
        self.begin_array()?;
        for &byte in bytes {
            self.write_u64(u64::from(byte))?;
        }
        self.end_array()?;
        self.key("subtype")?;
        match subtype {
            Some(n) => self.write_u64(n)?,
            None => self.write_null()?,
        }
        self.end_object()
    }
}
