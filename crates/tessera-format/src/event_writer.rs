//! Write a parse event stream as JSON text.

use std::borrow::Cow;

use tessera_parse::Consumer;

use crate::{FormatOptions, JsonWriter, StructureError};

/// A [`Consumer`] that writes the events it receives as JSON text.
///
/// Feeding it straight from a [`Parser`](tessera_parse::Parser) reformats a
/// document (minify or pretty-print) without building a tree. An event
/// that would produce malformed output stops the stream and is reported by
/// [`EventWriter::finish`].
#[derive(Debug, Clone, Default)]
pub struct EventWriter {
    writer: JsonWriter,
    error: Option<StructureError>,
}

impl EventWriter {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            writer: JsonWriter::with_options(options),
            error: None,
        }
    }

    /// The text written so far.
    pub fn finish(self) -> Result<String, StructureError> {
        match self.error {
            Some(err) => Err(err),
            None => self.writer.finish_checked(),
        }
    }

    fn record(&mut self, result: Result<(), StructureError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.error.get_or_insert(err);
                false
            }
        }
    }
}

impl<'src> Consumer<'src> for EventWriter {
    fn null(&mut self) -> bool {
        let result = self.writer.write_null();
        self.record(result)
    }

    fn boolean(&mut self, value: bool) -> bool {
        let result = self.writer.write_bool(value);
        self.record(result)
    }

    fn number_integer(&mut self, value: i64) -> bool {
        let result = self.writer.write_i64(value);
        self.record(result)
    }

    fn number_unsigned(&mut self, value: u64) -> bool {
        let result = self.writer.write_u64(value);
        self.record(result)
    }

    fn number_float(&mut self, value: f64) -> bool {
        let result = self.writer.write_f64(value);
        self.record(result)
    }

    fn string(&mut self, value: Cow<'src, str>) -> bool {
        let result = self.writer.write_str(&value);
        self.record(result)
    }

    fn binary(&mut self, bytes: Cow<'src, [u8]>, subtype: Option<u64>) -> bool {
        let result = self.writer.write_binary(&bytes, subtype);
        self.record(result)
    }

    fn begin_object(&mut self) -> bool {
        let result = self.writer.begin_object();
        self.record(result)
    }

    fn key(&mut self, key: Cow<'src, str>) -> bool {
        let result = self.writer.key(&key);
        self.record(result)
    }

    fn end_object(&mut self) -> bool {
        let result = self.writer.end_object();
        self.record(result)
    }

    fn begin_array(&mut self) -> bool {
        let result = self.writer.begin_array();
        self.record(result)
    }

    fn end_array(&mut self) -> bool {
        let result = self.writer.end_array();
        self.record(result)
    }
}
