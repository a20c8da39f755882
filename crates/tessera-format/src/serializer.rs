//! Serialize a value tree through a [`JsonWriter`].

use std::io;
use std::vec;

use tessera_tree::{Cursor, Item, Value};
use tracing::trace;

use crate::{JsonWriter, StructureError};

/// Buffered output size that triggers a flush to the sink.
const FLUSH_THRESHOLD: usize = 8 * 1024;

/// Members of one open container, in output order.
enum Frame<'a> {
    /// Array elements, or object members in insertion order.
    InOrder(Cursor<'a>),
    /// Object members sorted by key.
    Sorted(vec::IntoIter<Item<'a>>),
}

impl<'a> Frame<'a> {
    fn open(value: &'a Value, sort_keys: bool) -> Self {
        if sort_keys && value.is_object() {
            let mut members: Vec<Item<'a>> = value.iter().collect();
            members.sort_by(|a, b| a.key.cmp(&b.key));
            Frame::Sorted(members.into_iter())
        } else {
            Frame::InOrder(Cursor::begin(value))
        }
    }

    fn next_item(&mut self) -> Option<Item<'a>> {
        match self {
            Frame::InOrder(cursor) => {
                let item = cursor.item().ok()?;
                cursor.advance().ok()?;
                Some(item)
            }
            Frame::Sorted(members) => members.next(),
        }
    }

    fn is_object(&self) -> bool {
        match self {
            Frame::InOrder(cursor) => cursor.container().is_object(),
            Frame::Sorted(_) => true,
        }
    }
}

/// Write `value` depth-first with an explicit stack of cursors.
///
/// With a sink, output is flushed to it whenever the buffer grows past a
/// threshold; the caller flushes the remainder. Without one, everything
/// stays in the writer.
pub(crate) fn write_value(
    writer: &mut JsonWriter,
    value: &Value,
    mut sink: Option<&mut dyn io::Write>,
) -> io::Result<()> {
    let sort_keys = writer.options().sort_keys;
    let mut stack: Vec<Frame<'_>> = Vec::new();
    open(writer, value, sort_keys, &mut stack)?;

    while let Some(frame) = stack.last_mut() {
        match frame.next_item() {
            Some(item) => {
                if let Some(key) = item.key {
                    writer.key(key)?;
                }
                open(writer, item.value, sort_keys, &mut stack)?;
            }
            None => {
                let object = frame.is_object();
                stack.pop();
                if object {
                    writer.end_object()?;
                } else {
                    writer.end_array()?;
                }
            }
        }
        if let Some(sink) = sink.as_deref_mut()
            && writer.buffered() >= FLUSH_THRESHOLD
        {
            trace!(bytes = writer.buffered(), depth = stack.len(), "flushing");
            writer.flush_to(sink)?;
        }
    }
    Ok(())
}

/// Write a scalar, or open a container and push a frame over it.
fn open<'a>(
    writer: &mut JsonWriter,
    value: &'a Value,
    sort_keys: bool,
    stack: &mut Vec<Frame<'a>>,
) -> Result<(), StructureError> {
    match value {
        Value::Object(_) => {
            writer.begin_object()?;
            stack.push(Frame::open(value, sort_keys));
        }
        Value::Array(_) => {
            writer.begin_array()?;
            stack.push(Frame::open(value, sort_keys));
        }
        Value::Null => writer.write_null()?,
        Value::Bool(b) => writer.write_bool(*b)?,
        Value::Integer(n) => writer.write_i64(*n)?,
        Value::Unsigned(n) => writer.write_u64(*n)?,
        Value::Float(n) => writer.write_f64(*n)?,
        Value::String(s) => writer.write_str(s)?,
        Value::Binary(binary) => writer.write_binary(&binary.bytes, binary.subtype)?,
    }
    Ok(())
}
