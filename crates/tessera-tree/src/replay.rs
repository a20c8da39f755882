//! Emit a tree as parse events.

use std::borrow::Cow;

use tessera_parse::{Consumer, ParseOutcome};

use crate::{Cursor, Value};

/// Walk `value` depth-first and deliver it to `consumer` as the event
/// sequence a parser would produce for its serialized form.
///
/// Strings and keys are lent to the consumer without copying. Returns
/// [`ParseOutcome::Stopped`] if the consumer declined to continue.
pub fn replay<'v, C: Consumer<'v> + ?Sized>(
    value: &'v Value,
    consumer: &mut C,
) -> ParseOutcome {
    let mut stack: Vec<Cursor<'v>> = Vec::new();
    if !open(value, consumer, &mut stack) {
        return ParseOutcome::Stopped;
    }
    while let Some(cursor) = stack.last_mut() {
        match cursor.next_item() {
            Some(item) => {
                if let Some(key) = item.key
                    && !consumer.key(Cow::Borrowed(key))
                {
                    return ParseOutcome::Stopped;
                }
                if !open(item.value, consumer, &mut stack) {
                    return ParseOutcome::Stopped;
                }
            }
            None => {
                let closed = cursor.container();
                stack.pop();
                let more = match closed {
                    Value::Object(_) => consumer.end_object(),
                    _ => consumer.end_array(),
                };
                if !more {
                    return ParseOutcome::Stopped;
                }
            }
        }
    }
    ParseOutcome::Complete
}

/// Emit a scalar, or open a container and push a cursor over it.
fn open<'v, C: Consumer<'v> + ?Sized>(
    value: &'v Value,
    consumer: &mut C,
    stack: &mut Vec<Cursor<'v>>,
) -> bool {
    match value {
        Value::Object(_) => {
            stack.push(Cursor::begin(value));
            consumer.begin_object()
        }
        Value::Array(_) => {
            stack.push(Cursor::begin(value));
            consumer.begin_array()
        }
        Value::Null => consumer.null(),
        Value::Bool(b) => consumer.boolean(*b),
        Value::Integer(n) => consumer.number_integer(*n),
        Value::Unsigned(n) => consumer.number_unsigned(*n),
        Value::Float(n) => consumer.number_float(*n),
        Value::String(s) => consumer.string(Cow::Borrowed(s.as_str())),
        Value::Binary(binary) => {
            consumer.binary(Cow::Borrowed(binary.bytes.as_slice()), binary.subtype)
        }
    }
}
