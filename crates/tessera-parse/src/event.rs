//! Recorded parse events.

use std::borrow::Cow;

use crate::{Consumer, ParseError};

/// One parser notification, as a value.
///
/// Recording events with the [`Consumer`] impl for `Vec<Event>` and feeding
/// them back with [`Event::dispatch`] is equivalent to parsing directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'src> {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Number that fits `i64`.
    Integer(i64),
    /// Non-negative number that fits `u64` but not `i64`.
    Unsigned(u64),
    /// Any other number.
    Float(f64),
    /// String contents, escapes decoded.
    String(Cow<'src, str>),
    /// Byte string; never produced by the text parser.
    Binary {
        bytes: Cow<'src, [u8]>,
        subtype: Option<u64>,
    },
    /// `{`
    BeginObject,
    /// Member key, always followed by the member's value.
    Key(Cow<'src, str>),
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// The parse failed; always the last event.
    Error(ParseError),
}

impl<'src> Event<'src> {
    /// Deliver this event to `consumer`, returning its verdict.
    ///
    /// [`Event::Error`] reports the error and returns `false`.
    pub fn dispatch<C: Consumer<'src> + ?Sized>(self, consumer: &mut C) -> bool {
        match self {
            Event::Null => consumer.null(),
            Event::Bool(value) => consumer.boolean(value),
            Event::Integer(value) => consumer.number_integer(value),
            Event::Unsigned(value) => consumer.number_unsigned(value),
            Event::Float(value) => consumer.number_float(value),
            Event::String(value) => consumer.string(value),
            Event::Binary { bytes, subtype } => consumer.binary(bytes, subtype),
            Event::BeginObject => consumer.begin_object(),
            Event::Key(key) => consumer.key(key),
            Event::EndObject => consumer.end_object(),
            Event::BeginArray => consumer.begin_array(),
            Event::EndArray => consumer.end_array(),
            Event::Error(error) => {
                consumer.parse_error(&error);
                false
            }
        }
    }

    /// Detach the event from the source buffer.
    pub fn into_owned(self) -> Event<'static> {
        match self {
            Event::Null => Event::Null,
            Event::Bool(value) => Event::Bool(value),
            Event::Integer(value) => Event::Integer(value),
            Event::Unsigned(value) => Event::Unsigned(value),
            Event::Float(value) => Event::Float(value),
            Event::String(value) => Event::String(Cow::Owned(value.into_owned())),
            Event::Binary { bytes, subtype } => Event::Binary {
                bytes: Cow::Owned(bytes.into_owned()),
                subtype,
            },
            Event::BeginObject => Event::BeginObject,
            Event::Key(key) => Event::Key(Cow::Owned(key.into_owned())),
            Event::EndObject => Event::EndObject,
            Event::BeginArray => Event::BeginArray,
            Event::EndArray => Event::EndArray,
            Event::Error(error) => Event::Error(error),
        }
    }

    /// Whether this event opens a container.
    pub fn is_begin(&self) -> bool {
        matches!(self, Event::BeginObject | Event::BeginArray)
    }

    /// Whether this event closes a container.
    pub fn is_end(&self) -> bool {
        matches!(self, Event::EndObject | Event::EndArray)
    }
}
