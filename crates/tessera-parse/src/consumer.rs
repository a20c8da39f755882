//! The event consumer interface.

use std::borrow::Cow;

use crate::{Event, ParseError};

/// Receives parse events in document order.
///
/// Every method except [`Consumer::parse_error`] returns whether parsing
/// should continue. Returning `false` stops the parser right after the
/// current event with [`ParseOutcome::Stopped`](crate::ParseOutcome::Stopped).
///
/// For a successful parse the events form a well-nested sequence: every
/// `begin_*` is matched by the corresponding `end_*`, and inside an object
/// every `key` is followed by exactly one value.
pub trait Consumer<'src> {
    /// `null`
    fn null(&mut self) -> bool;

    /// `true` or `false`
    fn boolean(&mut self, value: bool) -> bool;

    /// Number that fits `i64`.
    fn number_integer(&mut self, value: i64) -> bool;

    /// Non-negative number above `i64::MAX` that fits `u64`.
    fn number_unsigned(&mut self, value: u64) -> bool;

    /// Any other number.
    fn number_float(&mut self, value: f64) -> bool;

    /// String value with escapes decoded.
    fn string(&mut self, value: Cow<'src, str>) -> bool;

    /// Byte string. The text parser never calls this; it is reached by
    /// replaying trees that hold binary values.
    fn binary(&mut self, bytes: Cow<'src, [u8]>, subtype: Option<u64>) -> bool;

    /// `{`
    fn begin_object(&mut self) -> bool;

    /// Member key.
    fn key(&mut self, key: Cow<'src, str>) -> bool;

    /// `}`
    fn end_object(&mut self) -> bool;

    /// `[`
    fn begin_array(&mut self) -> bool;

    /// `]`
    fn end_array(&mut self) -> bool;

    /// Called once, before the parser returns the error.
    fn parse_error(&mut self, error: &ParseError) {
        let _ = error;
    }
}

impl<'src, C: Consumer<'src> + ?Sized> Consumer<'src> for &mut C {
    fn null(&mut self) -> bool {
        (**self).null()
    }

    fn boolean(&mut self, value: bool) -> bool {
        (**self).boolean(value)
    }

    fn number_integer(&mut self, value: i64) -> bool {
        (**self).number_integer(value)
    }

    fn number_unsigned(&mut self, value: u64) -> bool {
        (**self).number_unsigned(value)
    }

    fn number_float(&mut self, value: f64) -> bool {
        (**self).number_float(value)
    }

    fn string(&mut self, value: Cow<'src, str>) -> bool {
        (**self).string(value)
    }

    fn binary(&mut self, bytes: Cow<'src, [u8]>, subtype: Option<u64>) -> bool {
        (**self).binary(bytes, subtype)
    }

    fn begin_object(&mut self) -> bool {
        (**self).begin_object()
    }

    fn key(&mut self, key: Cow<'src, str>) -> bool {
        (**self).key(key)
    }

    fn end_object(&mut self) -> bool {
        (**self).end_object()
    }

    fn begin_array(&mut self) -> bool {
        (**self).begin_array()
    }

    fn end_array(&mut self) -> bool {
        (**self).end_array()
    }

    fn parse_error(&mut self, error: &ParseError) {
        (**self).parse_error(error)
    }
}

/// Records every event, including the final error.
impl<'src> Consumer<'src> for Vec<Event<'src>> {
    fn null(&mut self) -> bool {
        self.push(Event::Null);
        true
    }

    fn boolean(&mut self, value: bool) -> bool {
        self.push(Event::Bool(value));
        true
    }

    fn number_integer(&mut self, value: i64) -> bool {
        self.push(Event::Integer(value));
        true
    }

    fn number_unsigned(&mut self, value: u64) -> bool {
        self.push(Event::Unsigned(value));
        true
    }

    fn number_float(&mut self, value: f64) -> bool {
        self.push(Event::Float(value));
        true
    }

    fn string(&mut self, value: Cow<'src, str>) -> bool {
        self.push(Event::String(value));
        true
    }

    fn binary(&mut self, bytes: Cow<'src, [u8]>, subtype: Option<u64>) -> bool {
        self.push(Event::Binary { bytes, subtype });
        true
    }

    fn begin_object(&mut self) -> bool {
        self.push(Event::BeginObject);
        true
    }

    fn key(&mut self, key: Cow<'src, str>) -> bool {
        self.push(Event::Key(key));
        true
    }

    fn end_object(&mut self) -> bool {
        self.push(Event::EndObject);
        true
    }

    fn begin_array(&mut self) -> bool {
        self.push(Event::BeginArray);
        true
    }

    fn end_array(&mut self) -> bool {
        self.push(Event::EndArray);
        true
    }

    fn parse_error(&mut self, error: &ParseError) {
        self.push(Event::Error(error.clone()));
    }
}

/// Accepts everything and keeps nothing.
///
/// Parsing into a `Validator` checks well-formedness without allocating
/// anything beyond the parser's own container stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl<'src> Consumer<'src> for Validator {
    fn null(&mut self) -> bool {
        true
    }

    fn boolean(&mut self, _value: bool) -> bool {
        true
    }

    fn number_integer(&mut self, _value: i64) -> bool {
        true
    }

    fn number_unsigned(&mut self, _value: u64) -> bool {
        true
    }

    fn number_float(&mut self, _value: f64) -> bool {
        true
    }

    fn string(&mut self, _value: Cow<'src, str>) -> bool {
        true
    }

    fn binary(&mut self, _bytes: Cow<'src, [u8]>, _subtype: Option<u64>) -> bool {
        true
    }

    fn begin_object(&mut self) -> bool {
        true
    }

    fn key(&mut self, _key: Cow<'src, str>) -> bool {
        true
    }

    fn end_object(&mut self) -> bool {
        true
    }

    fn begin_array(&mut self) -> bool {
        true
    }

    fn end_array(&mut self) -> bool {
        true
    }
}
