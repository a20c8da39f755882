//! A single cursor type over objects, arrays and scalars.
//!
//! A [`Cursor`] is bound to one [`Value`] and points either at one of its
//! elements or one past the last. Objects and arrays have one element per
//! member or item. A scalar has exactly one element, the scalar itself,
//! except `null`, whose range is empty.

use std::fmt;
use std::ptr;

use crate::Value;

/// Misuse of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// Dereferenced or advanced at the end.
    PastEnd,
    /// Retreated at the beginning.
    BeforeBegin,
    /// Asked for a key outside an object.
    NotAnObject,
    /// Compared cursors bound to different values.
    Incomparable,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UsageError::PastEnd => "cursor is past the end",
            UsageError::BeforeBegin => "cursor is at the beginning",
            UsageError::NotAnObject => "cursor does not point into an object",
            UsageError::Incomparable => "cursors belong to different values",
        })
    }
}

impl std::error::Error for UsageError {}

/// One element reached by a cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item<'a> {
    /// Member key; `None` outside objects.
    pub key: Option<&'a str>,
    pub value: &'a Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Object(usize),
    Array(usize),
    Scalar { past_end: bool },
}

/// A position inside one [`Value`].
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    value: &'a Value,
    position: Position,
}

impl<'a> Cursor<'a> {
    /// Cursor at the first element of `value`.
    pub fn begin(value: &'a Value) -> Self {
        let position = match value {
            Value::Object(_) => Position::Object(0),
            Value::Array(_) => Position::Array(0),
            Value::Null => Position::Scalar { past_end: true },
            _ => Position::Scalar { past_end: false },
        };
        Self { value, position }
    }

    /// Cursor one past the last element of `value`.
    pub fn end(value: &'a Value) -> Self {
        let position = match value {
            Value::Object(map) => Position::Object(map.len()),
            Value::Array(items) => Position::Array(items.len()),
            _ => Position::Scalar { past_end: true },
        };
        Self { value, position }
    }

    /// The value this cursor walks.
    pub fn container(&self) -> &'a Value {
        self.value
    }

    /// Number of elements before the cursor.
    pub fn index(&self) -> usize {
        match self.position {
            Position::Object(i) | Position::Array(i) => i,
            Position::Scalar { past_end: false } => 0,
            Position::Scalar { past_end: true } => self.value.size(),
        }
    }

    pub fn is_begin(&self) -> bool {
        self.index() == 0
    }

    pub fn is_end(&self) -> bool {
        self.index() == self.value.size()
    }

    fn seek(&mut self, index: usize) {
        self.position = match self.position {
            Position::Object(_) => Position::Object(index),
            Position::Array(_) => Position::Array(index),
            Position::Scalar { .. } => Position::Scalar {
                past_end: index >= self.value.size(),
            },
        };
    }

    /// Move to the next element.
    pub fn advance(&mut self) -> Result<(), UsageError> {
        if self.is_end() {
            return Err(UsageError::PastEnd);
        }
        self.seek(self.index() + 1);
        Ok(())
    }

    /// Move to the previous element.
    pub fn retreat(&mut self) -> Result<(), UsageError> {
        if self.is_begin() {
            return Err(UsageError::BeforeBegin);
        }
        self.seek(self.index() - 1);
        Ok(())
    }

    /// The element under the cursor.
    pub fn value(&self) -> Result<&'a Value, UsageError> {
        self.item().map(|item| item.value)
    }

    /// The key of the member under the cursor.
    pub fn key(&self) -> Result<&'a str, UsageError> {
        match (self.value, self.position) {
            (Value::Object(map), Position::Object(i)) => map
                .get_index(i)
                .map(|(key, _)| key)
                .ok_or(UsageError::PastEnd),
            _ => Err(UsageError::NotAnObject),
        }
    }

    /// Key (for objects) and value under the cursor.
    pub fn item(&self) -> Result<Item<'a>, UsageError> {
        let item = match (self.value, self.position) {
            (Value::Object(map), Position::Object(i)) => map
                .get_index(i)
                .map(|(key, value)| Item {
                    key: Some(key),
                    value,
                }),
            (Value::Array(items), Position::Array(i)) => {
                items.get(i).map(|value| Item { key: None, value })
            }
            (value, Position::Scalar { past_end: false }) => Some(Item { key: None, value }),
            _ => None,
        };
        item.ok_or(UsageError::PastEnd)
    }

    /// Whether both cursors sit at the same element of the same value.
    pub fn try_eq(&self, other: &Cursor<'_>) -> Result<bool, UsageError> {
        if !ptr::eq(self.value, other.value) {
            return Err(UsageError::Incomparable);
        }
        Ok(self.index() == other.index())
    }

    /// The current element, then advance. `None` at the end.
    pub(crate) fn next_item(&mut self) -> Option<Item<'a>> {
        let item = self.item().ok()?;
        self.seek(self.index() + 1);
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_walk() {
        let v = Value::from(vec![10, 20]);
        let mut cursor = Cursor::begin(&v);
        assert_eq!(cursor.value(), Ok(&Value::from(10)));
        assert_eq!(cursor.key(), Err(UsageError::NotAnObject));
        cursor.advance().unwrap();
        assert_eq!(cursor.value(), Ok(&Value::from(20)));
        cursor.advance().unwrap();
        assert!(cursor.is_end());
        assert!(cursor.try_eq(&Cursor::end(&v)).unwrap());
        assert_eq!(cursor.value(), Err(UsageError::PastEnd));
        assert_eq!(cursor.advance(), Err(UsageError::PastEnd));
        cursor.retreat().unwrap();
        cursor.retreat().unwrap();
        assert_eq!(cursor.retreat(), Err(UsageError::BeforeBegin));
    }

    #[test]
    fn test_object_keys() {
        let v: Value = [("a", 1), ("b", 2)].into_iter().collect();
        let mut cursor = Cursor::begin(&v);
        assert_eq!(cursor.key(), Ok("a"));
        cursor.advance().unwrap();
        assert_eq!(cursor.key(), Ok("b"));
        assert_eq!(cursor.value(), Ok(&Value::from(2)));
        cursor.advance().unwrap();
        assert_eq!(cursor.key(), Err(UsageError::PastEnd));
    }

    #[test]
    fn test_scalar_has_one_element() {
        let v = Value::from("only");
        let mut cursor = Cursor::begin(&v);
        assert!(!cursor.is_end());
        assert_eq!(cursor.value(), Ok(&v));
        cursor.advance().unwrap();
        assert!(cursor.is_end());
        assert_eq!(cursor.value(), Err(UsageError::PastEnd));
        cursor.retreat().unwrap();
        assert!(cursor.is_begin());
    }

    #[test]
    fn test_null_is_empty() {
        let v = Value::Null;
        let begin = Cursor::begin(&v);
        assert!(begin.is_end());
        assert!(begin.try_eq(&Cursor::end(&v)).unwrap());
        assert_eq!(begin.value(), Err(UsageError::PastEnd));
    }

    #[test]
    fn test_different_values_are_incomparable() {
        let a = Value::from(vec![1]);
        let b = Value::from(vec![1]);
        assert_eq!(
            Cursor::begin(&a).try_eq(&Cursor::begin(&b)),
            Err(UsageError::Incomparable)
        );
    }

    #[test]
    fn test_empty_containers() {
        for v in [Value::array(), Value::object()] {
            let cursor = Cursor::begin(&v);
            assert!(cursor.is_begin() && cursor.is_end());
        }
    }
}
