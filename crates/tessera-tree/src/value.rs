//! The JSON value tree.
//!
//! Every [`Value`] owns its children outright, so a value can never be
//! moved into one of its own descendants. Destruction, cloning and equality
//! all walk the tree with heap worklists: a document nested millions of
//! levels deep is as safe to drop or compare as a flat one.

use std::borrow::Cow;
use std::fmt;
use std::mem;
use std::ops::Index;

use crate::{AccessError, Cursor, Iter, Map};

/// A JSON value.
#[derive(Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Any integer that fits `i64`.
    Integer(i64),
    /// Integers above `i64::MAX` that still fit `u64`.
    Unsigned(u64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    /// Raw bytes. Never produced by the text parser.
    Binary(Binary),
}

/// A byte string with an optional application-defined subtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Binary {
    pub bytes: Vec<u8>,
    pub subtype: Option<u64>,
}

impl Binary {
    /// Bytes without a subtype.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            subtype: None,
        }
    }

    /// Bytes tagged with `subtype`.
    pub fn with_subtype(bytes: impl Into<Vec<u8>>, subtype: u64) -> Self {
        Self {
            bytes: bytes.into(),
            subtype: Some(subtype),
        }
    }
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Integer,
    Unsigned,
    Float,
    String,
    Array,
    Object,
    Binary,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Integer => "integer",
            Kind::Unsigned => "unsigned integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Binary => "binary",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static NULL: Value = Value::Null;

impl Value {
    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Integer,
            Value::Unsigned(_) => Kind::Unsigned,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Binary(_) => Kind::Binary,
        }
    }

    /// Coarse type name: all three numeric variants report `"number"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) | Value::Unsigned(_) | Value::Float(_) => "number",
            _ => self.kind().name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Integer(_) | Value::Unsigned(_) | Value::Float(_)
        )
    }

    /// `Integer` or `Unsigned`.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Unsigned(_))
    }

    pub fn is_unsigned(&self) -> bool {
        match self {
            Value::Unsigned(_) => true,
            Value::Integer(n) => *n >= 0,
            _ => false,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Binary(_))
    }

    /// Anything but an array or object.
    pub fn is_primitive(&self) -> bool {
        !self.is_structured()
    }

    /// An array or object.
    pub fn is_structured(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as `i64`, if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Unsigned(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// The value as `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(n) => u64::try_from(*n).ok(),
            Value::Unsigned(n) => Some(*n),
            _ => None,
        }
    }

    /// Any number, widened or rounded to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Unsigned(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Value::Binary(binary) => Some(binary),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> AccessError {
        AccessError::Type {
            expected,
            actual: self.kind(),
        }
    }

    /// Element `index` of an array.
    pub fn at(&self, index: usize) -> Result<&Value, AccessError> {
        match self {
            Value::Array(items) => items.get(index).ok_or(AccessError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            _ => Err(self.mismatch("array")),
        }
    }

    /// Mutable element `index` of an array.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value, AccessError> {
        let actual = self.kind();
        match self {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(AccessError::IndexOutOfRange { index, len })
            }
            _ => Err(AccessError::Type {
                expected: "array",
                actual,
            }),
        }
    }

    /// Member `key` of an object.
    pub fn get_key(&self, key: &str) -> Result<&Value, AccessError> {
        match self {
            Value::Object(map) => map.get(key).ok_or_else(|| AccessError::KeyNotFound {
                key: key.to_owned(),
            }),
            _ => Err(self.mismatch("object")),
        }
    }

    /// Mutable member `key` of an object.
    pub fn get_key_mut(&mut self, key: &str) -> Result<&mut Value, AccessError> {
        let actual = self.kind();
        match self {
            Value::Object(map) => map.get_mut(key).ok_or_else(|| AccessError::KeyNotFound {
                key: key.to_owned(),
            }),
            _ => Err(AccessError::Type {
                expected: "object",
                actual,
            }),
        }
    }

    /// Append to an array. `null` becomes an empty array first.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), AccessError> {
        if self.is_null() {
            *self = Value::array();
        }
        match self {
            Value::Array(items) => {
                items.push(value.into());
                Ok(())
            }
            _ => Err(self.mismatch("array")),
        }
    }

    /// Insert or replace an object member, returning the previous value.
    /// `null` becomes an empty object first.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, AccessError> {
        if self.is_null() {
            *self = Value::object();
        }
        match self {
            Value::Object(map) => Ok(map.insert(key, value.into())),
            _ => Err(self.mismatch("object")),
        }
    }

    /// Remove and return member `key`.
    pub fn remove_key(&mut self, key: &str) -> Result<Value, AccessError> {
        match self {
            Value::Object(map) => map.remove(key).ok_or_else(|| AccessError::KeyNotFound {
                key: key.to_owned(),
            }),
            _ => Err(self.mismatch("object")),
        }
    }

    /// Remove and return element `index`, shifting later elements down.
    pub fn remove_index(&mut self, index: usize) -> Result<Value, AccessError> {
        match self {
            Value::Array(items) if index < items.len() => Ok(items.remove(index)),
            Value::Array(items) => Err(AccessError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            _ => Err(self.mismatch("array")),
        }
    }

    /// Number of elements: members or items for containers, 0 for `null`,
    /// 1 for any other scalar.
    pub fn size(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 1,
        }
    }

    /// Whether [`size`](Value::size) is zero.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Reset to the empty value of the same kind: `false`, zero, `""`,
    /// or an empty container. `null` stays `null`.
    pub fn clear(&mut self) {
        match self {
            Value::Null => {}
            Value::Bool(b) => *b = false,
            Value::Integer(n) => *n = 0,
            Value::Unsigned(n) => *n = 0,
            Value::Float(n) => *n = 0.0,
            Value::String(s) => s.clear(),
            Value::Array(_) => *self = Value::array(),
            Value::Object(_) => *self = Value::object(),
            Value::Binary(binary) => binary.bytes.clear(),
        }
    }

    /// Replace with `null`, returning the previous value.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    /// Member `key`, if this is an object that has it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_object_mut()?.get_mut(key)
    }

    /// Element `index`, if this is an array that long.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.as_array_mut()?.get_mut(index)
    }

    /// Member `key` converted to `T`, or `default` if it is missing or
    /// does not convert.
    ///
    /// ```
    /// use tessera_tree::Value;
    ///
    /// let v: Value = [("port", Value::from(8080))].into_iter().collect();
    /// assert_eq!(v.value_or("port", 80u16), 8080);
    /// assert_eq!(v.value_or("host", "localhost"), "localhost");
    /// ```
    pub fn value_or<'a, T>(&'a self, key: &str, default: T) -> T
    where
        T: TryFrom<&'a Value>,
    {
        self.get(key)
            .and_then(|value| T::try_from(value).ok())
            .unwrap_or(default)
    }

    /// Iterate the elements: items of an array, members of an object, the
    /// value itself for a scalar, nothing for `null`.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Copy without children: scalars in full, containers empty.
    fn shallow_clone(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Integer(n) => Value::Integer(*n),
            Value::Unsigned(n) => Value::Unsigned(*n),
            Value::Float(n) => Value::Float(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Array(items) => Value::Array(Vec::with_capacity(items.len())),
            Value::Object(map) => Value::Object(Map::with_capacity(map.len())),
            Value::Binary(binary) => Value::Binary(binary.clone()),
        }
    }

    /// Add a finished child to a container under construction.
    fn attach(&mut self, key: Option<String>, child: Value) {
        match (self, key) {
            (Value::Array(items), _) => items.push(child),
            (Value::Object(map), Some(key)) => {
                map.insert(key, child);
            }
            _ => {}
        }
    }
}

fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Unsigned(x), Value::Unsigned(y)) => x == y,
        (Value::Integer(x), Value::Unsigned(y)) | (Value::Unsigned(y), Value::Integer(x)) => {
            u64::try_from(*x).is_ok_and(|x| x == *y)
        }
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Binary(x), Value::Binary(y)) => x == y,
        _ => false,
    }
}

/// Structural equality.
///
/// `Integer` and `Unsigned` compare by numeric value; `Float` only equals
/// `Float`. Objects are equal when they hold the same keys with equal values,
/// in any order.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Value::Array(x), Value::Array(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    pending.extend(a.iter().zip(b.iter()).map(|(l, r)| (l.value, r.value)));
                }
                (Value::Object(x), Value::Object(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    for item in a.iter() {
                        let Some(theirs) = item.key.and_then(|key| y.get(key)) else {
                            return false;
                        };
                        pending.push((item.value, theirs));
                    }
                }
                _ if !scalar_eq(a, b) => return false,
                _ => {}
            }
        }
        true
    }
}

/// A container being copied.
struct CloneFrame<'a> {
    source: Cursor<'a>,
    copy: Value,
    /// Key the copy goes under in its parent object.
    key: Option<String>,
}

impl<'a> CloneFrame<'a> {
    fn new(source: &'a Value, key: Option<&str>) -> Self {
        Self {
            source: Cursor::begin(source),
            copy: source.shallow_clone(),
            key: key.map(str::to_owned),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        if self.is_primitive() {
            return self.shallow_clone();
        }
        let mut root = CloneFrame::new(self, None);
        let mut stack: Vec<CloneFrame<'_>> = Vec::new();
        loop {
            let frame = stack.last_mut().unwrap_or(&mut root);
            match frame.source.next_item() {
                Some(item) if item.value.is_structured() => {
                    stack.push(CloneFrame::new(item.value, item.key));
                }
                Some(item) => frame
                    .copy
                    .attach(item.key.map(str::to_owned), item.value.shallow_clone()),
                None => match stack.pop() {
                    Some(done) => stack
                        .last_mut()
                        .unwrap_or(&mut root)
                        .copy
                        .attach(done.key, done.copy),
                    None => return root.copy,
                },
            }
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match self {
            Value::Array(items) if !items.is_empty() => mem::take(items),
            Value::Object(map) if !map.is_empty() => map.drain_values().collect(),
            _ => return,
        };
        // Children are emptied before they drop, so each drop below is shallow.
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Array(items) => pending.append(items),
                Value::Object(map) => pending.extend(map.drain_values()),
                _ => {}
            }
        }
    }
}

/// Shared `null` for misses.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Shared `null` for misses.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = crate::Item<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Integer(n as i64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize, u8, u16, u32);

macro_rules! from_wide_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                match i64::try_from(n) {
                    Ok(n) => Value::Integer(n),
                    Err(_) => Value::Unsigned(n as u64),
                }
            }
        }
    )*};
}

from_wide_unsigned!(u64, usize);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Value::String(s.into_owned())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Binary> for Value {
    fn from(binary: Binary) -> Self {
        Value::Binary(binary)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl TryFrom<&Value> for bool {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, AccessError> {
        value.as_bool().ok_or_else(|| value.mismatch("boolean"))
    }
}

macro_rules! try_from_integer {
    ($($ty:ty),*) => {$(
        impl TryFrom<&Value> for $ty {
            type Error = AccessError;

            fn try_from(value: &Value) -> Result<Self, AccessError> {
                let narrowed = match *value {
                    Value::Integer(n) => <$ty>::try_from(n).ok(),
                    Value::Unsigned(n) => <$ty>::try_from(n).ok(),
                    _ => return Err(value.mismatch("integer")),
                };
                narrowed.ok_or(AccessError::NumberOutOfRange {
                    target: stringify!($ty),
                })
            }
        }
    )*};
}

try_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TryFrom<&Value> for f64 {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, AccessError> {
        value.as_f64().ok_or_else(|| value.mismatch("number"))
    }
}

impl TryFrom<&Value> for String {
    type Error = AccessError;

    fn try_from(value: &Value) -> Result<Self, AccessError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| value.mismatch("string"))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = AccessError;

    fn try_from(value: &'a Value) -> Result<Self, AccessError> {
        value.as_str().ok_or_else(|| value.mismatch("string"))
    }
}
