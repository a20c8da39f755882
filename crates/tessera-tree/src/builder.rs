//! Tree builder from parse events.

use std::borrow::Cow;
use std::mem;

use tessera_parse::Consumer;
use tracing::trace;

use crate::value::{Binary, Value};
use crate::Map;

/// Error during tree building.
///
/// The parser never produces an event sequence that triggers these; they
/// guard against hand-driven or foreign event sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An event that makes no sense in the current state.
    UnexpectedEvent(&'static str),
    /// `finish` was called with containers still open.
    UnclosedStructure { depth: usize },
    /// No value was produced.
    EmptyDocument,
    /// `finish` was called but several top-level values were produced.
    MultipleRoots { count: usize },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnexpectedEvent(msg) => write!(f, "unexpected event: {msg}"),
            BuildError::UnclosedStructure { depth } => {
                write!(f, "unclosed structure ({depth} levels open)")
            }
            BuildError::EmptyDocument => write!(f, "empty document"),
            BuildError::MultipleRoots { count } => {
                write!(f, "expected one top-level value, found {count}")
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Builder that constructs [`Value`]s from parse events.
///
/// Duplicate object keys resolve last-write-wins: the later value replaces
/// the earlier one, which keeps its original position.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<BuilderFrame>,
    roots: Vec<Value>,
    error: Option<BuildError>,
}

#[derive(Debug)]
enum BuilderFrame {
    Array(Vec<Value>),
    Object { map: Map, key: Option<String> },
}

impl TreeBuilder {
    /// Create a new tree builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Finish building and return the single root value.
    pub fn finish(self) -> Result<Value, BuildError> {
        let mut roots = self.finish_many()?;
        match roots.len() {
            0 => Err(BuildError::EmptyDocument),
            1 => Ok(roots.swap_remove(0)),
            count => Err(BuildError::MultipleRoots { count }),
        }
    }

    /// Finish building and return every top-level value in order.
    pub fn finish_many(mut self) -> Result<Vec<Value>, BuildError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedStructure {
                depth: self.stack.len(),
            });
        }
        Ok(mem::take(&mut self.roots))
    }

    fn fail(&mut self, err: BuildError) -> bool {
        trace!(%err, "tree builder rejected event");
        self.error = Some(err);
        false
    }

    /// Push a finished value to the current context.
    fn push_value(&mut self, value: Value) -> bool {
        match self.stack.last_mut() {
            Some(BuilderFrame::Array(items)) => items.push(value),
            Some(BuilderFrame::Object { map, key }) => match key.take() {
                Some(key) => {
                    map.insert(key, value);
                }
                None => return self.fail(BuildError::UnexpectedEvent("object value without a key")),
            },
            None => self.roots.push(value),
        }
        true
    }

    fn close(&mut self, object: bool) -> bool {
        let value = match self.stack.pop() {
            Some(BuilderFrame::Object { map, key: None }) if object => Value::Object(map),
            Some(BuilderFrame::Array(items)) if !object => Value::Array(items),
            Some(BuilderFrame::Object { key: Some(_), .. }) if object => {
                return self.fail(BuildError::UnexpectedEvent("object closed after a key"));
            }
            _ => return self.fail(BuildError::UnexpectedEvent("mismatched container end")),
        };
        self.push_value(value)
    }
}

impl<'src> Consumer<'src> for TreeBuilder {
    fn null(&mut self) -> bool {
        self.push_value(Value::Null)
    }

    fn boolean(&mut self, value: bool) -> bool {
        self.push_value(Value::Bool(value))
    }

    fn number_integer(&mut self, value: i64) -> bool {
        self.push_value(Value::Integer(value))
    }

    fn number_unsigned(&mut self, value: u64) -> bool {
        self.push_value(Value::Unsigned(value))
    }

    fn number_float(&mut self, value: f64) -> bool {
        self.push_value(Value::Float(value))
    }

    fn string(&mut self, value: Cow<'src, str>) -> bool {
        self.push_value(Value::String(value.into_owned()))
    }

    fn binary(&mut self, bytes: Cow<'src, [u8]>, subtype: Option<u64>) -> bool {
        self.push_value(Value::Binary(Binary {
            bytes: bytes.into_owned(),
            subtype,
        }))
    }

    fn begin_object(&mut self) -> bool {
        self.stack.push(BuilderFrame::Object {
            map: Map::new(),
            key: None,
        });
        true
    }

    fn key(&mut self, key: Cow<'src, str>) -> bool {
        match self.stack.last_mut() {
            Some(BuilderFrame::Object { key: slot @ None, .. }) => {
                *slot = Some(key.into_owned());
                true
            }
            _ => self.fail(BuildError::UnexpectedEvent("key outside an object")),
        }
    }

    fn end_object(&mut self) -> bool {
        self.close(true)
    }

    fn begin_array(&mut self) -> bool {
        self.stack.push(BuilderFrame::Array(Vec::new()));
        true
    }

    fn end_array(&mut self) -> bool {
        self.close(false)
    }
}
