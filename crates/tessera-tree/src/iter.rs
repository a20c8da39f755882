//! Iteration built on [`Cursor`].

use std::iter::FusedIterator;

use crate::{Cursor, Item, Value};

/// Double-ended iterator over the elements of a [`Value`].
///
/// Yields array items in index order, object members in insertion order,
/// a scalar once, and nothing for `null`.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    front: Cursor<'a>,
    back: Cursor<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self {
            front: Cursor::begin(value),
            back: Cursor::end(value),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Item<'a>;

    fn next(&mut self) -> Option<Item<'a>> {
        if self.front.index() >= self.back.index() {
            return None;
        }
        self.front.next_item()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Item<'a>> {
        if self.front.index() >= self.back.index() {
            return None;
        }
        self.back.retreat().ok()?;
        self.back.item().ok()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.back.index().saturating_sub(self.front.index())
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_order() {
        let v = Value::from(vec!["a", "b", "c"]);
        let items: Vec<_> = v.iter().map(|item| item.value.clone()).collect();
        assert_eq!(items, [Value::from("a"), Value::from("b"), Value::from("c")]);
        assert!(v.iter().all(|item| item.key.is_none()));
    }

    #[test]
    fn test_object_each_key_once() {
        let v: Value = [("x", 1), ("y", 2), ("z", 3)].into_iter().collect();
        let keys: Vec<_> = v.iter().filter_map(|item| item.key).collect();
        assert_eq!(keys, ["x", "y", "z"]);
    }

    #[test]
    fn test_scalar_yields_itself() {
        let v = Value::from(42);
        let items: Vec<_> = v.iter().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value, &v);
        assert_eq!(Value::Null.iter().count(), 0);
    }

    #[test]
    fn test_double_ended() {
        let v = Value::from(vec![1, 2, 3, 4]);
        let mut iter = v.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next_back().map(|item| item.value), Some(&Value::from(4)));
        assert_eq!(iter.next().map(|item| item.value), Some(&Value::from(1)));
        assert_eq!(iter.len(), 2);
        let rest: Vec<_> = iter.rev().map(|item| item.value.clone()).collect();
        assert_eq!(rest, [Value::from(3), Value::from(2)]);
    }

    #[test]
    fn test_for_loop() {
        let v: Value = [("k", true)].into_iter().collect();
        let mut seen = 0;
        for item in &v {
            assert_eq!(item.key, Some("k"));
            seen += 1;
        }
        assert_eq!(seen, 1);
    }
}
