//! Object storage.

use indexmap::IndexMap;

use crate::Value;

/// The members of a JSON object, in insertion order.
///
/// Re-inserting an existing key replaces its value in place; removing a key
/// shifts the later members down so the remaining order is unchanged.
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: IndexMap<String, Value>,
}

impl Map {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty map with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Key and value at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries
            .get_index(index)
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Insert or replace, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Remove `key`, preserving the order of the remaining members.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reorder the members by key.
    pub fn sort_keys(&mut self) {
        self.entries.sort_keys();
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Value> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    /// Move every value out, leaving the map empty.
    pub(crate) fn drain_values(&mut self) -> impl Iterator<Item = Value> + '_ {
        self.entries.drain(..).map(|(_, value)| value)
    }
}

/// Same keys with equal values; order is ignored.
impl PartialEq for Map {
    fn eq(&self, other: &Map) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| value == theirs))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Map {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(map: &Map) -> Vec<&str> {
        map.keys().collect()
    }

    #[test]
    fn test_insertion_order() {
        let mut map = Map::new();
        map.insert("b", Value::from(1));
        map.insert("a", Value::from(2));
        map.insert("c", Value::from(3));
        assert_eq!(keys(&map), ["b", "a", "c"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = Map::new();
        map.insert("x", Value::from(1));
        map.insert("y", Value::from(2));
        let old = map.insert("x", Value::from(3));
        assert_eq!(old, Some(Value::from(1)));
        assert_eq!(keys(&map), ["x", "y"]);
        assert_eq!(map.get("x"), Some(&Value::from(3)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: Map = [("a", Value::Null), ("b", Value::Null), ("c", Value::Null)]
            .into_iter()
            .collect();
        assert_eq!(map.remove("a"), Some(Value::Null));
        assert_eq!(map.remove("a"), None);
        assert_eq!(keys(&map), ["b", "c"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let left: Map = [("a", Value::from(1)), ("b", Value::from(2))]
            .into_iter()
            .collect();
        let right: Map = [("b", Value::from(2)), ("a", Value::from(1))]
            .into_iter()
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_sort_keys() {
        let mut map: Map = [("b", Value::Null), ("a", Value::Null)]
            .into_iter()
            .collect();
        map.sort_keys();
        assert_eq!(keys(&map), ["a", "b"]);
        assert_eq!(map.get_index(0), Some(("a", &Value::Null)));
    }
}
