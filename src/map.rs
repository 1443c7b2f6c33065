//! Key/value map type for JSON objects.
//!
//! [`Object`] wraps an [`IndexMap`] keyed by [`JsonString`]. Keys are unique.
//! What happens when a key repeats is chosen per insertion: [`Object::insert`]
//! overwrites, [`Object::try_insert`] rejects, and [`Object::insert_with_policy`]
//! takes a [`DuplicatePolicy`].
//!
//! ## Iteration order
//!
//! JSON leaves member order unspecified, and so does [`Object`] equality: two
//! objects with the same entries compare equal in any order. Iteration itself
//! is pinned to insertion order, so serializing the same object twice is
//! byte-identical and golden-file tests are stable.
//!
//! ## Examples
//!
//! ```rust
//! use docjson::{Document, Object};
//!
//! let mut map = Object::new();
//! map.insert("name", Document::from("Alice"));
//! map.insert("age", Document::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::{Document, JsonString};
use indexmap::map::{self, IndexMap};
use std::collections::HashMap;

/// What to do when inserting a key that is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Leave the map unchanged and report the key.
    #[default]
    Reject,
    /// Replace the earlier value.
    Overwrite,
}

/// An object map from string keys to documents.
///
/// # Examples
///
/// ```rust
/// use docjson::{Document, Object};
///
/// let mut map = Object::new();
/// map.insert("first", Document::from(1));
/// map.insert("second", Document::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().map(|k| k.to_string_lossy().into_owned()).collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Object(IndexMap<JsonString, Document>);

/// A view into a single entry of an [`Object`].
pub type Entry<'a> = map::Entry<'a, JsonString, Document>;

impl Object {
    /// Creates an empty `Object`.
    #[must_use]
    pub fn new() -> Self {
        Object(IndexMap::new())
    }

    /// Creates an empty `Object` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Object(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, overwriting any earlier value.
    ///
    /// If the map already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{Document, Object};
    ///
    /// let mut map = Object::new();
    /// assert!(map.insert("key", Document::from(42)).is_none());
    /// assert_eq!(map.insert("key", Document::from(43)), Some(Document::from(42)));
    /// ```
    pub fn insert(&mut self, key: impl Into<JsonString>, value: Document) -> Option<Document> {
        self.0.insert(key.into(), value)
    }

    /// Inserts a key-value pair only if the key is new.
    ///
    /// On a duplicate the map is unchanged and the rejected key and value are
    /// handed back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docjson::{Document, Object};
    ///
    /// let mut map = Object::new();
    /// assert!(map.try_insert("a", Document::from("b")).is_ok());
    ///
    /// let (key, _) = map.try_insert("a", Document::from("c")).unwrap_err();
    /// assert_eq!(key, "a");
    /// assert_eq!(map.get("a"), Some(&Document::from("b")));
    /// ```
    pub fn try_insert(
        &mut self,
        key: impl Into<JsonString>,
        value: Document,
    ) -> Result<&mut Document, (JsonString, Document)> {
        match self.0.entry(key.into()) {
            map::Entry::Occupied(entry) => Err((entry.key().clone(), value)),
            map::Entry::Vacant(entry) => Ok(entry.insert(value)),
        }
    }

    /// Inserts according to `policy`. Returns `false` if a duplicate was rejected.
    pub fn insert_with_policy(
        &mut self,
        key: impl Into<JsonString>,
        value: Document,
        policy: DuplicatePolicy,
    ) -> bool {
        match policy {
            DuplicatePolicy::Overwrite => {
                self.insert(key, value);
                true
            }
            DuplicatePolicy::Reject => self.try_insert(key, value).is_ok(),
        }
    }

    /// Gets the entry for `key` for in-place manipulation.
    pub fn entry(&mut self, key: impl Into<JsonString>) -> Entry<'_> {
        self.0.entry(key.into())
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.0.get(key.as_bytes())
    }

    /// Returns a reference to the value for a key that may not be UTF-8.
    #[must_use]
    pub fn get_bytes(&self, key: &[u8]) -> Option<&Document> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.0.get_mut(key.as_bytes())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key.as_bytes())
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Document> {
        self.0.shift_remove(key.as_bytes())
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> map::Keys<'_, JsonString, Document> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> map::Values<'_, JsonString, Document> {
        self.0.values()
    }

    pub fn values_mut(&mut self) -> map::ValuesMut<'_, JsonString, Document> {
        self.0.values_mut()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> map::Iter<'_, JsonString, Document> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> map::IterMut<'_, JsonString, Document> {
        self.0.iter_mut()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is already order-insensitive.
        self.0 == other.0
    }
}

impl From<HashMap<String, Document>> for Object {
    fn from(map: HashMap<String, Document>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Object> for HashMap<String, Document> {
    fn from(map: Object) -> Self {
        map.0
            .into_iter()
            .map(|(k, v)| (k.into_string_lossy(), v))
            .collect()
    }
}

impl IntoIterator for Object {
    type Item = (JsonString, Document);
    type IntoIter = map::IntoIter<JsonString, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a JsonString, &'a Document);
    type IntoIter = map::Iter<'a, JsonString, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<JsonString>> FromIterator<(K, Document)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, Document)>>(iter: T) -> Self {
        Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<JsonString>> Extend<(K, Document)> for Object {
    fn extend<T: IntoIterator<Item = (K, Document)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order() {
        let a: Object = [("x", Document::from(1)), ("y", Document::from(2))]
            .into_iter()
            .collect();
        let b: Object = [("y", Document::from(2)), ("x", Document::from(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_ne!(a.keys().next(), b.keys().next());
    }

    #[test]
    fn test_policies() {
        let mut map = Object::new();
        assert!(map.insert_with_policy("k", Document::from(1), DuplicatePolicy::Reject));
        assert!(!map.insert_with_policy("k", Document::from(2), DuplicatePolicy::Reject));
        assert_eq!(map.get("k"), Some(&Document::from(1)));
        assert!(map.insert_with_policy("k", Document::from(3), DuplicatePolicy::Overwrite));
        assert_eq!(map.get("k"), Some(&Document::from(3)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: Object = ["a", "b", "c"]
            .into_iter()
            .map(|k| (k, Document::Null))
            .collect();
        assert_eq!(map.remove("b"), Some(Document::Null));
        let keys: Vec<_> = map.keys().map(|k| k.as_bytes().to_vec()).collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_non_utf8_keys() {
        let mut key = JsonString::from("k");
        key.push_code_point(0xD800);
        let mut map = Object::new();
        map.insert(key.clone(), Document::Bool(true));
        assert_eq!(map.get_bytes(&key), Some(&Document::Bool(true)));
        assert!(!map.contains_key("k"));
    }
}
