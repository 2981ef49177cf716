//! Item keys and selection sets.
//!
//! A [`Key`] identifies one item of a collection. A [`KeySet`] is an
//! insertion-ordered set of keys, and a [`Selection`] is either a concrete
//! key set or the literal "all", which always means "every key of the
//! collection as it is *now*".

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::collection::Collection;

/// An opaque, stable identifier for a collection item.
///
/// Keys are unique within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A textual key.
    String(Arc<str>),
    /// A numeric key.
    Number(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::String(s) => write!(f, "{s}"),
            Key::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::String(Arc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::String(Arc::from(value))
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Number(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Number(i64::from(value))
    }
}

/// An insertion-ordered set of keys.
///
/// Equality ignores order: two sets are equal when they hold the same keys.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    /// Keys in insertion order.
    ordered: Vec<Key>,
    /// Keys for O(1) membership checks.
    lookup: HashSet<Key>,
}

impl KeySet {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning `false` if it was already present.
    pub fn insert(&mut self, key: impl Into<Key>) -> bool {
        let key = key.into();
        if self.lookup.insert(key.clone()) {
            self.ordered.push(key);
            true
        } else {
            false
        }
    }

    /// Remove a key, returning `true` if it was present.
    pub fn remove(&mut self, key: &Key) -> bool {
        if self.lookup.remove(key) {
            self.ordered.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    /// Check membership.
    pub fn contains(&self, key: &Key) -> bool {
        self.lookup.contains(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The first key in insertion order.
    pub fn first(&self) -> Option<&Key> {
        self.ordered.first()
    }

    /// The most recently inserted key.
    pub fn last(&self) -> Option<&Key> {
        self.ordered.last()
    }

    /// Iterate keys in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.ordered.iter()
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.ordered.clear();
        self.lookup.clear();
    }
}

impl PartialEq for KeySet {
    fn eq(&self, other: &Self) -> bool {
        self.lookup == other.lookup
    }
}

impl Eq for KeySet {}

impl<K: Into<Key>> FromIterator<K> for KeySet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = KeySet::new();
        set.extend(iter);
        set
    }
}

impl<K: Into<Key>> Extend<K> for KeySet {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for KeySet {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

/// The current selection: a concrete key set or every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every key of the current collection, evaluated at read time.
    All,
    /// An explicit set of keys.
    Keys(KeySet),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Keys(KeySet::new())
    }
}

impl Selection {
    /// An empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the literal "all".
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Whether the selection holds a key, treating "all" as containing
    /// every key.
    pub fn contains(&self, key: &Key) -> bool {
        match self {
            Selection::All => true,
            Selection::Keys(keys) => keys.contains(key),
        }
    }

    /// The explicit key set, or `None` for "all".
    pub fn keys(&self) -> Option<&KeySet> {
        match self {
            Selection::All => None,
            Selection::Keys(keys) => Some(keys),
        }
    }

    /// Expand into a concrete key set against `collection`.
    ///
    /// "All" becomes the collection's keys in collection order. Explicit sets
    /// are returned as-is, including keys the collection no longer holds.
    pub fn resolve<T, C: Collection<T> + ?Sized>(&self, collection: &C) -> KeySet {
        match self {
            Selection::All => collection.keys().cloned().collect(),
            Selection::Keys(keys) => keys.clone(),
        }
    }

    /// Whether the selection resolves to no keys in `collection`.
    pub fn is_empty_in<T, C: Collection<T> + ?Sized>(&self, collection: &C) -> bool {
        match self {
            Selection::All => collection.is_empty(),
            Selection::Keys(keys) => keys.is_empty(),
        }
    }
}

impl From<KeySet> for Selection {
    fn from(keys: KeySet) -> Self {
        Selection::Keys(keys)
    }
}

impl<K: Into<Key>> FromIterator<K> for Selection {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Selection::Keys(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;

    #[test]
    fn test_key_conversions() {
        assert_eq!(Key::from("a"), Key::String(Arc::from("a")));
        assert_eq!(Key::from(3), Key::Number(3));
        assert_eq!(Key::from(3).to_string(), "3");
    }

    #[test]
    fn test_key_set_keeps_insertion_order() {
        let set: KeySet = ["c", "a", "b", "a"].into_iter().collect();
        let keys: Vec<_> = set.iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
        assert_eq!(set.first(), Some(&Key::from("c")));
        assert_eq!(set.last(), Some(&Key::from("b")));
    }

    #[test]
    fn test_key_set_equality_ignores_order() {
        let a: KeySet = ["x", "y"].into_iter().collect();
        let b: KeySet = ["y", "x"].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_set_remove() {
        let mut set: KeySet = ["a", "b"].into_iter().collect();
        assert!(set.remove(&Key::from("a")));
        assert!(!set.remove(&Key::from("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_all_resolves_against_current_collection() {
        let abc = ListCollection::from_texts(["a", "b", "c"]).unwrap();
        let ab = ListCollection::from_texts(["a", "b"]).unwrap();

        let all = Selection::All;
        assert_eq!(all.resolve(&abc), ["a", "b", "c"].into_iter().collect());
        assert_eq!(all.resolve(&ab), ["a", "b"].into_iter().collect());
        assert!(all.contains(&Key::from("zzz")));
    }

    #[test]
    fn test_explicit_selection_keeps_stale_keys() {
        let ab = ListCollection::from_texts(["a", "b"]).unwrap();
        let selection: Selection = ["a", "x"].into_iter().collect();
        assert_eq!(selection.resolve(&ab).len(), 2);
        assert!(!selection.is_empty_in(&ab));
    }
}
