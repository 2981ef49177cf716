//! Item collections.
//!
//! A [`Collection`] is the ordered, keyed list of options the widget offers.
//! The widget never mutates a collection; callers replace it wholesale with
//! [`ListState::set_collection`](crate::ListState::set_collection).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SelectError};
use crate::key::Key;

/// A single option of the collection.
#[derive(Clone, PartialEq, Eq)]
pub struct Item<T> {
    /// The item's unique key.
    pub key: Key,
    /// The caller's rendered content for this item.
    pub rendered: T,
    /// Plain text used for type-ahead matching and accessibility.
    pub text_value: String,
}

impl<T> Item<T> {
    /// Create an item.
    pub fn new(key: impl Into<Key>, rendered: T, text_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rendered,
            text_value: text_value.into(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("text_value", &self.text_value)
            .field("rendered", &self.rendered)
            .finish()
    }
}

/// An ordered, keyed sequence of items.
///
/// Implementations must keep keys unique and iteration order stable for the
/// lifetime of the collection.
pub trait Collection<T>: Send + Sync {
    /// Number of items.
    fn len(&self) -> usize;

    /// Whether the collection holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate keys in collection order.
    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_>;

    /// Look up an item by key.
    fn item(&self, key: &Key) -> Option<Arc<Item<T>>>;

    /// Whether an item with this key exists.
    fn contains(&self, key: &Key) -> bool {
        self.item(key).is_some()
    }

    /// The first key in collection order.
    fn first_key(&self) -> Option<Key>;

    /// The last key in collection order.
    fn last_key(&self) -> Option<Key>;

    /// The key immediately before `key`.
    fn key_before(&self, key: &Key) -> Option<Key>;

    /// The key immediately after `key`.
    fn key_after(&self, key: &Key) -> Option<Key>;
}

/// A [`Collection`] backed by a vector of items.
pub struct ListCollection<T> {
    items: Vec<Arc<Item<T>>>,
    index: HashMap<Key, usize>,
}

impl<T> ListCollection<T> {
    /// Build a collection from items in display order.
    ///
    /// Fails with [`SelectError::DuplicateKey`] if two items share a key.
    pub fn new(items: impl IntoIterator<Item = Item<T>>) -> Result<Self> {
        let mut collection = Self {
            items: Vec::new(),
            index: HashMap::new(),
        };
        for item in items {
            if collection.index.contains_key(&item.key) {
                return Err(SelectError::DuplicateKey(item.key));
            }
            collection.index.insert(item.key.clone(), collection.items.len());
            collection.items.push(Arc::new(item));
        }
        Ok(collection)
    }

    /// Build a collection from `(key, data)` pairs, deriving each item's
    /// text with `text_value`.
    pub fn from_entries<K, F>(entries: impl IntoIterator<Item = (K, T)>, text_value: F) -> Result<Self>
    where
        K: Into<Key>,
        F: Fn(&T) -> String,
    {
        Self::new(entries.into_iter().map(|(key, data)| {
            let text = text_value(&data);
            Item::new(key, data, text)
        }))
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The items in display order.
    pub fn items(&self) -> &[Arc<Item<T>>] {
        &self.items
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }
}

impl ListCollection<String> {
    /// Build a collection of plain strings, each keyed by its own text.
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::new(texts.into_iter().map(|text| {
            let text = text.into();
            Item::new(text.clone(), text.clone(), text)
        }))
    }
}

impl<T: Send + Sync> Collection<T> for ListCollection<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        Box::new(self.items.iter().map(|item| &item.key))
    }

    fn item(&self, key: &Key) -> Option<Arc<Item<T>>> {
        self.position(key).map(|index| self.items[index].clone())
    }

    fn contains(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    fn first_key(&self) -> Option<Key> {
        self.items.first().map(|item| item.key.clone())
    }

    fn last_key(&self) -> Option<Key> {
        self.items.last().map(|item| item.key.clone())
    }

    fn key_before(&self, key: &Key) -> Option<Key> {
        let index = self.position(key)?;
        index
            .checked_sub(1)
            .map(|prev| self.items[prev].key.clone())
    }

    fn key_after(&self, key: &Key) -> Option<Key> {
        let index = self.position(key)?;
        self.items.get(index + 1).map(|item| item.key.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for ListCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
