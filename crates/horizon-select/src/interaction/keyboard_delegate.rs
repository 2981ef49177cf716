//! Keyboard navigation over a collection.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

use crate::collection::Collection;
use crate::key::{Key, KeySet};

/// Answers "which key is next" questions for keyboard navigation.
///
/// Implementations decide which keys are reachable; the default
/// [`ListKeyboardDelegate`] skips disabled keys.
pub trait KeyboardDelegate: Send + Sync {
    /// The reachable key before `key`.
    fn key_above(&self, key: &Key) -> Option<Key>;

    /// The reachable key after `key`.
    fn key_below(&self, key: &Key) -> Option<Key>;

    /// The first reachable key.
    fn first_key(&self) -> Option<Key>;

    /// The last reachable key.
    fn last_key(&self) -> Option<Key>;

    /// The first reachable key at or after `from_key` whose text starts with
    /// `search`. Delegates without text search return `None`.
    fn key_for_search(&self, search: &str, from_key: Option<&Key>) -> Option<Key> {
        let _ = (search, from_key);
        None
    }
}

/// Compares strings for type-ahead matching.
pub trait Collator: Send + Sync {
    /// Compare two strings.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Compares base letters only: case and accents are ignored, so `"e"`
/// matches `"É"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCollator;

impl SearchCollator {
    fn fold(text: &str) -> String {
        text.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl Collator for SearchCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        Self::fold(a).cmp(&Self::fold(b))
    }
}

/// The default delegate: collection order, disabled keys skipped, text
/// matched by prefix through a [`Collator`].
pub struct ListKeyboardDelegate<T> {
    collection: Arc<dyn Collection<T>>,
    disabled_keys: KeySet,
    collator: Arc<dyn Collator>,
}

impl<T: Send + Sync + 'static> ListKeyboardDelegate<T> {
    /// Create a delegate with the [`SearchCollator`].
    pub fn new(collection: Arc<dyn Collection<T>>, disabled_keys: KeySet) -> Self {
        Self::with_collator(collection, disabled_keys, Arc::new(SearchCollator))
    }

    /// Create a delegate with a custom collator.
    pub fn with_collator(
        collection: Arc<dyn Collection<T>>,
        disabled_keys: KeySet,
        collator: Arc<dyn Collator>,
    ) -> Self {
        Self {
            collection,
            disabled_keys,
            collator,
        }
    }

    /// Walk from `start` with `step` until a key that is not disabled.
    fn enabled_from(&self, start: Option<Key>, step: impl Fn(&Key) -> Option<Key>) -> Option<Key> {
        let mut next = start;
        while let Some(key) = next {
            if !self.disabled_keys.contains(&key) {
                return Some(key);
            }
            next = step(&key);
        }
        None
    }

    fn matches(&self, key: &Key, search: &str) -> bool {
        let Some(item) = self.collection.item(key) else {
            return false;
        };
        if item.text_value.is_empty() {
            return false;
        }
        let len = search.graphemes(true).count();
        let prefix: String = item.text_value.graphemes(true).take(len).collect();
        self.collator.compare(&prefix, search) == Ordering::Equal
    }
}

impl<T: Send + Sync + 'static> KeyboardDelegate for ListKeyboardDelegate<T> {
    fn key_above(&self, key: &Key) -> Option<Key> {
        self.enabled_from(self.collection.key_before(key), |k| {
            self.collection.key_before(k)
        })
    }

    fn key_below(&self, key: &Key) -> Option<Key> {
        self.enabled_from(self.collection.key_after(key), |k| {
            self.collection.key_after(k)
        })
    }

    fn first_key(&self) -> Option<Key> {
        self.enabled_from(self.collection.first_key(), |k| {
            self.collection.key_after(k)
        })
    }

    fn last_key(&self) -> Option<Key> {
        self.enabled_from(self.collection.last_key(), |k| {
            self.collection.key_before(k)
        })
    }

    fn key_for_search(&self, search: &str, from_key: Option<&Key>) -> Option<Key> {
        let start = match from_key {
            Some(key) => self.enabled_from(Some(key.clone()), |k| self.collection.key_after(k)),
            None => self.first_key(),
        };

        let mut next = start;
        while let Some(key) = next {
            if self.matches(&key, search) {
                return Some(key);
            }
            next = self.key_below(&key);
        }
        None
    }
}

impl<T> fmt::Debug for ListKeyboardDelegate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListKeyboardDelegate")
            .field("len", &self.collection.len())
            .field("disabled_keys", &self.disabled_keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;

    fn delegate(disabled: &[&str]) -> ListKeyboardDelegate<String> {
        let collection =
            ListCollection::from_texts(["Apple", "Apricot", "Banana", "Cherry", "Blueberry"]).unwrap();
        ListKeyboardDelegate::new(Arc::new(collection), disabled.iter().copied().collect())
    }

    #[test]
    fn test_navigation_skips_disabled() {
        let delegate = delegate(&["Apple", "Banana"]);

        assert_eq!(delegate.first_key(), Some(Key::from("Apricot")));
        assert_eq!(delegate.key_below(&Key::from("Apricot")), Some(Key::from("Cherry")));
        assert_eq!(delegate.key_above(&Key::from("Cherry")), Some(Key::from("Apricot")));
        assert_eq!(delegate.key_above(&Key::from("Apricot")), None);
        assert_eq!(delegate.last_key(), Some(Key::from("Blueberry")));
    }

    #[test]
    fn test_search_is_case_insensitive_prefix() {
        let delegate = delegate(&[]);
        assert_eq!(delegate.key_for_search("apr", None), Some(Key::from("Apricot")));
        assert_eq!(delegate.key_for_search("CH", None), Some(Key::from("Cherry")));
        assert_eq!(delegate.key_for_search("z", None), None);
    }

    #[test]
    fn test_search_starts_at_from_key() {
        let delegate = delegate(&[]);
        assert_eq!(
            delegate.key_for_search("b", Some(&Key::from("Cherry"))),
            Some(Key::from("Blueberry"))
        );
        assert_eq!(
            delegate.key_for_search("b", Some(&Key::from("Banana"))),
            Some(Key::from("Banana"))
        );
    }

    #[test]
    fn test_search_skips_disabled() {
        let delegate = delegate(&["Banana"]);
        assert_eq!(delegate.key_for_search("b", None), Some(Key::from("Blueberry")));
    }

    #[test]
    fn test_search_compares_whole_graphemes() {
        let collection = ListCollection::from_texts(["e\u{301}clair", "eclipse"]).unwrap();
        let delegate: ListKeyboardDelegate<String> =
            ListKeyboardDelegate::new(Arc::new(collection), KeySet::new());
        assert_eq!(
            delegate.key_for_search("e\u{301}", None),
            Some(Key::from("e\u{301}clair"))
        );
    }

    #[test]
    fn test_search_ignores_accents() {
        let collection = ListCollection::from_texts(["Apple", "\u{c9}clair", "Na\u{ef}ve"]).unwrap();
        let delegate: ListKeyboardDelegate<String> =
            ListKeyboardDelegate::new(Arc::new(collection), KeySet::new());
        assert_eq!(delegate.key_for_search("e", None), Some(Key::from("\u{c9}clair")));
        assert_eq!(delegate.key_for_search("nai", None), Some(Key::from("Na\u{ef}ve")));
    }

    #[test]
    fn test_collator_orders_folded_text() {
        assert_eq!(SearchCollator.compare("\u{e9}", "E"), Ordering::Equal);
        assert_eq!(SearchCollator.compare("a", "\u{c9}"), Ordering::Less);
    }

    #[test]
    fn test_default_search_is_none() {
        struct Fixed;
        impl KeyboardDelegate for Fixed {
            fn key_above(&self, _: &Key) -> Option<Key> {
                None
            }
            fn key_below(&self, _: &Key) -> Option<Key> {
                None
            }
            fn first_key(&self) -> Option<Key> {
                Some(Key::from(1))
            }
            fn last_key(&self) -> Option<Key> {
                Some(Key::from(1))
            }
        }
        assert_eq!(Fixed.key_for_search("a", None), None);
    }
}
