//! Keyed selection operations over the composite state.
//!
//! [`SelectionManager`] is a borrowed view: it holds no state of its own and
//! funnels every mutation through
//! [`SelectMultipleState::set_selected_keys`], so selection writes always
//! commit validation and notify listeners the same way.
//!
//! # Example
//!
//! ```
//! use horizon_select::{ListCollection, SelectMultipleOptions, SelectMultipleState};
//!
//! let collection = ListCollection::from_texts(["Red", "Green", "Blue"]).unwrap();
//! let state = SelectMultipleState::new(SelectMultipleOptions::new(collection));
//!
//! let manager = state.selection_manager();
//! manager.select(&"Red".into());
//! manager.select(&"Blue".into());
//! assert_eq!(manager.selected_keys().len(), 2);
//!
//! // Selecting an already selected key in multiple mode deselects it.
//! manager.select(&"Red".into());
//! assert!(!manager.is_selected(&"Red".into()));
//! ```

use std::fmt;

use horizon_select_core::logging::targets;

use crate::error::{Result, SelectError};
use crate::key::{Key, KeySet, Selection};
use crate::state::SelectMultipleState;

/// How many keys may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// At most one key.
    Single,
    /// Any number of keys.
    #[default]
    Multiple,
}

/// Selection operations bound to a [`SelectMultipleState`].
pub struct SelectionManager<'a, T> {
    state: &'a SelectMultipleState<T>,
}

impl<'a, T: Send + Sync + 'static> SelectionManager<'a, T> {
    pub(crate) fn new(state: &'a SelectMultipleState<T>) -> Self {
        Self { state }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection_mode()
    }

    /// The selection resolved against the current collection.
    pub fn selected_keys(&self) -> KeySet {
        self.state.selected_keys()
    }

    /// Whether `key` is selected.
    pub fn is_selected(&self, key: &Key) -> bool {
        self.state.selection().contains(key) && !self.is_disabled(key)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.state
            .selection()
            .is_empty_in(&*self.state.collection())
    }

    /// Whether every selectable key is selected.
    pub fn is_select_all(&self) -> bool {
        let selection = self.state.selection();
        if selection.is_all() {
            return true;
        }
        let collection = self.state.collection();
        if collection.is_empty() {
            return false;
        }
        collection
            .keys()
            .filter(|key| !self.is_disabled(key))
            .all(|key| selection.contains(key))
    }

    /// Whether `key` is disabled.
    pub fn is_disabled(&self, key: &Key) -> bool {
        self.state.list().is_disabled(key)
    }

    /// The key with virtual focus.
    pub fn focused_key(&self) -> Option<Key> {
        self.state.list().focused_key()
    }

    /// Move virtual focus to `key`.
    pub fn set_focused_key(&self, key: Option<Key>) {
        self.state.list().set_focused_key(key);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Select `key` the way a click would: toggle it in multiple mode,
    /// replace the selection in single mode.
    pub fn select(&self, key: &Key) {
        match self.selection_mode() {
            SelectionMode::Multiple => self.toggle_selection(key),
            SelectionMode::Single => self.replace_selection(key),
        }
    }

    /// Add or remove `key`. Disabled keys are ignored.
    pub fn toggle_selection(&self, key: &Key) {
        if self.is_disabled(key) {
            return;
        }
        let mut keys = self.selected_keys();
        if !keys.remove(key) {
            if self.selection_mode() == SelectionMode::Single {
                keys.clear();
            }
            keys.insert(key.clone());
        }
        self.state.set_selected_keys(Selection::Keys(keys));
    }

    /// Make `key` the only selected key. Disabled keys are ignored.
    pub fn replace_selection(&self, key: &Key) {
        if self.is_disabled(key) {
            return;
        }
        self.state
            .set_selected_keys(Selection::Keys(KeySet::from_iter([key.clone()])));
    }

    /// Like [`replace_selection`](Self::replace_selection), failing if the
    /// collection does not hold `key`.
    pub fn replace_selection_checked(&self, key: &Key) -> Result<()> {
        if !self.state.collection().contains(key) {
            return Err(SelectError::UnknownKey(key.clone()));
        }
        self.replace_selection(key);
        Ok(())
    }

    /// Add every enabled key between the anchor and `to_key`, inclusive.
    ///
    /// The anchor is the focused key, or the first selected key. Without an
    /// anchor this behaves like [`replace_selection`](Self::replace_selection).
    /// Single mode always replaces.
    pub fn extend_selection(&self, to_key: &Key) {
        if self.selection_mode() == SelectionMode::Single {
            self.replace_selection(to_key);
            return;
        }

        let mut keys = self.selected_keys();
        let Some(anchor) = self.focused_key().or_else(|| keys.first().cloned()) else {
            self.replace_selection(to_key);
            return;
        };

        if &anchor == to_key {
            if !self.is_disabled(to_key) {
                keys.insert(to_key.clone());
            }
            self.state.set_selected_keys(Selection::Keys(keys));
            return;
        }

        let collection = self.state.collection();
        let mut in_range = false;
        for key in collection.keys() {
            let is_end = key == &anchor || key == to_key;
            if is_end {
                in_range = !in_range;
            }
            if (in_range || is_end) && !self.is_disabled(key) {
                keys.insert(key.clone());
            }
            if is_end && !in_range {
                break;
            }
        }

        tracing::trace!(target: targets::SELECTION, %anchor, to = %to_key, "selection extended");
        self.state.set_selected_keys(Selection::Keys(keys));
    }

    /// Select every key. Does nothing in single mode.
    pub fn select_all(&self) {
        if self.selection_mode() == SelectionMode::Single {
            return;
        }
        self.state.set_selected_keys(Selection::All);
    }

    /// Deselect every key.
    pub fn clear_selection(&self) {
        self.state.set_selected_keys(Selection::empty());
    }

    /// Replace the selection with `keys`.
    pub fn set_selected_keys<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) {
        self.state
            .set_selected_keys(Selection::Keys(keys.into_iter().collect()));
    }
}

impl<T> fmt::Debug for SelectionManager<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;
    use crate::state::SelectMultipleOptions;

    fn state(mode: SelectionMode) -> SelectMultipleState<String> {
        let collection = ListCollection::from_texts(["a", "b", "c", "d", "e"]).unwrap();
        SelectMultipleState::new(
            SelectMultipleOptions::new(collection)
                .with_selection_mode(mode)
                .with_disabled_keys(["d"]),
        )
    }

    fn keys(texts: &[&str]) -> KeySet {
        texts.iter().copied().collect()
    }

    #[test]
    fn test_select_toggles_in_multiple_mode() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.select(&"a".into());
        manager.select(&"b".into());
        assert_eq!(manager.selected_keys(), keys(&["a", "b"]));

        manager.select(&"a".into());
        assert_eq!(manager.selected_keys(), keys(&["b"]));
    }

    #[test]
    fn test_select_replaces_in_single_mode() {
        let state = state(SelectionMode::Single);
        let manager = state.selection_manager();

        manager.select(&"a".into());
        manager.select(&"b".into());
        assert_eq!(manager.selected_keys(), keys(&["b"]));
    }

    #[test]
    fn test_disabled_keys_cannot_be_selected() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.select(&"d".into());
        manager.replace_selection(&"d".into());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_select_all_and_clear() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.select_all();
        assert!(manager.is_select_all());
        assert_eq!(state.selection(), Selection::All);
        assert_eq!(manager.selected_keys().len(), 5);

        manager.clear_selection();
        assert!(manager.is_empty());
        assert!(!manager.is_select_all());
    }

    #[test]
    fn test_select_all_ignored_in_single_mode() {
        let state = state(SelectionMode::Single);
        state.selection_manager().select_all();
        assert!(state.selection_manager().is_empty());
    }

    #[test]
    fn test_toggle_out_of_all() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.select_all();
        manager.toggle_selection(&"c".into());
        assert_eq!(manager.selected_keys(), keys(&["a", "b", "d", "e"]));
    }

    #[test]
    fn test_is_select_all_skips_disabled() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.set_selected_keys(["a", "b", "c", "e"]);
        assert!(manager.is_select_all());
    }

    #[test]
    fn test_extend_selection_skips_disabled() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.set_selected_keys(["b"]);
        manager.extend_selection(&"e".into());
        assert_eq!(manager.selected_keys(), keys(&["b", "c", "e"]));
    }

    #[test]
    fn test_extend_selection_backwards_from_focus() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        manager.set_focused_key(Some("c".into()));
        manager.extend_selection(&"a".into());
        assert_eq!(manager.selected_keys(), keys(&["a", "b", "c"]));
    }

    #[test]
    fn test_replace_selection_checked() {
        let state = state(SelectionMode::Multiple);
        let manager = state.selection_manager();

        assert!(manager.replace_selection_checked(&"a".into()).is_ok());
        assert_eq!(
            manager.replace_selection_checked(&"zzz".into()),
            Err(SelectError::UnknownKey("zzz".into()))
        );
        assert_eq!(manager.selected_keys(), keys(&["a"]));
    }
}
