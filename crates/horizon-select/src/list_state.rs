//! List state: the collection, the selection, and what derives from them.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use horizon_select_core::logging::targets;
use horizon_select_core::{Memo, PerfSpan, Property, Signal, ValueSource};

use crate::collection::{Collection, Item};
use crate::error::Result;
use crate::key::{Key, KeySet, Selection};
use crate::store::SelectionStore;

/// The selected items, in selection order.
pub type SelectedItems<T> = Arc<[Arc<Item<T>>]>;

/// Combines a collection with a [`SelectionStore`].
///
/// # Signals
///
/// - `selection_changed(KeySet)`: Emitted after every selection write, with
///   the written selection resolved against the current collection. Writes
///   equal to the previous selection still notify.
pub struct ListState<T> {
    collection: RwLock<Arc<dyn Collection<T>>>,
    collection_revision: AtomicU64,
    disabled_keys: Property<KeySet>,
    focused_key: Property<Option<Key>>,
    store: SelectionStore,
    selected_items: Memo<(u64, u64), Option<SelectedItems<T>>>,

    /// Signal emitted after every selection write.
    pub selection_changed: Signal<KeySet>,
}

impl<T: Send + Sync + 'static> ListState<T> {
    /// Create list state over `collection`.
    pub fn new(collection: Arc<dyn Collection<T>>, selection: ValueSource<Selection>) -> Self {
        Self {
            collection: RwLock::new(collection),
            collection_revision: AtomicU64::new(0),
            disabled_keys: Property::default(),
            focused_key: Property::new(None),
            store: SelectionStore::new(selection),
            selected_items: Memo::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Set the keys that cannot be selected or navigated to.
    pub fn with_disabled_keys(self, keys: KeySet) -> Self {
        self.disabled_keys.set_silent(keys);
        self
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// The current collection.
    pub fn collection(&self) -> Arc<dyn Collection<T>> {
        self.collection.read().clone()
    }

    /// Replace the collection.
    ///
    /// A literal "all" selection and the selected items are re-evaluated
    /// against the new collection on next read.
    pub fn set_collection(&self, collection: Arc<dyn Collection<T>>) {
        tracing::debug!(target: targets::SELECTION, len = collection.len(), "collection replaced");
        *self.collection.write() = collection;
        self.collection_revision.fetch_add(1, Ordering::AcqRel);
    }

    // =========================================================================
    // Disabled and focused keys
    // =========================================================================

    /// Keys that cannot be selected or navigated to.
    pub fn disabled_keys(&self) -> KeySet {
        self.disabled_keys.get()
    }

    /// Replace the disabled keys.
    pub fn set_disabled_keys(&self, keys: KeySet) {
        self.disabled_keys.set(keys);
    }

    /// Whether `key` is disabled.
    pub fn is_disabled(&self, key: &Key) -> bool {
        self.disabled_keys.with(|keys| keys.contains(key))
    }

    /// The key with virtual focus inside the list, if any.
    pub fn focused_key(&self) -> Option<Key> {
        self.focused_key.get()
    }

    /// Move virtual focus to `key`.
    pub fn set_focused_key(&self, key: Option<Key>) {
        if self.focused_key.set(key.clone()) {
            tracing::trace!(target: targets::SELECTION, ?key, "focused key changed");
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selection as stored, with "all" kept literal.
    pub fn selection(&self) -> Selection {
        self.store.read()
    }

    /// The selection resolved against the current collection.
    pub fn selected_keys(&self) -> KeySet {
        self.store.read().resolve(&*self.collection())
    }

    /// Whether the caller owns the selection.
    pub fn is_controlled(&self) -> bool {
        self.store.is_controlled()
    }

    /// Whether a widget-driven write has not been fed back yet.
    pub fn is_awaiting_echo(&self) -> bool {
        self.store.is_awaiting_echo()
    }

    /// Items whose keys are selected, or `None` when nothing is selected.
    ///
    /// Keys the collection no longer holds are skipped. The result is cached
    /// until the displayed selection or the collection is replaced.
    pub fn selected_items(&self) -> Option<SelectedItems<T>> {
        let deps = (
            self.store.revision(),
            self.collection_revision.load(Ordering::Acquire),
        );
        self.selected_items.get_or_compute(&deps, || {
            let _span = PerfSpan::new("selected_items");
            let collection = self.collection();
            let keys = self.store.read().resolve(&*collection);
            if keys.is_empty() {
                return None;
            }

            let items: Vec<_> = keys
                .iter()
                .filter_map(|key| {
                    let item = collection.item(key);
                    if item.is_none() {
                        tracing::trace!(target: targets::SELECTION, %key, "skipping stale selected key");
                    }
                    item
                })
                .collect();
            Some(items.into())
        })
    }

    /// Write a new selection and notify listeners.
    pub fn set_selected_keys(&self, next: Selection) {
        self.write_selection(next, |_| {});
    }

    /// Write a new selection, running `before_notify` with the resolved keys
    /// after the store is updated and before `selection_changed` fires.
    pub(crate) fn write_selection(&self, next: Selection, before_notify: impl FnOnce(&KeySet)) {
        let resolved = self.store.write(next, &*self.collection());
        before_notify(&resolved);
        self.selection_changed.emit(resolved);
    }

    /// Feed the caller's selection back in.
    ///
    /// Returns `true` if it echoes the last widget-driven write. Fails if the
    /// selection is uncontrolled.
    pub fn sync_selected_keys(&self, value: Selection) -> Result<bool> {
        self.store.sync(value)
    }
}

impl<T> fmt::Debug for ListState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListState")
            .field("store", &self.store)
            .field("disabled_keys", &self.disabled_keys)
            .field("focused_key", &self.focused_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;
    use std::sync::atomic::AtomicUsize;

    fn list(texts: &[&str]) -> Arc<dyn Collection<String>> {
        Arc::new(ListCollection::from_texts(texts.iter().copied()).unwrap())
    }

    #[test]
    fn test_selected_items_none_when_empty() {
        let state = ListState::new(list(&["a", "b"]), ValueSource::default());
        assert!(state.selected_items().is_none());
    }

    #[test]
    fn test_selected_items_follow_selection_order() {
        let state = ListState::new(list(&["a", "b", "c"]), ValueSource::default());
        state.set_selected_keys(["c", "a"].into_iter().collect());

        let items = state.selected_items().unwrap();
        let texts: Vec<_> = items.iter().map(|item| item.text_value.as_str()).collect();
        assert_eq!(texts, ["c", "a"]);
    }

    #[test]
    fn test_stale_keys_are_skipped() {
        let state = ListState::new(list(&["a", "b"]), ValueSource::default());
        state.set_selected_keys(["a", "gone"].into_iter().collect());

        let items = state.selected_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key, Key::from("a"));
    }

    #[test]
    fn test_selected_items_cached_until_revision_changes() {
        let state = ListState::new(list(&["a", "b"]), ValueSource::default());
        state.set_selected_keys(["a"].into_iter().collect());

        let first = state.selected_items().unwrap();
        let second = state.selected_items().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        state.set_selected_keys(["a"].into_iter().collect());
        let third = state.selected_items().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
    }

    #[test]
    fn test_all_tracks_collection_replacement() {
        let state = ListState::new(
            list(&["a", "b", "c"]),
            ValueSource::Uncontrolled {
                initial: Selection::All,
            },
        );
        assert_eq!(state.selected_items().unwrap().len(), 3);

        state.set_collection(list(&["a", "b"]));
        assert_eq!(state.selected_items().unwrap().len(), 2);
        assert_eq!(state.selected_keys().len(), 2);
        assert_eq!(state.selection(), Selection::All);
    }

    #[test]
    fn test_every_write_notifies() {
        let state = ListState::new(list(&["a"]), ValueSource::default());
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        state.selection_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let same: Selection = ["a"].into_iter().collect();
        state.set_selected_keys(same.clone());
        state.set_selected_keys(same);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_disabled_keys() {
        let state = ListState::new(list(&["a", "b"]), ValueSource::default())
            .with_disabled_keys(["b"].into_iter().collect());
        assert!(state.is_disabled(&Key::from("b")));
        assert!(!state.is_disabled(&Key::from("a")));
    }
}
