//! The selection store.
//!
//! Owns the current [`Selection`], either on behalf of the caller
//! (controlled) or for the widget itself (uncontrolled). Every replacement of
//! the displayed value bumps a revision counter that derived views use as
//! their cache key.

use std::sync::atomic::{AtomicU64, Ordering};

use horizon_select_core::logging::targets;
use horizon_select_core::{ValueSource, ValueStore};

use crate::collection::Collection;
use crate::error::Result;
use crate::key::{KeySet, Selection};

/// Holds the selection and reconciles it with a caller-owned value.
pub struct SelectionStore {
    inner: Box<dyn ValueStore<Selection>>,
    revision: AtomicU64,
}

impl SelectionStore {
    /// Create a store from the construction-time ownership choice.
    pub fn new(source: ValueSource<Selection>) -> Self {
        Self {
            inner: source.into_store("selected_keys"),
            revision: AtomicU64::new(0),
        }
    }

    /// The selection currently displayed, "all" kept literal.
    pub fn read(&self) -> Selection {
        self.inner.read()
    }

    /// Whether the caller owns the selection.
    pub fn is_controlled(&self) -> bool {
        self.inner.is_controlled()
    }

    /// Whether a widget-driven write has not been fed back yet.
    pub fn is_awaiting_echo(&self) -> bool {
        self.inner.is_awaiting_echo()
    }

    /// Changes whenever the displayed selection is replaced.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Record a widget-driven selection change.
    ///
    /// Returns `next` resolved against `collection`, which is what change
    /// listeners receive. Uncontrolled stores keep `next` literally (a
    /// literal "all" stays "all"); controlled stores keep showing the
    /// caller's value until [`sync`](Self::sync) and expect the resolved
    /// keys back, since that is all the caller ever sees.
    pub(crate) fn write<T, C>(&self, next: Selection, collection: &C) -> KeySet
    where
        C: Collection<T> + ?Sized,
    {
        let resolved = next.resolve(collection);
        tracing::debug!(
            target: targets::SELECTION,
            controlled = self.is_controlled(),
            is_all = next.is_all(),
            count = resolved.len(),
            "selection written"
        );
        if self.is_controlled() {
            self.inner.write(Selection::Keys(resolved.clone()));
        } else {
            self.inner.write(next);
            self.bump();
        }
        resolved
    }

    /// Feed the caller's current selection back in.
    ///
    /// Returns `true` if `value` echoes the last widget-driven write.
    pub(crate) fn sync(&self, value: Selection) -> Result<bool> {
        let changed = self.inner.read() != value;
        let is_echo = self.inner.sync(value)?;
        if changed {
            self.bump();
        }
        Ok(is_echo)
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::AcqRel);
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selection", &self.read())
            .field("controlled", &self.is_controlled())
            .field("revision", &self.revision())
            .finish()
    }
}
