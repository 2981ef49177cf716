//! Storage cells for widget state.
//!
//! - [`Property<T>`] holds a flag or value and reports whether a write changed it,
//!   so the owner only emits its signal on a real change.
//! - [`Memo<D, T>`] caches a derived value such as `selected_items` against a
//!   cheap dependency token.
//!
//! # Example
//!
//! ```
//! use horizon_select_core::{Property, Signal};
//!
//! struct Focus {
//!     focused: Property<bool>,
//!     focus_changed: Signal<bool>,
//! }
//!
//! impl Focus {
//!     fn set_focused(&self, focused: bool) {
//!         if self.focused.set(focused) {
//!             self.focus_changed.emit(focused);
//!         }
//!     }
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell whose [`set`](Self::set) reports whether anything changed.
///
/// ```
/// use horizon_select_core::Property;
///
/// let open = Property::new(false);
/// assert!(!open.set(false));
/// assert!(open.set(true));
/// assert!(open.get());
/// ```
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone out the current value. Use [`with`](Self::with) for key sets.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value without comparing.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning `true` if it differs from the old one.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

/// A computed value cached against the dependencies it was computed from.
///
/// `Memo` recomputes only when the dependency key passed to
/// [`get_or_compute`](Self::get_or_compute) differs from the one the cached
/// value was computed with. Dependency keys are typically cheap identity
/// tokens (revision counters, pointer addresses) rather than the data itself.
///
/// # Example
///
/// ```
/// use horizon_select_core::Memo;
///
/// let memo: Memo<u64, String> = Memo::new();
/// assert_eq!(memo.get_or_compute(&1, || "one".to_string()), "one");
///
/// // Same dependency: cached value, closure not called.
/// assert_eq!(memo.get_or_compute(&1, || unreachable!()), "one");
///
/// // New dependency: recomputed.
/// assert_eq!(memo.get_or_compute(&2, || "two".to_string()), "two");
/// ```
pub struct Memo<D, T> {
    cached: RwLock<Option<(D, T)>>,
}

impl<D, T> Default for Memo<D, T> {
    fn default() -> Self {
        Self {
            cached: RwLock::new(None),
        }
    }
}

impl<D: PartialEq + Clone, T: Clone> Memo<D, T> {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `deps`, computing and caching it if the
    /// dependencies changed since the last computation.
    pub fn get_or_compute<F>(&self, deps: &D, compute: F) -> T
    where
        F: FnOnce() -> T,
    {
        if let Some((cached_deps, value)) = &*self.cached.read()
            && cached_deps == deps
        {
            return value.clone();
        }

        let value = compute();
        *self.cached.write() = Some((deps.clone(), value.clone()));
        value
    }

}

impl<D: fmt::Debug, T> fmt::Debug for Memo<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("deps", &self.cached.read().as_ref().map(|(deps, _)| deps))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_set_reports_change() {
        let open = Property::new(false);

        assert!(!open.set(false));
        assert!(open.set(true));
        assert!(open.get());
    }

    #[test]
    fn test_set_silent_skips_comparison() {
        let required = Property::new(false);
        required.set_silent(true);
        assert!(!required.set(true));
    }

    #[test]
    fn test_with_borrows_value() {
        let keys = Property::new(vec!["a", "b", "c"]);
        assert!(keys.with(|keys| keys.contains(&"b")));
    }

    #[test]
    fn test_memo_recomputes_only_on_dependency_change() {
        let calls = AtomicUsize::new(0);
        let memo: Memo<(u64, usize), usize> = Memo::new();

        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            7
        };

        assert_eq!(memo.get_or_compute(&(1, 0xdead), compute), 7);
        assert_eq!(memo.get_or_compute(&(1, 0xdead), compute), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Revision bump.
        assert_eq!(memo.get_or_compute(&(2, 0xdead), compute), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // Collection swapped.
        assert_eq!(memo.get_or_compute(&(2, 0xbeef), compute), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
