//! Widget-level focus state.

use horizon_select_core::logging::targets;
use horizon_select_core::{Property, Signal};

/// Whether focus is anywhere within the widget (trigger or popup).
///
/// # Signals
///
/// - `focus_changed(bool)`: Emitted when the flag changes.
#[derive(Default)]
pub struct FocusState {
    focused: Property<bool>,

    /// Signal emitted when the widget gains or loses focus.
    pub focus_changed: Signal<bool>,
}

impl FocusState {
    /// Create unfocused state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the widget holds focus.
    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Set the flag directly.
    pub fn set_focused(&self, focused: bool) {
        if self.focused.set(focused) {
            tracing::debug!(target: targets::FOCUS, focused, "widget focus changed");
            self.focus_changed.emit(focused);
        }
    }

    /// Mark the widget focused.
    ///
    /// Returns `false` if it already was, in which case nothing happens.
    pub fn acquire(&self) -> bool {
        if self.is_focused() {
            return false;
        }
        self.set_focused(true);
        true
    }

    /// Mark the widget unfocused unless the popup is open.
    ///
    /// Returns `false` while `popup_open`, since focus then moves into the
    /// popup rather than leaving the widget.
    pub fn release(&self, popup_open: bool) -> bool {
        if popup_open {
            tracing::trace!(target: targets::FOCUS, "blur ignored while popup is open");
            return false;
        }
        self.set_focused(false);
        true
    }
}

impl std::fmt::Debug for FocusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusState")
            .field("focused", &self.is_focused())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_acquire_once() {
        let focus = FocusState::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        focus.focus_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(focus.acquire());
        assert!(!focus.acquire());
        assert!(focus.is_focused());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_blocked_while_open() {
        let focus = FocusState::new();
        focus.acquire();

        assert!(!focus.release(true));
        assert!(focus.is_focused());

        assert!(focus.release(false));
        assert!(!focus.is_focused());
    }
}
