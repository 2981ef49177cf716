//! Popup open/close state.

use std::fmt;

use horizon_select_core::logging::targets;
use horizon_select_core::{Property, Signal, ValueSource, ValueStore};

use crate::error::Result;

/// Which item receives focus when the popup opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusStrategy {
    /// Focus the first item.
    First,
    /// Focus the last item.
    Last,
}

impl FocusStrategy {
    /// The attribute value for this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            FocusStrategy::First => "first",
            FocusStrategy::Last => "last",
        }
    }
}

/// Open/closed state of the popup and the focus strategy it was opened with.
///
/// States are `Closed` and `Open(strategy)`. `open` on an open popup only
/// updates the strategy. The focus strategy survives `close`.
///
/// # Signals
///
/// - `open_changed(bool)`: Emitted when the open flag changes. Requests that
///   leave the flag as it is do not notify.
pub struct OverlayState {
    open: Box<dyn ValueStore<bool>>,
    focus_strategy: Property<Option<FocusStrategy>>,

    /// Signal emitted when the popup opens or closes.
    pub open_changed: Signal<bool>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new(ValueSource::default())
    }
}

impl OverlayState {
    /// Create overlay state from the construction-time ownership choice.
    pub fn new(source: ValueSource<bool>) -> Self {
        Self {
            open: source.into_store("is_open"),
            focus_strategy: Property::new(None),
            open_changed: Signal::new(),
        }
    }

    /// Whether the popup is open.
    pub fn is_open(&self) -> bool {
        self.open.read()
    }

    /// The strategy of the most recent open or toggle request.
    pub fn focus_strategy(&self) -> Option<FocusStrategy> {
        self.focus_strategy.get()
    }

    /// Open the popup, recording `strategy`.
    pub fn open(&self, strategy: Option<FocusStrategy>) {
        self.focus_strategy.set(strategy);
        self.set_open(true);
    }

    /// Close the popup.
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Flip the open state, recording `strategy` either way.
    pub fn toggle(&self, strategy: Option<FocusStrategy>) {
        self.focus_strategy.set(strategy);
        self.set_open(!self.is_open());
    }

    /// Request an open flag. Does nothing if the flag already has that value.
    pub fn set_open(&self, open: bool) {
        if self.open.read() == open {
            return;
        }
        tracing::debug!(
            target: targets::OVERLAY,
            is_open = open,
            strategy = ?self.focus_strategy(),
            controlled = self.open.is_controlled(),
            "open state requested"
        );
        self.open.write(open);
        self.open_changed.emit(open);
    }

    /// Feed the caller's open flag back in.
    ///
    /// Returns `true` if it echoes the last request. Fails if the open state
    /// is uncontrolled.
    pub fn sync_open(&self, open: bool) -> Result<bool> {
        Ok(self.open.sync(open)?)
    }
}

impl fmt::Debug for OverlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayState")
            .field("is_open", &self.is_open())
            .field("focus_strategy", &self.focus_strategy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn record(overlay: &OverlayState) -> Arc<Mutex<Vec<bool>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        overlay.open_changed.connect(move |&open| events_clone.lock().push(open));
        events
    }

    #[test]
    fn test_open_is_idempotent() {
        let overlay = OverlayState::default();
        let events = record(&overlay);

        overlay.open(Some(FocusStrategy::First));
        overlay.open(Some(FocusStrategy::Last));

        assert!(overlay.is_open());
        assert_eq!(overlay.focus_strategy(), Some(FocusStrategy::Last));
        assert_eq!(*events.lock(), vec![true]);
    }

    #[test]
    fn test_toggle() {
        let overlay = OverlayState::default();
        let events = record(&overlay);

        overlay.toggle(Some(FocusStrategy::Last));
        assert!(overlay.is_open());
        overlay.toggle(None);
        assert!(!overlay.is_open());
        assert_eq!(overlay.focus_strategy(), None);
        assert_eq!(*events.lock(), vec![true, false]);
    }

    #[test]
    fn test_close_when_closed_does_not_notify() {
        let overlay = OverlayState::default();
        let events = record(&overlay);

        overlay.close();
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_strategy_survives_close() {
        let overlay = OverlayState::default();
        overlay.open(Some(FocusStrategy::First));
        overlay.close();
        assert_eq!(overlay.focus_strategy(), Some(FocusStrategy::First));
    }

    #[test]
    fn test_controlled_open_waits_for_caller() {
        let overlay = OverlayState::new(ValueSource::Controlled { value: false });
        let events = record(&overlay);

        overlay.open(None);
        assert!(!overlay.is_open());
        assert_eq!(*events.lock(), vec![true]);

        assert_eq!(overlay.sync_open(true), Ok(true));
        assert!(overlay.is_open());
    }
}
