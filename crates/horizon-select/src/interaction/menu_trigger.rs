//! Trigger-button wiring for the popup.
//!
//! Presses toggle the popup. The open keys (Enter, Space, ArrowDown) toggle
//! it with the trigger focus strategy and ArrowUp toggles it focusing the
//! last item. A disabled widget ignores all of them.

use std::sync::Arc;

use horizon_select_core::logging::targets;

use super::events::{KeyCode, KeyboardEvent, PointerType, PressEvent};
use crate::overlay::FocusStrategy;
use crate::state::SelectMultipleState;

/// The popup role announced by the trigger.
pub const POPUP_ROLE: &str = "listbox";

/// Opens and closes the popup in response to trigger input.
pub struct MenuTrigger<T> {
    state: Arc<SelectMultipleState<T>>,
}

impl<T> Clone for MenuTrigger<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> MenuTrigger<T> {
    /// Bind to `state`.
    pub fn new(state: Arc<SelectMultipleState<T>>) -> Self {
        Self { state }
    }

    /// Press start: mouse, pen, and virtual presses toggle immediately.
    pub fn on_press_start(&self, event: &mut PressEvent) {
        if self.state.is_disabled() {
            return;
        }
        match event.pointer_type {
            PointerType::Touch | PointerType::Keyboard => {}
            PointerType::Virtual => self.state.toggle(Some(self.state.trigger_focus_strategy())),
            PointerType::Mouse | PointerType::Pen => self.state.toggle(None),
        }
    }

    /// Press end: touch presses toggle on release.
    pub fn on_press(&self, event: &mut PressEvent) {
        if event.pointer_type == PointerType::Touch && !self.state.is_disabled() {
            self.state.toggle(None);
        }
    }

    /// Key down on the trigger.
    ///
    /// Keys whose default action an earlier handler suppressed are left
    /// alone.
    pub fn on_key_down(&self, event: &mut KeyboardEvent) {
        if self.state.is_disabled() || event.is_default_prevented() {
            return;
        }
        let strategy = match event.key {
            KeyCode::Enter | KeyCode::Space | KeyCode::ArrowDown => {
                self.state.trigger_focus_strategy()
            }
            KeyCode::ArrowUp => FocusStrategy::Last,
            _ => return,
        };
        event.prevent_default();
        event.stop_propagation();
        tracing::debug!(target: targets::INTERACTION, key = ?event.key, ?strategy, "trigger key toggles popup");
        self.state.toggle(Some(strategy));
    }

    /// `aria-expanded` for the trigger.
    pub fn is_expanded(&self) -> bool {
        self.state.is_open()
    }

    /// `aria-controls` for the trigger: the popup id, only while open.
    pub fn controls(&self, popup_id: &str) -> Option<String> {
        self.state.is_open().then(|| popup_id.to_string())
    }
}
