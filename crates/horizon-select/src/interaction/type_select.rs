//! Type-ahead search.
//!
//! Printable keys accumulate into a search buffer that is matched against
//! item text through a [`KeyboardDelegate`]. The buffer expires when no key
//! arrives within the debounce window; expiry is measured from event
//! timestamps, so no timer is involved.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use horizon_select_core::logging::targets;

use super::events::KeyboardEvent;
use super::keyboard_delegate::KeyboardDelegate;
use crate::key::Key;

/// Default time after the last keystroke before the search resets.
pub const DEFAULT_TYPE_SELECT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Configuration for type-ahead search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSelectConfig {
    /// Time after the last keystroke before the search resets.
    pub debounce: Duration,
}

impl Default for TypeSelectConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_TYPE_SELECT_DEBOUNCE,
        }
    }
}

impl TypeSelectConfig {
    /// Set the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[derive(Debug, Default)]
struct SearchBuffer {
    search: String,
    last_input: Option<Instant>,
}

/// The type-ahead search buffer.
#[derive(Debug, Default)]
pub struct TypeSelect {
    config: TypeSelectConfig,
    buffer: Mutex<SearchBuffer>,
}

impl TypeSelect {
    /// Create an empty buffer.
    pub fn new(config: TypeSelectConfig) -> Self {
        Self {
            config,
            buffer: Mutex::new(SearchBuffer::default()),
        }
    }

    /// The configuration.
    pub fn config(&self) -> TypeSelectConfig {
        self.config
    }

    /// The current search text.
    pub fn search(&self) -> String {
        self.buffer.lock().search.clone()
    }

    /// Feed a key-down event, returning the key that should become the
    /// selection, if the search matches one.
    ///
    /// Searching starts at `focused_key` and wraps to the start of the
    /// collection when nothing matches from there. Keys pressed with Control
    /// or Meta, and events from outside the current target, are ignored. A
    /// space extending a non-empty search has its default action suppressed.
    pub fn handle_key_down(
        &self,
        event: &mut KeyboardEvent,
        delegate: &dyn KeyboardDelegate,
        focused_key: Option<&Key>,
    ) -> Option<Key> {
        let character = event.search_text()?.to_string();
        if event.modifiers.control || event.modifiers.meta || !event.is_within_current_target() {
            return None;
        }

        let search = {
            let mut buffer = self.buffer.lock();
            if let Some(last) = buffer.last_input
                && event.time_stamp.saturating_duration_since(last) >= self.config.debounce
            {
                buffer.search.clear();
            }

            if character == " " && !buffer.search.trim().is_empty() {
                event.prevent_default();
                event.stop_propagation();
            }

            buffer.search.push_str(&character);
            buffer.last_input = Some(event.time_stamp);
            buffer.search.clone()
        };

        let found = delegate
            .key_for_search(&search, focused_key)
            .or_else(|| delegate.key_for_search(&search, None));
        tracing::trace!(target: targets::TYPE_SELECT, %search, ?found, "type-ahead search");
        found
    }

    /// Drop the current search.
    pub fn reset(&self) {
        let mut buffer = self.buffer.lock();
        buffer.search.clear();
        buffer.last_input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;
    use crate::interaction::events::{KeyCode, KeyboardModifiers};
    use crate::interaction::keyboard_delegate::ListKeyboardDelegate;
    use std::sync::Arc;

    fn delegate() -> ListKeyboardDelegate<String> {
        let collection = ListCollection::from_texts(["Alpha", "Beta", "Bravo", "Charlie"]).unwrap();
        ListKeyboardDelegate::new(Arc::new(collection), Default::default())
    }

    fn type_char(
        type_select: &TypeSelect,
        delegate: &ListKeyboardDelegate<String>,
        c: char,
        at: Instant,
    ) -> (Option<Key>, KeyboardEvent) {
        let mut event = KeyboardEvent::character(c).at(at);
        let found = type_select.handle_key_down(&mut event, delegate, None);
        (found, event)
    }

    #[test]
    fn test_accumulates_within_window() {
        let type_select = TypeSelect::default();
        let delegate = delegate();
        let t0 = Instant::now();

        let (found, _) = type_char(&type_select, &delegate, 'b', t0);
        assert_eq!(found, Some(Key::from("Beta")));

        let (found, _) = type_char(&type_select, &delegate, 'r', t0 + Duration::from_millis(300));
        assert_eq!(found, Some(Key::from("Bravo")));
        assert_eq!(type_select.search(), "br");
    }

    #[test]
    fn test_buffer_expires_after_debounce() {
        let type_select = TypeSelect::default();
        let delegate = delegate();
        let t0 = Instant::now();

        type_char(&type_select, &delegate, 'b', t0);
        let (found, _) = type_char(&type_select, &delegate, 'c', t0 + Duration::from_millis(1000));
        assert_eq!(found, Some(Key::from("Charlie")));
        assert_eq!(type_select.search(), "c");
    }

    #[test]
    fn test_space_inside_search_is_suppressed() {
        let type_select = TypeSelect::default();
        let delegate = delegate();
        let t0 = Instant::now();

        let (_, leading) = type_char(&type_select, &delegate, ' ', t0);
        assert!(!leading.is_default_prevented());
        type_select.reset();

        type_char(&type_select, &delegate, 'a', t0);
        let (_, space) = type_char(&type_select, &delegate, ' ', t0 + Duration::from_millis(10));
        assert!(space.is_default_prevented());
        assert!(space.is_propagation_stopped());
    }

    #[test]
    fn test_ignores_modified_and_named_keys() {
        let type_select = TypeSelect::default();
        let delegate = delegate();

        let mut ctrl = KeyboardEvent::character('a').with_modifiers(KeyboardModifiers::CONTROL);
        assert_eq!(type_select.handle_key_down(&mut ctrl, &delegate, None), None);

        let mut enter = KeyboardEvent::new(KeyCode::Enter);
        assert_eq!(type_select.handle_key_down(&mut enter, &delegate, None), None);
        assert_eq!(type_select.search(), "");
    }

    #[test]
    fn test_search_wraps_from_focused_key() {
        let type_select = TypeSelect::default();
        let delegate = delegate();

        let mut event = KeyboardEvent::character('a');
        let found = type_select.handle_key_down(&mut event, &delegate, Some(&Key::from("Bravo")));
        assert_eq!(found, Some(Key::from("Alpha")));
    }
}
