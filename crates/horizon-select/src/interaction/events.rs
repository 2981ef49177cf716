//! Input events delivered to the widget's handlers.
//!
//! Events are plain values passed by `&mut` through a handler chain, so an
//! earlier handler can suppress the default action or stop propagation for
//! the handlers after it.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Identifies a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a host-assigned element identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A host element the widget needs to query or move focus to.
pub trait ElementHandle: Send + Sync {
    /// This element's identifier.
    fn element_id(&self) -> ElementId;

    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: ElementId) -> bool {
        other == self.element_id()
    }

    /// Move keyboard focus to this element.
    fn focus(&self);
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt (Option) key is held.
    pub alt: bool,
    /// The Meta (Cmd, Windows) key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };
}

/// Logical keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key producing a single printable character.
    Character(char),
    /// The space bar.
    Space,
    /// Enter or Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// A modifier key on its own.
    Modifier,
    /// A key the host could not name; its output, if any, is in the event text.
    Unidentified,
}

/// A key press or release.
#[derive(Clone)]
pub struct KeyboardEvent {
    /// The key.
    pub key: KeyCode,
    /// Text the key produces, if any.
    pub text: String,
    /// Modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether the key is auto-repeating.
    pub is_repeat: bool,
    /// When the event occurred.
    pub time_stamp: Instant,
    /// The element the event originated from.
    pub target: Option<ElementId>,
    /// The element whose handler is running.
    pub current_target: Option<Arc<dyn ElementHandle>>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyboardEvent {
    /// A key event occurring now, with text derived from the key.
    pub fn new(key: KeyCode) -> Self {
        let text = match key {
            KeyCode::Character(c) => c.to_string(),
            KeyCode::Space => " ".to_string(),
            _ => String::new(),
        };
        Self {
            key,
            text,
            modifiers: KeyboardModifiers::NONE,
            is_repeat: false,
            time_stamp: Instant::now(),
            target: None,
            current_target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A key event for a printable character.
    pub fn character(c: char) -> Self {
        if c == ' ' {
            Self::new(KeyCode::Space)
        } else {
            Self::new(KeyCode::Character(c))
        }
    }

    /// Set the produced text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set when the event occurred.
    pub fn at(mut self, time_stamp: Instant) -> Self {
        self.time_stamp = time_stamp;
        self
    }

    /// Set the originating element.
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the element whose handler is running.
    pub fn with_current_target(mut self, current_target: Arc<dyn ElementHandle>) -> Self {
        self.current_target = Some(current_target);
        self
    }

    /// The text this key contributes to a type-ahead search, if any.
    ///
    /// Named non-printing keys contribute nothing.
    pub fn search_text(&self) -> Option<&str> {
        match self.key {
            KeyCode::Character(_) | KeyCode::Space | KeyCode::Unidentified
                if !self.text.is_empty() =>
            {
                Some(&self.text)
            }
            _ => None,
        }
    }

    /// Whether the originating element is inside the current target.
    ///
    /// Events without target information count as inside.
    pub fn is_within_current_target(&self) -> bool {
        match (&self.current_target, self.target) {
            (Some(current), Some(target)) => current.contains(target),
            _ => true,
        }
    }

    /// Suppress the host's default action for this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching ancestor elements.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl fmt::Debug for KeyboardEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardEvent")
            .field("key", &self.key)
            .field("text", &self.text)
            .field("modifiers", &self.modifiers)
            .field("target", &self.target)
            .field("default_prevented", &self.default_prevented)
            .finish_non_exhaustive()
    }
}

/// Reason for a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to a pointer press.
    Mouse,
    /// Focus changed due to Tab.
    Tab,
    /// Focus changed due to Shift+Tab.
    Backtab,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Focus moving into or out of an element.
#[derive(Clone, Default)]
pub struct FocusEvent {
    /// The element gaining (focus) or losing (blur) focus.
    pub target: Option<ElementId>,
    /// The element on the other side of the move, if known.
    pub related_target: Option<ElementId>,
    /// The element whose handler is running.
    pub current_target: Option<Arc<dyn ElementHandle>>,
    /// Why focus moved.
    pub reason: FocusReason,
}

impl FocusEvent {
    /// A focus event with no element information.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            reason,
            ..Self::default()
        }
    }

    /// Set the element gaining or losing focus.
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the element on the other side of the move.
    pub fn with_related_target(mut self, related: ElementId) -> Self {
        self.related_target = Some(related);
        self
    }

    /// Set the element whose handler is running.
    pub fn with_current_target(mut self, current_target: Arc<dyn ElementHandle>) -> Self {
        self.current_target = Some(current_target);
        self
    }

    /// Whether focus is moving to somewhere inside the current target.
    pub fn stays_within_current_target(&self) -> bool {
        match (&self.current_target, self.related_target) {
            (Some(current), Some(related)) => current.contains(related),
            _ => false,
        }
    }
}

impl fmt::Debug for FocusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusEvent")
            .field("target", &self.target)
            .field("related_target", &self.related_target)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

/// The kind of pointer behind a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerType {
    /// A mouse.
    #[default]
    Mouse,
    /// A pen or stylus.
    Pen,
    /// A touch screen.
    Touch,
    /// A keyboard activation.
    Keyboard,
    /// An assistive technology activation.
    Virtual,
}

/// A press on the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressEvent {
    /// The kind of pointer.
    pub pointer_type: PointerType,
    /// Modifiers held during the press.
    pub modifiers: KeyboardModifiers,
}

impl PressEvent {
    /// A press from `pointer_type`.
    pub fn new(pointer_type: PointerType) -> Self {
        Self {
            pointer_type,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Subtree {
        id: ElementId,
        children: Vec<ElementId>,
    }

    impl ElementHandle for Subtree {
        fn element_id(&self) -> ElementId {
            self.id
        }

        fn contains(&self, other: ElementId) -> bool {
            other == self.id || self.children.contains(&other)
        }

        fn focus(&self) {}
    }

    fn subtree() -> Arc<dyn ElementHandle> {
        Arc::new(Subtree {
            id: ElementId::new(1),
            children: vec![ElementId::new(2)],
        })
    }

    #[test]
    fn test_search_text() {
        assert_eq!(KeyboardEvent::character('a').search_text(), Some("a"));
        assert_eq!(KeyboardEvent::character(' ').search_text(), Some(" "));
        assert_eq!(KeyboardEvent::new(KeyCode::Enter).search_text(), None);
        assert_eq!(
            KeyboardEvent::new(KeyCode::Unidentified)
                .with_text("é")
                .search_text(),
            Some("é")
        );
        assert_eq!(KeyboardEvent::new(KeyCode::Unidentified).search_text(), None);
    }

    #[test]
    fn test_prevent_default() {
        let mut event = KeyboardEvent::new(KeyCode::ArrowLeft);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_within_current_target() {
        let inside = KeyboardEvent::character('a')
            .with_current_target(subtree())
            .with_target(ElementId::new(2));
        assert!(inside.is_within_current_target());

        let outside = KeyboardEvent::character('a')
            .with_current_target(subtree())
            .with_target(ElementId::new(9));
        assert!(!outside.is_within_current_target());
    }

    #[test]
    fn test_focus_stays_within() {
        let event = FocusEvent::new(FocusReason::Tab)
            .with_current_target(subtree())
            .with_related_target(ElementId::new(2));
        assert!(event.stays_within_current_target());

        let leaving = FocusEvent::new(FocusReason::Tab).with_current_target(subtree());
        assert!(!leaving.stays_within_current_target());
    }
}
