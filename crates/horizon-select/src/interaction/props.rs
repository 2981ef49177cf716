//! Prop bundles for the widget's elements.
//!
//! Each bundle holds the attributes and handlers for one element. Handlers
//! are [`HandlerChain`]s the host invokes when the matching event occurs;
//! [`TriggerProps::attributes`] and friends flatten the rest into
//! attribute-name/value pairs.

use super::events::{FocusEvent, KeyboardEvent, PressEvent};
use super::handler::HandlerChain;
use crate::overlay::FocusStrategy;
use crate::selection_manager::SelectionMode;

/// Props for a text slot (label, description, error message).
///
/// A slot without an id is not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSlotProps {
    /// Element id.
    pub id: Option<String>,
}

/// Props for the trigger button.
#[derive(Debug, Clone, Default)]
pub struct TriggerProps {
    /// Element id.
    pub id: String,
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// `aria-labelledby`: the value display first, then the field's labels.
    pub aria_labelledby: Option<String>,
    /// `aria-describedby`.
    pub aria_describedby: Option<String>,
    /// `aria-details`.
    pub aria_details: Option<String>,
    /// `aria-haspopup`.
    pub aria_haspopup: &'static str,
    /// `aria-expanded`.
    pub aria_expanded: bool,
    /// `aria-controls`: the popup id while open.
    pub aria_controls: Option<String>,
    /// Whether the button is disabled.
    pub is_disabled: bool,
    /// Whether the button renders pressed (while the popup is open).
    pub is_pressed: bool,

    /// Pointer press started.
    pub on_press_start: HandlerChain<PressEvent>,
    /// Pointer press completed.
    pub on_press: HandlerChain<PressEvent>,
    /// Key down.
    pub on_key_down: HandlerChain<KeyboardEvent>,
    /// Key up.
    pub on_key_up: HandlerChain<KeyboardEvent>,
    /// Focus entered the trigger.
    pub on_focus: HandlerChain<FocusEvent>,
    /// Focus left the trigger.
    pub on_blur: HandlerChain<FocusEvent>,
}

impl TriggerProps {
    /// The non-handler props as attribute pairs. Absent values are omitted.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("id", self.id.clone()),
            ("aria-haspopup", self.aria_haspopup.to_string()),
            ("aria-expanded", self.aria_expanded.to_string()),
        ];
        let optional = [
            ("aria-label", &self.aria_label),
            ("aria-labelledby", &self.aria_labelledby),
            ("aria-describedby", &self.aria_describedby),
            ("aria-details", &self.aria_details),
            ("aria-controls", &self.aria_controls),
        ];
        attrs.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.clone().map(|value| (name, value))),
        );
        if self.is_disabled {
            attrs.push(("disabled", String::new()));
        }
        attrs
    }
}

/// Props for the element showing the selected values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueProps {
    /// Element id, referenced from the trigger's `aria-labelledby`.
    pub id: String,
}

/// What activating a link item in the popup does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkBehavior {
    /// Follow the link.
    Action,
    /// Toggle selection like any other item.
    #[default]
    Selection,
    /// Follow the link instead of selecting.
    Override,
}

/// Props for the popup list.
#[derive(Debug, Clone)]
pub struct PopupProps {
    /// Element id, referenced from the trigger's `aria-controls`.
    pub id: String,
    /// `aria-labelledby`.
    pub aria_labelledby: Option<String>,
    /// Item focused when the popup opens.
    pub auto_focus: FocusStrategy,
    /// Select on pointer release rather than press.
    pub should_select_on_press_up: bool,
    /// Move focus to items under the pointer.
    pub should_focus_on_hover: bool,
    /// Whether deselecting the last item is refused.
    pub disallow_empty_selection: bool,
    /// Link item activation behavior.
    pub link_behavior: LinkBehavior,
    /// Selection mode of the list.
    pub selection_mode: SelectionMode,

    /// Focus left the popup.
    pub on_blur: HandlerChain<FocusEvent>,
    /// The popup asks to close (Escape, outside press).
    pub on_close: HandlerChain<()>,
}

impl PopupProps {
    /// The non-handler props as attribute pairs. Absent values are omitted.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![("id", self.id.clone())];
        if let Some(labelledby) = &self.aria_labelledby {
            attrs.push(("aria-labelledby", labelledby.clone()));
        }
        if self.selection_mode == SelectionMode::Multiple {
            attrs.push(("aria-multiselectable", "true".to_string()));
        }
        attrs
    }
}
