//! Render-state flags exposed to styling.

use crate::state::SelectMultipleState;

/// Boolean state a renderer styles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectMultipleRenderProps {
    /// The popup is open.
    pub is_open: bool,
    /// Focus is within the widget.
    pub is_focused: bool,
    /// Focus is within the widget and should be drawn (keyboard modality).
    pub is_focus_visible: bool,
    /// The widget is disabled.
    pub is_disabled: bool,
    /// The displayed validation result is invalid.
    pub is_invalid: bool,
    /// A selection is required.
    pub is_required: bool,
}

impl SelectMultipleRenderProps {
    /// Snapshot the flags from `state`.
    ///
    /// Focus visibility depends on input modality, which only the host
    /// tracks, so it is passed in and masked by the focus flag.
    pub fn from_state<T: Send + Sync + 'static>(
        state: &SelectMultipleState<T>,
        is_focus_visible: bool,
    ) -> Self {
        let is_focused = state.is_focused();
        Self {
            is_open: state.is_open(),
            is_focused,
            is_focus_visible: is_focused && is_focus_visible,
            is_disabled: state.is_disabled(),
            is_invalid: state.display_validation().is_invalid,
            is_required: state.is_required(),
        }
    }

    /// `data-*` attributes for the flags that are set.
    pub fn data_attributes(&self) -> Vec<&'static str> {
        [
            (self.is_open, "data-open"),
            (self.is_focused, "data-focused"),
            (self.is_focus_visible, "data-focus-visible"),
            (self.is_disabled, "data-disabled"),
            (self.is_invalid, "data-invalid"),
            (self.is_required, "data-required"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}
