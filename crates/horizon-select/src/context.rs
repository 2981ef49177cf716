//! Handle passed to descendant render code.

use std::fmt;
use std::sync::Arc;

use crate::interaction::ValueProps;
use crate::render::SelectMultipleRenderProps;
use crate::state::SelectMultipleState;
use crate::value::ValueDisplay;

/// The state a nested value display or popup needs, threaded down
/// explicitly by the host.
pub struct SelectMultipleContext<T> {
    state: Arc<SelectMultipleState<T>>,
    value_props: ValueProps,
    placeholder: Option<String>,
}

impl<T> Clone for SelectMultipleContext<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            value_props: self.value_props.clone(),
            placeholder: self.placeholder.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> SelectMultipleContext<T> {
    /// Bundle `state` with the value display's props.
    pub fn new(state: Arc<SelectMultipleState<T>>, value_props: ValueProps) -> Self {
        Self {
            state,
            value_props,
            placeholder: None,
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// The widget state.
    pub fn state(&self) -> &Arc<SelectMultipleState<T>> {
        &self.state
    }

    /// Props for the value display element.
    pub fn value_props(&self) -> &ValueProps {
        &self.value_props
    }

    /// The caller's placeholder, if any.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// What the value display shows right now.
    pub fn value_display(&self) -> ValueDisplay<T> {
        ValueDisplay::from_state(&self.state, self.placeholder.as_deref())
    }

    /// Render flags right now.
    pub fn render_props(&self, is_focus_visible: bool) -> SelectMultipleRenderProps {
        SelectMultipleRenderProps::from_state(&self.state, is_focus_visible)
    }
}

impl<T> fmt::Debug for SelectMultipleContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectMultipleContext")
            .field("value_props", &self.value_props)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}
