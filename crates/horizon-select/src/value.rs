//! What the value display shows.

use std::fmt;

use crate::list_state::SelectedItems;
use crate::state::SelectMultipleState;

/// Placeholder shown when nothing is selected and the caller gave none.
pub const DEFAULT_PLACEHOLDER: &str = "Select item(s)";

/// Content of the value display: the selected items, or a placeholder.
pub enum ValueDisplay<T> {
    /// Nothing selected.
    Placeholder(String),
    /// The selected items in selection order.
    Items(SelectedItems<T>),
}

impl<T: Send + Sync + 'static> ValueDisplay<T> {
    /// Read the display content from `state`.
    ///
    /// Keys that no longer resolve to an item are skipped; if none resolve,
    /// the placeholder is shown.
    pub fn from_state(state: &SelectMultipleState<T>, placeholder: Option<&str>) -> Self {
        match state.selected_items() {
            Some(items) if !items.is_empty() => ValueDisplay::Items(items),
            _ => ValueDisplay::Placeholder(placeholder.unwrap_or(DEFAULT_PLACEHOLDER).to_string()),
        }
    }
}

impl<T> ValueDisplay<T> {
    /// Whether the placeholder is shown.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ValueDisplay::Placeholder(_))
    }

    /// The selected items, if any are shown.
    pub fn items(&self) -> Option<&SelectedItems<T>> {
        match self {
            ValueDisplay::Items(items) => Some(items),
            ValueDisplay::Placeholder(_) => None,
        }
    }

    /// Text content: the placeholder, or item texts joined by `", "`.
    pub fn text(&self) -> String {
        match self {
            ValueDisplay::Placeholder(text) => text.clone(),
            ValueDisplay::Items(items) => items
                .iter()
                .map(|item| item.text_value.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Data attributes for the value container.
    pub fn data_attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            ValueDisplay::Placeholder(_) => vec![
                ("data-placeholder", String::new()),
                ("data-slot", "placeholder".to_string()),
            ],
            ValueDisplay::Items(_) => Vec::new(),
        }
    }

    /// Data attributes for each rendered selected item.
    pub fn item_data_attributes() -> [(&'static str, &'static str); 1] {
        [("data-slot", "selected-item")]
    }
}

impl<T> Clone for ValueDisplay<T> {
    fn clone(&self) -> Self {
        match self {
            ValueDisplay::Placeholder(text) => ValueDisplay::Placeholder(text.clone()),
            ValueDisplay::Items(items) => ValueDisplay::Items(items.clone()),
        }
    }
}

impl<T> fmt::Debug for ValueDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueDisplay::Placeholder(text) => f.debug_tuple("Placeholder").field(text).finish(),
            ValueDisplay::Items(items) => f
                .debug_tuple("Items")
                .field(&items.iter().map(|item| &item.key).collect::<Vec<_>>())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;
    use crate::key::KeySet;
    use crate::state::SelectMultipleOptions;

    fn state() -> SelectMultipleState<String> {
        let collection = ListCollection::from_texts(["Oak", "Ash", "Elm"]).unwrap();
        SelectMultipleState::new(SelectMultipleOptions::new(collection))
    }

    #[test]
    fn test_default_placeholder() {
        let display = ValueDisplay::from_state(&state(), None);
        assert!(display.is_placeholder());
        assert_eq!(display.text(), "Select item(s)");
        assert!(display
            .data_attributes()
            .contains(&("data-slot", "placeholder".to_string())));
    }

    #[test]
    fn test_custom_placeholder() {
        let display = ValueDisplay::from_state(&state(), Some("Pick trees"));
        assert_eq!(display.text(), "Pick trees");
    }

    #[test]
    fn test_items_in_selection_order() {
        let state = state();
        state.set_selected_keys(["Elm", "Oak"].into_iter().collect::<KeySet>());
        let display = ValueDisplay::from_state(&state, None);
        assert!(!display.is_placeholder());
        assert_eq!(display.items().map(|items| items.len()), Some(2));
        assert_eq!(display.text(), "Elm, Oak");
        assert!(display.data_attributes().is_empty());
    }

    #[test]
    fn test_stale_keys_fall_back_to_placeholder() {
        let state = state();
        state.set_selected_keys(["Pine"].into_iter().collect::<KeySet>());
        assert!(ValueDisplay::from_state(&state, None).is_placeholder());
    }
}
