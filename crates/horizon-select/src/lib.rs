//! Headless multi-selection dropdown for Horizon.
//!
//! `horizon-select` holds the behavior of a multi-select dropdown without
//! rendering anything:
//!
//! - **Selection**: Keys chosen from a [`Collection`], controlled by the
//!   caller or owned by the widget ([`ListState`], [`SelectionManager`])
//! - **Popup**: Open/closed state with a focus strategy ([`OverlayState`])
//! - **Validation**: Required/custom checks with realtime and committed
//!   results ([`ValidationState`])
//! - **Focus**: Focus-within tracking across trigger and popup
//!   ([`FocusState`])
//! - **Interaction**: Props and handlers for the host's elements
//!   ([`interaction`])
//!
//! [`SelectMultipleState`] composes the pieces; hosts usually share it as an
//! `Arc` and derive element props with
//! [`use_select_multiple`](interaction::use_select_multiple).
//!
//! # Example
//!
//! ```
//! use horizon_select::{
//!     KeySet, ListCollection, SelectMultipleOptions, SelectMultipleState, Selection,
//! };
//!
//! let fruit = ListCollection::from_texts(["Apple", "Banana", "Cherry"]).unwrap();
//! let state = SelectMultipleState::new(
//!     SelectMultipleOptions::new(fruit).with_default_selected_keys(Selection::All),
//! );
//!
//! assert_eq!(state.selected_keys().len(), 3);
//!
//! state.set_selected_keys(["Cherry"].into_iter().collect::<KeySet>());
//! assert_eq!(state.selected_items().unwrap()[0].text_value, "Cherry");
//! ```

mod collection;
mod context;
mod error;
mod focus;
pub mod interaction;
mod key;
mod list_state;
mod overlay;
mod render;
mod selection_manager;
mod state;
mod store;
mod validation;
mod value;

pub use collection::{Collection, Item, ListCollection};
pub use context::SelectMultipleContext;
pub use error::{Result, SelectError};
pub use focus::FocusState;
pub use key::{Key, KeySet, Selection};
pub use list_state::{ListState, SelectedItems};
pub use overlay::{FocusStrategy, OverlayState};
pub use render::SelectMultipleRenderProps;
pub use selection_manager::{SelectionManager, SelectionMode};
pub use state::{SelectMultipleOptions, SelectMultipleState};
pub use store::SelectionStore;
pub use validation::{
    FnValidator, SelectionCountValidator, SelectionValidator, VALUE_MISSING_MESSAGE,
    ValidationBehavior, ValidationResult, ValidationState, ValidityDetails,
};
pub use value::{DEFAULT_PLACEHOLDER, ValueDisplay};

pub use horizon_select_core::{ConnectionId, CoreError, Signal, ValueSource};
