//! Interaction wiring for the select widget.
//!
//! This layer turns [`SelectMultipleState`](crate::SelectMultipleState) into
//! props for the host's elements: the trigger button, the value display, the
//! popup list, and the label/description/error text slots. The host renders
//! the elements and forwards input events to the handlers in the props.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_select::interaction::{
//!     AriaSelectMultipleOptions, ElementHandle, ElementId, KeyCode, KeyboardEvent,
//!     SelectMultipleRefs, use_select_multiple,
//! };
//! use horizon_select::{ListCollection, SelectMultipleOptions, SelectMultipleState};
//!
//! struct Button;
//! impl ElementHandle for Button {
//!     fn element_id(&self) -> ElementId { ElementId::new(7) }
//!     fn focus(&self) {}
//! }
//!
//! let collection = ListCollection::from_texts(["Red", "Green", "Blue"]).unwrap();
//! let state = SelectMultipleState::new_shared(SelectMultipleOptions::new(collection));
//! let refs = Arc::new(SelectMultipleRefs::new(Arc::new(Button)));
//!
//! let options = AriaSelectMultipleOptions::new().with_aria_label("Colors");
//! let aria = use_select_multiple(&options, &state, &refs);
//! aria.trigger_props.on_key_down.call(&mut KeyboardEvent::new(KeyCode::Enter));
//! assert!(state.is_open());
//! ```

mod events;
mod field;
mod handler;
mod id;
mod keyboard_delegate;
mod menu_trigger;
mod props;
mod select_multiple;
mod type_select;

pub use events::{
    ElementHandle, ElementId, FocusEvent, FocusReason, KeyCode, KeyboardEvent, KeyboardModifiers,
    PointerType, PressEvent,
};
pub use field::{FieldAria, FieldIds, FieldOptions, FieldProps};
pub use handler::{FocusChangeHandler, Handler, HandlerChain, handler};
pub use id::{generate_id, join_ids};
pub use keyboard_delegate::{Collator, KeyboardDelegate, ListKeyboardDelegate, SearchCollator};
pub use menu_trigger::{MenuTrigger, POPUP_ROLE};
pub use props::{LinkBehavior, PopupProps, TextSlotProps, TriggerProps, ValueProps};
pub use select_multiple::{
    AriaSelectMultipleOptions, SelectMultipleAria, SelectMultipleRefs, use_select_multiple,
};
pub use type_select::{DEFAULT_TYPE_SELECT_DEBOUNCE, TypeSelect, TypeSelectConfig};
