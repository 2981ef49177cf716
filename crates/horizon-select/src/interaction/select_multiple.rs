//! Derives element props from the widget state.

use std::fmt;
use std::sync::Arc;

use horizon_select_core::logging::targets;

use super::events::{ElementHandle, FocusEvent, KeyCode, KeyboardEvent, PressEvent};
use super::field::{FieldAria, FieldIds, FieldOptions};
use super::handler::{FocusChangeHandler, Handler, HandlerChain, handler};
use super::id::{generate_id, join_ids};
use super::keyboard_delegate::{Collator, KeyboardDelegate, ListKeyboardDelegate, SearchCollator};
use super::menu_trigger::{MenuTrigger, POPUP_ROLE};
use super::props::{LinkBehavior, PopupProps, TextSlotProps, TriggerProps, ValueProps};
use super::type_select::{TypeSelect, TypeSelectConfig};
use crate::selection_manager::SelectionMode;
use crate::state::SelectMultipleState;
use crate::validation::ValidationResult;

/// Per-instance handles that must survive across prop derivations.
///
/// Create one per mounted widget and pass it to every
/// [`use_select_multiple`] call so ids stay stable and the type-ahead buffer
/// keeps accumulating.
pub struct SelectMultipleRefs {
    trigger: Arc<dyn ElementHandle>,
    field_ids: FieldIds,
    value_id: String,
    popup_id: String,
    type_select: TypeSelect,
}

impl SelectMultipleRefs {
    /// Create handles for a widget whose trigger is `trigger`.
    pub fn new(trigger: Arc<dyn ElementHandle>) -> Self {
        Self::with_type_select(trigger, TypeSelectConfig::default())
    }

    /// Create handles with a custom type-ahead configuration.
    pub fn with_type_select(trigger: Arc<dyn ElementHandle>, config: TypeSelectConfig) -> Self {
        Self {
            trigger,
            field_ids: FieldIds::generate(),
            value_id: generate_id("horizon-select-value"),
            popup_id: generate_id("horizon-select-popup"),
            type_select: TypeSelect::new(config),
        }
    }

    /// The trigger element.
    pub fn trigger(&self) -> &Arc<dyn ElementHandle> {
        &self.trigger
    }

    /// The type-ahead buffer.
    pub fn type_select(&self) -> &TypeSelect {
        &self.type_select
    }
}

impl fmt::Debug for SelectMultipleRefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectMultipleRefs")
            .field("trigger", &self.trigger.element_id())
            .field("field_ids", &self.field_ids)
            .field("value_id", &self.value_id)
            .field("popup_id", &self.popup_id)
            .finish_non_exhaustive()
    }
}

/// Caller-facing options for [`use_select_multiple`].
#[derive(Clone, Default)]
pub struct AriaSelectMultipleOptions {
    /// Id for the trigger; generated when absent.
    pub id: Option<String>,
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// `aria-labelledby`.
    pub aria_labelledby: Option<String>,
    /// `aria-describedby`.
    pub aria_describedby: Option<String>,
    /// `aria-details`.
    pub aria_details: Option<String>,
    /// Whether a visible label is rendered.
    pub has_label: bool,
    /// Whether description text is rendered.
    pub has_description: bool,
    /// Whether error text is rendered while invalid.
    pub has_error_message: bool,

    /// Called when focus enters the widget.
    pub on_focus: Option<Handler<FocusEvent>>,
    /// Called when focus leaves the widget.
    pub on_blur: Option<Handler<FocusEvent>>,
    /// Called with the new focus-within flag.
    pub on_focus_change: Option<FocusChangeHandler>,
    /// Called after the widget's own key-down handling.
    pub on_key_down: Option<Handler<KeyboardEvent>>,
    /// Called on key up.
    pub on_key_up: Option<Handler<KeyboardEvent>>,

    /// Replaces the default keyboard delegate.
    pub keyboard_delegate: Option<Arc<dyn KeyboardDelegate>>,
    /// Collator for the default keyboard delegate.
    pub collator: Option<Arc<dyn Collator>>,
}

impl AriaSelectMultipleOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trigger id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set `aria-label`.
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Set `aria-labelledby`.
    pub fn with_aria_labelledby(mut self, ids: impl Into<String>) -> Self {
        self.aria_labelledby = Some(ids.into());
        self
    }

    /// Set `aria-describedby`.
    pub fn with_aria_describedby(mut self, ids: impl Into<String>) -> Self {
        self.aria_describedby = Some(ids.into());
        self
    }

    /// Set `aria-details`.
    pub fn with_aria_details(mut self, id: impl Into<String>) -> Self {
        self.aria_details = Some(id.into());
        self
    }

    /// Declare a visible label.
    pub fn with_label(mut self) -> Self {
        self.has_label = true;
        self
    }

    /// Declare description text.
    pub fn with_description(mut self) -> Self {
        self.has_description = true;
        self
    }

    /// Declare error text.
    pub fn with_error_message(mut self) -> Self {
        self.has_error_message = true;
        self
    }

    /// Set the focus handler.
    pub fn on_focus<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut FocusEvent) + Send + Sync + 'static,
    {
        self.on_focus = Some(handler(f));
        self
    }

    /// Set the blur handler.
    pub fn on_blur<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut FocusEvent) + Send + Sync + 'static,
    {
        self.on_blur = Some(handler(f));
        self
    }

    /// Set the focus-change handler.
    pub fn on_focus_change<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_focus_change = Some(Arc::new(f));
        self
    }

    /// Set the key-down handler.
    pub fn on_key_down<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut KeyboardEvent) + Send + Sync + 'static,
    {
        self.on_key_down = Some(handler(f));
        self
    }

    /// Set the key-up handler.
    pub fn on_key_up<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut KeyboardEvent) + Send + Sync + 'static,
    {
        self.on_key_up = Some(handler(f));
        self
    }

    /// Replace the keyboard delegate.
    pub fn with_keyboard_delegate(mut self, delegate: Arc<dyn KeyboardDelegate>) -> Self {
        self.keyboard_delegate = Some(delegate);
        self
    }

    /// Set the collator used by the default delegate.
    pub fn with_collator(mut self, collator: Arc<dyn Collator>) -> Self {
        self.collator = Some(collator);
        self
    }
}

impl fmt::Debug for AriaSelectMultipleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AriaSelectMultipleOptions")
            .field("id", &self.id)
            .field("aria_label", &self.aria_label)
            .field("aria_labelledby", &self.aria_labelledby)
            .field("has_label", &self.has_label)
            .field("has_description", &self.has_description)
            .field("has_error_message", &self.has_error_message)
            .field("custom_delegate", &self.keyboard_delegate.is_some())
            .finish_non_exhaustive()
    }
}

/// Everything the host needs to render and wire the widget.
#[derive(Debug, Clone)]
pub struct SelectMultipleAria {
    /// Props for the trigger button.
    pub trigger_props: TriggerProps,
    /// Props for the value display.
    pub value_props: ValueProps,
    /// Props for the popup list.
    pub popup_props: PopupProps,
    /// Props for the visible label.
    pub label_props: TextSlotProps,
    /// Props for the description text.
    pub description_props: TextSlotProps,
    /// Props for the error message text.
    pub error_message_props: TextSlotProps,
    /// The validation result to display.
    pub validation: ValidationResult,
}

/// Derive element props from `state`.
///
/// Derivation has no side effects; call it whenever the state or options
/// change. Handlers capture `state` and `refs` and act on them when the host
/// invokes them.
pub fn use_select_multiple<T: Send + Sync + 'static>(
    options: &AriaSelectMultipleOptions,
    state: &Arc<SelectMultipleState<T>>,
    refs: &Arc<SelectMultipleRefs>,
) -> SelectMultipleAria {
    let delegate = keyboard_delegate(options, state);
    let validation = state.display_validation();

    let field = FieldAria::new(
        &FieldOptions {
            id: options.id.as_deref(),
            aria_label: options.aria_label.as_deref(),
            aria_labelledby: options.aria_labelledby.as_deref(),
            aria_describedby: options.aria_describedby.as_deref(),
            aria_details: options.aria_details.as_deref(),
            has_label: options.has_label,
            has_description: options.has_description,
            has_error_message: options.has_error_message || !validation.errors.is_empty(),
            is_invalid: validation.is_invalid,
        },
        &refs.field_ids,
    );
    let trigger_id = field.field_props.id.clone();
    let names_self = field.field_props.aria_label.is_some() && field.field_props.aria_labelledby.is_none();
    let self_label = names_self.then_some(trigger_id.as_str());

    let menu_trigger = MenuTrigger::new(state.clone());

    let on_key_down = HandlerChain::new()
        .then(type_select_handler(state, refs, &delegate))
        .then({
            let menu_trigger = menu_trigger.clone();
            handler(move |event: &mut KeyboardEvent| menu_trigger.on_key_down(event))
        })
        .then_some(
            (state.selection_mode() == SelectionMode::Single)
                .then(|| single_step_handler(state, &delegate)),
        )
        .then_some(options.on_key_down.clone());

    let trigger_props = TriggerProps {
        aria_labelledby: join_ids([
            Some(refs.value_id.as_str()),
            field.field_props.aria_labelledby.as_deref(),
            self_label,
        ]),
        id: trigger_id.clone(),
        aria_label: field.field_props.aria_label.clone(),
        aria_describedby: field.field_props.aria_describedby.clone(),
        aria_details: field.field_props.aria_details.clone(),
        aria_haspopup: POPUP_ROLE,
        aria_expanded: menu_trigger.is_expanded(),
        aria_controls: menu_trigger.controls(&refs.popup_id),
        is_disabled: state.is_disabled(),
        is_pressed: state.is_open(),
        on_press_start: HandlerChain::from({
            let menu_trigger = menu_trigger.clone();
            handler(move |event: &mut PressEvent| menu_trigger.on_press_start(event))
        }),
        on_press: HandlerChain::from({
            let menu_trigger = menu_trigger.clone();
            handler(move |event: &mut PressEvent| menu_trigger.on_press(event))
        }),
        on_key_down,
        on_key_up: HandlerChain::new().then_some(options.on_key_up.clone()),
        on_focus: HandlerChain::from(trigger_focus_handler(options, state)),
        on_blur: HandlerChain::from(trigger_blur_handler(options, state)),
    };

    let popup_props = PopupProps {
        id: refs.popup_id.clone(),
        aria_labelledby: join_ids([field.field_props.aria_labelledby.as_deref(), self_label]),
        auto_focus: state
            .focus_strategy()
            .unwrap_or_else(|| state.trigger_focus_strategy()),
        should_select_on_press_up: true,
        should_focus_on_hover: true,
        disallow_empty_selection: false,
        link_behavior: LinkBehavior::Selection,
        selection_mode: state.selection_mode(),
        on_blur: HandlerChain::from(popup_blur_handler(options, state)),
        on_close: HandlerChain::from({
            let state = state.clone();
            let trigger = refs.trigger.clone();
            handler(move |_: &mut ()| {
                state.close();
                trigger.focus();
            })
        }),
    };

    SelectMultipleAria {
        trigger_props,
        value_props: ValueProps {
            id: refs.value_id.clone(),
        },
        popup_props,
        label_props: field.label_props,
        description_props: field.description_props,
        error_message_props: field.error_message_props,
        validation,
    }
}

fn keyboard_delegate<T: Send + Sync + 'static>(
    options: &AriaSelectMultipleOptions,
    state: &SelectMultipleState<T>,
) -> Arc<dyn KeyboardDelegate> {
    if let Some(delegate) = &options.keyboard_delegate {
        return delegate.clone();
    }
    let collator = options
        .collator
        .clone()
        .unwrap_or_else(|| Arc::new(SearchCollator) as Arc<dyn Collator>);
    Arc::new(ListKeyboardDelegate::with_collator(
        state.collection(),
        state.disabled_keys(),
        collator,
    ))
}

/// Type-ahead: a match becomes the focused key and the whole selection.
fn type_select_handler<T: Send + Sync + 'static>(
    state: &Arc<SelectMultipleState<T>>,
    refs: &Arc<SelectMultipleRefs>,
    delegate: &Arc<dyn KeyboardDelegate>,
) -> Handler<KeyboardEvent> {
    let state = state.clone();
    let refs = refs.clone();
    let delegate = delegate.clone();
    handler(move |event: &mut KeyboardEvent| {
        let manager = state.selection_manager();
        let focused = manager.focused_key();
        let Some(key) = refs
            .type_select
            .handle_key_down(event, delegate.as_ref(), focused.as_ref())
        else {
            return;
        };
        tracing::debug!(target: targets::INTERACTION, %key, "type-ahead selects key");
        manager.set_focused_key(Some(key.clone()));
        manager.set_selected_keys([key]);
        state.commit_validation();
    })
}

/// Single mode: ArrowLeft/ArrowRight step the lone selection.
fn single_step_handler<T: Send + Sync + 'static>(
    state: &Arc<SelectMultipleState<T>>,
    delegate: &Arc<dyn KeyboardDelegate>,
) -> Handler<KeyboardEvent> {
    let state = state.clone();
    let delegate = delegate.clone();
    handler(move |event: &mut KeyboardEvent| {
        let step_back = match event.key {
            KeyCode::ArrowLeft => true,
            KeyCode::ArrowRight => false,
            _ => return,
        };
        event.prevent_default();

        let manager = state.selection_manager();
        let selected = manager.selected_keys();
        let next = match selected.first() {
            Some(current) if step_back => delegate.key_above(current),
            Some(current) => delegate.key_below(current),
            None => delegate.first_key(),
        };
        if let Some(key) = next {
            manager.set_selected_keys([key]);
        }
    })
}

fn trigger_focus_handler<T: Send + Sync + 'static>(
    options: &AriaSelectMultipleOptions,
    state: &Arc<SelectMultipleState<T>>,
) -> Handler<FocusEvent> {
    let state = state.clone();
    let on_focus = options.on_focus.clone();
    let on_focus_change = options.on_focus_change.clone();
    handler(move |event: &mut FocusEvent| {
        if !state.focus().acquire() {
            return;
        }
        if let Some(on_focus) = &on_focus {
            on_focus(event);
        }
        if let Some(on_focus_change) = &on_focus_change {
            on_focus_change(true);
        }
    })
}

fn trigger_blur_handler<T: Send + Sync + 'static>(
    options: &AriaSelectMultipleOptions,
    state: &Arc<SelectMultipleState<T>>,
) -> Handler<FocusEvent> {
    let state = state.clone();
    let on_blur = options.on_blur.clone();
    let on_focus_change = options.on_focus_change.clone();
    handler(move |event: &mut FocusEvent| {
        if !state.focus().release(state.is_open()) {
            return;
        }
        notify_blur(on_blur.as_ref(), on_focus_change.as_ref(), event);
    })
}

fn popup_blur_handler<T: Send + Sync + 'static>(
    options: &AriaSelectMultipleOptions,
    state: &Arc<SelectMultipleState<T>>,
) -> Handler<FocusEvent> {
    let state = state.clone();
    let on_blur = options.on_blur.clone();
    let on_focus_change = options.on_focus_change.clone();
    handler(move |event: &mut FocusEvent| {
        if event.stays_within_current_target() {
            return;
        }
        state.focus().release(false);
        notify_blur(on_blur.as_ref(), on_focus_change.as_ref(), event);
    })
}

fn notify_blur(
    on_blur: Option<&Handler<FocusEvent>>,
    on_focus_change: Option<&FocusChangeHandler>,
    event: &mut FocusEvent,
) {
    if let Some(on_blur) = on_blur {
        on_blur(event);
    }
    if let Some(on_focus_change) = on_focus_change {
        on_focus_change(false);
    }
}
