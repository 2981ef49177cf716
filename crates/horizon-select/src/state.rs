//! The composite multi-select state.
//!
//! [`SelectMultipleState`] is the single object handed to the interaction
//! layer and to render code. It owns one instance each of list, overlay,
//! validation, and focus state, and is the only place where they interact:
//!
//! - every selection write commits validation, then notifies
//!   `selection_changed` listeners
//! - with a caller-owned selection, the commit waits until the caller feeds
//!   the new value back through [`sync_selected_keys`]
//!
//! [`sync_selected_keys`]: SelectMultipleState::sync_selected_keys
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use horizon_select::{ListCollection, Selection, SelectMultipleOptions, SelectMultipleState};
//!
//! let collection = ListCollection::from_texts(["Cat", "Dog", "Fish"]).unwrap();
//! let state = SelectMultipleState::new(
//!     SelectMultipleOptions::new(collection).with_required(true),
//! );
//!
//! let count = Arc::new(AtomicUsize::new(0));
//! let count_clone = count.clone();
//! state.selection_changed().connect(move |keys| {
//!     count_clone.fetch_add(keys.len(), Ordering::SeqCst);
//! });
//!
//! state.set_selected_keys(Selection::All);
//! assert_eq!(count.load(Ordering::SeqCst), 3);
//! assert!(!state.display_validation().is_invalid);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_select_core::logging::targets;
use horizon_select_core::{Property, Signal, ValueSource};

use crate::collection::Collection;
use crate::error::Result;
use crate::focus::FocusState;
use crate::key::{Key, KeySet, Selection};
use crate::list_state::{ListState, SelectedItems};
use crate::overlay::{FocusStrategy, OverlayState};
use crate::selection_manager::{SelectionManager, SelectionMode};
use crate::validation::{SelectionValidator, ValidationBehavior, ValidationResult, ValidationState};

/// Construction options for [`SelectMultipleState`].
///
/// Each value is either caller-owned (`with_selected_keys`, `with_open`) or
/// widget-owned and seeded once (`with_default_selected_keys`,
/// `with_default_open`). The choice is fixed for the lifetime of the state.
pub struct SelectMultipleOptions<T> {
    collection: Arc<dyn Collection<T>>,
    selection: ValueSource<Selection>,
    disabled_keys: KeySet,
    open: ValueSource<bool>,
    selection_mode: SelectionMode,
    validation_behavior: ValidationBehavior,
    validator: Option<Arc<dyn SelectionValidator>>,
    is_invalid: bool,
    is_required: bool,
    is_disabled: bool,
}

impl<T: Send + Sync + 'static> SelectMultipleOptions<T> {
    /// Options over `collection`, with an empty widget-owned selection and
    /// a closed popup.
    pub fn new(collection: impl Collection<T> + 'static) -> Self {
        Self::from_shared(Arc::new(collection))
    }

    /// Options over an already shared collection.
    pub fn from_shared(collection: Arc<dyn Collection<T>>) -> Self {
        Self {
            collection,
            selection: ValueSource::default(),
            disabled_keys: KeySet::new(),
            open: ValueSource::default(),
            selection_mode: SelectionMode::default(),
            validation_behavior: ValidationBehavior::default(),
            validator: None,
            is_invalid: false,
            is_required: false,
            is_disabled: false,
        }
    }

    /// Let the caller own the selection, starting at `selection`.
    pub fn with_selected_keys(mut self, selection: impl Into<Selection>) -> Self {
        self.selection = ValueSource::Controlled {
            value: selection.into(),
        };
        self
    }

    /// Seed a widget-owned selection.
    pub fn with_default_selected_keys(mut self, selection: impl Into<Selection>) -> Self {
        self.selection = ValueSource::Uncontrolled {
            initial: selection.into(),
        };
        self
    }

    /// Set keys that cannot be selected or navigated to.
    pub fn with_disabled_keys<K: Into<Key>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.disabled_keys = keys.into_iter().collect();
        self
    }

    /// Let the caller own the open flag, starting at `open`.
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = ValueSource::Controlled { value: open };
        self
    }

    /// Seed a widget-owned open flag.
    pub fn with_default_open(mut self, open: bool) -> Self {
        self.open = ValueSource::Uncontrolled { initial: open };
        self
    }

    /// Set the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set when validation errors become visible.
    pub fn with_validation_behavior(mut self, behavior: ValidationBehavior) -> Self {
        self.validation_behavior = behavior;
        self
    }

    /// Set a validator for the selection.
    pub fn with_validator(mut self, validator: impl SelectionValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Force the widget invalid.
    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.is_invalid = invalid;
        self
    }

    /// Require a non-empty selection.
    pub fn with_required(mut self, required: bool) -> Self {
        self.is_required = required;
        self
    }

    /// Disable the widget.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }
}

/// Complete state of a multi-select widget.
///
/// All methods take `&self`; share the state behind an [`Arc`] to hand it
/// to event handlers.
pub struct SelectMultipleState<T> {
    list: ListState<T>,
    overlay: OverlayState,
    validation: ValidationState,
    focus: FocusState,
    selection_mode: SelectionMode,
    is_disabled: Property<bool>,
}

impl<T: Send + Sync + 'static> SelectMultipleState<T> {
    /// Build the state.
    pub fn new(options: SelectMultipleOptions<T>) -> Self {
        let list = ListState::new(options.collection, options.selection)
            .with_disabled_keys(options.disabled_keys);

        let mut validation = ValidationState::new(options.validation_behavior)
            .with_required(options.is_required)
            .with_invalid(options.is_invalid);
        if let Some(validator) = options.validator {
            validation = validation.with_validator(validator);
        }
        validation.set_value(list.selected_keys());

        tracing::debug!(
            target: targets::SELECTION,
            controlled = list.is_controlled(),
            mode = ?options.selection_mode,
            "select multiple state created"
        );

        Self {
            list,
            overlay: OverlayState::new(options.open),
            validation,
            focus: FocusState::new(),
            selection_mode: options.selection_mode,
            is_disabled: Property::new(options.is_disabled),
        }
    }

    /// Build the state behind an [`Arc`].
    pub fn new_shared(options: SelectMultipleOptions<T>) -> Arc<Self> {
        Arc::new(Self::new(options))
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// The list state.
    pub fn list(&self) -> &ListState<T> {
        &self.list
    }

    /// The overlay state.
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// The validation state.
    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    /// The focus state.
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    // =========================================================================
    // Collection and selection
    // =========================================================================

    /// The current collection.
    pub fn collection(&self) -> Arc<dyn Collection<T>> {
        self.list.collection()
    }

    /// Replace the collection.
    pub fn set_collection(&self, collection: Arc<dyn Collection<T>>) {
        self.list.set_collection(collection);
        self.validation.set_value(self.list.selected_keys());
    }

    /// Keys that cannot be selected or navigated to.
    pub fn disabled_keys(&self) -> KeySet {
        self.list.disabled_keys()
    }

    /// Replace the disabled keys.
    pub fn set_disabled_keys<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) {
        self.list.set_disabled_keys(keys.into_iter().collect());
    }

    /// The selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Keyed selection operations.
    pub fn selection_manager(&self) -> SelectionManager<'_, T> {
        SelectionManager::new(self)
    }

    /// The selection as stored, with "all" kept literal.
    pub fn selection(&self) -> Selection {
        self.list.selection()
    }

    /// The selection resolved against the current collection.
    pub fn selected_keys(&self) -> KeySet {
        self.list.selected_keys()
    }

    /// Items whose keys are selected, or `None` when nothing is selected.
    pub fn selected_items(&self) -> Option<SelectedItems<T>> {
        self.list.selected_items()
    }

    /// Write a new selection.
    ///
    /// Validation is committed before `selection_changed` listeners run.
    /// Every call notifies, even when the selection is unchanged. In single
    /// mode only the last of several explicit keys is kept.
    pub fn set_selected_keys(&self, next: impl Into<Selection>) {
        let next = self.clamp_to_mode(next.into());
        let controlled = self.list.is_controlled();
        self.list.write_selection(next, |resolved| {
            if controlled {
                self.validation.request_commit();
            } else {
                self.validation.set_value(resolved.clone());
                self.validation.commit();
            }
        });
    }

    /// Feed the caller's selection back in.
    ///
    /// Returns `true` if it echoes the last widget-driven write. A pending
    /// validation commit is applied against the new value. Fails if the
    /// selection is widget-owned.
    pub fn sync_selected_keys(&self, value: impl Into<Selection>) -> Result<bool> {
        let is_echo = self.list.sync_selected_keys(value.into())?;
        self.validation.set_value(self.list.selected_keys());
        Ok(is_echo)
    }

    fn clamp_to_mode(&self, next: Selection) -> Selection {
        match (self.selection_mode, next) {
            (SelectionMode::Single, Selection::Keys(keys)) if keys.len() > 1 => {
                Selection::Keys(keys.last().cloned().into_iter().collect())
            }
            (_, next) => next,
        }
    }

    // =========================================================================
    // Overlay
    // =========================================================================

    /// Whether the popup is open.
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// The focus strategy of the most recent open or toggle request.
    pub fn focus_strategy(&self) -> Option<FocusStrategy> {
        self.overlay.focus_strategy()
    }

    /// The strategy the trigger opens the popup with.
    pub fn trigger_focus_strategy(&self) -> FocusStrategy {
        FocusStrategy::First
    }

    /// Open the popup.
    pub fn open(&self, strategy: Option<FocusStrategy>) {
        self.overlay.open(strategy);
    }

    /// Close the popup.
    pub fn close(&self) {
        self.overlay.close();
    }

    /// Flip the popup.
    pub fn toggle(&self, strategy: Option<FocusStrategy>) {
        self.overlay.toggle(strategy);
    }

    /// Request an open flag.
    pub fn set_open(&self, open: bool) {
        self.overlay.set_open(open);
    }

    /// Feed the caller's open flag back in.
    pub fn sync_open(&self, open: bool) -> Result<bool> {
        self.overlay.sync_open(open)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether focus is within the widget.
    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    /// Set the focus flag directly.
    pub fn set_focused(&self, focused: bool) {
        self.focus.set_focused(focused);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// The result for the current selection, displayed or not.
    pub fn realtime_validation(&self) -> ValidationResult {
        self.validation.realtime_validation()
    }

    /// The result to show the user.
    pub fn display_validation(&self) -> ValidationResult {
        self.validation.display_validation()
    }

    /// Show the realtime result, or defer until a caller-owned selection
    /// write has been fed back.
    pub fn commit_validation(&self) {
        if self.list.is_awaiting_echo() {
            self.validation.request_commit();
        } else {
            self.validation.commit();
        }
    }

    /// Clear the displayed result.
    pub fn reset_validation(&self) {
        self.validation.reset();
    }

    /// Record the host's constraint-validation result.
    pub fn update_validation(&self, result: ValidationResult) {
        self.validation.update_validation(result);
    }

    /// Replace the server errors.
    pub fn set_server_errors(&self, errors: Vec<String>) {
        self.validation.set_server_errors(errors);
    }

    /// Whether a commit waits for the caller's value.
    pub fn is_pending_commit(&self) -> bool {
        self.validation.is_pending_commit()
    }

    /// Update the caller's invalid flag.
    pub fn set_invalid(&self, invalid: bool) {
        self.validation.set_invalid(invalid);
    }

    /// Whether a selection is required.
    pub fn is_required(&self) -> bool {
        self.validation.is_required()
    }

    /// Update whether a selection is required.
    pub fn set_required(&self, required: bool) {
        self.validation.set_required(required);
    }

    // =========================================================================
    // Disabled
    // =========================================================================

    /// Whether the widget is disabled.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled.get()
    }

    /// Enable or disable the widget.
    pub fn set_disabled(&self, disabled: bool) {
        self.is_disabled.set(disabled);
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted after every selection write, with the resolved keys.
    pub fn selection_changed(&self) -> &Signal<KeySet> {
        &self.list.selection_changed
    }

    /// Emitted when the popup opens or closes.
    pub fn open_changed(&self) -> &Signal<bool> {
        &self.overlay.open_changed
    }

    /// Emitted when the widget gains or loses focus.
    pub fn focus_changed(&self) -> &Signal<bool> {
        &self.focus.focus_changed
    }

    /// Emitted when the displayed validation changes.
    pub fn validation_changed(&self) -> &Signal<ValidationResult> {
        &self.validation.validation_changed
    }
}

impl<T> fmt::Debug for SelectMultipleState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectMultipleState")
            .field("list", &self.list)
            .field("overlay", &self.overlay)
            .field("validation", &self.validation)
            .field("focus", &self.focus)
            .field("selection_mode", &self.selection_mode)
            .finish()
    }
}

static_assertions::assert_impl_all!(SelectMultipleState<String>: Send, Sync);
