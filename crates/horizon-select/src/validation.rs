//! Form validation state.
//!
//! Validation is computed from several sources, in priority order:
//!
//! 1. The caller's `is_invalid` flag
//! 2. Server errors, cleared on the next value change
//! 3. The caller's [`SelectionValidator`]
//! 4. Host constraint validation ([`ValidationState::update_validation`]),
//!    or the built-in "value missing" check for required fields
//!
//! The *realtime* result is always current. The *displayed* result depends
//! on [`ValidationBehavior`]: `Aria` shows the realtime result immediately,
//! `Native` shows the caller flag and server errors immediately but
//! everything else only after [`commit`](ValidationState::commit).
//!
//! # Example
//!
//! ```
//! use horizon_select::{KeySet, ValidationBehavior, ValidationState};
//!
//! let validation = ValidationState::new(ValidationBehavior::Native).with_required(true);
//! validation.set_value(KeySet::new());
//! assert!(validation.realtime_validation().is_invalid);
//! assert!(!validation.display_validation().is_invalid);
//!
//! validation.commit();
//! assert!(validation.display_validation().details.value_missing);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_select_core::logging::targets;
use horizon_select_core::{Property, Signal};

use crate::key::KeySet;

/// Message used for the built-in "value missing" error.
pub const VALUE_MISSING_MESSAGE: &str = "Please select an item in the list.";

/// When validation errors become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationBehavior {
    /// Errors display as soon as they occur.
    Aria,
    /// Errors display after a commit, like native form controls.
    #[default]
    Native,
}

/// Which kinds of failure produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValidityDetails {
    /// A required field has no value.
    pub value_missing: bool,
    /// A caller, server, or validator error.
    pub custom_error: bool,
}

/// The outcome of validating the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    /// Whether the value is invalid.
    pub is_invalid: bool,
    /// Error messages, possibly empty even when invalid.
    pub errors: Vec<String>,
    /// Failure kinds.
    pub details: ValidityDetails,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid() -> Self {
        Self::default()
    }

    /// A failing result from caller-supplied errors.
    pub fn custom(errors: Vec<String>) -> Self {
        Self {
            is_invalid: true,
            errors,
            details: ValidityDetails {
                custom_error: true,
                ..ValidityDetails::default()
            },
        }
    }

    /// A failing result for a required field with no value.
    pub fn value_missing() -> Self {
        Self {
            is_invalid: true,
            errors: vec![VALUE_MISSING_MESSAGE.to_string()],
            details: ValidityDetails {
                value_missing: true,
                ..ValidityDetails::default()
            },
        }
    }
}

/// Checks a selection and reports error messages.
///
/// An empty error list means the selection is valid.
pub trait SelectionValidator: Send + Sync {
    /// Validate the resolved selection.
    fn validate(&self, keys: &KeySet) -> Vec<String>;
}

impl<V: SelectionValidator + ?Sized> SelectionValidator for Arc<V> {
    fn validate(&self, keys: &KeySet) -> Vec<String> {
        (**self).validate(keys)
    }
}

impl<V: SelectionValidator + ?Sized> SelectionValidator for Box<V> {
    fn validate(&self, keys: &KeySet) -> Vec<String> {
        (**self).validate(keys)
    }
}

/// Adapts a closure into a [`SelectionValidator`].
pub struct FnValidator<F>(F);

impl<F> FnValidator<F>
where
    F: Fn(&KeySet) -> Vec<String> + Send + Sync,
{
    /// Wrap `validate`.
    pub fn new(validate: F) -> Self {
        Self(validate)
    }
}

impl<F> SelectionValidator for FnValidator<F>
where
    F: Fn(&KeySet) -> Vec<String> + Send + Sync,
{
    fn validate(&self, keys: &KeySet) -> Vec<String> {
        (self.0)(keys)
    }
}

/// Bounds the number of selected keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCountValidator {
    minimum: usize,
    maximum: Option<usize>,
}

impl SelectionCountValidator {
    /// Accept between `minimum` and `maximum` keys, inclusive.
    pub fn new(minimum: usize, maximum: Option<usize>) -> Self {
        Self { minimum, maximum }
    }

    /// Accept at most `maximum` keys.
    pub fn at_most(maximum: usize) -> Self {
        Self::new(0, Some(maximum))
    }
}

impl SelectionValidator for SelectionCountValidator {
    fn validate(&self, keys: &KeySet) -> Vec<String> {
        let count = keys.len();
        if count < self.minimum {
            return vec![format!("Select at least {} items.", self.minimum)];
        }
        if let Some(maximum) = self.maximum
            && count > maximum
        {
            return vec![format!("Select no more than {maximum} items.")];
        }
        Vec::new()
    }
}

/// Tracks realtime and displayed validation for the selection.
///
/// # Signals
///
/// - `validation_changed(ValidationResult)`: Emitted when the displayed
///   result changes through a commit or reset.
pub struct ValidationState {
    behavior: ValidationBehavior,
    validator: Option<Arc<dyn SelectionValidator>>,
    is_invalid: Property<bool>,
    is_required: Property<bool>,
    value: Property<KeySet>,
    builtin: Property<Option<ValidationResult>>,
    server_errors: Property<Vec<String>>,
    displayed: Property<ValidationResult>,
    pending_commit: AtomicBool,

    /// Signal emitted when the displayed validation changes.
    pub validation_changed: Signal<ValidationResult>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::new(ValidationBehavior::default())
    }
}

impl ValidationState {
    /// Create validation state with the given display behavior.
    pub fn new(behavior: ValidationBehavior) -> Self {
        Self {
            behavior,
            validator: None,
            is_invalid: Property::new(false),
            is_required: Property::new(false),
            value: Property::default(),
            builtin: Property::new(None),
            server_errors: Property::default(),
            displayed: Property::default(),
            pending_commit: AtomicBool::new(false),
            validation_changed: Signal::new(),
        }
    }

    /// Set the caller's validator.
    pub fn with_validator(mut self, validator: Arc<dyn SelectionValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Set whether a value is required.
    pub fn with_required(self, required: bool) -> Self {
        self.is_required.set_silent(required);
        self
    }

    /// Set the caller's invalid flag.
    pub fn with_invalid(self, invalid: bool) -> Self {
        self.is_invalid.set_silent(invalid);
        self
    }

    /// The display behavior.
    pub fn behavior(&self) -> ValidationBehavior {
        self.behavior
    }

    /// Whether a value is required.
    pub fn is_required(&self) -> bool {
        self.is_required.get()
    }

    /// Update whether a value is required.
    pub fn set_required(&self, required: bool) {
        self.is_required.set(required);
    }

    /// Update the caller's invalid flag.
    pub fn set_invalid(&self, invalid: bool) {
        self.is_invalid.set(invalid);
    }

    /// Replace the server errors. They are dropped on the next value change.
    pub fn set_server_errors(&self, errors: Vec<String>) {
        self.server_errors.set(errors);
    }

    /// Record the host's constraint-validation result.
    pub fn update_validation(&self, result: ValidationResult) {
        self.builtin.set(Some(result));
    }

    /// Record the value being validated.
    ///
    /// A different value clears server errors. A commit requested while the
    /// value was in flight is applied now.
    pub fn set_value(&self, keys: KeySet) {
        if self.value.set(keys) {
            self.server_errors.set(Vec::new());
        }
        if self.pending_commit.load(Ordering::Acquire) {
            self.commit();
        }
    }

    /// The result for the current value, whether or not it is displayed.
    pub fn realtime_validation(&self) -> ValidationResult {
        if let Some(result) = self.controlled_or_server() {
            return result;
        }

        if let Some(validator) = &self.validator {
            let errors = self.value.with(|keys| validator.validate(keys));
            if !errors.is_empty() {
                return ValidationResult::custom(errors);
            }
        }

        if let Some(builtin) = self.builtin.get()
            && builtin.is_invalid
        {
            return builtin;
        }

        if self.is_required.get() && self.value.with(KeySet::is_empty) {
            return ValidationResult::value_missing();
        }

        ValidationResult::valid()
    }

    /// The result that should be shown to the user.
    pub fn display_validation(&self) -> ValidationResult {
        match self.behavior {
            ValidationBehavior::Aria => self.realtime_validation(),
            ValidationBehavior::Native => self
                .controlled_or_server()
                .unwrap_or_else(|| self.displayed.get()),
        }
    }

    /// Whether a commit is waiting for the value to arrive.
    pub fn is_pending_commit(&self) -> bool {
        self.pending_commit.load(Ordering::Acquire)
    }

    /// Defer a commit until the next [`set_value`](Self::set_value).
    pub fn request_commit(&self) {
        tracing::trace!(target: targets::VALIDATION, "validation commit deferred");
        self.pending_commit.store(true, Ordering::Release);
    }

    /// Copy the realtime result into the displayed result.
    pub fn commit(&self) {
        self.pending_commit.store(false, Ordering::Release);
        let result = self.realtime_validation();
        tracing::debug!(
            target: targets::VALIDATION,
            is_invalid = result.is_invalid,
            errors = result.errors.len(),
            "validation committed"
        );
        self.show(result);
    }

    /// Clear the displayed result and any pending commit.
    pub fn reset(&self) {
        self.pending_commit.store(false, Ordering::Release);
        self.show(ValidationResult::valid());
    }

    fn show(&self, result: ValidationResult) {
        if self.displayed.set(result.clone()) {
            self.validation_changed.emit(result);
        }
    }

    fn controlled_or_server(&self) -> Option<ValidationResult> {
        if self.is_invalid.get() {
            return Some(ValidationResult::custom(Vec::new()));
        }
        let server = self.server_errors.get();
        (!server.is_empty()).then(|| ValidationResult::custom(server))
    }
}

impl fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationState")
            .field("behavior", &self.behavior)
            .field("displayed", &self.displayed.get())
            .field("pending_commit", &self.is_pending_commit())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn keys(keys: &[&str]) -> KeySet {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_native_defers_until_commit() {
        let validation = ValidationState::new(ValidationBehavior::Native)
            .with_validator(Arc::new(SelectionCountValidator::at_most(1)));

        validation.set_value(keys(&["a", "b"]));
        assert!(validation.realtime_validation().is_invalid);
        assert!(!validation.display_validation().is_invalid);

        validation.commit();
        let shown = validation.display_validation();
        assert!(shown.is_invalid);
        assert_eq!(shown.errors, ["Select no more than 1 items."]);
    }

    #[test]
    fn test_aria_shows_immediately() {
        let validation = ValidationState::new(ValidationBehavior::Aria).with_required(true);
        validation.set_value(KeySet::new());
        assert!(validation.display_validation().details.value_missing);
    }

    #[test]
    fn test_controlled_invalid_takes_priority() {
        let validation = ValidationState::new(ValidationBehavior::Native).with_invalid(true);
        validation.set_value(keys(&["a"]));

        let shown = validation.display_validation();
        assert!(shown.is_invalid);
        assert!(shown.errors.is_empty());
        assert!(shown.details.custom_error);
    }

    #[test]
    fn test_server_errors_cleared_on_value_change() {
        let validation = ValidationState::default();
        validation.set_value(keys(&["a"]));
        validation.set_server_errors(vec!["taken".to_string()]);
        assert_eq!(validation.display_validation().errors, ["taken"]);

        validation.set_value(keys(&["a"]));
        assert!(validation.display_validation().is_invalid);

        validation.set_value(keys(&["b"]));
        assert!(!validation.display_validation().is_invalid);
    }

    #[test]
    fn test_pending_commit_applies_on_next_value() {
        let validation = ValidationState::new(ValidationBehavior::Native).with_required(true);
        validation.set_value(keys(&["a"]));

        validation.request_commit();
        assert!(validation.is_pending_commit());
        assert!(!validation.display_validation().is_invalid);

        validation.set_value(KeySet::new());
        assert!(!validation.is_pending_commit());
        assert!(validation.display_validation().details.value_missing);
    }

    #[test]
    fn test_host_validation_result() {
        let validation = ValidationState::new(ValidationBehavior::Aria);
        validation.update_validation(ValidationResult::custom(vec!["host".to_string()]));
        assert_eq!(validation.realtime_validation().errors, ["host"]);
    }

    #[test]
    fn test_fn_validator() {
        let validation = ValidationState::new(ValidationBehavior::Aria).with_validator(Arc::new(
            FnValidator::new(|keys: &KeySet| {
                if keys.contains(&"bad".into()) {
                    vec!["no bad".to_string()]
                } else {
                    Vec::new()
                }
            }),
        ));
        validation.set_value(keys(&["bad"]));
        assert_eq!(validation.display_validation().errors, ["no bad"]);
    }

    #[test]
    fn test_reset_and_change_signal() {
        let validation = ValidationState::new(ValidationBehavior::Native).with_required(true);
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        validation.validation_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        validation.commit();
        validation.commit();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        validation.reset();
        assert!(!validation.display_validation().is_invalid);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
