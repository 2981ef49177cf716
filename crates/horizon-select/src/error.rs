//! Error types for the multi-select widget state.

use horizon_select_core::CoreError;

use crate::key::Key;

/// A specialized Result type for widget state operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Errors raised by construction and by explicitly checked operations.
///
/// Ordinary state transitions (selection writes, open/close, commits) never
/// fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// A collection was built with the same key twice.
    #[error("duplicate key in collection: {0}")]
    DuplicateKey(Key),

    /// A checked operation named a key the collection does not hold.
    #[error("key not found in collection: {0}")]
    UnknownKey(Key),

    /// An error from the reactive core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SelectError::DuplicateKey(Key::from("a"));
        assert_eq!(err.to_string(), "duplicate key in collection: a");

        let err: SelectError = CoreError::Uncontrolled { name: "open" }.into();
        assert_eq!(
            err.to_string(),
            "cannot sync 'open': the value is uncontrolled and owned by the widget"
        );
    }
}
