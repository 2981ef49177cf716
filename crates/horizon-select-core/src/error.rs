//! Error types for Horizon Select core primitives.

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the core primitives.
///
/// Signals and properties never fail. The only fallible operation is feeding
/// a caller's value into a store, which requires the store to be controlled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A value was fed back into a store that was resolved as uncontrolled.
    #[error("cannot sync '{name}': the value is uncontrolled and owned by the widget")]
    Uncontrolled {
        /// Human-readable name of the value (for diagnostics).
        name: &'static str,
    },
}
