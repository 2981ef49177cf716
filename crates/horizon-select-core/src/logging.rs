//! Logging and tracing facilities for Horizon Select.
//!
//! Horizon Select uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_select=debug")
//!         .init();
//! }
//! ```
//!
//! Every subsystem logs under its own target (see [`targets`]) so it can be
//! filtered independently, e.g. `horizon_select::selection=trace`.

/// Span targets used by Horizon Select.
pub mod span_names {
    /// Target of every [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "horizon_select::perf";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_select_core::signal";
    /// Controlled/uncontrolled value stores.
    pub const CONTROLLED: &str = "horizon_select_core::controlled";
    /// Selection store and selection manager.
    pub const SELECTION: &str = "horizon_select::selection";
    /// Popup open/close state.
    pub const OVERLAY: &str = "horizon_select::overlay";
    /// Form validation state.
    pub const VALIDATION: &str = "horizon_select::validation";
    /// Widget focus state.
    pub const FOCUS: &str = "horizon_select::focus";
    /// Event handler wiring.
    pub const INTERACTION: &str = "horizon_select::interaction";
    /// Type-ahead search buffer.
    pub const TYPE_SELECT: &str = "horizon_select::type_select";
}

/// Times a derived computation such as `selected_items`.
///
/// The span is entered on creation and closed on drop, so subscribers that
/// record span timings report how long the guarded scope took. Filter on
/// [`span_names::PERF`] to see only these spans.
///
/// ```
/// use horizon_select_core::PerfSpan;
///
/// fn resolve_items() {
///     let _span = PerfSpan::new("resolve_items");
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a span tagged with `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation);
        Self {
            span: span.entered(),
        }
    }
}
