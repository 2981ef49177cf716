//! Core reactive primitives for Horizon Select.
//!
//! This crate provides the building blocks the select widget state is
//! assembled from:
//!
//! - **Signal/Slot System**: Type-safe change notification ([`Signal`])
//! - **Property System**: Change-detecting cells and cached computations
//!   ([`Property`], [`Memo`])
//! - **Controlled Values**: Construction-time choice between caller-owned and
//!   widget-owned values ([`ValueSource`], [`ValueStore`])
//! - **Logging**: Tracing targets and performance spans ([`logging`])
//!
//! # Controlled Value Example
//!
//! ```
//! use horizon_select_core::{Signal, ValueSource};
//!
//! let store = ValueSource::Uncontrolled { initial: false }.into_store("open");
//! let open_changed = Signal::<bool>::new();
//! open_changed.connect(|open| println!("open: {open}"));
//!
//! if !store.read() {
//!     store.write(true);
//!     open_changed.emit(true);
//! }
//! assert!(store.read());
//! ```

pub mod controlled;
mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use controlled::{ControlledStore, UncontrolledStore, ValueSource, ValueStore};
pub use error::{CoreError, Result};
pub use logging::PerfSpan;
pub use property::{Memo, Property};
pub use signal::{ConnectionId, Signal};
