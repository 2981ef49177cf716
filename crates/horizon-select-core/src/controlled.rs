//! Controlled and uncontrolled value ownership.
//!
//! A widget value is either *controlled* (the caller owns the authoritative
//! copy and feeds it back after every change) or *uncontrolled* (the widget
//! owns it, seeded once from an initial value). Which one applies is decided
//! when the store is created and never changes afterwards.
//!
//! [`ValueSource`] is the construction-time choice. It resolves into a boxed
//! [`ValueStore`], so the owning state object talks to a single read/write
//! interface instead of branching on the mode at every mutation site.
//!
//! Notification is left to the owner: stores only hold the value. Owners
//! decide whether equal writes notify (selection) or not (open state).
//!
//! # Example
//!
//! ```
//! use horizon_select_core::ValueSource;
//!
//! let store = ValueSource::Controlled { value: 1 }.into_store("count");
//! store.write(2);
//! // The caller has not fed the value back yet.
//! assert_eq!(store.read(), 1);
//!
//! assert_eq!(store.sync(2), Ok(true));
//! assert_eq!(store.read(), 2);
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::error::{CoreError, Result};
use crate::logging::targets;

/// How a widget value is owned, chosen once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource<T> {
    /// The caller owns the value and supplies it on every update.
    Controlled {
        /// The caller's current value.
        value: T,
    },
    /// The widget owns the value, seeded from `initial`.
    Uncontrolled {
        /// The value the widget starts with.
        initial: T,
    },
}

impl<T: Default> Default for ValueSource<T> {
    fn default() -> Self {
        Self::Uncontrolled {
            initial: T::default(),
        }
    }
}

impl<T> ValueSource<T> {
    /// Whether this source hands ownership to the caller.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::Controlled { .. })
    }
}

impl<T: Clone + PartialEq + Send + Sync + fmt::Debug + 'static> ValueSource<T> {
    /// Resolve the source into the store strategy that owns the value.
    ///
    /// `name` identifies the value in logs and errors.
    pub fn into_store(self, name: &'static str) -> Box<dyn ValueStore<T>> {
        match self {
            Self::Controlled { value } => Box::new(ControlledStore::new(name, value)),
            Self::Uncontrolled { initial } => Box::new(UncontrolledStore::new(name, initial)),
        }
    }
}

/// Common read/write interface over controlled and uncontrolled values.
pub trait ValueStore<T>: Send + Sync {
    /// The value currently displayed by the widget.
    fn read(&self) -> T;

    /// Record a widget-driven change.
    ///
    /// Uncontrolled stores take the value immediately. Controlled stores
    /// leave the displayed value untouched and only remember `next` as the
    /// value they expect the caller to feed back.
    fn write(&self, next: T);

    /// Feed the caller's current value back in.
    ///
    /// Returns `Ok(true)` when the value is the echo of the last write.
    /// Uncontrolled stores reject this with [`CoreError::Uncontrolled`].
    fn sync(&self, value: T) -> Result<bool>;

    /// Whether the caller owns the value.
    fn is_controlled(&self) -> bool;

    /// Whether a controlled write is still waiting for its echo.
    fn is_awaiting_echo(&self) -> bool {
        false
    }
}

/// Store for a caller-owned value.
pub struct ControlledStore<T> {
    name: &'static str,
    value: RwLock<T>,
    /// Last value written by the widget and not yet echoed back.
    last_written: RwLock<Option<T>>,
}

impl<T> ControlledStore<T> {
    /// Create a controlled store showing `value`.
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            value: RwLock::new(value),
            last_written: RwLock::new(None),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + fmt::Debug> ValueStore<T> for ControlledStore<T> {
    fn read(&self) -> T {
        self.value.read().clone()
    }

    fn write(&self, next: T) {
        tracing::trace!(target: targets::CONTROLLED, name = self.name, value = ?next, "controlled write awaiting echo");
        *self.last_written.write() = Some(next);
    }

    fn sync(&self, value: T) -> Result<bool> {
        let is_echo = {
            let mut last = self.last_written.write();
            let is_echo = last.as_ref() == Some(&value);
            if is_echo {
                *last = None;
            }
            is_echo
        };
        tracing::trace!(target: targets::CONTROLLED, name = self.name, is_echo, "controlled value synced");
        *self.value.write() = value;
        Ok(is_echo)
    }

    fn is_controlled(&self) -> bool {
        true
    }

    fn is_awaiting_echo(&self) -> bool {
        self.last_written.read().is_some()
    }
}

/// Store for a widget-owned value.
pub struct UncontrolledStore<T> {
    name: &'static str,
    value: RwLock<T>,
}

impl<T> UncontrolledStore<T> {
    /// Create an uncontrolled store seeded with `initial`.
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            name,
            value: RwLock::new(initial),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + fmt::Debug> ValueStore<T> for UncontrolledStore<T> {
    fn read(&self) -> T {
        self.value.read().clone()
    }

    fn write(&self, next: T) {
        *self.value.write() = next;
    }

    fn sync(&self, _value: T) -> Result<bool> {
        tracing::warn!(target: targets::CONTROLLED, name = self.name, "ignoring value fed into an uncontrolled store");
        Err(CoreError::Uncontrolled { name: self.name })
    }

    fn is_controlled(&self) -> bool {
        false
    }
}
