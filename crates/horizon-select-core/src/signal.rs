//! Change notification for Horizon Select state objects.
//!
//! Every state object exposes its notifications as [`Signal`] fields:
//! `selection_changed`, `open_changed`, `focus_changed` and so on. Listeners
//! connect a closure and keep the returned [`ConnectionId`] if they want to
//! stop listening later.
//!
//! # Re-entrancy
//!
//! A listener may call back into the widget that notified it, including
//! writes that emit again. The listener list is copied before the first
//! listener runs and no lock is held while listeners execute, so a listener
//! connected during an emission first runs on the *next* emission.
//!
//! # Example
//!
//! ```
//! use horizon_select_core::Signal;
//!
//! let selection_changed = Signal::<Vec<&'static str>>::new();
//!
//! let id = selection_changed.connect(|keys| {
//!     println!("{} keys selected", keys.len());
//! });
//!
//! selection_changed.emit(vec!["red", "blue"]);
//! assert!(selection_changed.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle for one listener connected to a [`Signal`].
    pub struct ConnectionId;
}

type Listener<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of listeners notified synchronously with a borrowed payload.
///
/// `Signal<Args>` is `Send + Sync`; listeners run on the emitting thread.
pub struct Signal<Args> {
    listeners: Mutex<SlotMap<ConnectionId, Listener<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Add a listener, returning the id that removes it again.
    pub fn connect<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.listeners.lock().insert(Arc::new(listener))
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.listeners.lock().remove(id).is_some()
    }

    /// Notify every listener connected before this call.
    ///
    /// Listeners run in connection order, except that one connected after a
    /// disconnect may take over the freed position.
    #[tracing::instrument(skip_all, target = "horizon_select_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let listeners: Vec<Listener<Args>> = self.listeners.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, listeners = listeners.len(), "emitting");

        for listener in listeners {
            listener(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
