//! Event handler chains.
//!
//! Prop bundles carry handlers as [`HandlerChain`]s. Widget-derived handlers
//! are pushed first and caller handlers last, so the widget never observes
//! anything a caller handler does to the event.

use std::fmt;
use std::sync::Arc;

/// A shareable event handler.
pub type Handler<E> = Arc<dyn Fn(&mut E) + Send + Sync>;

/// A shareable callback for focus-within changes.
pub type FocusChangeHandler = Arc<dyn Fn(bool) + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<E, F>(f: F) -> Handler<E>
where
    F: Fn(&mut E) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An ordered list of handlers for one event.
pub struct HandlerChain<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> Default for HandlerChain<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> Clone for HandlerChain<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> HandlerChain<E> {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler.
    pub fn then(mut self, handler: Handler<E>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Append a handler if present.
    pub fn then_some(mut self, handler: Option<Handler<E>>) -> Self {
        self.handlers.extend(handler);
        self
    }

    /// Append every handler of `other`, after this chain's handlers.
    pub fn merge(mut self, other: HandlerChain<E>) -> Self {
        self.handlers.extend(other.handlers);
        self
    }

    /// Run every handler in order.
    pub fn call(&self, event: &mut E) {
        for handler in &self.handlers {
            handler(event);
        }
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the chain has no handlers.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E> From<Handler<E>> for HandlerChain<E> {
    fn from(handler: Handler<E>) -> Self {
        Self::new().then(handler)
    }
}

impl<E> fmt::Debug for HandlerChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .finish()
    }
}
