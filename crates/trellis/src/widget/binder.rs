//! Scoped subscriptions to one pointer-event stream.
//!
//! An [`EventBinder`] ties a single [`EventType`] on a single [`EventTarget`]
//! to any number of `(handler, context)` pairs. A pair is identified by the
//! handler's function address and the context's allocation, so binding the
//! same pair twice is a no-op and so is unbinding a pair that is not bound.
//!
//! The binder holds only a weak reference to each context; a widget that
//! binds its own handlers is not kept alive by them. Dropping the binder
//! unbinds everything it bound.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use trellis::prelude::*;
//!
//! struct Counter(AtomicUsize);
//!
//! fn on_up(counter: &Arc<Counter>, _event: &mut PointerEvent) {
//!     counter.0.fetch_add(1, Ordering::SeqCst);
//! }
//!
//! let doc = Document::new();
//! let counter = Arc::new(Counter(AtomicUsize::new(0)));
//! let binder = EventBinder::new(&doc, EventType::MouseUp, EventTarget::Document);
//! binder.bind(on_up, &counter);
//! binder.bind(on_up, &counter);
//!
//! doc.dispatch(PointerEvent::mouse_up(None, MouseButton::Left, 0.0, 0.0));
//! assert_eq!(counter.0.load(Ordering::SeqCst), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::logging::targets;

use super::dispatcher::{EventHandler, ListenerId};
use super::document::Document;
use super::events::{EventTarget, EventType, PointerEvent};

/// `(handler address, context address)`.
type BindingKey = (usize, usize);

fn binding_key<C>(handler: fn(&Arc<C>, &mut PointerEvent), context: &Arc<C>) -> BindingKey {
    (handler as usize, Arc::as_ptr(context) as *const () as usize)
}

/// Binds handlers to one event stream on one target.
pub struct EventBinder {
    document: Document,
    event_type: EventType,
    target: EventTarget,
    bindings: Mutex<Vec<(BindingKey, ListenerId)>>,
}

impl EventBinder {
    /// Create a binder for `event_type` on `target`. Nothing is bound yet.
    pub fn new(document: &Document, event_type: EventType, target: EventTarget) -> Self {
        Self {
            document: document.clone(),
            event_type,
            target,
            bindings: Mutex::new(Vec::new()),
        }
    }

    /// The stream this binder subscribes to.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Where the binder's listeners are registered.
    pub fn target(&self) -> EventTarget {
        self.target
    }

    /// Subscribe `handler`, invoked with `context` as receiver.
    ///
    /// Returns `false` if the pair was already bound.
    ///
    /// Pairs are identified by the handler's function address. Rust does not
    /// promise distinct functions distinct addresses: the compiler may merge
    /// two handlers with identical bodies, and such handlers then count as the
    /// same handler for the same context. Give handlers bound to one binder
    /// and context different behaviour, or bind them through separate binders.
    pub fn bind<C>(&self, handler: fn(&Arc<C>, &mut PointerEvent), context: &Arc<C>) -> bool
    where
        C: Send + Sync + 'static,
    {
        let key = binding_key(handler, context);
        let mut bindings = self.bindings.lock();
        if bindings.iter().any(|(bound, _)| *bound == key) {
            return false;
        }

        let weak = Arc::downgrade(context);
        let listener: EventHandler = Arc::new(move |event: &mut PointerEvent| {
            if let Some(context) = weak.upgrade() {
                handler(&context, event);
            }
        });
        let id = self.document.add_listener(self.target, self.event_type, listener);
        bindings.push((key, id));
        tracing::debug!(target: targets::EVENT, event_type = %self.event_type, target = ?self.target, "bound handler");
        true
    }

    /// Remove the subscription for this pair.
    ///
    /// Returns `false` if the pair was not bound.
    pub fn unbind<C>(&self, handler: fn(&Arc<C>, &mut PointerEvent), context: &Arc<C>) -> bool {
        let key = binding_key(handler, context);
        let removed = {
            let mut bindings = self.bindings.lock();
            bindings
                .iter()
                .position(|(bound, _)| *bound == key)
                .map(|index| bindings.remove(index).1)
        };
        match removed {
            Some(id) => {
                self.document.remove_listener(id);
                tracing::debug!(target: targets::EVENT, event_type = %self.event_type, target = ?self.target, "unbound handler");
                true
            }
            None => false,
        }
    }

    /// Remove every subscription made through this binder.
    pub fn unbind_all(&self) {
        let removed: Vec<_> = self.bindings.lock().drain(..).collect();
        for (_, id) in removed {
            self.document.remove_listener(id);
        }
    }

    /// Check whether the pair is currently bound.
    pub fn is_bound<C>(&self, handler: fn(&Arc<C>, &mut PointerEvent), context: &Arc<C>) -> bool {
        let key = binding_key(handler, context);
        self.bindings.lock().iter().any(|(bound, _)| *bound == key)
    }

    /// The number of pairs currently bound.
    pub fn bound_count(&self) -> usize {
        self.bindings.lock().len()
    }
}

impl Drop for EventBinder {
    fn drop(&mut self) {
        self.unbind_all();
    }
}

impl std::fmt::Debug for EventBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBinder")
            .field("event_type", &self.event_type)
            .field("target", &self.target)
            .field("bound", &self.bound_count())
            .finish()
    }
}
