//! Pointer event dispatch.
//!
//! The dispatcher owns the listener table for a document and delivers
//! events along the propagation path:
//!
//! 1. The target node
//! 2. Each ancestor of the target, up to the surface root
//! 3. [`EventTarget::Document`], when the target is attached to the root
//!    (or when the event has no target node at all)
//!
//! # Reentrancy
//!
//! Handlers commonly bind and unbind other handlers while running (a press
//! handler starts listening for moves, a release handler stops). For every
//! step of the path the listener list is snapshotted before any handler runs,
//! and no lock is held while a handler executes:
//!
//! - Listeners added during dispatch are not invoked for the in-flight event.
//! - Listeners removed during dispatch are skipped if they have not run yet.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use trellis_core::logging::targets;
use trellis_render::Surface;

use super::events::{EventTarget, EventType, PointerEvent};

new_key_type! {
    /// Identifies a registered listener.
    pub struct ListenerId;
}

/// A type-erased event handler.
pub type EventHandler = Arc<dyn Fn(&mut PointerEvent) + Send + Sync>;

struct Listener {
    handler: EventHandler,
    key: (EventTarget, EventType),
}

#[derive(Default)]
struct ListenerTable {
    entries: SlotMap<ListenerId, Listener>,
    /// Registration order per (target, stream).
    order: HashMap<(EventTarget, EventType), Vec<ListenerId>>,
}

/// Routes pointer events to registered listeners.
#[derive(Default)]
pub struct EventDispatcher {
    table: Mutex<ListenerTable>,
}

impl EventDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `event_type` on `target`.
    pub fn add_listener(
        &self,
        target: EventTarget,
        event_type: EventType,
        handler: EventHandler,
    ) -> ListenerId {
        let mut table = self.table.lock();
        let key = (target, event_type);
        let id = table.entries.insert(Listener { handler, key });
        table.order.entry(key).or_default().push(id);
        tracing::trace!(target: targets::EVENT, ?id, ?target, %event_type, "listener added");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut table = self.table.lock();
        let Some(listener) = table.entries.remove(id) else {
            return false;
        };
        if let Some(ids) = table.order.get_mut(&listener.key) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                table.order.remove(&listener.key);
            }
        }
        tracing::trace!(target: targets::EVENT, ?id, "listener removed");
        true
    }

    /// Check if a listener is still registered.
    pub fn contains_listener(&self, id: ListenerId) -> bool {
        self.table.lock().entries.contains_key(id)
    }

    /// Count the listeners registered for `event_type` on `target`.
    pub fn listener_count(&self, target: EventTarget, event_type: EventType) -> usize {
        self.table
            .lock()
            .order
            .get(&(target, event_type))
            .map_or(0, Vec::len)
    }

    /// Deliver an event along its propagation path.
    ///
    /// Returns the event after all handlers have run, so the caller can see
    /// whether the default action was prevented.
    #[tracing::instrument(skip_all, target = "trellis::event", level = "trace", fields(event_type = %event.event_type))]
    pub fn dispatch(&self, surface: &Surface, mut event: PointerEvent) -> PointerEvent {
        for target in propagation_path(surface, &event) {
            self.deliver(target, &mut event);
        }
        event
    }

    fn deliver(&self, target: EventTarget, event: &mut PointerEvent) {
        let snapshot: Vec<(ListenerId, EventHandler)> = {
            let table = self.table.lock();
            match table.order.get(&(target, event.event_type)) {
                Some(ids) => ids
                    .iter()
                    .filter_map(|&id| table.entries.get(id).map(|l| (id, l.handler.clone())))
                    .collect(),
                None => return,
            }
        };

        for (id, handler) in snapshot {
            if !self.contains_listener(id) {
                continue;
            }
            tracing::trace!(target: targets::EVENT, ?id, ?target, "invoking listener");
            handler(event);
        }
    }
}

/// Compute the targets an event visits, innermost first.
fn propagation_path(surface: &Surface, event: &PointerEvent) -> Vec<EventTarget> {
    let Some(node) = event.target else {
        return vec![EventTarget::Document];
    };
    if !surface.contains(node) {
        return Vec::new();
    }

    let mut path = vec![EventTarget::Node(node)];
    if let Ok(ancestors) = surface.ancestors(node) {
        path.extend(ancestors.into_iter().map(EventTarget::Node));
    }
    if surface.is_attached(node) {
        path.push(EventTarget::Document);
    }
    path
}
