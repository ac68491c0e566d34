//! Signal/slot system for Trellis.
//!
//! This module provides a type-safe, one-to-many notification mechanism.
//! Signals are emitted by widgets when their state changes (a button is
//! pressed, a grip finishes a resize), and connected slots are invoked in
//! response. The emitter never knows who is listening.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`Slot<Args>`] - A callback with identity, so it can be connected once
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//!
//! # Reentrancy
//!
//! Slots may connect or disconnect slots (including themselves) while the
//! signal is emitting. Emission works on a snapshot of the connection list
//! taken when [`Signal::emit`] starts:
//!
//! - A slot connected during emission is not invoked until the next emit.
//! - A slot disconnected during emission is skipped if it has not run yet.
//!
//! No internal lock is held while a slot runs, and a panicking slot
//! propagates to the caller of `emit`.
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text is now: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is removed.
    pub struct ConnectionId;
}

/// A callback that can be connected to a [`Signal`].
///
/// Unlike a bare closure, a `Slot` has identity: clones of the same slot
/// compare equal, which is what lets [`Signal::connect_slot`] ignore a slot
/// that is already connected and [`Signal::disconnect_slot`] find it again.
pub struct Slot<Args> {
    func: Arc<dyn Fn(&Args) + Send + Sync>,
}

impl<Args> Slot<Args> {
    /// Wrap a closure into a slot.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invoke the slot directly.
    pub fn call(&self, args: &Args) {
        (self.func)(args);
    }

    /// Check whether two handles refer to the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl<Args> Clone for Slot<Args> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
        }
    }
}

impl<Args> PartialEq for Slot<Args> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<Args> Eq for Slot<Args> {}

impl<Args> fmt::Debug for Slot<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("ptr", &Arc::as_ptr(&self.func).cast::<()>())
            .finish()
    }
}

/// Connection storage. `order` is the invocation order.
struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    order: Vec<ConnectionId>,
}

impl<Args> Connections<Args> {
    fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    fn find(&self, slot: &Slot<Args>) -> Option<ConnectionId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.slots.get(id).is_some_and(|s| s.ptr_eq(slot)))
    }

    fn insert(&mut self, slot: Slot<Args>) -> ConnectionId {
        let id = self.slots.insert(slot);
        self.order.push(id);
        id
    }

    fn remove(&mut self, id: ConnectionId) -> bool {
        if self.slots.remove(id).is_some() {
            self.order.retain(|&other| other != id);
            true
        } else {
            false
        }
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, every connected slot is invoked with a reference
/// to the argument, in the order the slots were connected.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections::new()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a closure to this signal.
    ///
    /// Every call creates a new connection, even for identical closures.
    /// Use [`connect_slot`](Self::connect_slot) when the same callback may be
    /// connected more than once.
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// assert!(signal.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Slot::new(slot))
    }

    /// Connect a slot unless it is already connected.
    ///
    /// Returns the ID of the (new or existing) connection.
    pub fn connect_slot(&self, slot: &Slot<Args>) -> ConnectionId {
        let mut connections = self.connections.lock();
        if let Some(existing) = connections.find(slot) {
            tracing::trace!(target: targets::SIGNAL, ?existing, "slot already connected");
            return existing;
        }
        connections.insert(slot.clone())
    }

    /// Disconnect a specific connection by its ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id)
    }

    /// Disconnect a slot.
    ///
    /// Returns `false` (and does nothing) if the slot is not connected.
    pub fn disconnect_slot(&self, slot: &Slot<Args>) -> bool {
        let mut connections = self.connections.lock();
        match connections.find(slot) {
            Some(id) => connections.remove(id),
            None => false,
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        let mut connections = self.connections.lock();
        connections.slots.clear();
        connections.order.clear();
    }

    /// Check whether a slot is currently connected.
    pub fn is_connected(&self, slot: &Slot<Args>) -> bool {
        self.connections.lock().find(slot).is_some()
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// See the [module documentation](self) for how connections made or
    /// removed during emission are treated.
    #[tracing::instrument(skip_all, target = "trellis_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let snapshot: Vec<(ConnectionId, Slot<Args>)> = {
            let connections = self.connections.lock();
            connections
                .order
                .iter()
                .filter_map(|&id| connections.slots.get(id).map(|slot| (id, slot.clone())))
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, connection_count = snapshot.len(), "emitting signal");

        for (id, slot) in snapshot {
            // Skip slots disconnected by an earlier slot in this pass.
            if !self.connections.lock().slots.contains_key(id) {
                continue;
            }
            slot.call(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().slots.len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_emission_follows_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for index in 0..5 {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(index));
        }
        signal.emit(());

        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_order_survives_disconnect_and_reuse() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let order = order.clone();
            signal.connect(move |_| order.lock().push("a"))
        };
        {
            let order = order.clone();
            signal.connect(move |_| order.lock().push("b"));
        }
        signal.disconnect(first);
        {
            // May reuse the freed slotmap entry; must still run last.
            let order = order.clone();
            signal.connect(move |_| order.lock().push("c"));
        }
        signal.emit(());

        assert_eq!(*order.lock(), vec!["b", "c"]);
    }

    #[test]
    fn test_connect_slot_is_idempotent() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let slot = Slot::new(move |_: &i32| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let first = signal.connect_slot(&slot);
        let second = signal.connect_slot(&slot.clone());
        assert_eq!(first, second);
        assert_eq!(signal.connection_count(), 1);

        signal.emit(7);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disconnect_absent_slot_is_noop() {
        let signal = Signal::<i32>::new();
        let connected = Slot::new(|_: &i32| {});
        let stranger = Slot::new(|_: &i32| {});

        signal.connect_slot(&connected);
        assert!(!signal.disconnect_slot(&stranger));
        assert_eq!(signal.connection_count(), 1);
        assert!(signal.disconnect_slot(&connected));
        assert!(!signal.is_connected(&connected));
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();

        for _ in 0..5 {
            signal.connect(|_| {});
        }

        assert_eq!(signal.connection_count(), 5);
        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_signal_with_multiple_args() {
        let signal = Signal::<(String, i32)>::new();
        let received = Arc::new(Mutex::new(None));

        let received_clone = received.clone();
        signal.connect(move |args| {
            *received_clone.lock() = Some(args.clone());
        });

        signal.emit(("hello".to_string(), 42));

        assert_eq!(received.lock().clone(), Some(("hello".to_string(), 42)));
    }

    #[test]
    fn test_slot_connected_during_emit_waits_for_next_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let late_calls = Arc::new(AtomicUsize::new(0));

        let late_calls_clone = late_calls.clone();
        let late = Slot::new(move |_: &()| {
            late_calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let weak = Arc::downgrade(&signal);
        signal.connect(move |_| {
            if let Some(signal) = weak.upgrade() {
                signal.connect_slot(&late);
            }
        });

        signal.emit(());
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        signal.emit(());
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_disconnected_during_emit_is_skipped() {
        let signal = Arc::new(Signal::<()>::new());
        let victim_calls = Arc::new(AtomicUsize::new(0));

        let victim_calls_clone = victim_calls.clone();
        let victim = Slot::new(move |_: &()| {
            victim_calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let weak = Arc::downgrade(&signal);
        let victim_clone = victim.clone();
        signal.connect(move |_| {
            if let Some(signal) = weak.upgrade() {
                signal.disconnect_slot(&victim_clone);
            }
        });
        signal.connect_slot(&victim);

        signal.emit(());
        assert_eq!(victim_calls.load(Ordering::SeqCst), 0);
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn test_self_disconnecting_slot_runs_once() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));

        let id_cell: Arc<Mutex<Option<ConnectionId>>> = Arc::new(Mutex::new(None));
        let weak = Arc::downgrade(&signal);
        let calls_clone = calls.clone();
        let id_cell_clone = id_cell.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let (Some(signal), Some(id)) = (weak.upgrade(), *id_cell_clone.lock()) {
                signal.disconnect(id);
            }
        });
        *id_cell.lock() = Some(id);

        let after_clone = after.clone();
        signal.connect(move |_| {
            after_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        signal.emit(());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[should_panic(expected = "slot failure")]
    fn test_slot_panic_propagates() {
        let signal = Signal::<()>::new();
        signal.connect(|_| panic!("slot failure"));
        signal.emit(());
    }
}
