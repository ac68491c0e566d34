//! Core systems for Trellis.
//!
//! This crate provides the foundational pieces shared by every other Trellis
//! crate:
//!
//! - **Signal/Slot System**: Type-safe one-to-many notification
//! - **Logging**: Tracing targets, span names and tree diagnostics
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::{Signal, Slot};
//!
//! let value_changed = Signal::<i32>::new();
//!
//! // Closures get a fresh connection every time.
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // A `Slot` has identity, so connecting it twice is a no-op.
//! let slot = Slot::new(|value: &i32| println!("slot saw {value}"));
//! value_changed.connect_slot(&slot);
//! value_changed.connect_slot(&slot);
//! assert_eq!(value_changed.connection_count(), 2);
//!
//! value_changed.emit(42);
//!
//! value_changed.disconnect(conn_id);
//! value_changed.disconnect_slot(&slot);
//! assert_eq!(value_changed.connection_count(), 0);
//! ```

pub mod logging;
pub mod signal;

pub use logging::{format_tree, DebugTree, PerfSpan, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal, Slot};
