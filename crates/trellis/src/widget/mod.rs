//! Widget system for Trellis.
//!
//! This module provides the foundational widget architecture:
//!
//! - [`Document`]: The surface, input dispatcher, viewport and configuration
//!   every widget is created against
//! - [`Item`]: A node in the item tree, owning one surface node
//! - [`Component`]: An item with geometry (explicit sizes, offset rect, hints)
//! - [`EventBinder`]: Scoped subscription to one pointer-event stream
//! - [`VisualNode`] and [`Geometry`]: Capabilities widgets expose
//!
//! # Widget Tree
//!
//! Items own their children; a child keeps only a weak reference to its
//! parent. Inserting an item that already has a parent moves it:
//!
//! ```
//! use trellis::prelude::*;
//!
//! let doc = Document::new();
//! let window = Item::new(&doc);
//! let panel = Item::new(&doc);
//! let footer = Item::new(&doc);
//!
//! window.mount().unwrap();
//! window.append(&[&panel, &footer]).unwrap();
//! window.prepend(&[&footer]).unwrap();
//!
//! assert_eq!(window.children().unwrap(), vec![footer.clone(), panel.clone()]);
//! assert_eq!(panel.parent(), Some(window.clone()));
//! ```
//!
//! # Composition
//!
//! Widgets hold a [`Component`] rather than extending one. Shared behaviour
//! such as press handling lives in a helper that composes signals and
//! binders ([`widgets::AbstractButton`]); interactive controllers talk to
//! their targets through a [`layout::LayoutItem`].

mod binder;
mod component;
mod dispatcher;
mod document;
mod events;
mod geometry;
mod item;
pub mod layout;
mod traits;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use binder::EventBinder;
pub use component::Component;
pub use dispatcher::{EventDispatcher, EventHandler, ListenerId};
pub use document::{Document, Viewport};
pub use events::{EventTarget, EventType, MouseButton, PointerEvent};
pub use geometry::{NoHints, SizeHint, SizeHints};
pub use item::{ElementFactory, Item, ItemId};
pub use layout::{ComponentItem, LayoutItem, MAX_ITEM_DIM, MAX_ITEM_SIZE, MIN_ITEM_SIZE};
pub use traits::{Geometry, VisualNode};
pub use widgets::{AbstractButton, GripArea, PushButton, SizeGrip};
