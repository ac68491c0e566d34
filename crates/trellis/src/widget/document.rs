//! The document: a rendering surface plus everything that drives it.
//!
//! A [`Document`] is the root context for a widget tree. It owns the retained
//! [`Surface`], the pointer-event dispatcher, the ambient [`Viewport`] that
//! drag handlers read while resizing, and the toolkit configuration. Every
//! item is created against a document and keeps a handle to it.
//!
//! `Document` is a cheap clonable handle; clones refer to the same document.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let doc = Document::new();
//! doc.set_viewport(Viewport::from_window(0.0, 0.0, 800.0, 600.0));
//! assert_eq!(doc.viewport().window_right, 800.0);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use trellis_render::{Point, Surface};

use super::dispatcher::{EventDispatcher, EventHandler, ListenerId};
use super::events::{EventTarget, EventType, PointerEvent};
use crate::config::ToolkitConfig;

/// The visible window bounds in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Leftmost visible page coordinate.
    pub left: f64,
    /// Topmost visible page coordinate.
    pub top: f64,
    /// Rightmost visible page coordinate.
    pub window_right: f64,
    /// Bottommost visible page coordinate.
    pub window_bottom: f64,
}

impl Viewport {
    /// Create a viewport from its four bounds.
    pub const fn new(left: f64, top: f64, window_right: f64, window_bottom: f64) -> Self {
        Self {
            left,
            top,
            window_right,
            window_bottom,
        }
    }

    /// Create a viewport from a scroll position and window size.
    pub fn from_window(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Clamp a point into the visible bounds on both axes.
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            point.x.max(self.left).min(self.window_right),
            point.y.max(self.top).min(self.window_bottom),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_window(0.0, 0.0, 1024.0, 768.0)
    }
}

struct DocumentInner {
    surface: Surface,
    dispatcher: EventDispatcher,
    viewport: RwLock<Viewport>,
    config: ToolkitConfig,
}

/// A clonable handle to a document.
#[derive(Clone)]
pub struct Document {
    inner: Arc<DocumentInner>,
}

impl Document {
    /// Create a document with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ToolkitConfig::default())
    }

    /// Create a document with the given configuration.
    pub fn with_config(config: ToolkitConfig) -> Self {
        Self {
            inner: Arc::new(DocumentInner {
                surface: Surface::new(),
                dispatcher: EventDispatcher::new(),
                viewport: RwLock::new(Viewport::default()),
                config,
            }),
        }
    }

    /// The rendering surface.
    pub fn surface(&self) -> &Surface {
        &self.inner.surface
    }

    /// The toolkit configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.inner.config
    }

    /// The current viewport.
    pub fn viewport(&self) -> Viewport {
        *self.inner.viewport.read()
    }

    /// Replace the viewport, e.g. after the window scrolled or resized.
    pub fn set_viewport(&self, viewport: Viewport) {
        *self.inner.viewport.write() = viewport;
    }

    /// Register a listener. Prefer [`EventBinder`](super::binder::EventBinder).
    pub fn add_listener(
        &self,
        target: EventTarget,
        event_type: EventType,
        handler: EventHandler,
    ) -> ListenerId {
        self.inner.dispatcher.add_listener(target, event_type, handler)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.dispatcher.remove_listener(id)
    }

    /// Count the listeners registered for `event_type` on `target`.
    pub fn listener_count(&self, target: EventTarget, event_type: EventType) -> usize {
        self.inner.dispatcher.listener_count(target, event_type)
    }

    /// Deliver a pointer event to the target node, its ancestors and the
    /// document, in that order.
    pub fn dispatch(&self, event: PointerEvent) -> PointerEvent {
        self.inner.dispatcher.dispatch(&self.inner.surface, event)
    }

    /// Check whether two handles refer to the same document.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.inner.surface.node_count())
            .field("viewport", &self.viewport())
            .finish_non_exhaustive()
    }
}
