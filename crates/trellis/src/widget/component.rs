//! Components: items with geometry.
//!
//! A [`Component`] is an [`Item`] plus the geometry that layout and
//! interactive resizing work with:
//!
//! - explicit minimum and maximum sizes (overrides, [`Size::INVALID`] when
//!   unset),
//! - the current offset rect, written to the surface whenever it is set,
//! - computed size hints supplied by a [`SizeHints`] implementation.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let doc = Document::new();
//! let panel = Component::with_hints(&doc, SizeHint::from_dimensions(200.0, 100.0));
//! panel.set_offset_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! let node = panel.item().node().unwrap();
//! assert_eq!(doc.surface().geometry(node).unwrap(), Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{Rect, Size, Surface};

use super::document::Document;
use super::geometry::{NoHints, SizeHints};
use super::item::{ElementFactory, Item};

#[derive(Debug, Clone, Copy)]
struct GeometryState {
    minimum_size: Size,
    maximum_size: Size,
    offset_rect: Rect,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self {
            minimum_size: Size::INVALID,
            maximum_size: Size::INVALID,
            offset_rect: Rect::ZERO,
        }
    }
}

struct ComponentInner {
    geometry: Mutex<GeometryState>,
    hints: Box<dyn SizeHints>,
    geometry_changed: Signal<Rect>,
}

/// An item with geometry attributes.
///
/// `Component` is a clonable handle; clones refer to the same component.
#[derive(Clone)]
pub struct Component {
    item: Item,
    inner: Arc<ComponentInner>,
}

impl Component {
    /// Create a component on a `div` element with no computed sizes.
    pub fn new(document: &Document) -> Self {
        Self::with_hints(document, NoHints)
    }

    /// Create a component on a `div` element with the given computed sizes.
    pub fn with_hints(document: &Document, hints: impl SizeHints + 'static) -> Self {
        Self::with_element(
            document,
            &|surface: &Surface| surface.create_element("div"),
            hints,
        )
    }

    /// Create a component whose node is built by `factory`.
    pub fn with_element(
        document: &Document,
        factory: &dyn ElementFactory,
        hints: impl SizeHints + 'static,
    ) -> Self {
        Self {
            item: Item::with_factory(document, factory),
            inner: Arc::new(ComponentInner {
                geometry: Mutex::new(GeometryState::default()),
                hints: Box::new(hints),
                geometry_changed: Signal::new(),
            }),
        }
    }

    /// The underlying item.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// The explicit minimum size, [`Size::INVALID`] if unset.
    pub fn minimum_size(&self) -> Size {
        self.inner.geometry.lock().minimum_size
    }

    /// Set the explicit minimum size. Pass [`Size::INVALID`] to unset.
    pub fn set_minimum_size(&self, size: Size) {
        self.inner.geometry.lock().minimum_size = size;
    }

    /// The explicit maximum size, [`Size::INVALID`] if unset.
    pub fn maximum_size(&self) -> Size {
        self.inner.geometry.lock().maximum_size
    }

    /// Set the explicit maximum size. Pass [`Size::INVALID`] to unset.
    pub fn set_maximum_size(&self, size: Size) {
        self.inner.geometry.lock().maximum_size = size;
    }

    /// The current geometry.
    pub fn offset_rect(&self) -> Rect {
        self.inner.geometry.lock().offset_rect
    }

    /// Set the current geometry and re-render it.
    ///
    /// Emits `geometry_changed` when the rect differs from the previous one.
    pub fn set_offset_rect(&self, rect: Rect) {
        let changed = {
            let mut geometry = self.inner.geometry.lock();
            let changed = geometry.offset_rect != rect;
            geometry.offset_rect = rect;
            changed
        };

        if let Some(node) = self.item.live_node() {
            if let Err(err) = self.item.document().surface().set_geometry(node, rect) {
                tracing::warn!(target: targets::ITEM, item = %self.item.id(), error = %err, "failed to render geometry");
            }
        }

        if changed {
            self.inner.geometry_changed.emit(rect);
        }
    }

    /// The computed minimum size.
    pub fn minimum_size_hint(&self) -> Size {
        self.inner.hints.minimum_size_hint()
    }

    /// The computed maximum size.
    pub fn maximum_size_hint(&self) -> Size {
        self.inner.hints.maximum_size_hint()
    }

    /// The computed preferred size.
    pub fn size_hint(&self) -> Size {
        self.inner.hints.size_hint()
    }

    /// Emitted with the new rect whenever the offset rect changes.
    pub fn geometry_changed(&self) -> &Signal<Rect> {
        &self.inner.geometry_changed
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("item", &self.item)
            .field("geometry", &*self.inner.geometry.lock())
            .finish()
    }
}
