//! Capability traits.
//!
//! Widgets are built by composition: each one holds a [`Component`] (which in
//! turn holds an [`Item`]) and exposes it through these traits instead of
//! inheriting from a base class.
//!
//! - [`VisualNode`] - tree membership, tag set and display state
//! - [`Geometry`] - explicit sizes, offset rect and computed hints

use trellis_core::Signal;
use trellis_render::{Rect, Size};

use super::component::Component;
use super::item::{Item, ItemId};
use crate::error::ItemResult;

/// Something that owns a node in the item tree.
pub trait VisualNode {
    /// The underlying item.
    fn item(&self) -> &Item;

    /// The item's identity.
    fn item_id(&self) -> ItemId {
        self.item().id()
    }

    /// Show or hide the node.
    fn set_visible(&self, visible: bool) -> ItemResult<()> {
        self.item().set_visible(visible)
    }

    /// Show the node.
    fn show(&self) -> ItemResult<()> {
        self.item().show()
    }

    /// Hide the node.
    fn hide(&self) -> ItemResult<()> {
        self.item().hide()
    }

    /// Check the node's display state.
    fn is_visible(&self) -> ItemResult<bool> {
        self.item().is_visible()
    }

    /// Add one or more whitespace-separated tags.
    fn add_class(&self, class_names: &str) -> ItemResult<()> {
        self.item().add_class(class_names)
    }

    /// Remove one or more whitespace-separated tags.
    fn remove_class(&self, class_names: &str) -> ItemResult<()> {
        self.item().remove_class(class_names)
    }

    /// Check whether the node carries a tag.
    fn has_class(&self, class_name: &str) -> ItemResult<bool> {
        self.item().has_class(class_name)
    }
}

/// Something with component geometry.
pub trait Geometry: VisualNode {
    /// The component carrying the geometry.
    fn component(&self) -> &Component;

    /// The explicit minimum size.
    fn minimum_size(&self) -> Size {
        self.component().minimum_size()
    }

    /// Set the explicit minimum size.
    fn set_minimum_size(&self, size: Size) {
        self.component().set_minimum_size(size);
    }

    /// The explicit maximum size.
    fn maximum_size(&self) -> Size {
        self.component().maximum_size()
    }

    /// Set the explicit maximum size.
    fn set_maximum_size(&self, size: Size) {
        self.component().set_maximum_size(size);
    }

    /// The current geometry.
    fn offset_rect(&self) -> Rect {
        self.component().offset_rect()
    }

    /// Set the current geometry.
    fn set_offset_rect(&self, rect: Rect) {
        self.component().set_offset_rect(rect);
    }

    /// The computed minimum size.
    fn minimum_size_hint(&self) -> Size {
        self.component().minimum_size_hint()
    }

    /// The computed maximum size.
    fn maximum_size_hint(&self) -> Size {
        self.component().maximum_size_hint()
    }

    /// The computed preferred size.
    fn size_hint(&self) -> Size {
        self.component().size_hint()
    }

    /// Emitted when the offset rect changes.
    fn geometry_changed(&self) -> &Signal<Rect> {
        self.component().geometry_changed()
    }
}

impl VisualNode for Item {
    fn item(&self) -> &Item {
        self
    }
}

impl VisualNode for Component {
    fn item(&self) -> &Item {
        Component::item(self)
    }
}

impl Geometry for Component {
    fn component(&self) -> &Component {
        self
    }
}
