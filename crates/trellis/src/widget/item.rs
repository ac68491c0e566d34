//! The item tree.
//!
//! An [`Item`] owns exactly one node on the document's surface and an ordered
//! list of child items. Children are held strongly; the parent is a weak
//! back-reference, so a subtree lives as long as its root is referenced.
//!
//! Every structural change is made on the item tree first and then mirrored
//! on the surface, keeping the two in the same shape:
//!
//! - [`append`](Item::append), [`prepend`](Item::prepend) and
//!   [`insert_before`](Item::insert_before) move items that already have a
//!   parent, so an item is never in two child lists.
//! - [`detach`](Item::detach) unlinks an item (and its node) but keeps it
//!   usable; it can be inserted again later.
//! - [`destroy`](Item::destroy) tears the subtree down, children first, and
//!   frees the nodes.
//!
//! Operating on a destroyed item is a usage error and returns
//! [`ItemError::Destroyed`].
//!
//! # Locking
//!
//! No item lock is held while calling into the surface or emitting a signal,
//! and at most one item lock is held at any time.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use trellis_core::logging::targets;
use trellis_core::{DebugTree, Signal};
use trellis_render::{NodeId, Surface};

use super::document::Document;
use crate::error::{ItemError, ItemResult};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Creates the surface node an item owns.
///
/// Widgets supply their own factory to build a different element (a button,
/// an element with fixed inner structure) without the tree logic knowing the
/// concrete widget kind. Any `Fn(&Surface) -> NodeId` is a factory.
pub trait ElementFactory {
    /// Create a fresh, unattached node.
    fn create_element(&self, surface: &Surface) -> NodeId;
}

impl<F> ElementFactory for F
where
    F: Fn(&Surface) -> NodeId,
{
    fn create_element(&self, surface: &Surface) -> NodeId {
        self(surface)
    }
}

struct ItemState {
    /// `None` once destroyed.
    node: Option<NodeId>,
    parent: Weak<ItemInner>,
    children: Vec<Item>,
}

struct ItemInner {
    id: ItemId,
    document: Document,
    state: Mutex<ItemState>,
    destroyed: Signal<ItemId>,
}

impl Drop for ItemInner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        let Some(node) = state.node.take() else {
            return;
        };
        let surface = self.document.surface();
        // Children still referenced elsewhere keep their nodes; only nodes
        // this item owns outright are freed with it.
        for child in &state.children {
            if let Some(child_node) = child.live_node() {
                let _ = surface.remove(child_node);
            }
        }
        if let Err(err) = surface.release(node) {
            tracing::warn!(target: targets::ITEM, item = %self.id, error = %err, "failed to release node");
        }
    }
}

/// Where inserted children go.
enum Placement<'a> {
    Front,
    Back,
    Before(&'a Item),
}

/// A node in the item tree.
///
/// `Item` is a clonable handle; clones refer to the same item.
#[derive(Clone)]
pub struct Item {
    inner: Arc<ItemInner>,
}

impl Item {
    /// Create an item owning a fresh `div` element.
    pub fn new(document: &Document) -> Self {
        Self::with_factory(document, &|surface: &Surface| surface.create_element("div"))
    }

    /// Create an item whose node is built by `factory`.
    pub fn with_factory(document: &Document, factory: &dyn ElementFactory) -> Self {
        let node = factory.create_element(document.surface());
        let id = ItemId::next();
        tracing::debug!(target: targets::ITEM, item = %id, ?node, "created item");
        Self {
            inner: Arc::new(ItemInner {
                id,
                document: document.clone(),
                state: Mutex::new(ItemState {
                    node: Some(node),
                    parent: Weak::new(),
                    children: Vec::new(),
                }),
                destroyed: Signal::new(),
            }),
        }
    }

    // =========================================================================
    // Identity and Accessors
    // =========================================================================

    /// The item's identity.
    pub fn id(&self) -> ItemId {
        self.inner.id
    }

    /// The document this item belongs to.
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// The surface node this item owns.
    pub fn node(&self) -> ItemResult<NodeId> {
        self.live_node()
            .ok_or_else(|| self.usage_error(ItemError::Destroyed(self.id())))
    }

    /// The owned node, or `None` once destroyed. Does not log.
    pub(crate) fn live_node(&self) -> Option<NodeId> {
        self.inner.state.lock().node
    }

    /// Check whether the item has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.live_node().is_none()
    }

    /// The parent item, if any.
    pub fn parent(&self) -> Option<Item> {
        self.inner
            .state
            .lock()
            .parent
            .upgrade()
            .map(|inner| Item { inner })
    }

    /// The child items, in order.
    pub fn children(&self) -> ItemResult<Vec<Item>> {
        let state = self.inner.state.lock();
        if state.node.is_none() {
            drop(state);
            return Err(self.usage_error(ItemError::Destroyed(self.id())));
        }
        Ok(state.children.clone())
    }

    /// Emitted once, with this item's ID, when the item is destroyed.
    pub fn destroyed(&self) -> &Signal<ItemId> {
        &self.inner.destroyed
    }

    /// Check whether two handles refer to the same item.
    pub fn ptr_eq(&self, other: &Item) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Check whether `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Item) -> bool {
        let mut current = other.parent();
        while let Some(item) = current {
            if item.ptr_eq(self) {
                return true;
            }
            current = item.parent();
        }
        false
    }

    // =========================================================================
    // Tree Operations
    // =========================================================================

    /// Append `children` at the end, in the given order.
    ///
    /// Children that already have a parent (including this item) are moved.
    pub fn append(&self, children: &[&Item]) -> ItemResult<()> {
        self.insert_children(Placement::Back, children)
    }

    /// Insert `children` at the front, preserving their relative order.
    pub fn prepend(&self, children: &[&Item]) -> ItemResult<()> {
        self.insert_children(Placement::Front, children)
    }

    /// Insert `children` immediately before `before`, which must currently be
    /// a child of this item.
    pub fn insert_before(&self, before: &Item, children: &[&Item]) -> ItemResult<()> {
        self.insert_children(Placement::Before(before), children)
    }

    /// Attach this item as a top-level node under the surface root.
    pub fn mount(&self) -> ItemResult<()> {
        let node = self.node()?;
        self.unlink_from_parent();
        let surface = self.document().surface();
        surface.append_child(surface.root(), node)?;
        tracing::debug!(target: targets::ITEM, item = %self.id(), "mounted item");
        Ok(())
    }

    /// Remove this item from its parent and its node from the surface tree.
    ///
    /// The item keeps its children and attributes and can be inserted again.
    pub fn detach(&self) -> ItemResult<()> {
        let node = self.node()?;
        self.unlink_from_parent();
        self.document().surface().remove(node)?;
        tracing::debug!(target: targets::ITEM, item = %self.id(), "detached item");
        Ok(())
    }

    /// Destroy this item and its whole subtree.
    ///
    /// Children are destroyed first, then the item is detached and its node
    /// released. `destroyed` is emitted once for every item in the subtree.
    #[tracing::instrument(skip_all, target = "trellis::item", level = "debug", fields(item = %self.id()))]
    pub fn destroy(&self) -> ItemResult<()> {
        let node = self.node()?;

        // Keep going past a failing child so every descendant is torn down;
        // the first failure is reported.
        let mut result = Ok(());
        let children = self.inner.state.lock().children.clone();
        for child in children {
            if let Err(err) = child.destroy() {
                result = result.and(Err(err));
            }
        }

        self.unlink_from_parent();
        self.inner.state.lock().node = None;
        if let Err(err) = self.document().surface().release(node) {
            tracing::warn!(target: targets::ITEM, item = %self.id(), error = %err, "failed to release node");
            result = result.and(Err(err.into()));
        }
        tracing::debug!(target: targets::ITEM, item = %self.id(), "destroyed item");

        self.inner.destroyed.emit(self.id());
        self.inner.destroyed.disconnect_all();
        result
    }

    // =========================================================================
    // Display State and Tags
    // =========================================================================

    /// Show or hide the item's node.
    pub fn set_visible(&self, visible: bool) -> ItemResult<()> {
        let node = self.node()?;
        self.document().surface().set_visible(node, visible)?;
        Ok(())
    }

    /// Show the item's node.
    pub fn show(&self) -> ItemResult<()> {
        self.set_visible(true)
    }

    /// Hide the item's node.
    pub fn hide(&self) -> ItemResult<()> {
        self.set_visible(false)
    }

    /// Check the display state of the item's node.
    pub fn is_visible(&self) -> ItemResult<bool> {
        let node = self.node()?;
        Ok(self.document().surface().is_visible(node)?)
    }

    /// Add one or more whitespace-separated tags.
    pub fn add_class(&self, class_names: &str) -> ItemResult<()> {
        let node = self.node()?;
        self.document().surface().add_class(node, class_names)?;
        Ok(())
    }

    /// Remove one or more whitespace-separated tags.
    pub fn remove_class(&self, class_names: &str) -> ItemResult<()> {
        let node = self.node()?;
        self.document().surface().remove_class(node, class_names)?;
        Ok(())
    }

    /// Check whether the node carries a tag.
    pub fn has_class(&self, class_name: &str) -> ItemResult<bool> {
        let node = self.node()?;
        Ok(self.document().surface().has_class(node, class_name)?)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn usage_error(&self, err: ItemError) -> ItemError {
        tracing::warn!(target: targets::ITEM, item = %self.id(), error = %err, "item usage error");
        err
    }

    /// Remove this item from its parent's child list. Leaves the surface alone.
    fn unlink_from_parent(&self) {
        let parent = {
            let mut state = self.inner.state.lock();
            std::mem::take(&mut state.parent).upgrade()
        };
        if let Some(parent) = parent {
            parent
                .state
                .lock()
                .children
                .retain(|child| !child.ptr_eq(self));
        }
    }

    fn has_child(&self, item: &Item) -> bool {
        self.inner
            .state
            .lock()
            .children
            .iter()
            .any(|child| child.ptr_eq(item))
    }

    fn validate_insert(&self, placement: &Placement<'_>, children: &[&Item]) -> ItemResult<()> {
        self.node()?;
        for (index, child) in children.iter().enumerate() {
            child.node()?;
            if children[..index].iter().any(|other| other.ptr_eq(child)) {
                return Err(ItemError::DuplicateChild(child.id()));
            }
            if child.ptr_eq(self) || child.is_ancestor_of(self) {
                return Err(ItemError::CircularParentage(child.id()));
            }
        }
        if let Placement::Before(before) = placement {
            if children.iter().any(|child| child.ptr_eq(before)) {
                return Err(ItemError::DuplicateChild(before.id()));
            }
            if !self.has_child(before) {
                return Err(ItemError::NotAChild(before.id()));
            }
        }
        Ok(())
    }

    fn insert_children(&self, placement: Placement<'_>, children: &[&Item]) -> ItemResult<()> {
        if let Err(err) = self.validate_insert(&placement, children) {
            return Err(self.usage_error(err));
        }
        let parent_node = self.node()?;

        for child in children {
            child.unlink_from_parent();
        }

        // The item that ends up right after the inserted block, if any.
        let next_sibling = {
            let mut state = self.inner.state.lock();
            let index = match placement {
                Placement::Front => 0,
                Placement::Back => state.children.len(),
                Placement::Before(before) => state
                    .children
                    .iter()
                    .position(|child| child.ptr_eq(before))
                    .unwrap_or(state.children.len()),
            };
            for (offset, child) in children.iter().enumerate() {
                state.children.insert(index + offset, (*child).clone());
            }
            state.children.get(index + children.len()).cloned()
        };

        let surface = self.document().surface();
        let reference = next_sibling.and_then(|sibling| sibling.live_node());
        for child in children {
            child.inner.state.lock().parent = Arc::downgrade(&self.inner);
            let child_node = child.node()?;
            match reference {
                Some(reference) => surface.insert_before(parent_node, child_node, reference)?,
                None => surface.append_child(parent_node, child_node)?,
            }
        }

        tracing::debug!(target: targets::ITEM, item = %self.id(), count = children.len(), "inserted children");
        Ok(())
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Item {}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id())
            .field("node", &self.live_node())
            .finish()
    }
}

impl DebugTree for Item {
    fn debug_label(&self) -> String {
        let Some(node) = self.live_node() else {
            return format!("{} (destroyed)", self.id());
        };
        let surface = self.document().surface();
        let tag = surface.tag(node).unwrap_or_default();
        let classes = surface.class_name(node).unwrap_or_default();
        if classes.is_empty() {
            format!("{tag} {}", self.id())
        } else {
            format!("{tag} {} [{classes}]", self.id())
        }
    }

    fn debug_children(&self) -> Vec<Self> {
        self.inner.state.lock().children.clone()
    }
}
