//! Retained element tree.
//!
//! The surface keeps every visual node in a single arena keyed by
//! [`NodeId`]. Nodes form a tree under a permanent root node that stands for
//! the whole surface. Parent-child links are stored on both sides and kept in
//! sync by every mutating operation.
//!
//! [`Surface`] is a cheap, clonable handle; all clones see the same tree.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};
use trellis_core::logging::targets;

use crate::error::{SurfaceError, SurfaceResult};
use crate::types::Rect;

new_key_type! {
    /// A unique identifier for a node on a [`Surface`].
    ///
    /// IDs become invalid once the node is released.
    pub struct NodeId;
}

/// Data stored for each node.
#[derive(Debug)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    visible: bool,
    text: String,
    attributes: HashMap<String, String>,
    geometry: Option<Rect>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            visible: true,
            text: String::new(),
            attributes: HashMap::new(),
            geometry: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

struct SurfaceTree {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
}

impl SurfaceTree {
    fn node(&self, id: NodeId) -> SurfaceResult<&NodeData> {
        self.nodes.get(id).ok_or(SurfaceError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> SurfaceResult<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(SurfaceError::InvalidNode(id))
    }

    /// Unlink a node from its parent, if any.
    fn unlink(&mut self, id: NodeId) -> SurfaceResult<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent_id) = parent {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, potential_ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Validate and unlink `child` ahead of inserting it under `parent`.
    fn prepare_insert(&mut self, parent: NodeId, child: NodeId) -> SurfaceResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.root {
            return Err(SurfaceError::RootNode);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SurfaceError::CircularParentage(child));
        }
        self.unlink(child)
    }

    /// Collect all descendant IDs, children before parents.
    fn collect_descendants(&self, id: NodeId, result: &mut Vec<NodeId>) {
        if let Some(data) = self.nodes.get(id) {
            for &child in &data.children {
                self.collect_descendants(child, result);
                result.push(child);
            }
        }
    }
}

/// A shared handle to a retained element tree.
#[derive(Clone)]
pub struct Surface {
    tree: Arc<RwLock<SurfaceTree>>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Create an empty surface containing only its root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new("body"));
        Self {
            tree: Arc::new(RwLock::new(SurfaceTree { nodes, root })),
        }
    }

    /// The root node representing the whole surface.
    pub fn root(&self) -> NodeId {
        self.tree.read().root
    }

    /// Create a new, unattached element node with the given tag.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let id = self.tree.write().nodes.insert(NodeData::new(tag));
        tracing::trace!(target: targets::SURFACE, ?id, tag, "created element");
        id
    }

    /// Check if a node exists on this surface.
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.read().nodes.contains_key(id)
    }

    /// Get the total number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.tree.read().nodes.len()
    }

    /// Get the tag a node was created with.
    pub fn tag(&self, id: NodeId) -> SurfaceResult<String> {
        Ok(self.tree.read().node(id)?.tag.clone())
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is first removed from its current parent, if any.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> SurfaceResult<()> {
        let mut tree = self.tree.write();
        tree.prepare_insert(parent, child)?;
        tree.node_mut(parent)?.children.push(child);
        tree.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `child` immediately before `reference`, which must be a child
    /// of `parent`.
    pub fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> SurfaceResult<()> {
        let mut tree = self.tree.write();
        if child == reference {
            return Ok(());
        }
        if tree.node(reference)?.parent != Some(parent) {
            return Err(SurfaceError::NotAChild {
                parent,
                child: reference,
            });
        }
        tree.prepare_insert(parent, child)?;
        let parent_data = tree.node_mut(parent)?;
        let index = parent_data
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(parent_data.children.len());
        parent_data.children.insert(index, child);
        tree.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove a node from its parent without releasing it.
    ///
    /// Removing an unattached node is a no-op.
    pub fn remove(&self, id: NodeId) -> SurfaceResult<()> {
        let mut tree = self.tree.write();
        if id == tree.root {
            return Err(SurfaceError::RootNode);
        }
        tree.unlink(id)
    }

    /// Remove a node from the tree and free it, together with any
    /// descendants still attached to it.
    pub fn release(&self, id: NodeId) -> SurfaceResult<()> {
        let mut tree = self.tree.write();
        if id == tree.root {
            return Err(SurfaceError::RootNode);
        }
        tree.unlink(id)?;
        let mut descendants = Vec::new();
        tree.collect_descendants(id, &mut descendants);
        for descendant in &descendants {
            tree.nodes.remove(*descendant);
        }
        tree.nodes.remove(id);
        tracing::trace!(target: targets::SURFACE, ?id, descendant_count = descendants.len(), "released node");
        Ok(())
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> SurfaceResult<Option<NodeId>> {
        Ok(self.tree.read().node(id)?.parent)
    }

    /// Get the children of a node, in order.
    pub fn children(&self, id: NodeId) -> SurfaceResult<Vec<NodeId>> {
        Ok(self.tree.read().node(id)?.children.clone())
    }

    /// Get all ancestors of a node from immediate parent to root.
    pub fn ancestors(&self, id: NodeId) -> SurfaceResult<Vec<NodeId>> {
        let tree = self.tree.read();
        let mut result = Vec::new();
        let mut current = tree.node(id)?.parent;
        while let Some(current_id) = current {
            result.push(current_id);
            current = tree.nodes.get(current_id).and_then(|d| d.parent);
        }
        Ok(result)
    }

    /// Check if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let tree = self.tree.read();
        let parent = tree.nodes.get(id).and_then(|d| d.parent);
        parent.is_some_and(|p| tree.is_ancestor_or_self(ancestor, p))
    }

    /// Check if a node is connected to the surface root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let tree = self.tree.read();
        tree.nodes.contains_key(id) && tree.is_ancestor_or_self(tree.root, id)
    }

    // =========================================================================
    // Display State and Tags
    // =========================================================================

    /// Set the display state of a node.
    pub fn set_visible(&self, id: NodeId, visible: bool) -> SurfaceResult<()> {
        self.tree.write().node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Get the display state of a node.
    pub fn is_visible(&self, id: NodeId) -> SurfaceResult<bool> {
        Ok(self.tree.read().node(id)?.visible)
    }

    /// Add one or more whitespace-separated class names to a node.
    ///
    /// Names already present are left in place.
    pub fn add_class(&self, id: NodeId, class_names: &str) -> SurfaceResult<()> {
        let mut tree = self.tree.write();
        let data = tree.node_mut(id)?;
        for name in class_names.split_whitespace() {
            if !data.classes.iter().any(|c| c == name) {
                data.classes.push(name.to_string());
            }
        }
        Ok(())
    }

    /// Remove one or more whitespace-separated class names from a node.
    pub fn remove_class(&self, id: NodeId, class_names: &str) -> SurfaceResult<()> {
        let mut tree = self.tree.write();
        let data = tree.node_mut(id)?;
        let names: Vec<&str> = class_names.split_whitespace().collect();
        data.classes.retain(|c| !names.contains(&c.as_str()));
        Ok(())
    }

    /// Check if a node carries the given class name.
    pub fn has_class(&self, id: NodeId, class_name: &str) -> SurfaceResult<bool> {
        Ok(self.tree.read().node(id)?.classes.iter().any(|c| c == class_name))
    }

    /// The node's class names joined with single spaces.
    pub fn class_name(&self, id: NodeId) -> SurfaceResult<String> {
        Ok(self.tree.read().node(id)?.classes.join(" "))
    }

    // =========================================================================
    // Content and Geometry
    // =========================================================================

    /// Set the text content of a node.
    pub fn set_text(&self, id: NodeId, text: &str) -> SurfaceResult<()> {
        self.tree.write().node_mut(id)?.text = text.to_string();
        Ok(())
    }

    /// Get the text content of a node.
    pub fn text(&self, id: NodeId) -> SurfaceResult<String> {
        Ok(self.tree.read().node(id)?.text.clone())
    }

    /// Set an attribute on a node.
    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) -> SurfaceResult<()> {
        self.tree
            .write()
            .node_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Get an attribute of a node.
    pub fn attribute(&self, id: NodeId, name: &str) -> SurfaceResult<Option<String>> {
        Ok(self.tree.read().node(id)?.attributes.get(name).cloned())
    }

    /// Remove an attribute from a node, returning its old value.
    pub fn remove_attribute(&self, id: NodeId, name: &str) -> SurfaceResult<Option<String>> {
        Ok(self.tree.write().node_mut(id)?.attributes.remove(name))
    }

    /// Position a node on the surface.
    pub fn set_geometry(&self, id: NodeId, rect: Rect) -> SurfaceResult<()> {
        self.tree.write().node_mut(id)?.geometry = Some(rect);
        Ok(())
    }

    /// Get the geometry last assigned to a node.
    pub fn geometry(&self, id: NodeId) -> SurfaceResult<Option<Rect>> {
        Ok(self.tree.read().node(id)?.geometry)
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.read();
        f.debug_struct("Surface")
            .field("root", &tree.root)
            .field("node_count", &tree.nodes.len())
            .finish()
    }
}
