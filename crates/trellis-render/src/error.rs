//! Error types for the render crate.

use thiserror::Error;

use crate::surface::NodeId;

/// Errors that can occur during surface operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The node ID is invalid or the node has been released.
    #[error("invalid or released node {0:?}")]
    InvalidNode(NodeId),

    /// The reference node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent node.
        parent: NodeId,
        /// The node expected to be one of its children.
        child: NodeId,
    },

    /// A node cannot be placed under itself or one of its descendants.
    #[error("cannot move node {0:?} under itself or one of its descendants")]
    CircularParentage(NodeId),

    /// The surface root cannot be removed or released.
    #[error("the surface root cannot be removed or released")]
    RootNode,
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;
