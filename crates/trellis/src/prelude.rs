//! Prelude module for Trellis.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use trellis_core::{ConnectionId, Signal, Slot};

// ============================================================================
// Geometry Types
// ============================================================================

pub use trellis_render::{Point, Rect, Size};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    Component, Document, EventBinder, EventTarget, EventType, Geometry, Item, ItemId,
    MouseButton, PointerEvent, SizeHint, SizeHints, Viewport, VisualNode,
};

// ============================================================================
// Size Negotiation
// ============================================================================

pub use crate::widget::layout::{ComponentItem, LayoutItem};

// ============================================================================
// Common Widgets
// ============================================================================

pub use crate::widget::widgets::{AbstractButton, GripArea, PushButton, SizeGrip};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::ToolkitConfig;
pub use crate::error::{Error, ItemError, Result};
