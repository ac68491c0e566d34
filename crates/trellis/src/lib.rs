//! Trellis - a retained widget toolkit with interactive resizing.
//!
//! This is the main umbrella crate that re-exports all public APIs.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! fn main() -> trellis::Result<()> {
//!     let doc = Document::new();
//!     let window = Component::new(&doc);
//!     window.item().mount()?;
//!     window.set_minimum_size(Size::new(200.0, 150.0));
//!     window.set_offset_rect(Rect::new(0.0, 0.0, 400.0, 300.0));
//!
//!     let grip = SizeGrip::new(&doc, GripArea::BottomRight, &window)?;
//!     window.item().append(&[grip.item()])?;
//!
//!     let grip_node = grip.item().node()?;
//!     doc.dispatch(PointerEvent::mouse_down(Some(grip_node), MouseButton::Left, 400.0, 300.0));
//!     doc.dispatch(PointerEvent::mouse_move(None, 100.0, 100.0));
//!     doc.dispatch(PointerEvent::mouse_up(None, MouseButton::Left, 100.0, 100.0));
//!
//!     assert_eq!(window.offset_rect(), Rect::new(0.0, 0.0, 200.0, 150.0));
//!     Ok(())
//! }
//! ```

pub use trellis_core::*;

/// Rendering surface and geometry types.
pub mod render {
    pub use trellis_render::*;
}

pub mod config;
mod error;
pub mod prelude;
pub mod widget;

pub use error::{ConfigError, ConfigResult, Error, ItemError, ItemResult, Result};
