//! Rendering surface for Trellis.
//!
//! This crate provides the retained visual tree that widgets draw into,
//! together with the basic geometry types shared by the rest of the toolkit.
//!
//! The [`Surface`] is an arena of element nodes. Each node carries a tag, a
//! whitespace-separated class (tag) set, a display flag, optional text and
//! attributes, and the geometry last assigned to it. Widgets own their nodes
//! exclusively and are responsible for creating, attaching, detaching and
//! releasing them.
//!
//! # Example
//!
//! ```
//! use trellis_render::{Rect, Surface};
//!
//! let surface = Surface::new();
//! let panel = surface.create_element("div");
//! surface.append_child(surface.root(), panel)?;
//! surface.add_class(panel, "panel raised")?;
//! surface.set_geometry(panel, Rect::new(0.0, 0.0, 100.0, 50.0))?;
//!
//! assert!(surface.is_attached(panel));
//! assert!(surface.has_class(panel, "raised")?);
//! # Ok::<(), trellis_render::SurfaceError>(())
//! ```

mod error;
pub mod surface;
mod types;

pub use error::{SurfaceError, SurfaceResult};
pub use surface::{NodeId, Surface};
pub use types::{Point, Rect, Size};
