//! Standard widgets for Trellis.
//!
//! - [`SizeGrip`]: Drag handle that resizes another component
//! - [`AbstractButton`]: Press/release/click behaviour for buttons
//! - [`PushButton`]: Standard clickable button

mod abstract_button;
mod push_button;
mod size_grip;

pub use abstract_button::AbstractButton;
pub use push_button::PushButton;
pub use size_grip::{drag_offset_for, resize_rect, GripArea, SizeGrip};
