//! Size negotiation.
//!
//! Layout logic and interactive controllers never read a component's raw
//! geometry attributes directly. They go through a [`LayoutItem`], which
//! resolves the effective minimum, maximum and preferred sizes:
//!
//! 1. an explicit override set on the component, if valid,
//! 2. otherwise the component's computed hint, if valid,
//! 3. otherwise the universal bound [`MIN_ITEM_SIZE`] / [`MAX_ITEM_SIZE`].
//!
//! Resolved sizes are always clamped into `[MIN_ITEM_SIZE, MAX_ITEM_SIZE]`.
//!
//! # Related Types
//!
//! - [`super::Component`] - The geometry a [`ComponentItem`] wraps
//! - [`super::SizeHints`] - Where computed hints come from
//! - [`super::widgets::SizeGrip`] - Resizes its target through a [`ComponentItem`]

mod item;

pub use item::{ComponentItem, LayoutItem, MAX_ITEM_DIM, MAX_ITEM_SIZE, MIN_ITEM_SIZE};
