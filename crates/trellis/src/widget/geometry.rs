//! Computed size hints.
//!
//! A component's explicit minimum and maximum sizes are overrides set by its
//! owner. When they are unset, layout and resize logic fall back to sizes the
//! component computes itself, supplied through [`SizeHints`]. Every hint
//! defaults to [`Size::INVALID`], meaning "no opinion".

use trellis_render::Size;

/// Supplies the computed sizes of a component.
pub trait SizeHints: Send + Sync {
    /// The smallest size the component can usefully be.
    fn minimum_size_hint(&self) -> Size {
        Size::INVALID
    }

    /// The largest size the component should be.
    fn maximum_size_hint(&self) -> Size {
        Size::INVALID
    }

    /// The preferred size.
    fn size_hint(&self) -> Size {
        Size::INVALID
    }
}

/// A component with no computed sizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

impl SizeHints for NoHints {}

/// Fixed computed sizes.
///
/// ```
/// use trellis::widget::{SizeHint, SizeHints};
/// use trellis::render::Size;
///
/// let hint = SizeHint::from_dimensions(80.0, 30.0).with_minimum_dimensions(40.0, 24.0);
/// assert_eq!(hint.size_hint(), Size::new(80.0, 30.0));
/// assert_eq!(hint.minimum_size_hint(), Size::new(40.0, 24.0));
/// assert!(!hint.maximum_size_hint().is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeHint {
    /// The preferred size.
    pub preferred: Size,
    /// The minimum size, if any.
    pub minimum: Option<Size>,
    /// The maximum size, if any.
    pub maximum: Option<Size>,
}

impl Default for SizeHint {
    fn default() -> Self {
        Self::new(Size::INVALID)
    }
}

impl SizeHint {
    /// Create a size hint with the given preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
            maximum: None,
        }
    }

    /// Create a size hint from a preferred width and height.
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self::new(Size::new(width, height))
    }

    /// Create a fixed size hint (preferred = minimum = maximum).
    pub fn fixed(size: Size) -> Self {
        Self {
            preferred: size,
            minimum: Some(size),
            maximum: Some(size),
        }
    }

    /// Set the minimum size.
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the minimum size from dimensions.
    pub fn with_minimum_dimensions(self, width: f64, height: f64) -> Self {
        self.with_minimum(Size::new(width, height))
    }

    /// Set the maximum size.
    pub fn with_maximum(mut self, maximum: Size) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Set the maximum size from dimensions.
    pub fn with_maximum_dimensions(self, width: f64, height: f64) -> Self {
        self.with_maximum(Size::new(width, height))
    }
}

impl SizeHints for SizeHint {
    fn minimum_size_hint(&self) -> Size {
        self.minimum.unwrap_or(Size::INVALID)
    }

    fn maximum_size_hint(&self) -> Size {
        self.maximum.unwrap_or(Size::INVALID)
    }

    fn size_hint(&self) -> Size {
        self.preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hints_are_invalid() {
        assert!(!NoHints.size_hint().is_valid());
        assert!(!NoHints.minimum_size_hint().is_valid());
        assert!(!NoHints.maximum_size_hint().is_valid());
    }

    #[test]
    fn test_fixed_hint() {
        let hint = SizeHint::fixed(Size::new(16.0, 16.0));
        assert_eq!(hint.minimum_size_hint(), Size::new(16.0, 16.0));
        assert_eq!(hint.maximum_size_hint(), Size::new(16.0, 16.0));
        assert_eq!(hint.size_hint(), Size::new(16.0, 16.0));
    }
}
