//! Layout items and the component adapter.

use trellis_render::{Rect, Size};

use crate::widget::component::Component;

/// The largest dimension any item may have, `(2^30) - 1`.
pub const MAX_ITEM_DIM: f64 = 1_073_741_823.0;

/// The smallest size any item may have.
pub const MIN_ITEM_SIZE: Size = Size::ZERO;

/// The largest size any item may have.
pub const MAX_ITEM_SIZE: Size = Size::new(MAX_ITEM_DIM, MAX_ITEM_DIM);

/// An item taking part in size negotiation.
pub trait LayoutItem {
    /// The effective minimum size.
    fn minimum_size(&self) -> Size;

    /// The effective maximum size.
    fn maximum_size(&self) -> Size;

    /// The effective preferred size, never smaller than
    /// [`minimum_size`](Self::minimum_size).
    fn size_hint(&self) -> Size;

    /// The item's current geometry.
    fn offset_rect(&self) -> Rect;

    /// Move or resize the item.
    fn set_offset_rect(&self, rect: Rect);
}

#[inline]
fn clamp_to_item_bounds(size: Size) -> Size {
    size.expanded_to(MIN_ITEM_SIZE).bounded_to(MAX_ITEM_SIZE)
}

/// Exposes a [`Component`] as a [`LayoutItem`].
///
/// An explicit minimum of `(0, 0)` counts as unset, so a component can clear
/// its override without switching to [`Size::INVALID`]. An explicit maximum
/// is honoured whenever it is valid.
#[derive(Debug, Clone)]
pub struct ComponentItem {
    component: Component,
}

impl ComponentItem {
    /// Wrap a component.
    pub fn new(component: &Component) -> Self {
        Self {
            component: component.clone(),
        }
    }

    /// The wrapped component.
    pub fn component(&self) -> &Component {
        &self.component
    }
}

impl LayoutItem for ComponentItem {
    fn minimum_size(&self) -> Size {
        let explicit = self.component.minimum_size();
        if explicit.is_valid() && !explicit.is_null() {
            return clamp_to_item_bounds(explicit);
        }
        let hint = self.component.minimum_size_hint();
        if hint.is_valid() {
            return clamp_to_item_bounds(hint);
        }
        MIN_ITEM_SIZE
    }

    fn maximum_size(&self) -> Size {
        let explicit = self.component.maximum_size();
        if explicit.is_valid() {
            return clamp_to_item_bounds(explicit);
        }
        let hint = self.component.maximum_size_hint();
        if hint.is_valid() {
            return clamp_to_item_bounds(hint);
        }
        MAX_ITEM_SIZE
    }

    fn size_hint(&self) -> Size {
        self.component
            .size_hint()
            .bounded_to(self.maximum_size())
            .expanded_to(self.minimum_size())
    }

    fn offset_rect(&self) -> Rect {
        self.component.offset_rect()
    }

    fn set_offset_rect(&self, rect: Rect) {
        self.component.set_offset_rect(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Document, SizeHint};

    fn component(hint: SizeHint) -> Component {
        Component::with_hints(&Document::new(), hint)
    }

    #[test]
    fn test_explicit_minimum_wins_over_hint() {
        let c = component(SizeHint::from_dimensions(10.0, 10.0).with_minimum_dimensions(5.0, 5.0));
        c.set_minimum_size(Size::new(50.0, 50.0));
        assert_eq!(ComponentItem::new(&c).minimum_size(), Size::new(50.0, 50.0));
    }

    #[test]
    fn test_minimum_falls_back_to_hint() {
        let c = component(SizeHint::from_dimensions(10.0, 10.0).with_minimum_dimensions(5.0, 7.0));
        let item = ComponentItem::new(&c);
        assert_eq!(item.minimum_size(), Size::new(5.0, 7.0));

        // A zero override counts as unset.
        c.set_minimum_size(Size::ZERO);
        assert_eq!(item.minimum_size(), Size::new(5.0, 7.0));
    }

    #[test]
    fn test_unset_sizes_use_universal_bounds() {
        let c = Component::new(&Document::new());
        let item = ComponentItem::new(&c);
        assert_eq!(item.minimum_size(), MIN_ITEM_SIZE);
        assert_eq!(item.maximum_size(), MAX_ITEM_SIZE);
        assert_eq!(item.size_hint(), MIN_ITEM_SIZE);
    }

    #[test]
    fn test_maximum_precedence_and_clamping() {
        let c = component(SizeHint::default().with_maximum_dimensions(2.0 * MAX_ITEM_DIM, 300.0));
        let item = ComponentItem::new(&c);
        assert_eq!(item.maximum_size(), Size::new(MAX_ITEM_DIM, 300.0));

        c.set_maximum_size(Size::ZERO);
        assert_eq!(item.maximum_size(), Size::ZERO);
    }

    #[test]
    fn test_size_hint_bounded_then_expanded() {
        let c = component(SizeHint::from_dimensions(500.0, 10.0));
        c.set_minimum_size(Size::new(20.0, 40.0));
        c.set_maximum_size(Size::new(300.0, 30.0));
        let item = ComponentItem::new(&c);

        // Width bounded by the maximum, height pulled up past it to the minimum.
        assert_eq!(item.size_hint(), Size::new(300.0, 40.0));
    }

    #[test]
    fn test_offset_rect_passthrough() {
        let c = Component::new(&Document::new());
        let item = ComponentItem::new(&c);
        let rect = Rect::new(5.0, 5.0, 50.0, 60.0);
        item.set_offset_rect(rect);
        assert_eq!(c.offset_rect(), rect);
        assert_eq!(item.offset_rect(), rect);
    }
}
