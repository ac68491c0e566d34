//! Pointer event types.
//!
//! The toolkit consumes three named pointer-event streams: button down,
//! button up and pointer move. Each event carries the button involved, the
//! pointer position in page (surface) coordinates and the node the platform
//! delivered it to. Handlers may suppress the platform's default action.

use std::fmt;

use trellis_render::{NodeId, Point};

/// The named pointer-event streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A pointer button was pressed.
    MouseDown,
    /// A pointer button was released.
    MouseUp,
    /// The pointer moved.
    MouseMove,
}

impl EventType {
    /// The platform name of the stream.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left = 0,
    /// Middle button (scroll wheel click).
    Middle = 1,
    /// Secondary button (usually right).
    Right = 2,
    /// Additional button (e.g., browser back).
    Back = 3,
    /// Additional button (e.g., browser forward).
    Forward = 4,
}

impl MouseButton {
    /// Check if this is the primary button.
    #[inline]
    pub fn is_primary(self) -> bool {
        self == Self::Left
    }
}

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// A specific node on the surface.
    Node(NodeId),
    /// The whole document. Receives every event after it has passed the
    /// target node and its ancestors.
    Document,
}

/// A pointer event delivered to bound handlers.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    /// The stream this event belongs to.
    pub event_type: EventType,
    /// The button that changed state (or the primary button for moves).
    pub button: MouseButton,
    /// Pointer position in page coordinates.
    pub page: Point,
    /// The node the event was delivered to, if any.
    pub target: Option<NodeId>,
    default_prevented: bool,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(
        event_type: EventType,
        button: MouseButton,
        page: Point,
        target: Option<NodeId>,
    ) -> Self {
        Self {
            event_type,
            button,
            page,
            target,
            default_prevented: false,
        }
    }

    /// A button press at `(x, y)` on `target`.
    pub fn mouse_down(target: Option<NodeId>, button: MouseButton, x: f64, y: f64) -> Self {
        Self::new(EventType::MouseDown, button, Point::new(x, y), target)
    }

    /// A button release at `(x, y)` on `target`.
    pub fn mouse_up(target: Option<NodeId>, button: MouseButton, x: f64, y: f64) -> Self {
        Self::new(EventType::MouseUp, button, Point::new(x, y), target)
    }

    /// A pointer move to `(x, y)` over `target`.
    pub fn mouse_move(target: Option<NodeId>, x: f64, y: f64) -> Self {
        Self::new(EventType::MouseMove, MouseButton::Left, Point::new(x, y), target)
    }

    /// Suppress the platform's default handling of this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check whether a handler suppressed the default handling.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::MouseDown.as_str(), "mousedown");
        assert_eq!(EventType::MouseUp.to_string(), "mouseup");
        assert_eq!(EventType::MouseMove.as_str(), "mousemove");
    }

    #[test]
    fn test_prevent_default() {
        let mut event = PointerEvent::mouse_down(None, MouseButton::Right, 1.0, 2.0);
        assert!(!event.button.is_primary());
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
        assert_eq!(event.page, Point::new(1.0, 2.0));
    }
}
