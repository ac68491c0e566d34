//! Interactive resize handle.
//!
//! A [`SizeGrip`] is a small component placed on an edge or corner of another
//! component (its *target*). Dragging the grip with the primary button moves
//! the matching edge(s) of the target's offset rect, clamped so the target
//! stays within its negotiated minimum and maximum size.
//!
//! # States
//!
//! - **Idle**: only a mousedown listener on the grip's own node is bound.
//! - **Dragging**: entered on a primary mousedown on the grip. Mouseup and
//!   mousemove listeners are bound on the document so the drag keeps
//!   tracking when the pointer leaves the grip. A primary mouseup anywhere
//!   returns to Idle and unbinds them again.
//!
//! Non-primary buttons never change state.
//!
//! # Resize Arithmetic
//!
//! On mousedown the grip records the signed distance from the pointer to the
//! edge(s) its [`GripArea`] moves ([`drag_offset_for`]). On every mousemove
//! the pointer is clamped to the [`Viewport`](crate::widget::Viewport), the
//! offset is subtracted, and the resulting candidate edge is clamped against
//! the target's current minimum and maximum size ([`resize_rect`]). Bounds are
//! re-read on every move since they may change during a drag.
//!
//! ```
//! use trellis::prelude::*;
//!
//! let doc = Document::new();
//! let panel = Component::new(&doc);
//! panel.set_offset_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let grip = SizeGrip::new(&doc, GripArea::BottomRight, &panel).unwrap();
//! let grip_node = grip.item().node().unwrap();
//!
//! doc.dispatch(PointerEvent::mouse_down(Some(grip_node), MouseButton::Left, 100.0, 100.0));
//! doc.dispatch(PointerEvent::mouse_move(None, 250.0, 180.0));
//! doc.dispatch(PointerEvent::mouse_up(None, MouseButton::Left, 250.0, 180.0));
//!
//! assert_eq!(panel.offset_rect(), Rect::new(0.0, 0.0, 250.0, 180.0));
//! assert!(!grip.is_dragging());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::logging::targets;
use trellis_core::{ConnectionId, PerfSpan, Signal};
use trellis_render::{Point, Rect, Size};

use crate::error::ItemResult;
use crate::widget::binder::EventBinder;
use crate::widget::component::Component;
use crate::widget::document::Document;
use crate::widget::events::{EventTarget, EventType, PointerEvent};
use crate::widget::item::Item;
use crate::widget::layout::{ComponentItem, LayoutItem};
use crate::widget::traits::{Geometry, VisualNode};

/// The edge or corner a size grip moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GripArea {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl GripArea {
    /// Every grip area.
    pub const ALL: [GripArea; 8] = [
        GripArea::TopLeft,
        GripArea::Top,
        GripArea::TopRight,
        GripArea::Left,
        GripArea::Right,
        GripArea::BottomLeft,
        GripArea::Bottom,
        GripArea::BottomRight,
    ];

    /// Moves the left edge.
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    /// Moves the right edge.
    pub fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    /// Moves the top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    /// Moves the bottom edge.
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// The area's name, as used in tag names.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "TopLeft",
            Self::Top => "Top",
            Self::TopRight => "TopRight",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::BottomLeft => "BottomLeft",
            Self::Bottom => "Bottom",
            Self::BottomRight => "BottomRight",
        }
    }
}

impl std::fmt::Display for GripArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed distance from `pointer` to the edges `area` moves.
///
/// Axes the area does not move are zero.
pub fn drag_offset_for(area: GripArea, rect: Rect, pointer: Point) -> Point {
    let x = if area.is_left() {
        pointer.x - rect.left
    } else if area.is_right() {
        pointer.x - rect.right
    } else {
        0.0
    };
    let y = if area.is_top() {
        pointer.y - rect.top
    } else if area.is_bottom() {
        pointer.y - rect.bottom
    } else {
        0.0
    };
    Point::new(x, y)
}

/// Move the edges `area` controls to `candidate`, keeping the rect's size
/// within `[minimum, maximum]`.
///
/// The opposite edge stays fixed; axes the area does not move are untouched.
pub fn resize_rect(area: GripArea, rect: Rect, candidate: Point, minimum: Size, maximum: Size) -> Rect {
    let mut result = rect;

    if area.is_left() {
        let min_x = rect.right - maximum.width;
        let max_x = rect.right - minimum.width;
        result.left = candidate.x.max(min_x).min(max_x);
    } else if area.is_right() {
        let min_x = rect.left + minimum.width;
        let max_x = rect.left + maximum.width;
        result.right = candidate.x.max(min_x).min(max_x);
    }

    if area.is_top() {
        let min_y = rect.bottom - maximum.height;
        let max_y = rect.bottom - minimum.height;
        result.top = candidate.y.max(min_y).min(max_y);
    } else if area.is_bottom() {
        let min_y = rect.top + minimum.height;
        let max_y = rect.top + maximum.height;
        result.bottom = candidate.y.max(min_y).min(max_y);
    }

    result
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { offset: Point },
}

struct SizeGripInner {
    grip_area: GripArea,
    document: Document,
    /// `None` once released.
    target: Mutex<Option<ComponentItem>>,
    target_connection: Mutex<Option<ConnectionId>>,
    drag: Mutex<DragState>,
    mousedown: EventBinder,
    mouseup: EventBinder,
    mousemove: EventBinder,
    resize_started: Signal<Rect>,
    resized: Signal<Rect>,
    resize_finished: Signal<Rect>,
}

impl SizeGripInner {
    fn target(&self) -> Option<ComponentItem> {
        self.target.lock().clone()
    }

    /// Leave the Dragging state. Returns `false` if not dragging.
    fn end_drag(self: &Arc<Self>) -> bool {
        let was_dragging = {
            let mut drag = self.drag.lock();
            std::mem::replace(&mut *drag, DragState::Idle) != DragState::Idle
        };
        self.mouseup.unbind(on_mouse_up, self);
        self.mousemove.unbind(on_mouse_move, self);
        was_dragging
    }

    /// Drop the reference to the target and stop listening to it.
    fn release_target(self: &Arc<Self>) {
        if self.end_drag() {
            tracing::debug!(target: targets::GRIP, area = %self.grip_area, "drag abandoned");
        }
        let target = self.target.lock().take();
        let connection = self.target_connection.lock().take();
        if let (Some(target), Some(connection)) = (target, connection) {
            target.component().item().destroyed().disconnect(connection);
            tracing::debug!(target: targets::GRIP, area = %self.grip_area, "released resize target");
        }
    }

    /// Unbind everything and release the target.
    fn release(self: &Arc<Self>) {
        self.mousedown.unbind_all();
        self.release_target();
    }
}

fn on_mouse_down(grip: &Arc<SizeGripInner>, event: &mut PointerEvent) {
    if !event.button.is_primary() {
        return;
    }
    let Some(target) = grip.target() else {
        return;
    };

    event.prevent_default();
    let rect = target.offset_rect();
    let offset = drag_offset_for(grip.grip_area, rect, event.page);
    *grip.drag.lock() = DragState::Dragging { offset };

    grip.mouseup.bind(on_mouse_up, grip);
    grip.mousemove.bind(on_mouse_move, grip);

    tracing::debug!(target: targets::GRIP, area = %grip.grip_area, offset_x = offset.x, offset_y = offset.y, "drag started");
    grip.resize_started.emit(rect);
}

fn on_mouse_move(grip: &Arc<SizeGripInner>, event: &mut PointerEvent) {
    let drag = *grip.drag.lock();
    let DragState::Dragging { offset } = drag else {
        return;
    };
    let Some(target) = grip.target() else {
        return;
    };
    let _perf = PerfSpan::new("size_grip_move");

    event.prevent_default();
    let pointer = grip.document.viewport().clamp(event.page);
    let candidate = Point::new(pointer.x - offset.x, pointer.y - offset.y);
    let rect = resize_rect(
        grip.grip_area,
        target.offset_rect(),
        candidate,
        target.minimum_size(),
        target.maximum_size(),
    );

    tracing::trace!(target: targets::GRIP, area = %grip.grip_area, ?rect, "resizing");
    target.set_offset_rect(rect);
    grip.resized.emit(rect);
}

fn on_mouse_up(grip: &Arc<SizeGripInner>, event: &mut PointerEvent) {
    if !event.button.is_primary() {
        return;
    }

    event.prevent_default();
    if !grip.end_drag() {
        return;
    }

    tracing::debug!(target: targets::GRIP, area = %grip.grip_area, "drag finished");
    if let Some(target) = grip.target() {
        grip.resize_finished.emit(target.offset_rect());
    }
}

/// A handle that resizes another component by dragging.
///
/// `SizeGrip` is a clonable handle; clones refer to the same grip.
#[derive(Clone)]
pub struct SizeGrip {
    component: Component,
    inner: Arc<SizeGripInner>,
}

impl SizeGrip {
    /// Create a grip that resizes `target` from `grip_area`.
    ///
    /// The grip's node is tagged with the configured size-grip class and the
    /// grip-area class. Place the grip in the tree like any other component.
    pub fn new(document: &Document, grip_area: GripArea, target: &Component) -> ItemResult<Self> {
        let component = Component::new(document);
        let node = component.item().node()?;

        let classes = &document.config().classes;
        component.item().add_class(&classes.size_grip)?;
        component
            .item()
            .add_class(&format!("{}{}", classes.grip_area_prefix, grip_area.name()))?;

        let inner = Arc::new(SizeGripInner {
            grip_area,
            document: document.clone(),
            target: Mutex::new(Some(ComponentItem::new(target))),
            target_connection: Mutex::new(None),
            drag: Mutex::new(DragState::Idle),
            mousedown: EventBinder::new(document, EventType::MouseDown, EventTarget::Node(node)),
            mouseup: EventBinder::new(document, EventType::MouseUp, EventTarget::Document),
            mousemove: EventBinder::new(document, EventType::MouseMove, EventTarget::Document),
            resize_started: Signal::new(),
            resized: Signal::new(),
            resize_finished: Signal::new(),
        });

        let weak = Arc::downgrade(&inner);
        let connection = target.item().destroyed().connect(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.release_target();
            }
        });
        *inner.target_connection.lock() = Some(connection);

        // Destroying the grip through an ancestor releases it too.
        let weak = Arc::downgrade(&inner);
        component.item().destroyed().connect(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.release();
            }
        });

        inner.mousedown.bind(on_mouse_down, &inner);
        tracing::debug!(target: targets::GRIP, area = %grip_area, target = %target.item().id(), "created size grip");

        Ok(Self { component, inner })
    }

    /// The edge or corner this grip moves.
    pub fn grip_area(&self) -> GripArea {
        self.inner.grip_area
    }

    /// The component being resized, or `None` once released.
    pub fn target(&self) -> Option<Component> {
        self.inner.target().map(|item| item.component().clone())
    }

    /// The grip's own component.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Check whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(*self.inner.drag.lock(), DragState::Dragging { .. })
    }

    /// The pointer-to-edge offset recorded at drag start, zero when idle.
    pub fn drag_offset(&self) -> Point {
        match *self.inner.drag.lock() {
            DragState::Dragging { offset } => offset,
            DragState::Idle => Point::ZERO,
        }
    }

    /// Emitted with the target rect when a drag starts.
    pub fn resize_started(&self) -> &Signal<Rect> {
        &self.inner.resize_started
    }

    /// Emitted with the new target rect on every drag move.
    pub fn resized(&self) -> &Signal<Rect> {
        &self.inner.resized
    }

    /// Emitted with the final target rect when a drag ends.
    pub fn resize_finished(&self) -> &Signal<Rect> {
        &self.inner.resize_finished
    }

    /// Destroy the grip.
    ///
    /// All listeners are unbound and the target released before the grip's
    /// item is destroyed. The target itself is left alone.
    pub fn destroy(&self) -> ItemResult<()> {
        self.inner.release();
        self.component.item().destroy()
    }
}

impl VisualNode for SizeGrip {
    fn item(&self) -> &Item {
        self.component.item()
    }
}

impl Geometry for SizeGrip {
    fn component(&self) -> &Component {
        &self.component
    }
}

impl std::fmt::Debug for SizeGrip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SizeGrip")
            .field("grip_area", &self.inner.grip_area)
            .field("item", self.component.item())
            .field("drag", &*self.inner.drag.lock())
            .finish()
    }
}
