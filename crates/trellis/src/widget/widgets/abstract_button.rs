//! Abstract button base implementation.
//!
//! [`AbstractButton`] provides the press behaviour shared by every
//! button-like widget:
//!
//! - `pressed` when the primary button goes down on the button,
//! - `released` when it comes back up anywhere on the document,
//! - `clicked` when it comes back up on the button (or inside it).
//!
//! While held, the button's node carries the configured pressed class.
//! Concrete buttons embed an `AbstractButton` and add their own content.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::Surface;

use crate::error::ItemResult;
use crate::widget::binder::EventBinder;
use crate::widget::component::Component;
use crate::widget::document::Document;
use crate::widget::events::{EventTarget, EventType, PointerEvent};
use crate::widget::geometry::{NoHints, SizeHints};
use crate::widget::item::{ElementFactory, Item};
use crate::widget::traits::{Geometry, VisualNode};

struct ButtonInner {
    item: Item,
    pressed_class: String,
    is_pressed: AtomicBool,
    mousedown: EventBinder,
    mouseup: EventBinder,
    pressed: Signal<()>,
    released: Signal<()>,
    clicked: Signal<()>,
}

impl ButtonInner {
    fn release(&self) {
        self.mousedown.unbind_all();
        self.mouseup.unbind_all();
        self.is_pressed.store(false, Ordering::SeqCst);
    }

    fn set_pressed_class(&self, pressed: bool) {
        let result = if pressed {
            self.item.add_class(&self.pressed_class)
        } else {
            self.item.remove_class(&self.pressed_class)
        };
        if let Err(err) = result {
            tracing::warn!(target: targets::BUTTON, item = %self.item.id(), error = %err, "failed to update pressed state");
        }
    }
}

fn on_press(button: &Arc<ButtonInner>, event: &mut PointerEvent) {
    if !event.button.is_primary() {
        return;
    }

    event.prevent_default();
    button.set_pressed_class(true);
    button.mouseup.bind(on_release, button);
    button.is_pressed.store(true, Ordering::SeqCst);

    tracing::debug!(target: targets::BUTTON, item = %button.item.id(), "pressed");
    button.pressed.emit(());
}

fn on_release(button: &Arc<ButtonInner>, event: &mut PointerEvent) {
    if !event.button.is_primary() {
        return;
    }

    button.set_pressed_class(false);
    button.mouseup.unbind(on_release, button);
    button.is_pressed.store(false, Ordering::SeqCst);

    tracing::debug!(target: targets::BUTTON, item = %button.item.id(), "released");
    button.released.emit(());

    let Some(node) = button.item.live_node() else {
        return;
    };
    let surface = button.item.document().surface();
    let on_button = event
        .target
        .is_some_and(|target| target == node || surface.is_ancestor(node, target));
    if on_button {
        event.prevent_default();
        tracing::debug!(target: targets::BUTTON, item = %button.item.id(), "clicked");
        button.clicked.emit(());
    }
}

/// Shared press/release/click behaviour.
///
/// `AbstractButton` is a clonable handle; clones refer to the same button.
#[derive(Clone)]
pub struct AbstractButton {
    component: Component,
    inner: Arc<ButtonInner>,
}

impl AbstractButton {
    /// Create a button on a plain `button` element.
    pub fn new(document: &Document) -> ItemResult<Self> {
        Self::with_element(
            document,
            &|surface: &Surface| surface.create_element("button"),
            NoHints,
        )
    }

    /// Create a button whose node is built by `factory`.
    pub fn with_element(
        document: &Document,
        factory: &dyn ElementFactory,
        hints: impl SizeHints + 'static,
    ) -> ItemResult<Self> {
        let component = Component::with_element(document, factory, hints);
        let item = component.item().clone();
        let node = item.node()?;
        let classes = &document.config().classes;
        item.add_class(&classes.button)?;

        let inner = Arc::new(ButtonInner {
            item,
            pressed_class: classes.pressed.clone(),
            is_pressed: AtomicBool::new(false),
            mousedown: EventBinder::new(document, EventType::MouseDown, EventTarget::Node(node)),
            mouseup: EventBinder::new(document, EventType::MouseUp, EventTarget::Document),
            pressed: Signal::new(),
            released: Signal::new(),
            clicked: Signal::new(),
        });

        let weak = Arc::downgrade(&inner);
        component.item().destroyed().connect(move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.release();
            }
        });
        inner.mousedown.bind(on_press, &inner);

        Ok(Self { component, inner })
    }

    /// Check whether the primary button is held on this button.
    pub fn is_pressed(&self) -> bool {
        self.inner.is_pressed.load(Ordering::SeqCst)
    }

    /// Emit `clicked` without pointer interaction.
    pub fn click(&self) {
        self.inner.clicked.emit(());
    }

    /// Emitted on a primary press.
    pub fn pressed(&self) -> &Signal<()> {
        &self.inner.pressed
    }

    /// Emitted when a press ends, wherever the pointer is.
    pub fn released(&self) -> &Signal<()> {
        &self.inner.released
    }

    /// Emitted when a press ends over the button.
    pub fn clicked(&self) -> &Signal<()> {
        &self.inner.clicked
    }

    /// Destroy the button, unbinding its listeners first.
    pub fn destroy(&self) -> ItemResult<()> {
        self.inner.release();
        self.component.item().destroy()
    }
}

impl VisualNode for AbstractButton {
    fn item(&self) -> &Item {
        self.component.item()
    }
}

impl Geometry for AbstractButton {
    fn component(&self) -> &Component {
        &self.component
    }
}

impl std::fmt::Debug for AbstractButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbstractButton")
            .field("item", self.component.item())
            .field("pressed", &self.is_pressed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::events::MouseButton;
    use parking_lot::Mutex;

    fn record(button: &AbstractButton) -> Arc<Mutex<Vec<&'static str>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for (signal, name) in [
            (button.pressed(), "pressed"),
            (button.released(), "released"),
            (button.clicked(), "clicked"),
        ] {
            let log = log.clone();
            signal.connect(move |_| log.lock().push(name));
        }
        log
    }

    #[test]
    fn test_press_and_release_on_button_clicks() {
        let doc = Document::new();
        let button = AbstractButton::new(&doc).unwrap();
        button.item().mount().unwrap();
        let node = button.item().node().unwrap();
        let log = record(&button);

        let down = doc.dispatch(PointerEvent::mouse_down(Some(node), MouseButton::Left, 1.0, 1.0));
        assert!(down.is_default_prevented());
        assert!(button.is_pressed());
        assert!(button.has_class("t-mod-pressed").unwrap());

        let up = doc.dispatch(PointerEvent::mouse_up(Some(node), MouseButton::Left, 1.0, 1.0));
        assert!(up.is_default_prevented());
        assert!(!button.is_pressed());
        assert!(!button.has_class("t-mod-pressed").unwrap());
        assert_eq!(*log.lock(), vec!["pressed", "released", "clicked"]);
    }

    #[test]
    fn test_release_elsewhere_does_not_click() {
        let doc = Document::new();
        let button = AbstractButton::new(&doc).unwrap();
        let node = button.item().node().unwrap();
        let log = record(&button);

        doc.dispatch(PointerEvent::mouse_down(Some(node), MouseButton::Left, 1.0, 1.0));
        let up = doc.dispatch(PointerEvent::mouse_up(None, MouseButton::Left, 500.0, 500.0));

        assert!(!up.is_default_prevented());
        assert_eq!(*log.lock(), vec!["pressed", "released"]);
        assert_eq!(doc.listener_count(EventTarget::Document, EventType::MouseUp), 0);
    }

    #[test]
    fn test_secondary_button_ignored() {
        let doc = Document::new();
        let button = AbstractButton::new(&doc).unwrap();
        let node = button.item().node().unwrap();
        let log = record(&button);

        doc.dispatch(PointerEvent::mouse_down(Some(node), MouseButton::Right, 1.0, 1.0));
        assert!(!button.is_pressed());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_destroy_unbinds() {
        let doc = Document::new();
        let button = AbstractButton::new(&doc).unwrap();
        let node = button.item().node().unwrap();
        assert_eq!(doc.listener_count(EventTarget::Node(node), EventType::MouseDown), 1);

        button.destroy().unwrap();
        assert_eq!(doc.listener_count(EventTarget::Node(node), EventType::MouseDown), 0);
    }
}
