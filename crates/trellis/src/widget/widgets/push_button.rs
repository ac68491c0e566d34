//! Push button widget.
//!
//! A [`PushButton`] is a `button` element holding a text `span` and, once an
//! image is set, an `img` placed before the text.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let doc = Document::new();
//! let button = PushButton::new(&doc, "OK").unwrap();
//! button.set_image("icons/ok.png").unwrap();
//!
//! assert_eq!(button.text().unwrap(), "OK");
//! assert_eq!(button.image().unwrap().as_deref(), Some("icons/ok.png"));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_render::{NodeId, Surface};

use super::abstract_button::AbstractButton;
use crate::error::ItemResult;
use crate::widget::component::Component;
use crate::widget::document::Document;
use crate::widget::geometry::NoHints;
use crate::widget::item::Item;
use crate::widget::traits::{Geometry, VisualNode};

struct PushButtonInner {
    text_node: NodeId,
    image_node: Mutex<Option<NodeId>>,
}

/// A standard clickable button with a text label and optional image.
///
/// Connect to [`clicked`](AbstractButton::clicked) through
/// [`button`](Self::button) to react to clicks.
#[derive(Clone)]
pub struct PushButton {
    button: AbstractButton,
    inner: Arc<PushButtonInner>,
}

impl PushButton {
    /// Create a push button with the given text.
    pub fn new(document: &Document, text: &str) -> ItemResult<Self> {
        let button = AbstractButton::with_element(
            document,
            &|surface: &Surface| surface.create_element("button"),
            NoHints,
        )?;
        let node = button.item().node()?;
        let classes = &document.config().classes;
        button.add_class(&format!("{} {}", classes.push_button, classes.small_text))?;

        let surface = document.surface();
        let text_node = surface.create_element("span");
        surface.add_class(text_node, &classes.push_button_text)?;
        surface.set_text(text_node, text)?;
        surface.append_child(node, text_node)?;

        Ok(Self {
            button,
            inner: Arc::new(PushButtonInner {
                text_node,
                image_node: Mutex::new(None),
            }),
        })
    }

    /// The press/release/click behaviour.
    pub fn button(&self) -> &AbstractButton {
        &self.button
    }

    /// The button's label.
    pub fn text(&self) -> ItemResult<String> {
        self.button.item().node()?;
        Ok(self.surface().text(self.inner.text_node)?)
    }

    /// Replace the button's label.
    pub fn set_text(&self, text: &str) -> ItemResult<()> {
        self.button.item().node()?;
        self.surface().set_text(self.inner.text_node, text)?;
        Ok(())
    }

    /// The image source, or `None` when no image is shown.
    pub fn image(&self) -> ItemResult<Option<String>> {
        self.button.item().node()?;
        let image_node = *self.inner.image_node.lock();
        match image_node {
            Some(image_node) => Ok(self.surface().attribute(image_node, "src")?),
            None => Ok(None),
        }
    }

    /// Show an image before the label. An empty source removes the image.
    pub fn set_image(&self, src: &str) -> ItemResult<()> {
        let node = self.button.item().node()?;
        let surface = self.surface();

        if src.is_empty() {
            let removed = self.inner.image_node.lock().take();
            if let Some(image_node) = removed {
                surface.release(image_node)?;
            }
            return Ok(());
        }

        let existing = *self.inner.image_node.lock();
        let image_node = match existing {
            Some(image_node) => image_node,
            None => {
                let image_node = surface.create_element("img");
                let classes = &self.button.item().document().config().classes;
                surface.add_class(image_node, &classes.push_button_image)?;
                surface.insert_before(node, image_node, self.inner.text_node)?;
                *self.inner.image_node.lock() = Some(image_node);
                image_node
            }
        };
        surface.set_attribute(image_node, "src", src)?;
        Ok(())
    }

    /// Destroy the button.
    pub fn destroy(&self) -> ItemResult<()> {
        self.button.destroy()
    }

    fn surface(&self) -> &Surface {
        self.button.item().document().surface()
    }
}

impl VisualNode for PushButton {
    fn item(&self) -> &Item {
        self.button.item()
    }
}

impl Geometry for PushButton {
    fn component(&self) -> &Component {
        self.button.component()
    }
}

impl std::fmt::Debug for PushButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushButton")
            .field("button", &self.button)
            .field("text", &self.text().ok())
            .finish()
    }
}
