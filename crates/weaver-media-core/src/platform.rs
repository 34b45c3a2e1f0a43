//! Platform abstraction trait for overlay operations.
//!
//! This trait defines the interface between the overlay logic and the
//! platform it runs on (browser DOM, native UI, an in-memory test double).
//! It covers both external collaborators: the document/layout API and the
//! host editor's document model.

use crate::error::PlatformError;
use crate::events::{EventKind, ListenScope};
use crate::options::StyleMap;
use crate::types::{Rect, Size};

/// Platform-specific element, style and event operations.
///
/// Implementations are cheap handles (cloned into guards and modules), so
/// `Clone` should not copy any underlying document state.
pub trait OverlayPlatform: Clone {
    /// Non-owning reference to a rendered element.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Listener registration. Dropping it removes the listener.
    type Listener;

    // === Surface ===

    /// The host's editable surface.
    fn surface(&self) -> Self::Element;

    /// The surface's parent: positioning frame and overlay mount point.
    fn container(&self) -> Self::Element;

    /// Scroll offset (left, top) of the container.
    fn container_scroll(&self) -> (f64, f64);

    /// Turn off the platform's built-in object resizing affordance.
    fn disable_native_resizing(&self);

    /// Give the container `position: relative` unless it is already positioned.
    fn ensure_positioned_container(&self);

    // === Elements ===

    fn create_element(&self, tag: &str) -> Result<Self::Element, PlatformError>;

    fn append_child(
        &self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), PlatformError>;

    /// Detach an element from the document. No-op if already detached.
    fn remove_element(&self, element: &Self::Element);

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    /// Whether the element is still attached to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;

    /// Whether the element is an image or video node.
    fn is_media(&self, element: &Self::Element) -> bool;

    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn first_child(&self, element: &Self::Element) -> Option<Self::Element>;

    // === Layout ===

    /// Bounding box in viewport coordinates.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Rendered client box (not intrinsic size).
    fn client_size(&self, element: &Self::Element) -> Size;

    /// Intrinsic width of the media, if known and non-zero.
    fn natural_width(&self, element: &Self::Element) -> Option<f64>;

    // === Attributes ===

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&self, element: &Self::Element, name: &str);

    // === Inline style, keyed by CSS property name ===

    /// Current inline value, `None` when unset or empty.
    fn style_property(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_style_property(&self, element: &Self::Element, name: &str, value: &str);

    fn remove_style_property(&self, element: &Self::Element, name: &str);

    /// Apply every entry of a style map to an element.
    fn apply_styles(&self, element: &Self::Element, styles: &StyleMap) {
        for (name, value) in styles.iter() {
            self.set_style_property(element, name, value);
        }
    }

    // === Global overrides ===

    /// Set `user-select` (all vendor variants) on the surface and the
    /// document root. An empty value restores the default.
    fn set_user_select(&self, value: &str);

    /// Set the cursor on the document body and on `target`. An empty value
    /// restores the default.
    fn set_drag_cursor(&self, target: &Self::Element, value: &str);

    // === Host editor ===

    /// Clear the host editor's text selection.
    fn clear_selection(&self);

    /// Delete the document object rendered by `element`.
    fn delete_node(&self, element: &Self::Element);

    // === Events ===

    /// Register a listener. Events it receives are translated to
    /// `SurfaceEvent`s and delivered to the controller owning this platform.
    fn listen(&self, scope: ListenScope<'_, Self::Element>, kind: EventKind) -> Self::Listener;
}
