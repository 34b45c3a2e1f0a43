//! DOM-backed `OverlayPlatform`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Element, EventTarget, HtmlElement};
use weaver_media_core::{
    EventKind, EventResult, ListenScope, MediaKind, OverlayPlatform, PlatformError, Rect, Size,
    SurfaceEvent,
};

use crate::events::{ListenerOrigin, event_type, listener_phase, translate_event};

/// Vendor variants written alongside `user-select`.
const USER_SELECT_PROPERTIES: [&str; 4] = [
    "user-select",
    "-moz-user-select",
    "-webkit-user-select",
    "-ms-user-select",
];

/// The editor the overlay is embedded in.
///
/// The overlay never edits document content itself; removing an embed and
/// clearing the selection go through the host so its document model stays in
/// sync with the DOM.
pub trait HostEditor {
    fn clear_selection(&self);

    /// Delete the embed rendered by `element` from the host document.
    fn delete_embed(&self, element: &Element);
}

/// Host for plain `contenteditable` surfaces: edits the DOM directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomHost;

impl HostEditor for DomHost {
    fn clear_selection(&self) {
        match gloo_utils::window().get_selection() {
            Ok(Some(selection)) => {
                if let Err(e) = selection.remove_all_ranges() {
                    tracing::warn!(target: "weaver::media", "clearing selection failed: {e:?}");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(target: "weaver::media", "no selection available: {e:?}"),
        }
    }

    fn delete_embed(&self, element: &Element) {
        element.remove();
    }
}

type Handler = Rc<dyn Fn(SurfaceEvent<Element>) -> EventResult>;

/// Late-bound delivery point for translated events.
///
/// Listeners are created by the platform, which is owned by the controller
/// they deliver to, so the handler is connected after construction.
#[derive(Clone, Default)]
pub struct EventSink {
    handler: Rc<RefCell<Option<Handler>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, handler: impl Fn(SurfaceEvent<Element>) -> EventResult + 'static) {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn disconnect(&self) {
        self.handler.borrow_mut().take();
    }

    pub fn dispatch(&self, event: SurfaceEvent<Element>) -> EventResult {
        // Clone out so a handler may reconnect while running.
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => handler(event),
            None => EventResult::PassThrough,
        }
    }
}

/// Browser implementation of `OverlayPlatform` for one editor surface.
#[derive(Clone)]
pub struct BrowserPlatform {
    surface: Element,
    host: Rc<dyn HostEditor>,
    sink: EventSink,
}

impl BrowserPlatform {
    pub fn new(surface: Element, host: Rc<dyn HostEditor>, sink: EventSink) -> Self {
        Self {
            surface,
            host,
            sink,
        }
    }

    pub fn sink(&self) -> &EventSink {
        &self.sink
    }
}

fn js_error(context: &str, err: JsValue) -> PlatformError {
    PlatformError(format!("{context}: {err:?}"))
}

/// Inline style of an HTML or SVG element.
fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element
        .dyn_ref::<web_sys::SvgElement>()
        .map(|svg| svg.style())
}

fn write_style(element: &Element, name: &str, value: &str) {
    let Some(style) = inline_style(element) else {
        return;
    };
    let result = if value.is_empty() {
        style.remove_property(name).map(|_| ())
    } else {
        style.set_property(name, value)
    };
    if let Err(e) = result {
        tracing::warn!(target: "weaver::media", name, "style write failed: {e:?}");
    }
}

impl OverlayPlatform for BrowserPlatform {
    type Element = Element;
    type Listener = EventListener;

    fn surface(&self) -> Element {
        self.surface.clone()
    }

    fn container(&self) -> Element {
        self.surface
            .parent_element()
            .unwrap_or_else(|| self.surface.clone())
    }

    fn container_scroll(&self) -> (f64, f64) {
        let container = self.container();
        (container.scroll_left() as f64, container.scroll_top() as f64)
    }

    fn disable_native_resizing(&self) {
        let Ok(document) = gloo_utils::document().dyn_into::<web_sys::HtmlDocument>() else {
            return;
        };
        if let Err(e) =
            document.exec_command_with_show_ui_and_value("enableObjectResizing", false, "false")
        {
            tracing::debug!(target: "weaver::media", "enableObjectResizing unsupported: {e:?}");
        }
    }

    fn ensure_positioned_container(&self) {
        let container = self.container();
        if self.style_property(&container, "position").is_none() {
            write_style(&container, "position", "relative");
        }
    }

    fn create_element(&self, tag: &str) -> Result<Element, PlatformError> {
        gloo_utils::document()
            .create_element(tag)
            .map_err(|e| js_error("createElement", e))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), PlatformError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", e))
    }

    fn remove_element(&self, element: &Element) {
        element.remove();
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn is_media(&self, element: &Element) -> bool {
        MediaKind::from_tag(&element.tag_name()).is_some()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn first_child(&self, element: &Element) -> Option<Element> {
        element.first_element_child()
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn client_size(&self, element: &Element) -> Size {
        Size::new(element.client_width() as f64, element.client_height() as f64)
    }

    fn natural_width(&self, element: &Element) -> Option<f64> {
        let width = if let Some(img) = element.dyn_ref::<web_sys::HtmlImageElement>() {
            img.natural_width()
        } else if let Some(video) = element.dyn_ref::<web_sys::HtmlVideoElement>() {
            video.video_width()
        } else {
            return None;
        };
        (width > 0).then_some(width as f64)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            tracing::warn!(target: "weaver::media", name, "setAttribute failed: {e:?}");
        }
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        if let Err(e) = element.remove_attribute(name) {
            tracing::warn!(target: "weaver::media", name, "removeAttribute failed: {e:?}");
        }
    }

    fn style_property(&self, element: &Element, name: &str) -> Option<String> {
        inline_style(element)?
            .get_property_value(name)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style_property(&self, element: &Element, name: &str, value: &str) {
        write_style(element, name, value);
    }

    fn remove_style_property(&self, element: &Element, name: &str) {
        write_style(element, name, "");
    }

    fn set_user_select(&self, value: &str) {
        let root = gloo_utils::document_element();
        for property in USER_SELECT_PROPERTIES {
            write_style(&self.surface, property, value);
            write_style(&root, property, value);
        }
    }

    fn set_drag_cursor(&self, target: &Element, value: &str) {
        write_style(&gloo_utils::body(), "cursor", value);
        write_style(target, "cursor", value);
    }

    fn clear_selection(&self) {
        self.host.clear_selection();
    }

    fn delete_node(&self, element: &Element) {
        self.host.delete_embed(element);
    }

    fn listen(&self, scope: ListenScope<'_, Element>, kind: EventKind) -> EventListener {
        let origin = ListenerOrigin::from(&scope);
        let target: EventTarget = match scope {
            ListenScope::Surface => self.surface.clone().into(),
            ListenScope::Document => gloo_utils::document().into(),
            ListenScope::Element(element) => element.clone().into(),
        };
        let sink = self.sink.clone();
        let options = EventListenerOptions {
            phase: listener_phase(kind),
            passive: false,
        };

        EventListener::new_with_options(&target, event_type(kind), options, move |event| {
            let Some(surface_event) = translate_event(origin, kind, event) else {
                return;
            };
            if sink.dispatch(surface_event).is_handled() {
                event.prevent_default();
            }
        })
    }
}
