//! In-memory platform for unit tests.
//!
//! Models just enough of a document to exercise the controller: an element
//! tree with attributes, inline styles and fixed layout boxes, the global
//! cursor/user-select overrides, and a live listener registry.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::PlatformError;
use crate::events::{EventKind, ListenScope};
use crate::platform::OverlayPlatform;
use crate::types::{Rect, Size};

pub type NodeId = usize;

pub const DOCUMENT: NodeId = 0;
pub const CONTAINER: NodeId = 1;
pub const SURFACE: NodeId = 2;

#[derive(Debug, Default)]
struct MockNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    rect: Rect,
    natural_width: Option<f64>,
}

/// Where a mock listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockScope {
    Surface,
    Document,
    Element(NodeId),
}

#[derive(Debug, Default)]
struct MockDom {
    nodes: Vec<MockNode>,
    listeners: BTreeMap<u64, (MockScope, EventKind)>,
    next_listener: u64,
    root_user_select: Option<String>,
    body_cursor: Option<String>,
    scroll: (f64, f64),
    native_resizing_disabled: bool,
    selection_clears: usize,
    deleted: Vec<NodeId>,
}

impl MockDom {
    fn node(&self, id: NodeId) -> &MockNode {
        &self.nodes[id]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MockNode {
        &mut self.nodes[id]
    }

    fn add(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(MockNode {
            tag: tag.to_string(),
            parent,
            ..Default::default()
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|c| *c != id);
        }
    }
}

/// Cheap, clonable handle to a shared mock document.
#[derive(Clone, Debug)]
pub struct MockPlatform {
    dom: Rc<RefCell<MockDom>>,
}

/// Registration handle; removes itself from the registry on drop.
#[derive(Debug)]
pub struct MockListener {
    id: u64,
    dom: Rc<RefCell<MockDom>>,
}

impl Drop for MockListener {
    fn drop(&mut self) {
        self.dom.borrow_mut().listeners.remove(&self.id);
    }
}

impl MockPlatform {
    /// Document -> container -> surface, with the container at (10, 20).
    pub fn new() -> Self {
        let mut dom = MockDom::default();
        dom.add("#document", None);
        let container = dom.add("div", Some(DOCUMENT));
        dom.node_mut(container).rect = Rect::new(10.0, 20.0, 600.0, 400.0);
        let surface = dom.add("div", Some(container));
        dom.node_mut(surface).rect = Rect::new(10.0, 20.0, 600.0, 400.0);
        debug_assert_eq!((container, surface), (CONTAINER, SURFACE));
        Self {
            dom: Rc::new(RefCell::new(dom)),
        }
    }

    /// Add a media element to the surface at (50, 80) with the given
    /// rendered size.
    pub fn add_media(&self, tag: &str, width: f64, height: f64) -> NodeId {
        let mut dom = self.dom.borrow_mut();
        let id = dom.add(tag, Some(SURFACE));
        dom.node_mut(id).rect = Rect::new(50.0, 80.0, width, height);
        id
    }

    /// Add a non-media element to the surface.
    pub fn add_paragraph(&self) -> NodeId {
        self.dom.borrow_mut().add("p", Some(SURFACE))
    }

    pub fn set_rect(&self, id: &NodeId, rect: Rect) {
        self.dom.borrow_mut().node_mut(*id).rect = rect;
    }

    pub fn set_natural_width(&self, id: &NodeId, width: f64) {
        self.dom.borrow_mut().node_mut(*id).natural_width = Some(width);
    }

    pub fn set_scroll(&self, left: f64, top: f64) {
        self.dom.borrow_mut().scroll = (left, top);
    }

    pub fn text(&self, id: &NodeId) -> String {
        self.dom.borrow().node(*id).text.clone()
    }

    pub fn inner_html(&self, id: &NodeId) -> String {
        self.dom.borrow().node(*id).inner_html.clone()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.dom.borrow().node(id).children.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.dom.borrow().listeners.len()
    }

    pub fn listeners(&self) -> Vec<(MockScope, EventKind)> {
        self.dom.borrow().listeners.values().copied().collect()
    }

    pub fn user_select(&self) -> Option<String> {
        self.dom.borrow().root_user_select.clone()
    }

    pub fn body_cursor(&self) -> Option<String> {
        self.dom.borrow().body_cursor.clone()
    }

    pub fn native_resizing_disabled(&self) -> bool {
        self.dom.borrow().native_resizing_disabled
    }

    pub fn selection_clears(&self) -> usize {
        self.dom.borrow().selection_clears
    }

    pub fn deleted(&self) -> Vec<NodeId> {
        self.dom.borrow().deleted.clone()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl OverlayPlatform for MockPlatform {
    type Element = NodeId;
    type Listener = MockListener;

    fn surface(&self) -> NodeId {
        SURFACE
    }

    fn container(&self) -> NodeId {
        CONTAINER
    }

    fn container_scroll(&self) -> (f64, f64) {
        self.dom.borrow().scroll
    }

    fn disable_native_resizing(&self) {
        self.dom.borrow_mut().native_resizing_disabled = true;
    }

    fn ensure_positioned_container(&self) {
        let mut dom = self.dom.borrow_mut();
        dom.node_mut(CONTAINER)
            .styles
            .entry("position".to_string())
            .or_insert_with(|| "relative".to_string());
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, PlatformError> {
        Ok(self.dom.borrow_mut().add(tag, None))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), PlatformError> {
        let mut dom = self.dom.borrow_mut();
        if *parent >= dom.nodes.len() || *child >= dom.nodes.len() {
            return Err("no such node".into());
        }
        dom.detach(*child);
        dom.node_mut(*child).parent = Some(*parent);
        dom.node_mut(*parent).children.push(*child);
        Ok(())
    }

    fn remove_element(&self, element: &NodeId) {
        self.dom.borrow_mut().detach(*element);
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let dom = self.dom.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = dom.node(id).parent;
        }
        false
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        self.contains(&DOCUMENT, element)
    }

    fn is_media(&self, element: &NodeId) -> bool {
        let dom = self.dom.borrow();
        let tag = dom.node(*element).tag.to_ascii_uppercase();
        tag == "IMG" || tag == "VIDEO"
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.dom.borrow_mut().node_mut(*element).text = text.to_string();
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.dom.borrow_mut().node_mut(*element).inner_html = html.to_string();
    }

    fn first_child(&self, element: &NodeId) -> Option<NodeId> {
        self.dom.borrow().node(*element).children.first().copied()
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        self.dom.borrow().node(*element).rect
    }

    fn client_size(&self, element: &NodeId) -> Size {
        self.dom.borrow().node(*element).rect.size()
    }

    fn natural_width(&self, element: &NodeId) -> Option<f64> {
        self.dom.borrow().node(*element).natural_width
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.dom.borrow().node(*element).attributes.get(name).cloned()
    }

    /// Setting `width` rescales the layout box, preserving aspect ratio.
    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        let mut dom = self.dom.borrow_mut();
        let node = dom.node_mut(*element);
        node.attributes.insert(name.to_string(), value.to_string());
        if name == "width" {
            if let Ok(width) = value.parse::<f64>() {
                let rect = node.rect;
                if rect.width > 0.0 {
                    node.rect.height = (rect.height * width / rect.width).round();
                }
                node.rect.width = width;
            }
        }
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) {
        self.dom.borrow_mut().node_mut(*element).attributes.remove(name);
    }

    fn style_property(&self, element: &NodeId, name: &str) -> Option<String> {
        self.dom
            .borrow()
            .node(*element)
            .styles
            .get(name)
            .and_then(|v| non_empty(v))
    }

    fn set_style_property(&self, element: &NodeId, name: &str, value: &str) {
        let mut dom = self.dom.borrow_mut();
        let styles = &mut dom.node_mut(*element).styles;
        if value.is_empty() {
            styles.remove(name);
        } else {
            styles.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_style_property(&self, element: &NodeId, name: &str) {
        self.dom.borrow_mut().node_mut(*element).styles.remove(name);
    }

    fn set_user_select(&self, value: &str) {
        self.set_style_property(&SURFACE, "user-select", value);
        self.dom.borrow_mut().root_user_select = non_empty(value);
    }

    fn set_drag_cursor(&self, target: &NodeId, value: &str) {
        self.set_style_property(target, "cursor", value);
        self.dom.borrow_mut().body_cursor = non_empty(value);
    }

    fn clear_selection(&self) {
        self.dom.borrow_mut().selection_clears += 1;
    }

    fn delete_node(&self, element: &NodeId) {
        let mut dom = self.dom.borrow_mut();
        dom.detach(*element);
        dom.deleted.push(*element);
    }

    fn listen(&self, scope: ListenScope<'_, NodeId>, kind: EventKind) -> MockListener {
        let scope = match scope {
            ListenScope::Surface => MockScope::Surface,
            ListenScope::Document => MockScope::Document,
            ListenScope::Element(id) => MockScope::Element(*id),
        };
        let mut dom = self.dom.borrow_mut();
        let id = dom.next_listener;
        dom.next_listener += 1;
        dom.listeners.insert(id, (scope, kind));
        MockListener {
            id,
            dom: self.dom.clone(),
        }
    }
}
