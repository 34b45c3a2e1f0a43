//! Attribute passthrough over real DOM nodes.

use std::collections::BTreeMap;

use web_sys::Element;
use weaver_media_core::{AttributeNode, MediaFormat, MediaKind, NodeFormat, PlainFormat};

/// A DOM element seen as a format node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomNode(pub Element);

impl AttributeNode for DomNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            tracing::warn!(target: "weaver::media", name, "setAttribute failed: {e:?}");
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(e) = self.0.remove_attribute(name) {
            tracing::warn!(target: "weaver::media", name, "removeAttribute failed: {e:?}");
        }
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }
}

fn format_for(element: &Element) -> Option<MediaFormat<PlainFormat>> {
    MediaKind::from_tag(&element.tag_name()).map(|kind| MediaFormat::new(kind, PlainFormat))
}

/// Passthrough attributes present on a media element. Empty for anything
/// that isn't an image or video.
pub fn media_formats(element: &Element) -> BTreeMap<String, String> {
    match format_for(element) {
        Some(format) => format.formats(&DomNode(element.clone())),
        None => BTreeMap::new(),
    }
}

/// Set or clear one passthrough attribute on a media element.
///
/// Returns false, leaving the element untouched, when it isn't an image or
/// video or `name` isn't a passthrough attribute; the caller's own format
/// handles those.
pub fn apply_media_format(element: &Element, name: &str, value: Option<&str>) -> bool {
    if !MediaFormat::<PlainFormat>::owns(name) {
        return false;
    }
    let Some(format) = format_for(element) else {
        return false;
    };
    format.format(&DomNode(element.clone()), name, value);
    true
}
