//! Attribute passthrough for image and video nodes.
//!
//! Host editors serialize embeds through per-node "formats". The stock image
//! and video formats drop the attributes the overlay writes, so a resized or
//! aligned embed would lose its size and alignment on the next round trip.
//! `MediaFormat` wraps whatever format the host already has and additionally
//! carries `alt`, `height`, `width` and `style`.

use std::collections::BTreeMap;

/// Attributes the media formats carry through serialization.
pub const MEDIA_ATTRIBUTES: [&str; 4] = ["alt", "height", "width", "style"];

/// Name the overlay registers itself under with the host editor.
pub const MODULE_NAME: &str = "modules/mediaResize";

/// Inline attribute format (format name, DOM attribute) registered alongside
/// the media formats so `class` on embeds survives serialization.
pub const CLASS_ATTRIBUTE_FORMAT: (&str, &str) = ("nameClass", "class");

/// A document node whose attributes a format can read and write.
pub trait AttributeNode {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// How a node kind exposes and accepts formatting.
pub trait NodeFormat<N: AttributeNode> {
    /// Format values currently present on `node`.
    fn formats(&self, node: &N) -> BTreeMap<String, String>;

    /// Apply (`Some`) or remove (`None`) the format `name`.
    fn format(&self, node: &N, name: &str, value: Option<&str>);
}

/// A format with no formats of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlainFormat;

impl<N: AttributeNode> NodeFormat<N> for PlainFormat {
    fn formats(&self, _node: &N) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn format(&self, _node: &N, name: &str, _value: Option<&str>) {
        tracing::trace!(target: "weaver::media", name, "format ignored by plain node");
    }
}

/// Embed kinds the overlay manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Video];

    /// Format name the host editor knows this kind by.
    pub fn name(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Element tag name, uppercase as the DOM reports it.
    pub fn tag(self) -> &'static str {
        match self {
            MediaKind::Image => "IMG",
            MediaKind::Video => "VIDEO",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(tag))
    }
}

/// Media node format that carries [`MEDIA_ATTRIBUTES`] on top of `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFormat<F> {
    kind: MediaKind,
    base: F,
}

impl<F> MediaFormat<F> {
    pub fn new(kind: MediaKind, base: F) -> Self {
        Self { kind, base }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn base(&self) -> &F {
        &self.base
    }

    /// Whether `name` is one of the passthrough attributes.
    pub fn owns(name: &str) -> bool {
        MEDIA_ATTRIBUTES.contains(&name)
    }
}

impl<N: AttributeNode, F: NodeFormat<N>> NodeFormat<N> for MediaFormat<F> {
    fn formats(&self, node: &N) -> BTreeMap<String, String> {
        let mut formats = self.base.formats(node);
        for name in MEDIA_ATTRIBUTES {
            if let Some(value) = node.attribute(name) {
                formats.insert(name.to_string(), value);
            }
        }
        formats
    }

    fn format(&self, node: &N, name: &str, value: Option<&str>) {
        if !Self::owns(name) {
            self.base.format(node, name, value);
            return;
        }
        match value {
            Some(value) if !value.is_empty() => node.set_attribute(name, value),
            _ => node.remove_attribute(name),
        }
    }
}

/// Host-editor registration surface.
pub trait FormatRegistry<N: AttributeNode> {
    /// Install `format` for nodes of `kind`, replacing any previous one.
    fn register_format(&mut self, kind: MediaKind, format: Box<dyn NodeFormat<N>>);

    /// Install an inline format `name` that maps to the DOM attribute
    /// `attribute`.
    fn register_attribute(&mut self, name: &str, attribute: &str);

    /// Record a module under `name`.
    fn register_module(&mut self, name: &str);
}

/// Install passthrough formats for every media kind, wrapping the base format
/// `base` produces for that kind, the class attribute format and the overlay
/// module.
pub fn register_media_formats<N, R, F, B>(registry: &mut R, base: B)
where
    N: AttributeNode,
    R: FormatRegistry<N>,
    F: NodeFormat<N> + 'static,
    B: Fn(MediaKind) -> F,
{
    for kind in MediaKind::ALL {
        registry.register_format(kind, Box::new(MediaFormat::new(kind, base(kind))));
    }
    let (name, attribute) = CLASS_ATTRIBUTE_FORMAT;
    registry.register_attribute(name, attribute);
    registry.register_module(MODULE_NAME);
    tracing::debug!(target: "weaver::media", "media formats registered");
}
