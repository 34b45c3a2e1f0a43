//! Attribute passthrough for the host's image/video formats.

use std::collections::BTreeMap;

use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use weaver_media_browser::{
    DomNode, FormatRegistry, MEDIA_ATTRIBUTES, MODULE_NAME, MediaKind, NodeFormat,
};

use crate::host::has_method;

#[wasm_bindgen(typescript_custom_section)]
const MEDIA_FORMAT_HOST_TS: &'static str = r#"
/** A host format the media formats fall back to. Both methods are optional. */
export interface HostNodeFormat {
    formats?(node: Element): Record<string, string>;
    format?(node: Element, name: string, value: string | null): void;
}

/** The host editor's format registry. */
export interface MediaFormatHost {
    /** The host's current format for `kind` (`"image"` or `"video"`). */
    baseFormat?(kind: string): HostNodeFormat | undefined;
    /** Install `format` for `kind`, replacing the host's own. */
    registerFormat(kind: string, format: MediaNodeFormat): void;
    /** Install an inline format `name` stored in the DOM attribute `attribute`. */
    registerAttribute?(name: string, attribute: string): void;
    /** Register the overlay module under `name`. */
    registerModule(name: string): void;
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "MediaFormatHost")]
    pub type JsFormatHost;

    #[wasm_bindgen(method, catch, js_name = baseFormat)]
    fn base_format(this: &JsFormatHost, kind: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = registerFormat)]
    fn register_format(
        this: &JsFormatHost,
        kind: &str,
        format: MediaNodeFormat,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = registerAttribute)]
    fn register_attribute(
        this: &JsFormatHost,
        name: &str,
        attribute: &str,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = registerModule)]
    fn register_module(this: &JsFormatHost, name: &str) -> Result<(), JsValue>;
}

/// The host's own format object for one media kind.
pub struct HostFormat {
    format: JsValue,
}

impl HostFormat {
    fn for_kind(host: &JsFormatHost, kind: MediaKind) -> Self {
        let format = if has_method(host, "baseFormat") {
            host.base_format(kind.name()).unwrap_or_else(|e| {
                tracing::warn!(
                    target: "weaver::media",
                    kind = kind.name(),
                    "baseFormat threw: {e:?}"
                );
                JsValue::UNDEFINED
            })
        } else {
            JsValue::UNDEFINED
        };
        Self { format }
    }

    fn method(&self, name: &str) -> Option<Function> {
        if !has_method(&self.format, name) {
            return None;
        }
        Reflect::get(&self.format, &JsValue::from_str(name))
            .ok()
            .map(|method| method.unchecked_into())
    }
}

impl NodeFormat<DomNode> for HostFormat {
    fn formats(&self, node: &DomNode) -> BTreeMap<String, String> {
        let Some(formats) = self.method("formats") else {
            return BTreeMap::new();
        };
        let reported = match formats.call1(&self.format, &node.0) {
            Ok(reported) if reported.is_object() => reported,
            Ok(_) => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(target: "weaver::media", "host formats() threw: {e:?}");
                return BTreeMap::new();
            }
        };
        Object::entries(reported.unchecked_ref())
            .iter()
            .filter_map(|entry| {
                let pair: Array = entry.unchecked_into();
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn format(&self, node: &DomNode, name: &str, value: Option<&str>) {
        let Some(format) = self.method("format") else {
            tracing::trace!(target: "weaver::media", name, "format ignored by host node");
            return;
        };
        let value = value.map(JsValue::from_str).unwrap_or(JsValue::NULL);
        if let Err(e) = format.call3(&self.format, &node.0, &JsValue::from_str(name), &value) {
            tracing::warn!(target: "weaver::media", name, "host format() threw: {e:?}");
        }
    }
}

/// Media node format handed to the host: carries `alt`, `height`, `width`
/// and `style`, and defers everything else to the host's own format.
#[wasm_bindgen]
pub struct MediaNodeFormat {
    kind: MediaKind,
    inner: Box<dyn NodeFormat<DomNode>>,
}

#[wasm_bindgen]
impl MediaNodeFormat {
    /// `"image"` or `"video"`.
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.kind.name().to_string()
    }

    /// Format values on `node`, as a plain object.
    pub fn formats(&self, node: Element) -> Result<JsValue, JsError> {
        let formats = self.inner.formats(&DomNode(node));
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        formats
            .serialize(&serializer)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Apply (`value` set) or remove (`null`) the format `name` on `node`.
    pub fn format(&self, node: Element, name: &str, value: Option<String>) {
        self.inner.format(&DomNode(node), name, value.as_deref());
    }
}

/// `FormatRegistry` over a host registry object.
struct HostRegistry<'a> {
    host: &'a JsFormatHost,
}

impl FormatRegistry<DomNode> for HostRegistry<'_> {
    fn register_format(&mut self, kind: MediaKind, format: Box<dyn NodeFormat<DomNode>>) {
        let format = MediaNodeFormat {
            kind,
            inner: format,
        };
        if let Err(e) = self.host.register_format(kind.name(), format) {
            tracing::warn!(
                target: "weaver::media",
                kind = kind.name(),
                "registerFormat threw: {e:?}"
            );
        }
    }

    fn register_attribute(&mut self, name: &str, attribute: &str) {
        if !has_method(self.host, "registerAttribute") {
            tracing::debug!(target: "weaver::media", name, "host has no attribute formats");
            return;
        }
        if let Err(e) = self.host.register_attribute(name, attribute) {
            tracing::warn!(target: "weaver::media", name, "registerAttribute threw: {e:?}");
        }
    }

    fn register_module(&mut self, name: &str) {
        if let Err(e) = self.host.register_module(name) {
            tracing::warn!(target: "weaver::media", name, "registerModule threw: {e:?}");
        }
    }
}

/// Install the media formats, the class attribute format and the overlay
/// module name with the host editor.
#[wasm_bindgen(js_name = registerMediaFormats)]
pub fn register_media_formats(host: &JsFormatHost) {
    let mut registry = HostRegistry { host };
    weaver_media_browser::register_media_formats(&mut registry, |kind| {
        HostFormat::for_kind(host, kind)
    });
}

/// Name to register the overlay module under with the host editor.
#[wasm_bindgen(js_name = moduleName)]
pub fn module_name() -> String {
    MODULE_NAME.to_string()
}

/// Attributes carried through serialization (`alt`, `height`, `width`,
/// `style`).
#[wasm_bindgen(js_name = mediaAttributes)]
pub fn media_attributes() -> Vec<String> {
    MEDIA_ATTRIBUTES.iter().map(|a| a.to_string()).collect()
}

/// Passthrough attributes present on `element`, as a plain object.
#[wasm_bindgen(js_name = mediaFormats)]
pub fn media_formats(element: &Element) -> Result<JsValue, JsError> {
    let formats = weaver_media_browser::media_formats(element);
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    formats
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Set (non-empty `value`) or remove a passthrough attribute on `element`.
///
/// Returns false if `element` isn't an image or video, or `name` isn't a
/// passthrough attribute, so the caller can fall back to its base format.
#[wasm_bindgen(js_name = applyMediaFormat)]
pub fn apply_media_format(element: &Element, name: &str, value: Option<String>) -> bool {
    weaver_media_browser::apply_media_format(element, name, value.as_deref())
}
