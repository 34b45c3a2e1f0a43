//! Host editor callbacks supplied from JavaScript.

use wasm_bindgen::prelude::*;
use web_sys::Element;
use weaver_media_browser::{DomHost, HostEditor};

#[wasm_bindgen(typescript_custom_section)]
const MEDIA_HOST_TS: &'static str = r#"
/** Hooks into the host editor's document model. Both are optional. */
export interface MediaHost {
    /** Delete the embed rendered by `element` from the document. */
    deleteEmbed?(element: Element): void;
    /** Collapse or clear the editor selection. */
    clearSelection?(): void;
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "MediaHost")]
    pub type JsHostEditor;

    #[wasm_bindgen(method, catch, js_name = deleteEmbed)]
    fn delete_embed(this: &JsHostEditor, element: &Element) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = clearSelection)]
    fn clear_selection(this: &JsHostEditor) -> Result<(), JsValue>;
}

/// Whether `object` has a callable property `name`.
pub(crate) fn has_method(object: &JsValue, name: &str) -> bool {
    js_sys::Reflect::get(object, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

/// `HostEditor` backed by a JavaScript object. Hooks the object doesn't
/// provide fall back to editing the DOM directly.
pub struct JsHost {
    host: JsHostEditor,
}

impl JsHost {
    pub fn new(host: JsHostEditor) -> Self {
        Self { host }
    }

    fn provides(&self, hook: &str) -> bool {
        has_method(&self.host, hook)
    }
}

impl HostEditor for JsHost {
    fn clear_selection(&self) {
        if !self.provides("clearSelection") {
            DomHost.clear_selection();
            return;
        }
        if let Err(e) = self.host.clear_selection() {
            tracing::warn!(target: "weaver::media", "host clearSelection threw: {e:?}");
        }
    }

    fn delete_embed(&self, element: &Element) {
        if !self.provides("deleteEmbed") {
            DomHost.delete_embed(element);
            return;
        }
        if let Err(e) = self.host.delete_embed(element) {
            tracing::warn!(target: "weaver::media", "host deleteEmbed threw: {e:?}");
        }
    }
}
