//! MediaResize - the overlay wrapper for JavaScript.

use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use weaver_media_browser::{DomHost, HostEditor, MediaOverlay, OptionOverrides};

use crate::host::{JsHost, JsHostEditor};
use crate::module::js_module_factory;
use crate::types::{MediaResizeOptions, ResolvedMediaOptions};

/// Replace function entries in `options.modules` with the name each is
/// registered under: the function's own name, or `custom-<index>` for
/// anonymous ones.
fn split_module_factories(options: JsValue) -> (JsValue, Vec<(String, Function)>) {
    let modules = match Reflect::get(&options, &JsValue::from_str("modules")) {
        Ok(modules) if Array::is_array(&modules) => Array::from(&modules),
        _ => return (options, Vec::new()),
    };

    let mut factories = Vec::new();
    let names = Array::new();
    for (index, entry) in modules.iter().enumerate() {
        match entry.dyn_into::<Function>() {
            Ok(factory) => {
                let name = String::from(factory.name());
                let name = if name.is_empty() {
                    format!("custom-{index}")
                } else {
                    name
                };
                names.push(&JsValue::from_str(&name));
                factories.push((name, factory));
            }
            Err(entry) => {
                names.push(&entry);
            }
        }
    }
    if factories.is_empty() {
        return (options, factories);
    }

    let copy = Object::assign(&Object::new(), options.unchecked_ref());
    // Defining a property on a fresh plain object can't fail.
    let _ = Reflect::set(&copy, &JsValue::from_str("modules"), &names);
    (copy.into(), factories)
}

/// Resize/align overlay for one editor root.
///
/// Clicking an image or video inside `root` shows the overlay; `destroy()`
/// removes every listener and element it added.
#[wasm_bindgen]
pub struct MediaResize {
    inner: Option<MediaOverlay>,
}

#[wasm_bindgen]
impl MediaResize {
    /// Attach to an editor root element.
    ///
    /// `options` is a `MediaResizeOptions` object (or undefined for
    /// defaults); `host` is an optional `MediaHost`. Entries of
    /// `options.modules` may be module factories as well as names.
    #[wasm_bindgen(constructor)]
    pub fn new(
        root: Element,
        options: JsValue,
        host: Option<JsHostEditor>,
    ) -> Result<MediaResize, JsError> {
        let (options, factories) = split_module_factories(options);
        let overrides: OptionOverrides = if options.is_undefined() || options.is_null() {
            OptionOverrides::default()
        } else {
            serde_wasm_bindgen::from_value::<MediaResizeOptions>(options)
                .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?
                .into()
        };
        let host: Rc<dyn HostEditor> = match host {
            Some(host) => Rc::new(JsHost::new(host)),
            None => Rc::new(DomHost),
        };

        let overlay = MediaOverlay::with_host(root, overrides, host);
        for (name, factory) in factories {
            overlay.register_module(name.clone(), js_module_factory(name, factory));
        }

        Ok(Self {
            inner: Some(overlay),
        })
    }

    fn overlay(&self) -> Result<&MediaOverlay, JsError> {
        self.inner
            .as_ref()
            .ok_or_else(|| JsError::new("MediaResize has been destroyed"))
    }

    /// Show the overlay on a media element.
    pub fn activate(&self, element: Element) -> Result<(), JsError> {
        self.overlay()?.activate(element);
        Ok(())
    }

    /// Register a module factory under `name`. Used from the next activation
    /// on, when `name` is in the configured module list.
    #[wasm_bindgen(js_name = registerModule)]
    pub fn register_module(&self, name: String, factory: Function) -> Result<(), JsError> {
        self.overlay()?
            .register_module(name.clone(), js_module_factory(name, factory));
        Ok(())
    }

    /// Hide the overlay, if shown.
    pub fn deactivate(&self) -> Result<(), JsError> {
        self.overlay()?.deactivate();
        Ok(())
    }

    /// Re-sync the overlay after the host re-rendered or resized content.
    pub fn refresh(&self) -> Result<(), JsError> {
        self.overlay()?.refresh();
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.as_ref().is_some_and(|o| o.is_active())
    }

    /// The media element the overlay is on, if any.
    #[wasm_bindgen(getter)]
    pub fn target(&self) -> Option<Element> {
        self.inner.as_ref().and_then(|o| o.target())
    }

    /// The resolved configuration (defaults merged with the given options).
    #[wasm_bindgen(js_name = getOptions)]
    pub fn get_options(&self) -> Result<JsValue, JsError> {
        let resolved = ResolvedMediaOptions::from(&self.overlay()?.options());
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        resolved
            .serialize(&serializer)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Detach from the editor root. Further calls throw.
    pub fn destroy(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!(target: "weaver::media", "media overlay destroyed");
        }
    }
}
