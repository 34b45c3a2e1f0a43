//! Custom overlay modules written in JavaScript.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use weaver_media_browser::{BrowserPlatform, MediaModule, ModuleContext};

use crate::host::has_method;

#[wasm_bindgen(typescript_custom_section)]
const MEDIA_MODULE_TS: &'static str = r#"
/** What a custom module hook receives. */
export interface MediaModuleContext {
    /** The shared overlay element to attach UI to. */
    overlay: HTMLElement;
    /** The image or video being edited. */
    target: HTMLElement;
}

/** Follow-up a hook may ask for by returning it. */
export interface MediaModuleRequest {
    update?: boolean;
    deactivate?: boolean;
}

/** A custom overlay module. Every hook is optional. */
export interface MediaModule {
    name?: string;
    onCreate?(ctx: MediaModuleContext): MediaModuleRequest | void;
    onUpdate?(ctx: MediaModuleContext): MediaModuleRequest | void;
    onDestroy?(ctx: MediaModuleContext): MediaModuleRequest | void;
}

/** Builds a fresh module for each activation. */
export type MediaModuleFactory = () => MediaModule;
"#;

/// `MediaModule` backed by an object a JavaScript factory returned.
pub struct JsModule {
    name: String,
    module: JsValue,
}

impl JsModule {
    /// Call `factory` for a fresh module object. A factory that throws yields
    /// a module with no hooks.
    pub fn build(name: &str, factory: &Function) -> Self {
        let module = factory.call0(&JsValue::UNDEFINED).unwrap_or_else(|e| {
            tracing::warn!(target: "weaver::media", name, "module factory threw: {e:?}");
            JsValue::UNDEFINED
        });
        let name = Reflect::get(&module, &JsValue::from_str("name"))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| name.to_string());
        Self { name, module }
    }

    fn call_hook(&self, hook: &str, ctx: &mut ModuleContext<'_, BrowserPlatform>) {
        if !has_method(&self.module, hook) {
            return;
        }
        let Ok(function) = Reflect::get(&self.module, &JsValue::from_str(hook)) else {
            return;
        };
        let function: Function = function.unchecked_into();
        match function.call1(&self.module, &hook_context(ctx)) {
            Ok(request) => apply_request(&request, ctx),
            Err(e) => tracing::warn!(
                target: "weaver::media",
                module = %self.name,
                hook,
                "hook threw: {e:?}"
            ),
        }
    }
}

fn hook_context(ctx: &ModuleContext<'_, BrowserPlatform>) -> Object {
    let context = Object::new();
    for (key, value) in [("overlay", ctx.overlay), ("target", ctx.target)] {
        // Defining a property on a fresh plain object can't fail.
        let _ = Reflect::set(&context, &JsValue::from_str(key), value);
    }
    context
}

fn apply_request(request: &JsValue, ctx: &mut ModuleContext<'_, BrowserPlatform>) {
    if !request.is_object() {
        return;
    }
    let flag = |key: &str| {
        Reflect::get(request, &JsValue::from_str(key)).is_ok_and(|value| value.is_truthy())
    };
    if flag("update") {
        ctx.request_update();
    }
    if flag("deactivate") {
        ctx.request_deactivate();
    }
}

impl MediaModule<BrowserPlatform> for JsModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_create(&mut self, ctx: &mut ModuleContext<'_, BrowserPlatform>) {
        self.call_hook("onCreate", ctx);
    }

    fn on_update(&mut self, ctx: &mut ModuleContext<'_, BrowserPlatform>) {
        self.call_hook("onUpdate", ctx);
    }

    fn on_destroy(&mut self, ctx: &mut ModuleContext<'_, BrowserPlatform>) {
        self.call_hook("onDestroy", ctx);
    }
}

/// Factory closure for the module registry.
pub fn js_module_factory(
    name: String,
    factory: Function,
) -> impl Fn() -> Box<dyn MediaModule<BrowserPlatform>> + 'static {
    move || Box::new(JsModule::build(&name, &factory)) as Box<dyn MediaModule<BrowserPlatform>>
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::overlay::MediaResize;
    use wasm_bindgen_test::*;
    use web_sys::Element;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Container > editor root > img, attached to the body.
    fn editor() -> (Element, Element, Element) {
        let document = web_sys::window().unwrap().document().unwrap();
        let container = document.create_element("div").unwrap();
        let root = document.create_element("div").unwrap();
        let img = document.create_element("img").unwrap();
        root.append_child(&img).unwrap();
        container.append_child(&root).unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        (container, root, img)
    }

    fn eval(body: &str) -> JsValue {
        Function::new_no_args(body).call0(&JsValue::NULL).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_factory_in_options_runs_through_lifecycle() {
        let (container, root, img) = editor();
        let options = eval(
            r#"return { modules: ["Toolbar", function Stamp() {
                return {
                    onCreate(ctx) { ctx.overlay.setAttribute("data-stamp", "created"); },
                    onDestroy(ctx) { ctx.target.setAttribute("data-stamp", "destroyed"); },
                };
            }] };"#,
        );
        let resize = MediaResize::new(root, options, None).unwrap();

        resize.activate(img.clone()).unwrap();
        assert!(resize.is_active());
        let overlay = container.last_element_child().unwrap();
        assert_eq!(overlay.get_attribute("data-stamp"), Some("created".to_string()));
        // The toolbar still built its row.
        assert_eq!(overlay.child_element_count(), 1);

        resize.deactivate().unwrap();
        assert!(!resize.is_active());
        assert_eq!(img.get_attribute("data-stamp"), Some("destroyed".to_string()));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_registered_module_can_request_deactivate() {
        let (container, root, img) = editor();
        let options = eval(r#"return { modules: ["Veto"] };"#);
        let resize = MediaResize::new(root, options, None).unwrap();

        resize.activate(img.clone()).unwrap();
        assert!(resize.is_active());
        resize.deactivate().unwrap();

        let factory: Function = eval(
            r#"return () => ({ name: "veto", onCreate() { return { deactivate: true }; } });"#,
        )
        .unchecked_into();
        resize.register_module("Veto".to_string(), factory).unwrap();

        resize.activate(img).unwrap();
        assert!(!resize.is_active());
        assert_eq!(container.child_element_count(), 1);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_factory_that_throws_is_inert() {
        let (container, root, img) = editor();
        let options = eval(
            r#"return { modules: [function Broken() { throw new Error("nope"); }] };"#,
        );
        let mut resize = MediaResize::new(root, options, None).unwrap();

        resize.activate(img).unwrap();
        assert!(resize.is_active());
        resize.destroy();
        assert_eq!(container.child_element_count(), 1);
        container.remove();
    }
}
