//! A controller wired to live DOM listeners.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Element;
use weaver_media_core::{
    EventResult, MediaModule, ModuleRegistry, OptionOverrides, OverlayController,
    OverlayOptions, OverlayPlatform, SmolStr,
};

use crate::platform::{BrowserPlatform, DomHost, EventSink, HostEditor};

type SharedController = Rc<RefCell<OverlayController<BrowserPlatform>>>;

/// Media resize/align overlay attached to one editor surface.
///
/// Dropping it removes every listener it installed and tears down any shown
/// overlay.
pub struct MediaOverlay {
    controller: SharedController,
    sink: EventSink,
}

impl MediaOverlay {
    /// Attach to `surface` with the built-in modules, editing the DOM
    /// directly.
    pub fn attach(surface: Element, overrides: OptionOverrides) -> Self {
        Self::with_host(surface, overrides, Rc::new(DomHost))
    }

    /// Attach to `surface`, routing deletions and selection changes through
    /// `host`.
    pub fn with_host(
        surface: Element,
        overrides: OptionOverrides,
        host: Rc<dyn HostEditor>,
    ) -> Self {
        Self::with_registry(surface, overrides, host, ModuleRegistry::with_builtins())
    }

    pub fn with_registry(
        surface: Element,
        overrides: OptionOverrides,
        host: Rc<dyn HostEditor>,
        registry: ModuleRegistry<BrowserPlatform>,
    ) -> Self {
        let sink = EventSink::new();
        let platform = BrowserPlatform::new(surface, host, sink.clone());
        let controller = Rc::new(RefCell::new(OverlayController::with_registry(
            platform, overrides, registry,
        )));

        let weak = Rc::downgrade(&controller);
        sink.connect(move |event| {
            let Some(controller) = weak.upgrade() else {
                return EventResult::PassThrough;
            };
            // A DOM call made while handling an event can fire another
            // event synchronously; the outer dispatch already owns the state.
            let Ok(mut controller) = controller.try_borrow_mut() else {
                tracing::trace!(target: "weaver::media", ?event, "nested event ignored");
                return EventResult::PassThrough;
            };
            controller.handle_event(event)
        });

        Self { controller, sink }
    }

    /// Run `f` on the controller unless a module hook further up the stack
    /// is already driving it.
    fn with_controller(&self, f: impl FnOnce(&mut OverlayController<BrowserPlatform>)) {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => f(&mut controller),
            Err(_) => {
                tracing::warn!(target: "weaver::media", "call from inside a module hook ignored")
            }
        }
    }

    /// Show the overlay on `target`. Ignored for non-media elements.
    pub fn activate(&self, target: Element) {
        self.with_controller(|controller| {
            if controller.platform().is_media(&target) {
                controller.activate(target);
            } else {
                tracing::debug!(target: "weaver::media", "activate ignored for non-media element");
            }
        });
    }

    /// Register (or replace) a module factory for later activations.
    pub fn register_module<F>(&self, name: impl Into<SmolStr>, factory: F)
    where
        F: Fn() -> Box<dyn MediaModule<BrowserPlatform>> + 'static,
    {
        self.with_controller(|controller| controller.register_module(name, factory));
    }

    pub fn deactivate(&self) {
        self.with_controller(|controller| controller.deactivate());
    }

    /// Re-sync the overlay with the target, e.g. after the host re-rendered.
    pub fn refresh(&self) {
        self.with_controller(|controller| controller.refresh_geometry());
    }

    pub fn is_active(&self) -> bool {
        self.controller.borrow().is_active()
    }

    pub fn target(&self) -> Option<Element> {
        self.controller.borrow().target().cloned()
    }

    pub fn overlay(&self) -> Option<Element> {
        self.controller.borrow().overlay().cloned()
    }

    pub fn options(&self) -> OverlayOptions {
        self.controller.borrow().options().clone()
    }
}

impl Drop for MediaOverlay {
    fn drop(&mut self) {
        self.sink.disconnect();
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.deactivate();
        }
    }
}
