//! Overlay lifecycle and event coordination.
//!
//! The controller owns at most one `ActiveOverlay`. Everything that exists
//! only while an overlay is shown (the overlay element, the module instances,
//! the temporary listeners, the user-select override) lives inside it, so
//! dropping the active state is a complete teardown.
//!
//! # State machine
//!
//! | State     | Event                              | Next      |
//! |-----------|------------------------------------|-----------|
//! | Inactive  | click on media node N              | Active(N) |
//! | Active(A) | click on A                         | Active(A) |
//! | Active(A) | click on media node B              | Active(B) |
//! | Active(A) | click elsewhere in the surface     | Inactive  |
//! | Active(A) | surface scroll                     | Inactive  |
//! | Active(A) | key-up (Delete/Backspace delete A) | Inactive  |
//! | Active(A) | surface input                      | Inactive  |
//! | Active(A) | unhandled click on the overlay     | Inactive  |

use crate::error::OverlayError;
use crate::events::{EventKind, EventResult, ListenScope, SurfaceEvent, is_deletion_key};
use crate::guard::UserSelectGuard;
use crate::module::{MediaModule, ModuleContext, ModuleRegistry, ModuleRequests};
use crate::options::{OptionOverrides, OverlayOptions};
use crate::platform::OverlayPlatform;
use crate::types::Rect;
use smol_str::SmolStr;

/// Horizontal nudge applied to the overlay so its border lines up with the
/// target's edge.
const OVERLAY_LEFT_NUDGE: f64 = -1.0;

/// Drives the media overlay for one host surface.
pub struct OverlayController<P: OverlayPlatform + 'static> {
    platform: P,
    options: OverlayOptions,
    registry: ModuleRegistry<P>,
    active: Option<ActiveOverlay<P>>,
    /// Surface click and scroll; held for the controller's lifetime.
    _permanent: [P::Listener; 2],
}

/// State that exists only while an overlay is shown.
struct ActiveOverlay<P: OverlayPlatform + 'static> {
    target: P::Element,
    overlay: P::Element,
    modules: Vec<Box<dyn MediaModule<P>>>,
    /// Document key-up, surface input, overlay pointer-down and click.
    _listeners: Vec<P::Listener>,
    _user_select: UserSelectGuard<P>,
}

impl<P: OverlayPlatform + 'static> OverlayController<P> {
    /// Attach to the platform's surface with the built-in modules.
    pub fn new(platform: P, overrides: OptionOverrides) -> Self {
        Self::with_registry(platform, overrides, ModuleRegistry::with_builtins())
    }

    /// Attach to the platform's surface, resolving module names against
    /// `registry`.
    pub fn with_registry(
        platform: P,
        overrides: OptionOverrides,
        registry: ModuleRegistry<P>,
    ) -> Self {
        let options = OverlayOptions::from_overrides(overrides);

        platform.disable_native_resizing();
        platform.ensure_positioned_container();
        let permanent = [
            platform.listen(ListenScope::Surface, EventKind::Click),
            platform.listen(ListenScope::Surface, EventKind::Scroll),
        ];

        tracing::debug!(
            target: "weaver::media",
            modules = ?options.modules,
            "media overlay attached"
        );

        Self {
            platform,
            options,
            registry,
            active: None,
            _permanent: permanent,
        }
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The media element the overlay is attached to, if any.
    pub fn target(&self) -> Option<&P::Element> {
        self.active.as_ref().map(|a| &a.target)
    }

    /// The overlay element, if one is shown.
    pub fn overlay(&self) -> Option<&P::Element> {
        self.active.as_ref().map(|a| &a.overlay)
    }

    /// Register (or replace) a module factory. Takes effect on the next
    /// activation; the name must also appear in the configured module list.
    pub fn register_module<F>(&mut self, name: impl Into<SmolStr>, factory: F)
    where
        F: Fn() -> Box<dyn MediaModule<P>> + 'static,
    {
        let name = name.into();
        tracing::debug!(target: "weaver::media", %name, "module registered");
        self.registry.register(name, factory);
    }

    /// Names of the active module instances, in order.
    pub fn module_names(&self) -> Vec<String> {
        self.active
            .as_ref()
            .map(|a| a.modules.iter().map(|m| m.name().to_string()).collect())
            .unwrap_or_default()
    }

    /// Show the overlay on `target`, replacing any overlay on another element.
    pub fn activate(&mut self, target: P::Element) {
        if self.target() == Some(&target) {
            return;
        }
        self.deactivate();

        let active = match self.show_overlay(target) {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(target: "weaver::media", "overlay not shown: {e}");
                return;
            }
        };
        tracing::debug!(target: "weaver::media", target = ?active.target, "overlay activated");
        self.active = Some(active);

        self.initialize_modules();
        self.refresh_geometry();
    }

    fn show_overlay(&self, target: P::Element) -> Result<ActiveOverlay<P>, OverlayError> {
        let platform = &self.platform;

        platform.clear_selection();
        let user_select = UserSelectGuard::acquire(platform);

        let overlay = platform.create_element("div")?;
        platform.apply_styles(&overlay, &self.options.overlay_styles);
        platform.append_child(&platform.container(), &overlay)?;

        let listeners = vec![
            platform.listen(ListenScope::Document, EventKind::KeyUp),
            platform.listen(ListenScope::Surface, EventKind::Input),
            platform.listen(ListenScope::Element(&overlay), EventKind::PointerDown),
            platform.listen(ListenScope::Element(&overlay), EventKind::Click),
        ];

        Ok(ActiveOverlay {
            target,
            overlay,
            modules: Vec::new(),
            _listeners: listeners,
            _user_select: user_select,
        })
    }

    /// Construct a fresh module set and run each module's create hook.
    fn initialize_modules(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        for name in &self.options.modules {
            match self.registry.build(name) {
                Ok(module) => active.modules.push(module),
                Err(e) => tracing::warn!(target: "weaver::media", "{e}"),
            }
        }

        let requests = self.run_modules(|module, ctx| module.on_create(ctx));
        if requests.deactivate {
            self.deactivate();
        }
    }

    /// Tear down the overlay. No-op if none is shown.
    pub fn deactivate(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        {
            let mut ctx = ModuleContext::new(
                &self.platform,
                &active.overlay,
                &active.target,
                &self.options,
            );
            for module in active.modules.iter_mut() {
                module.on_destroy(&mut ctx);
            }
        }
        active.modules.clear();

        let ActiveOverlay {
            target,
            overlay,
            modules: _,
            _listeners: listeners,
            _user_select: user_select,
        } = active;
        drop(listeners);
        self.platform.remove_element(&overlay);
        drop(user_select);

        tracing::debug!(target: "weaver::media", target = ?target, "overlay deactivated");
    }

    /// Move the overlay onto the target's current box and let every module
    /// reposition itself. A target that has left the document deactivates
    /// the overlay.
    pub fn refresh_geometry(&mut self) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let platform = &self.platform;

        if !platform.is_connected(&active.target) {
            tracing::debug!(target: "weaver::media", "target detached, deactivating");
            self.deactivate();
            return;
        }

        let geometry = overlay_geometry(
            platform.bounding_rect(&active.target),
            platform.bounding_rect(&platform.container()),
            platform.container_scroll(),
        );
        tracing::trace!(target: "weaver::media", ?geometry, "overlay repositioned");

        let overlay = &active.overlay;
        platform.set_style_property(overlay, "left", &format!("{}px", geometry.x));
        platform.set_style_property(overlay, "top", &format!("{}px", geometry.y));
        platform.set_style_property(overlay, "width", &format!("{}px", geometry.width));
        platform.set_style_property(overlay, "height", &format!("{}px", geometry.height));

        let requests = self.run_modules(|module, ctx| module.on_update(ctx));
        if requests.deactivate {
            self.deactivate();
        }
    }

    /// Feed a platform event through the state machine.
    pub fn handle_event(&mut self, event: SurfaceEvent<P::Element>) -> EventResult {
        match event {
            SurfaceEvent::Click { target } => {
                if !self.platform.is_media(&target) {
                    self.deactivate();
                    return EventResult::PassThrough;
                }
                if self.target() == Some(&target) {
                    return EventResult::PassThrough;
                }
                self.activate(target);
                EventResult::Handled
            }
            SurfaceEvent::Scroll | SurfaceEvent::Input => {
                self.deactivate();
                EventResult::PassThrough
            }
            SurfaceEvent::KeyUp { key_code } => {
                let Some(target) = self.target().cloned() else {
                    return EventResult::PassThrough;
                };
                if is_deletion_key(key_code) {
                    tracing::debug!(target: "weaver::media", ?target, "deleting target");
                    self.platform.delete_node(&target);
                }
                self.deactivate();
                EventResult::PassThrough
            }
            SurfaceEvent::OverlayPointerDown { .. }
            | SurfaceEvent::OverlayClick { .. }
            | SurfaceEvent::PointerMove { .. }
            | SurfaceEvent::PointerUp => self.dispatch_to_modules(event),
        }
    }

    /// Offer an overlay/drag event to each module in order. An overlay click
    /// no module claims is a click on the overlay background.
    fn dispatch_to_modules(&mut self, event: SurfaceEvent<P::Element>) -> EventResult {
        if self.active.is_none() {
            return EventResult::PassThrough;
        }

        let mut result = EventResult::PassThrough;
        let requests = self.run_modules(|module, ctx| {
            if !result.is_handled() {
                result = module.on_event(ctx, &event);
            }
        });

        if requests.deactivate
            || (!result.is_handled() && matches!(event, SurfaceEvent::OverlayClick { .. }))
        {
            self.deactivate();
        } else if requests.update {
            self.refresh_geometry();
        }
        result
    }

    /// Run `f` over every active module with a shared context and collect
    /// what the modules asked for.
    fn run_modules<F>(&mut self, mut f: F) -> ModuleRequests
    where
        F: FnMut(&mut Box<dyn MediaModule<P>>, &mut ModuleContext<'_, P>),
    {
        let Some(active) = self.active.as_mut() else {
            return ModuleRequests::default();
        };
        let mut ctx = ModuleContext::new(
            &self.platform,
            &active.overlay,
            &active.target,
            &self.options,
        );
        for module in active.modules.iter_mut() {
            f(module, &mut ctx);
        }
        ctx.requests()
    }
}

impl<P: OverlayPlatform + 'static> Drop for OverlayController<P> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Overlay box in the container's coordinate space, given the target and
/// container boxes in viewport space and the container's scroll offset.
pub fn overlay_geometry(target: Rect, container: Rect, scroll: (f64, f64)) -> Rect {
    Rect::new(
        target.x - container.x + OVERLAY_LEFT_NUDGE + scroll.0,
        target.y - container.y + scroll.1,
        target.width,
        target.height,
    )
}
