//! Feature module contract and registry.
//!
//! A module is a pluggable unit of overlay UI (size readout, resize handles,
//! alignment toolbar). The controller constructs a fresh set of modules on
//! every activation, in the order the options list them, and drives them
//! through `on_create` -> `on_update`* -> `on_destroy`.
//!
//! Modules never call back into the controller. Instead they record requests
//! on the `ModuleContext` they are handed, and the controller acts on them
//! once the hook returns.

use std::rc::Rc;

use smol_str::SmolStr;

use crate::error::OverlayError;
use crate::events::{EventResult, SurfaceEvent};
use crate::modules::{DisplaySize, Resize, Toolbar};
use crate::options::OverlayOptions;
use crate::platform::OverlayPlatform;

/// Everything a module hook may touch while an overlay is active.
pub struct ModuleContext<'a, P: OverlayPlatform> {
    pub platform: &'a P,
    /// The shared overlay element modules attach their UI to.
    pub overlay: &'a P::Element,
    /// The media element being edited.
    pub target: &'a P::Element,
    pub options: &'a OverlayOptions,
    requests: ModuleRequests,
}

/// Follow-up work requested by module hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModuleRequests {
    pub update: bool,
    pub deactivate: bool,
}

impl<'a, P: OverlayPlatform> ModuleContext<'a, P> {
    pub fn new(
        platform: &'a P,
        overlay: &'a P::Element,
        target: &'a P::Element,
        options: &'a OverlayOptions,
    ) -> Self {
        Self {
            platform,
            overlay,
            target,
            options,
            requests: ModuleRequests::default(),
        }
    }

    /// Ask for a geometry refresh once the current hook returns.
    pub fn request_update(&mut self) {
        self.requests.update = true;
    }

    /// Ask the controller to tear the overlay down.
    pub fn request_deactivate(&mut self) {
        self.requests.deactivate = true;
    }

    pub fn requests(&self) -> ModuleRequests {
        self.requests
    }
}

/// A pluggable overlay feature. All hooks default to no-ops.
pub trait MediaModule<P: OverlayPlatform> {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Build and attach this module's UI to the overlay.
    fn on_create(&mut self, _ctx: &mut ModuleContext<'_, P>) {}

    /// Reposition this module's UI after the overlay moved or the target
    /// changed size.
    fn on_update(&mut self, _ctx: &mut ModuleContext<'_, P>) {}

    /// Release anything this module acquired outside the overlay.
    fn on_destroy(&mut self, _ctx: &mut ModuleContext<'_, P>) {}

    /// Offered every overlay and drag event while the overlay is active.
    /// The first module to return `Handled` consumes the event.
    fn on_event(
        &mut self,
        _ctx: &mut ModuleContext<'_, P>,
        _event: &SurfaceEvent<P::Element>,
    ) -> EventResult {
        EventResult::PassThrough
    }
}

/// Constructs a fresh module instance.
pub type ModuleFactory<P> = Rc<dyn Fn() -> Box<dyn MediaModule<P>>>;

/// Maps module identifiers to factories.
///
/// Built-ins are registered under their type names (`DisplaySize`,
/// `Toolbar`, `Resize`) and kebab-case aliases. Custom modules are added with
/// `register` and then named in `OverlayOptions::modules` like any built-in.
pub struct ModuleRegistry<P: OverlayPlatform> {
    factories: Vec<(SmolStr, ModuleFactory<P>)>,
}

impl<P: OverlayPlatform + 'static> ModuleRegistry<P> {
    /// A registry with no modules at all.
    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// A registry with the built-in modules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin(&["DisplaySize", "display-size"], || {
            Box::new(DisplaySize::<P>::new())
        });
        registry.register_builtin(&["Toolbar", "toolbar"], || Box::new(Toolbar::<P>::new()));
        registry.register_builtin(&["Resize", "resize"], || Box::new(Resize::<P>::new()));
        registry
    }

    fn register_builtin(
        &mut self,
        names: &[&'static str],
        factory: fn() -> Box<dyn MediaModule<P>>,
    ) {
        for &name in names {
            let factory: ModuleFactory<P> = Rc::new(factory);
            self.factories.push((SmolStr::new_static(name), factory));
        }
    }

    /// Register (or replace) a factory under `name`.
    pub fn register<F>(&mut self, name: impl Into<SmolStr>, factory: F)
    where
        F: Fn() -> Box<dyn MediaModule<P>> + 'static,
    {
        let name = name.into();
        let factory: ModuleFactory<P> = Rc::new(factory);
        match self.factories.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = factory,
            None => self.factories.push((name, factory)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|(n, _)| n == name)
    }

    /// Construct a new instance of the module registered under `name`.
    pub fn build(&self, name: &str) -> Result<Box<dyn MediaModule<P>>, OverlayError> {
        self.factories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| OverlayError::UnknownModule(name.to_string()))
    }
}

impl<P: OverlayPlatform + 'static> Default for ModuleRegistry<P> {
    fn default() -> Self {
        Self::with_builtins()
    }
}
