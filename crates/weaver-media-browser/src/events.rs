//! Browser event handling for the overlay.
//!
//! Maps platform-neutral `EventKind`s to DOM event names and listener phases,
//! and translates the native events back into `SurfaceEvent`s.

use gloo_events::EventListenerPhase;
use wasm_bindgen::JsCast;
use weaver_media_core::{EventKind, ListenScope, SurfaceEvent};

/// Where a listener was installed. Decides how its events are interpreted:
/// a click on the editor surface activates, a click on the overlay is routed
/// to the modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerOrigin {
    Surface,
    Document,
    Overlay,
}

impl<E> From<&ListenScope<'_, E>> for ListenerOrigin {
    fn from(scope: &ListenScope<'_, E>) -> Self {
        match scope {
            ListenScope::Surface => ListenerOrigin::Surface,
            ListenScope::Document => ListenerOrigin::Document,
            ListenScope::Element(_) => ListenerOrigin::Overlay,
        }
    }
}

/// DOM event name for `kind`.
///
/// Pointer events use the mouse family; the overlay only ever reacts to the
/// primary mouse button flow.
pub fn event_type(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Click => "click",
        EventKind::PointerDown => "mousedown",
        EventKind::PointerMove => "mousemove",
        EventKind::PointerUp => "mouseup",
        EventKind::Scroll => "scroll",
        EventKind::KeyUp => "keyup",
        EventKind::Input => "input",
    }
}

/// Key-up and input are watched in the capture phase so the host editor
/// can't swallow them before the overlay sees them.
pub fn listener_phase(kind: EventKind) -> EventListenerPhase {
    match kind {
        EventKind::KeyUp | EventKind::Input => EventListenerPhase::Capture,
        _ => EventListenerPhase::Bubble,
    }
}

fn event_element(event: &web_sys::Event) -> Option<web_sys::Element> {
    event.target()?.dyn_into::<web_sys::Element>().ok()
}

fn client_x(event: &web_sys::Event) -> Option<f64> {
    event
        .dyn_ref::<web_sys::MouseEvent>()
        .map(|e| e.client_x() as f64)
}

/// Translate a native event received by a listener of `kind` at `origin`.
///
/// Returns `None` for events the overlay has no interpretation for (e.g. a
/// click whose target isn't an element).
pub fn translate_event(
    origin: ListenerOrigin,
    kind: EventKind,
    event: &web_sys::Event,
) -> Option<SurfaceEvent<web_sys::Element>> {
    let translated = match (origin, kind) {
        (ListenerOrigin::Overlay, EventKind::Click) => SurfaceEvent::OverlayClick {
            target: event_element(event)?,
        },
        (_, EventKind::Click) => SurfaceEvent::Click {
            target: event_element(event)?,
        },
        (ListenerOrigin::Overlay, EventKind::PointerDown) => SurfaceEvent::OverlayPointerDown {
            target: event_element(event)?,
            x: client_x(event)?,
        },
        (_, EventKind::PointerDown) => return None,
        (_, EventKind::PointerMove) => SurfaceEvent::PointerMove {
            x: client_x(event)?,
        },
        (_, EventKind::PointerUp) => SurfaceEvent::PointerUp,
        (_, EventKind::Scroll) => SurfaceEvent::Scroll,
        (_, EventKind::KeyUp) => SurfaceEvent::KeyUp {
            key_code: event.dyn_ref::<web_sys::KeyboardEvent>()?.key_code(),
        },
        (_, EventKind::Input) => SurfaceEvent::Input,
    };
    Some(translated)
}
