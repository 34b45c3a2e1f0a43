//! Platform-neutral event vocabulary.
//!
//! Platforms register listeners on request (see `OverlayPlatform::listen`)
//! and translate the native events they receive into `SurfaceEvent`s, which
//! are fed to `OverlayController::handle_event`.

/// Native event kinds the controller and modules subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary-button press and release (activation signal).
    Click,
    PointerDown,
    PointerMove,
    PointerUp,
    Scroll,
    KeyUp,
    Input,
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenScope<'a, E> {
    /// The host's editable surface.
    Surface,
    /// The whole document.
    Document,
    /// A specific element (the overlay).
    Element(&'a E),
}

/// Event delivered to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent<E> {
    /// Click inside the host surface.
    Click { target: E },
    /// The host surface scrolled.
    Scroll,
    /// A key was released anywhere in the document.
    KeyUp { key_code: u32 },
    /// The host surface content changed.
    Input,
    /// Pointer pressed inside the overlay.
    OverlayPointerDown { target: E, x: f64 },
    /// Click inside the overlay.
    OverlayClick { target: E },
    /// Pointer moved anywhere in the document.
    PointerMove { x: f64 },
    /// Pointer released anywhere in the document.
    PointerUp,
}

/// Result of handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled, prevent the default browser behavior.
    Handled,
    /// Let the platform apply its default behavior.
    PassThrough,
}

impl EventResult {
    pub fn is_handled(self) -> bool {
        self == EventResult::Handled
    }
}

pub const KEY_BACKSPACE: u32 = 8;
pub const KEY_DELETE: u32 = 46;

/// Keys that delete the selected media node.
pub fn is_deletion_key(key_code: u32) -> bool {
    key_code == KEY_DELETE || key_code == KEY_BACKSPACE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_keys() {
        assert!(is_deletion_key(8));
        assert!(is_deletion_key(46));
        assert!(!is_deletion_key(13));
        assert!(!is_deletion_key(37));
    }
}
