//! Scoped document-wide style overrides.
//!
//! The overlay suppresses text selection while it is shown and a drag forces
//! the resize cursor on the whole document. Both must be restored on every
//! exit path, so each override lives in a guard that restores the default
//! when dropped.

use crate::platform::OverlayPlatform;

/// Suppresses text selection on the surface and document root until dropped.
pub struct UserSelectGuard<P: OverlayPlatform> {
    platform: P,
}

impl<P: OverlayPlatform> UserSelectGuard<P> {
    pub fn acquire(platform: &P) -> Self {
        platform.set_user_select("none");
        Self {
            platform: platform.clone(),
        }
    }
}

impl<P: OverlayPlatform> Drop for UserSelectGuard<P> {
    fn drop(&mut self) {
        self.platform.set_user_select("");
    }
}

/// Forces a drag cursor on the document body and the target until dropped.
pub struct DragCursorGuard<P: OverlayPlatform> {
    platform: P,
    target: P::Element,
}

impl<P: OverlayPlatform> DragCursorGuard<P> {
    pub fn acquire(platform: &P, target: &P::Element, cursor: &str) -> Self {
        platform.set_drag_cursor(target, cursor);
        Self {
            platform: platform.clone(),
            target: target.clone(),
        }
    }
}

impl<P: OverlayPlatform> Drop for DragCursorGuard<P> {
    fn drop(&mut self) {
        self.platform.set_drag_cursor(&self.target, "");
    }
}
