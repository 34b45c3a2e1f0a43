//! weaver-media-core: resize/align overlay logic for embedded media, without
//! framework dependencies.
//!
//! This crate provides:
//! - `OverlayPlatform` trait for DOM and host-editor abstraction
//! - `OverlayController<P>` - overlay lifecycle, event routing, geometry sync
//! - `MediaModule<P>` trait plus the built-in `DisplaySize`, `Resize` and
//!   `Toolbar` modules
//! - `OverlayOptions` - style/behavior configuration with deep-merged defaults
//! - `MediaFormat<F>` - attribute passthrough for image/video node formats

pub mod controller;
pub mod error;
pub mod events;
pub mod format;
pub mod guard;
pub mod module;
pub mod modules;
pub mod options;
pub mod platform;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::OverlayController;
pub use error::{OverlayError, PlatformError};
pub use events::{EventKind, EventResult, ListenScope, SurfaceEvent, is_deletion_key};
pub use format::{
    AttributeNode, CLASS_ATTRIBUTE_FORMAT, FormatRegistry, MEDIA_ATTRIBUTES, MODULE_NAME,
    MediaFormat, MediaKind, NodeFormat, PlainFormat, register_media_formats,
};
pub use guard::{DragCursorGuard, UserSelectGuard};
pub use module::{MediaModule, ModuleContext, ModuleFactory, ModuleRegistry};
pub use modules::{DisplaySize, Resize, Toolbar};
pub use options::{OptionOverrides, OverlayOptions, StyleMap};
pub use platform::OverlayPlatform;
pub use smol_str::SmolStr;
pub use types::{Alignment, Corner, Rect, Size};
