//! Browser DOM layer for the weaver media overlay.
//!
//! This crate implements `OverlayPlatform` over `web-sys`, translating native
//! DOM events into `SurfaceEvent`s for the core controller. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `platform`: `BrowserPlatform`, the DOM-backed `OverlayPlatform`
//! - `events`: native event names, listener phases and translation
//! - `overlay`: `MediaOverlay`, a controller wired to live DOM listeners
//! - `format`: attribute passthrough over real DOM nodes
//!
//! # Re-exports
//!
//! This crate re-exports `weaver-media-core` for convenience, so consumers
//! only need to depend on `weaver-media-browser`.

// Re-export core crate
pub use weaver_media_core;
pub use weaver_media_core::*;

pub mod events;
pub mod format;
pub mod overlay;
pub mod platform;

pub use events::{ListenerOrigin, event_type, listener_phase, translate_event};
pub use format::{DomNode, apply_media_format, media_formats};
pub use overlay::MediaOverlay;
pub use platform::{BrowserPlatform, DomHost, EventSink, HostEditor};
