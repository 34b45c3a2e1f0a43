//! WASM bindings for the weaver media overlay.
//!
//! Provides the resize/align overlay for images and videos embedded in a
//! JavaScript rich-text editor, custom overlay modules written in JavaScript,
//! and the attribute passthrough the host's image/video formats need so size
//! and alignment survive serialization.

mod formats;
mod host;
mod module;
mod overlay;
mod types;

pub use formats::*;
pub use host::*;
pub use module::*;
pub use overlay::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use tracing::Level;
        use tracing::subscriber::set_global_default;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        // The host page may already have installed a subscriber.
        let _ = set_global_default(Registry::default().with(wasm_layer));
    }
}
