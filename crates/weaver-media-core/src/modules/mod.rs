//! Built-in overlay modules.

pub mod display_size;
pub mod resize;
pub mod toolbar;

pub use display_size::DisplaySize;
pub use resize::Resize;
pub use toolbar::Toolbar;
