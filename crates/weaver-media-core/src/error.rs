//! Error types for overlay operations.

use thiserror::Error;

/// A platform (DOM) call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("platform error: {0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Errors that can occur while building an overlay.
///
/// None of these escape an event handler; the controller logs them and
/// stays (or falls back to) inactive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OverlayError {
    /// Creating or mounting an overlay element failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A configured module identifier has no registered factory.
    #[error("unknown overlay module: {0}")]
    UnknownModule(String),
}
