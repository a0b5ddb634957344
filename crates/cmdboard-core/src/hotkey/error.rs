//! Error types for hotkey registration.

use thiserror::Error;

/// Result type for hotkey operations.
pub type Result<T> = std::result::Result<T, HotkeyError>;

/// Errors that can occur while installing the key interceptor.
#[derive(Debug, Error)]
pub enum HotkeyError {
    /// No global key interceptor exists for this platform.
    #[error("Global hotkeys are not supported on {0}")]
    Unsupported(String),

    /// The operating system refused to install the interceptor.
    #[error("Failed to install keyboard hook: {0}")]
    Install(String),

    /// The dispatcher already has an active registration.
    #[error("Hotkeys are already registered")]
    AlreadyRegistered,
}
