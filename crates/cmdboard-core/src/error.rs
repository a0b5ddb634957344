//! Error types for cmdboard.

use thiserror::Error;

use crate::config::ConfigError;
use crate::controller::ActivationError;
use crate::hotkey::HotkeyError;
use crate::store::StoreError;

/// Result type for cmdboard operations.
pub type Result<T> = std::result::Result<T, CmdboardError>;

/// Errors that can occur anywhere on the board.
#[derive(Error, Debug)]
pub enum CmdboardError {
    /// Slot store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Global hotkey error.
    #[error("Hotkey error: {0}")]
    Hotkey(#[from] HotkeyError),

    /// Slot activation was rejected.
    #[error("Activation error: {0}")]
    Activation(#[from] ActivationError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageNumber, SlotRef};

    #[test]
    fn test_activation_error_conversion() {
        let slot = SlotRef::new(PageNumber::FIRST, 3);
        let err: CmdboardError = ActivationError::EmptyCommand { slot }.into();
        assert!(matches!(err, CmdboardError::Activation(ActivationError::EmptyCommand { .. })));
        assert!(err.to_string().starts_with("Activation error: "));
    }

    #[test]
    fn test_config_error_display() {
        let err: CmdboardError = ConfigError::NotFound("x.toml".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Configuration file not found: x.toml");
    }
}
