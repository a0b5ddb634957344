//! Global function-key hotkeys.
//!
//! A process-wide key-down interceptor maps F1–F12 to slot activations on
//! the current page. The interceptor itself never touches board state: it
//! forwards a [`HotkeyActivation`] through a [`HotkeySink`] to the control
//! loop that owns the board and consumes the key.
//!
//! Backends:
//! - `WindowsHookBackend` (Windows only): low-level keyboard hook.
//! - [`ManualHotkeyBackend`]: keys are injected through a [`KeySynthesizer`].
//! - [`UnsupportedBackend`]: refuses registration, leaving the board
//!   without global hotkeys.

mod dispatcher;
mod error;
mod keys;
mod manual;
#[cfg(windows)]
mod windows;

pub use dispatcher::{HotkeyBackend, HotkeyDispatcher, HotkeyHandle, UnsupportedBackend};
pub use error::{HotkeyError, Result};
pub use keys::{
    HOTKEY_SLOTS, HotkeyActivation, HotkeySink, Key, KeyDisposition, hotkey_index, route_key_down,
};
pub use manual::{KeySynthesizer, ManualHotkeyBackend};
#[cfg(windows)]
pub use windows::WindowsHookBackend;
