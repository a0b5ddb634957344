//! Key codes and routing of key-down events to slot activations.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

/// Number of slots reachable by hotkey (F1–F12). The last four slots of a
/// page have no binding.
pub const HOTKEY_SLOTS: usize = 12;

/// Windows virtual-key code of F1; F1–F24 are contiguous.
const VK_F1: u32 = 0x70;
const VK_F24: u32 = 0x87;

/// A key as seen by the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Function key with its 1-based number (F1 = 1).
    Function(u8),
    /// Any other key, identified by its platform code.
    Other(u32),
}

impl Key {
    /// Maps a Windows virtual-key code.
    pub fn from_virtual_key(vk: u32) -> Self {
        if (VK_F1..=VK_F24).contains(&vk) {
            Self::Function((vk - VK_F1 + 1) as u8)
        } else {
            Self::Other(vk)
        }
    }
}

/// What the interceptor should do with the event it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Swallow the event; it was turned into an activation.
    Consume,
    /// Hand the event on unchanged.
    PassThrough,
}

/// Request to activate a slot of whatever page is current when the request
/// is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyActivation {
    /// 0-based slot index within the page.
    pub index: usize,
}

/// Slot index bound to `key`, if any.
pub fn hotkey_index(key: Key) -> Option<usize> {
    match key {
        Key::Function(n @ 1..=12) => Some(usize::from(n) - 1),
        _ => None,
    }
}

/// Where activations go. Delivery must be cheap and non-blocking, since it
/// runs inside the system's input path.
#[derive(Clone)]
pub struct HotkeySink(Arc<dyn Fn(HotkeyActivation) + Send + Sync>);

impl HotkeySink {
    pub fn new(deliver: impl Fn(HotkeyActivation) + Send + Sync + 'static) -> Self {
        Self(Arc::new(deliver))
    }

    /// Forwards activations into an unbounded channel.
    pub fn from_sender<T>(tx: UnboundedSender<T>) -> Self
    where
        T: From<HotkeyActivation> + Send + 'static,
    {
        Self::new(move |activation| {
            // The receiver is gone only during shutdown.
            let _ = tx.send(T::from(activation));
        })
    }

    pub fn deliver(&self, activation: HotkeyActivation) {
        (self.0)(activation);
    }
}

impl fmt::Debug for HotkeySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HotkeySink")
    }
}

/// Routes one key-down event.
///
/// F1–F12 become an activation for index 0–11 and are consumed; every other
/// key passes through.
pub fn route_key_down(key: Key, sink: &HotkeySink) -> KeyDisposition {
    match hotkey_index(key) {
        Some(index) => {
            sink.deliver(HotkeyActivation { index });
            KeyDisposition::Consume
        }
        None => KeyDisposition::PassThrough,
    }
}
