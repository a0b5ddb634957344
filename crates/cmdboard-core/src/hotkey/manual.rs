//! In-process backend driven by synthesized key events.

use std::sync::{Arc, Mutex, PoisonError};

use super::dispatcher::HotkeyBackend;
use super::error::{HotkeyError, Result};
use super::keys::{HotkeySink, Key, KeyDisposition, route_key_down};

type SharedSink = Arc<Mutex<Option<HotkeySink>>>;

/// Backend whose key events come from a paired [`KeySynthesizer`].
#[derive(Debug)]
pub struct ManualHotkeyBackend {
    sink: SharedSink,
    refuse: bool,
}

impl ManualHotkeyBackend {
    /// Creates the backend and the synthesizer that feeds it.
    pub fn new() -> (Self, KeySynthesizer) {
        let sink: SharedSink = Arc::default();
        (Self { sink: Arc::clone(&sink), refuse: false }, KeySynthesizer { sink })
    }

    /// A backend whose installation always fails, like an OS refusing the hook.
    pub fn refusing() -> Self {
        Self { sink: Arc::default(), refuse: true }
    }
}

impl HotkeyBackend for ManualHotkeyBackend {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn install(&mut self, sink: HotkeySink) -> Result<()> {
        if self.refuse {
            return Err(HotkeyError::Install("installation refused".to_string()));
        }
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);
        Ok(())
    }

    fn uninstall(&mut self) {
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Injects key-down events as if they came from the system.
#[derive(Debug, Clone)]
pub struct KeySynthesizer {
    sink: SharedSink,
}

impl KeySynthesizer {
    /// Delivers one key-down event; keys pass through while nothing is installed.
    pub fn key_down(&self, key: Key) -> KeyDisposition {
        match self.sink.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
            Some(sink) => route_key_down(key, sink),
            None => KeyDisposition::PassThrough,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
