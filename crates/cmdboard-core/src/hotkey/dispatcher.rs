//! Ownership of the process-wide key interceptor.

use tracing::{info, warn};

use super::error::{HotkeyError, Result};
use super::keys::HotkeySink;

/// A platform mechanism that can deliver key-down events.
pub trait HotkeyBackend: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Installs the interceptor; activations go to `sink`.
    fn install(&mut self, sink: HotkeySink) -> Result<()>;

    /// Removes the interceptor. Only called after a successful install.
    fn uninstall(&mut self);
}

/// Backend for platforms without a global key interceptor.
#[derive(Debug, Default)]
pub struct UnsupportedBackend;

impl HotkeyBackend for UnsupportedBackend {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn install(&mut self, _sink: HotkeySink) -> Result<()> {
        Err(HotkeyError::Unsupported(std::env::consts::OS.to_string()))
    }

    fn uninstall(&mut self) {}
}

/// Token returned by [`HotkeyDispatcher::register`].
///
/// An inactive handle stands for a registration that never happened; passing
/// it to [`HotkeyDispatcher::unregister`] does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyHandle(Option<u64>);

impl HotkeyHandle {
    pub const INACTIVE: Self = Self(None);

    pub fn is_active(self) -> bool {
        self.0.is_some()
    }
}

impl Default for HotkeyHandle {
    fn default() -> Self {
        Self::INACTIVE
    }
}

/// Installs and removes the global F1–F12 interceptor.
///
/// Dropping the dispatcher removes an active interceptor.
pub struct HotkeyDispatcher {
    backend: Box<dyn HotkeyBackend>,
    active: Option<u64>,
    next_id: u64,
}

impl HotkeyDispatcher {
    pub fn new(backend: Box<dyn HotkeyBackend>) -> Self {
        Self { backend, active: None, next_id: 1 }
    }

    /// Dispatcher over the native interceptor for this platform.
    pub fn platform_default() -> Self {
        #[cfg(windows)]
        {
            Self::new(Box::new(super::windows::WindowsHookBackend::new()))
        }
        #[cfg(not(windows))]
        {
            Self::new(Box::new(UnsupportedBackend))
        }
    }

    /// Installs the interceptor for the rest of the process lifetime.
    pub fn register(&mut self, sink: HotkeySink) -> Result<HotkeyHandle> {
        if self.active.is_some() {
            return Err(HotkeyError::AlreadyRegistered);
        }

        if let Err(e) = self.backend.install(sink) {
            warn!(backend = self.backend.name(), error = %e, "Global hotkeys unavailable");
            return Err(e);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.active = Some(id);
        info!(backend = self.backend.name(), "Global hotkeys registered (F1-F12)");
        Ok(HotkeyHandle(Some(id)))
    }

    /// Removes the interceptor. Idempotent; stale or inactive handles are
    /// ignored.
    pub fn unregister(&mut self, handle: HotkeyHandle) {
        if handle.0.is_none() || handle.0 != self.active {
            return;
        }
        self.backend.uninstall();
        self.active = None;
        info!(backend = self.backend.name(), "Global hotkeys unregistered");
    }

    pub fn is_registered(&self) -> bool {
        self.active.is_some()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

impl Drop for HotkeyDispatcher {
    fn drop(&mut self) {
        if self.active.take().is_some() {
            self.backend.uninstall();
        }
    }
}

impl std::fmt::Debug for HotkeyDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotkeyDispatcher")
            .field("backend", &self.backend.name())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::keys::{HotkeyActivation, Key, KeyDisposition};
    use crate::hotkey::manual::ManualHotkeyBackend;
    use tokio::sync::mpsc;

    fn sink() -> (HotkeySink, mpsc::UnboundedReceiver<HotkeyActivation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (HotkeySink::from_sender(tx), rx)
    }

    #[test]
    fn test_register_and_unregister() {
        let (backend, keys) = ManualHotkeyBackend::new();
        let mut dispatcher = HotkeyDispatcher::new(Box::new(backend));
        let (sink, mut rx) = sink();

        let handle = dispatcher.register(sink).unwrap();
        assert!(handle.is_active());
        assert!(keys.is_installed());
        assert_eq!(keys.key_down(Key::Function(5)), KeyDisposition::Consume);
        assert_eq!(rx.try_recv().unwrap().index, 4);

        dispatcher.unregister(handle);
        assert!(!dispatcher.is_registered());
        assert!(!keys.is_installed());
        assert_eq!(keys.key_down(Key::Function(5)), KeyDisposition::PassThrough);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let (backend, keys) = ManualHotkeyBackend::new();
        let mut dispatcher = HotkeyDispatcher::new(Box::new(backend));
        let handle = dispatcher.register(sink().0).unwrap();

        dispatcher.unregister(handle);
        dispatcher.unregister(handle);
        dispatcher.unregister(HotkeyHandle::INACTIVE);
        assert!(!keys.is_installed());
    }

    #[test]
    fn test_second_registration_is_rejected() {
        let (backend, _keys) = ManualHotkeyBackend::new();
        let mut dispatcher = HotkeyDispatcher::new(Box::new(backend));
        dispatcher.register(sink().0).unwrap();
        assert!(matches!(dispatcher.register(sink().0), Err(HotkeyError::AlreadyRegistered)));
    }

    #[test]
    fn test_stale_handle_does_not_remove_new_registration() {
        let (backend, keys) = ManualHotkeyBackend::new();
        let mut dispatcher = HotkeyDispatcher::new(Box::new(backend));
        let first = dispatcher.register(sink().0).unwrap();
        dispatcher.unregister(first);
        let _second = dispatcher.register(sink().0).unwrap();

        dispatcher.unregister(first);
        assert!(keys.is_installed());
    }

    #[test]
    fn test_refused_registration_degrades() {
        let mut dispatcher = HotkeyDispatcher::new(Box::new(ManualHotkeyBackend::refusing()));
        assert!(matches!(dispatcher.register(sink().0), Err(HotkeyError::Install(_))));
        assert!(!dispatcher.is_registered());
        dispatcher.unregister(HotkeyHandle::INACTIVE);
    }

    #[test]
    fn test_unsupported_backend() {
        let mut dispatcher = HotkeyDispatcher::new(Box::new(UnsupportedBackend));
        assert!(matches!(dispatcher.register(sink().0), Err(HotkeyError::Unsupported(_))));
    }

    #[test]
    fn test_drop_uninstalls() {
        let (backend, keys) = ManualHotkeyBackend::new();
        let mut dispatcher = HotkeyDispatcher::new(Box::new(backend));
        dispatcher.register(sink().0).unwrap();
        drop(dispatcher);
        assert!(!keys.is_installed());
    }
}
