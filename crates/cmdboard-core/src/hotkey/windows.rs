//! Low-level keyboard hook for Windows.
//!
//! The hook lives on a dedicated thread running a message loop, which is
//! what `WH_KEYBOARD_LL` requires. The hook procedure only routes the key to
//! the installed [`HotkeySink`]; all board work happens on the receiving side.
#![allow(unsafe_code)]

use std::sync::{Mutex, mpsc};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};
use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, HHOOK, KBDLLHOOKSTRUCT, MSG, PM_NOREMOVE,
    PeekMessageW, PostThreadMessageW, SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx,
    WH_KEYBOARD_LL, WM_KEYDOWN, WM_QUIT, WM_SYSKEYDOWN, WM_USER,
};
use windows::core::PCWSTR;

use super::dispatcher::HotkeyBackend;
use super::error::{HotkeyError, Result};
use super::keys::{HotkeySink, Key, KeyDisposition, route_key_down};

/// The hook procedure has no user data pointer, so the sink is process-global.
static SINK: Mutex<Option<HotkeySink>> = Mutex::new(None);

/// `WH_KEYBOARD_LL` hook on its own message-loop thread.
#[derive(Debug, Default)]
pub struct WindowsHookBackend {
    thread: Option<(u32, JoinHandle<()>)>,
}

impl WindowsHookBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HotkeyBackend for WindowsHookBackend {
    fn name(&self) -> &'static str {
        "windows-ll-hook"
    }

    fn install(&mut self, sink: HotkeySink) -> Result<()> {
        set_sink(Some(sink));

        let (ready_tx, ready_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("cmdboard-hotkeys".to_string())
            .spawn(move || hook_thread(&ready_tx))
            .map_err(|e| {
                set_sink(None);
                HotkeyError::Install(e.to_string())
            })?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                self.thread = Some((thread_id, handle));
                Ok(())
            }
            Ok(Err(message)) => {
                let _ = handle.join();
                set_sink(None);
                Err(HotkeyError::Install(message))
            }
            Err(_) => {
                let _ = handle.join();
                set_sink(None);
                Err(HotkeyError::Install("hook thread exited before reporting".to_string()))
            }
        }
    }

    fn uninstall(&mut self) {
        if let Some((thread_id, handle)) = self.thread.take() {
            // SAFETY: posting to a thread id we obtained from that live thread.
            if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
                warn!(error = %e, "Failed to stop hotkey thread");
            }
            let _ = handle.join();
        }
        set_sink(None);
    }
}

fn set_sink(sink: Option<HotkeySink>) {
    *SINK.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = sink;
}

fn hook_thread(ready: &mpsc::Sender<std::result::Result<u32, String>>) {
    // SAFETY: plain Win32 calls on this thread; `msg` outlives every use.
    unsafe {
        let mut msg = MSG::default();
        // Creates this thread's message queue so WM_QUIT can be posted to it.
        let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);

        let module = match GetModuleHandleW(PCWSTR::null()) {
            Ok(module) => module,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        let instance: HINSTANCE = module.into();

        let hook = match SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), instance, 0) {
            Ok(hook) => hook,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        let _ = ready.send(Ok(GetCurrentThreadId()));
        debug!("Keyboard hook installed");

        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        if let Err(e) = UnhookWindowsHookEx(hook) {
            warn!(error = %e, "Failed to remove keyboard hook");
        }
        debug!("Keyboard hook removed");
    }
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let message = wparam.0 as u32;
    if code >= 0 && (message == WM_KEYDOWN || message == WM_SYSKEYDOWN) {
        // SAFETY: for WH_KEYBOARD_LL with code >= 0, lparam points to a KBDLLHOOKSTRUCT.
        let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
        let key = Key::from_virtual_key(info.vkCode);

        // Never block the system input path on the lock.
        if let Ok(guard) = SINK.try_lock() {
            if let Some(sink) = guard.as_ref() {
                if route_key_down(key, sink) == KeyDisposition::Consume {
                    return LRESULT(1);
                }
            }
        }
    }

    // SAFETY: forwarding the unmodified event to the next hook in the chain.
    unsafe { CallNextHookEx(HHOOK::default(), code, wparam, lparam) }
}
