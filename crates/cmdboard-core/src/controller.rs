//! The board's control loop.
//!
//! [`SlotGridController`] owns the only mutable session state (the current
//! page and the set of slots with a command in flight). Every request, be it
//! a click, a hotkey or a finished command, arrives as a [`ControllerEvent`]
//! on one channel and is handled on the context that owns the controller.
//! Commands run on their own tasks and report back through the same channel.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::executor::{CommandRunner, ExecutionRequest, ExecutionResult};
use crate::hotkey::{HotkeyActivation, HotkeyDispatcher, HotkeyHandle, HotkeySink};
use crate::model::{PageData, PageNumber, SLOTS_PER_PAGE, SlotRef};
use crate::resolver::CommandResolver;
use crate::store::SlotStore;

/// The presentation side of the board.
///
/// The controller pushes page contents, results and slot enablement into the
/// view, and pulls the live (possibly unsaved) edit buffers out of it.
pub trait SlotGridView {
    /// Replaces everything displayed with `page`.
    fn render_page(&mut self, page: &PageData);

    /// Shows a command's output. `slot` is the slot that launched it, which
    /// may be on a page other than the current one. `is_error` is set when
    /// the command could not be started.
    fn show_result(&mut self, slot: SlotRef, text: &str, is_error: bool);

    /// Enables or disables the control of slot `index` on the current page.
    fn set_slot_enabled(&mut self, index: usize, enabled: bool);

    /// Live command text of slot `index`.
    fn current_command_text(&self, index: usize) -> String;

    /// The in-memory state of the current page, including unsaved edits.
    fn page_edits(&self) -> PageData;

    /// Reports an activation that was rejected before anything ran.
    fn show_rejected(&mut self, error: &ActivationError) {
        debug!(%error, "Activation rejected");
    }
}

/// Requests handled by the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Activate slot `index` of whatever page is current when handled.
    Activate(usize),
    /// Move by this many pages.
    PageDelta(i32),
    /// Persist and shut down.
    Close,
    /// A command finished.
    Completed(ExecutionResult),
}

impl From<HotkeyActivation> for ControllerEvent {
    fn from(activation: HotkeyActivation) -> Self {
        Self::Activate(activation.index)
    }
}

/// Reasons an activation does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// The slot's command is empty after trimming.
    #[error("Slot {} has no command", .slot.ordinal())]
    EmptyCommand { slot: SlotRef },

    /// The slot already has a command in flight.
    #[error("The slot at index {index} is still running")]
    SlotBusy { index: usize },

    /// The index is outside the page.
    #[error("No slot at index {index}")]
    InvalidSlot { index: usize },

    /// The board has been closed.
    #[error("The board is closed")]
    Closed,
}

/// Orchestrates page navigation, slot activation and shutdown persistence.
pub struct SlotGridController<V> {
    view: V,
    store: Arc<SlotStore>,
    resolver: CommandResolver,
    runner: Arc<dyn CommandRunner>,
    hotkeys: HotkeyDispatcher,
    hotkey_handle: HotkeyHandle,
    current_page: PageNumber,
    busy: HashSet<usize>,
    tx: UnboundedSender<ControllerEvent>,
    rx: UnboundedReceiver<ControllerEvent>,
    closed: bool,
}

impl<V: SlotGridView> SlotGridController<V> {
    pub fn new(view: V, store: Arc<SlotStore>, runner: Arc<dyn CommandRunner>, hotkeys: HotkeyDispatcher) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            view,
            store,
            resolver: CommandResolver::from_env(),
            runner,
            hotkeys,
            hotkey_handle: HotkeyHandle::INACTIVE,
            current_page: PageNumber::FIRST,
            busy: HashSet::new(),
            tx,
            rx,
            closed: false,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: CommandResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Registers the global hotkeys and shows the first page.
    ///
    /// A refused hotkey registration is logged and the board carries on
    /// without global hotkeys.
    pub fn start(&mut self) {
        match self.hotkeys.register(HotkeySink::from_sender(self.tx.clone())) {
            Ok(handle) => self.hotkey_handle = handle,
            Err(e) => debug!(error = %e, "Continuing without global hotkeys"),
        }
        self.current_page = PageNumber::FIRST;
        let data = self.store.load_page(self.current_page);
        self.view.render_page(&data);
        info!(backend = self.hotkeys.backend_name(), "Board started");
    }

    /// Handle for submitting requests from other contexts.
    pub fn sender(&self) -> UnboundedSender<ControllerEvent> {
        self.tx.clone()
    }

    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn hotkeys_registered(&self) -> bool {
        self.hotkeys.is_registered()
    }

    /// Whether slot `index` has a command in flight.
    pub fn is_busy(&self, index: usize) -> bool {
        self.busy.contains(&index)
    }

    /// Saves the current page, then moves by `delta` and shows the new page.
    ///
    /// A move that would leave the board does nothing.
    pub fn on_page_delta(&mut self, delta: i32) {
        let Some(target) = self.current_page.offset(delta) else {
            debug!(page = self.current_page.get(), delta, "Page change out of range");
            return;
        };

        self.save_current_page();
        self.current_page = target;
        let data = self.store.load_page(target);
        self.view.render_page(&data);
        debug!(page = target.get(), "Page changed");
    }

    /// Runs the live command of slot `index` on the current page.
    ///
    /// Returns once the command has been handed to its own task; the result
    /// comes back as [`ControllerEvent::Completed`].
    pub fn on_slot_activated(&mut self, index: usize) -> Result<(), ActivationError> {
        if self.closed {
            return Err(ActivationError::Closed);
        }
        if index >= SLOTS_PER_PAGE {
            return Err(ActivationError::InvalidSlot { index });
        }
        if self.busy.contains(&index) {
            return Err(ActivationError::SlotBusy { index });
        }

        let text = self.view.current_command_text(index);
        let raw = text.trim();
        if raw.is_empty() {
            let slot = SlotRef::new(self.current_page, index);
            return Err(ActivationError::EmptyCommand { slot });
        }

        let slot = SlotRef::new(self.current_page, index);
        let request = ExecutionRequest::new(slot, self.resolver.resolve(raw));
        debug!(slot = slot.ordinal(), command = %request.command, "Slot activated");

        self.busy.insert(index);
        self.view.set_slot_enabled(index, false);

        let runner = Arc::clone(&self.runner);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = runner.run(request).await;
            // The receiver lives as long as the controller.
            let _ = tx.send(ControllerEvent::Completed(result));
        });
        Ok(())
    }

    /// Re-enables the slot and shows the result if it is worth showing.
    pub fn on_completed(&mut self, result: &ExecutionResult) {
        let index = result.index();
        if self.busy.remove(&index) {
            self.view.set_slot_enabled(index, true);
        }

        if result.should_display() {
            self.view.show_result(result.slot, &result.output, !result.success);
        }
    }

    /// Saves the current page and removes the global hotkeys. Idempotent.
    pub fn on_close(&mut self) {
        if self.closed {
            return;
        }
        self.save_current_page();
        self.hotkeys.unregister(self.hotkey_handle);
        self.hotkey_handle = HotkeyHandle::INACTIVE;
        self.closed = true;
        info!("Board closed");
    }

    /// Handles one event. Breaks once the board is closed.
    pub fn handle_event(&mut self, event: ControllerEvent) -> ControlFlow<()> {
        match event {
            ControllerEvent::Activate(index) => {
                if let Err(e) = self.on_slot_activated(index) {
                    self.view.show_rejected(&e);
                }
            }
            ControllerEvent::PageDelta(delta) => self.on_page_delta(delta),
            ControllerEvent::Close => self.on_close(),
            ControllerEvent::Completed(result) => self.on_completed(&result),
        }

        if self.closed { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    }

    /// Handles every pending event without waiting.
    pub fn pump(&mut self) -> ControlFlow<()> {
        while let Ok(event) = self.rx.try_recv() {
            if self.handle_event(event).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Handles events until the board is closed.
    pub async fn run(&mut self) {
        while let Some(event) = self.rx.recv().await {
            if self.handle_event(event).is_break() {
                break;
            }
        }
    }

    fn save_current_page(&self) {
        let mut data = self.view.page_edits();
        data.page = self.current_page;
        if let Err(e) = self.store.save_page(&data) {
            warn!(page = self.current_page.get(), error = %e, "Failed to save page");
        }
    }
}
