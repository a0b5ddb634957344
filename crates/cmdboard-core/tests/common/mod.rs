//! Shared fixtures for controller integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cmdboard_core::controller::{ActivationError, SlotGridController, SlotGridView};
use cmdboard_core::executor::{CommandRunner, ExecutionMode, ExecutionRequest, ExecutionResult};
use cmdboard_core::hotkey::{HotkeyDispatcher, KeySynthesizer, ManualHotkeyBackend};
use cmdboard_core::model::{PageData, PageNumber, SLOTS_PER_PAGE, SlotRef};
use cmdboard_core::resolver::CommandResolver;
use cmdboard_core::store::SlotStore;
use tempfile::TempDir;
use tokio::sync::Semaphore;

/// A view that keeps an editable page and records every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub page: Option<PageData>,
    pub renders: Vec<PageNumber>,
    pub results: Vec<(SlotRef, String, bool)>,
    pub enabled: Vec<(usize, bool)>,
    pub rejected: Vec<ActivationError>,
}

impl RecordingView {
    pub fn edit(&mut self, index: usize, command: &str, description: &str) {
        if let Some(page) = self.page.as_mut() {
            page.slots[index].command = command.to_string();
            page.slots[index].description = description.to_string();
        }
    }

    pub fn set_page_description(&mut self, description: &str) {
        if let Some(page) = self.page.as_mut() {
            page.description = description.to_string();
        }
    }
}

impl SlotGridView for RecordingView {
    fn render_page(&mut self, page: &PageData) {
        self.renders.push(page.page);
        self.page = Some(page.clone());
    }

    fn show_result(&mut self, slot: SlotRef, text: &str, is_error: bool) {
        self.results.push((slot, text.to_string(), is_error));
    }

    fn set_slot_enabled(&mut self, index: usize, enabled: bool) {
        self.enabled.push((index, enabled));
    }

    fn current_command_text(&self, index: usize) -> String {
        self.page.as_ref().map(|p| p.slots[index].command.clone()).unwrap_or_default()
    }

    fn page_edits(&self) -> PageData {
        self.page.clone().unwrap_or_else(|| PageData::with_defaults(PageNumber::FIRST))
    }

    fn show_rejected(&mut self, error: &ActivationError) {
        self.rejected.push(error.clone());
    }
}

type Respond = Box<dyn Fn(&ExecutionRequest) -> ExecutionResult + Send + Sync>;

/// A runner that records requests and answers from a closure, optionally
/// waiting for a permit first.
pub struct ScriptedRunner {
    requests: Mutex<Vec<ExecutionRequest>>,
    gate: Option<Arc<Semaphore>>,
    respond: Respond,
}

impl ScriptedRunner {
    /// Echoes the command back as captured output.
    pub fn echo() -> Self {
        Self::responding(|request| captured(request.slot, &format!("ran {}", request.command)))
    }

    pub fn responding(respond: impl Fn(&ExecutionRequest) -> ExecutionResult + Send + Sync + 'static) -> Self {
        Self { requests: Mutex::new(Vec::new()), gate: None, respond: Box::new(respond) }
    }

    /// Every run blocks until a permit is added to `gate`.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, request: ExecutionRequest) -> ExecutionResult {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        (self.respond)(&request)
    }
}

pub fn captured(slot: SlotRef, output: &str) -> ExecutionResult {
    ExecutionResult { slot, output: output.to_string(), success: true, mode: ExecutionMode::Captured }
}

pub struct Board {
    pub dir: TempDir,
    pub store: Arc<SlotStore>,
    pub runner: Arc<ScriptedRunner>,
    pub keys: KeySynthesizer,
    pub controller: SlotGridController<RecordingView>,
}

/// A started board over a fresh store directory.
pub fn board(runner: ScriptedRunner) -> Board {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SlotStore::open_dir(dir.path()).unwrap());
    let runner = Arc::new(runner);
    let (backend, keys) = ManualHotkeyBackend::new();

    let mut controller = SlotGridController::new(
        RecordingView::default(),
        Arc::clone(&store),
        runner.clone(),
        HotkeyDispatcher::new(Box::new(backend)),
    )
    .with_resolver(CommandResolver::new(None, dir.path()));
    controller.start();

    Board { dir, store, runner, keys, controller }
}

/// Pumps events until no slot has a command in flight.
pub async fn settle(controller: &mut SlotGridController<RecordingView>) {
    for _ in 0..300 {
        let _ = controller.pump();
        if (0..SLOTS_PER_PAGE).all(|i| !controller.is_busy(i)) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("commands still in flight");
}
