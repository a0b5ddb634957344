//! Drives the board through key presses against a temporary store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cmdboard_core::SlotGridController;
use cmdboard_core::executor::{CommandRunner, ExecutionMode, ExecutionRequest, ExecutionResult};
use cmdboard_core::hotkey::{HotkeyDispatcher, Key, KeyDisposition, KeySynthesizer, ManualHotkeyBackend};
use cmdboard_core::model::{DEFAULT_COMMAND, PageNumber};
use cmdboard_core::resolver::CommandResolver;
use cmdboard_core::store::SlotStore;
use cmdboard_tui::app::App;
use cmdboard_tui::board_view::BoardView;
use cmdboard_tui::keys::Mode;
use cmdboard_tui::theme::BoardTheme;
use crossterm::event::{KeyCode, KeyModifiers};
use tempfile::TempDir;

#[derive(Default)]
struct EchoRunner {
    commands: Mutex<Vec<String>>,
}

#[async_trait]
impl CommandRunner for EchoRunner {
    async fn run(&self, request: ExecutionRequest) -> ExecutionResult {
        self.commands.lock().unwrap().push(request.command.clone());
        ExecutionResult {
            slot: request.slot,
            output: format!("ran {}", request.command),
            success: true,
            mode: ExecutionMode::Captured,
        }
    }
}

struct Harness {
    _dir: TempDir,
    store: Arc<SlotStore>,
    runner: Arc<EchoRunner>,
    keys: KeySynthesizer,
    app: App,
}

fn harness() -> Harness {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SlotStore::open_dir(dir.path()).unwrap());
    let runner = Arc::new(EchoRunner::default());
    let (backend, keys) = ManualHotkeyBackend::new();
    let controller = SlotGridController::new(
        BoardView::new(),
        Arc::clone(&store),
        runner.clone(),
        HotkeyDispatcher::new(Box::new(backend)),
    )
    .with_resolver(CommandResolver::new(None, dir.path()));
    let app = App::new(controller, BoardTheme::default());
    Harness { _dir: dir, store, runner, keys, app }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(code, KeyModifiers::NONE);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn clear_field(app: &mut App, len: usize) {
    for _ in 0..len {
        press(app, KeyCode::Backspace);
    }
}

async fn wait_for_popup(app: &mut App) {
    for _ in 0..300 {
        app.tick();
        if app.view().popup().is_some() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no result popup");
}

#[tokio::test]
async fn test_edited_command_runs_from_function_key() {
    let mut h = harness();

    press(&mut h.app, KeyCode::Char('c'));
    assert_eq!(h.app.mode(), Mode::Editing);
    clear_field(&mut h.app, DEFAULT_COMMAND.len());
    type_text(&mut h.app, "echo hi");
    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.mode(), Mode::Browse);

    press(&mut h.app, KeyCode::F(1));
    wait_for_popup(&mut h.app).await;

    let popup = h.app.view().popup().unwrap();
    assert_eq!(popup.title, "Output of Command 1");
    assert_eq!(popup.text, "ran echo hi");
    assert_eq!(h.runner.commands.lock().unwrap().as_slice(), ["echo hi"]);

    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.mode(), Mode::Browse);
}

#[tokio::test]
async fn test_page_change_persists_edits() {
    let mut h = harness();

    press(&mut h.app, KeyCode::Right);
    press(&mut h.app, KeyCode::Char('d'));
    type_text(&mut h.app, "Network");
    press(&mut h.app, KeyCode::Enter);
    press(&mut h.app, KeyCode::Char('p'));
    type_text(&mut h.app, "Tools");
    press(&mut h.app, KeyCode::Enter);

    press(&mut h.app, KeyCode::Char('+'));
    assert_eq!(h.app.view().page().page, PageNumber::new(2).unwrap());

    let saved = h.store.load_page(PageNumber::FIRST);
    assert_eq!(saved.slots[1].description, "Network");
    assert_eq!(saved.description, "Tools");

    press(&mut h.app, KeyCode::Char('-'));
    assert_eq!(h.app.view().page().label(1), "Network");
}

#[tokio::test]
async fn test_empty_command_shows_validation_popup() {
    let mut h = harness();

    press(&mut h.app, KeyCode::Char('c'));
    clear_field(&mut h.app, DEFAULT_COMMAND.len());
    press(&mut h.app, KeyCode::Enter);
    press(&mut h.app, KeyCode::Enter);

    assert_eq!(h.app.mode(), Mode::Popup);
    assert_eq!(
        h.app.view().popup().map(|p| p.text.as_str()),
        Some("Slot 1 has no command")
    );
    assert!(h.runner.commands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_global_hotkey_reaches_current_page() {
    let mut h = harness();
    press(&mut h.app, KeyCode::PageDown);

    assert_eq!(h.keys.key_down(Key::Function(4)), KeyDisposition::Consume);
    wait_for_popup(&mut h.app).await;

    assert_eq!(h.app.view().popup().map(|p| p.title.as_str()), Some("Output of Command 20"));
}

#[tokio::test]
async fn test_quit_saves_and_releases_hotkeys() {
    let mut h = harness();

    press(&mut h.app, KeyCode::Char('c'));
    type_text(&mut h.app, " extra");
    press(&mut h.app, KeyCode::Enter);
    press(&mut h.app, KeyCode::Char('q'));

    assert!(h.app.should_quit);
    assert!(!h.keys.is_installed());
    let saved = h.store.load_page(PageNumber::FIRST);
    assert_eq!(saved.slots[0].command, format!("{} extra", DEFAULT_COMMAND));

    h.app.shutdown();
    assert_eq!(h.keys.key_down(Key::Function(1)), KeyDisposition::PassThrough);
}
