//! Application state and key handling.

use cmdboard_core::SlotGridController;
use cmdboard_core::controller::SlotGridView;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use crate::board_view::BoardView;
use crate::keys::{Action, Mode, map_key};
use crate::theme::BoardTheme;

/// The running board.
pub struct App {
    pub controller: SlotGridController<BoardView>,
    pub theme: BoardTheme,
    pub should_quit: bool,
}

impl App {
    /// Wraps a controller and shows the first page.
    pub fn new(mut controller: SlotGridController<BoardView>, theme: BoardTheme) -> Self {
        controller.start();
        Self { controller, theme, should_quit: false }
    }

    pub fn view(&self) -> &BoardView {
        self.controller.view()
    }

    pub fn mode(&self) -> Mode {
        let view = self.controller.view();
        if view.edit().is_some() {
            Mode::Editing
        } else if view.popup().is_some() {
            Mode::Popup
        } else {
            Mode::Browse
        }
    }

    /// Handles finished commands and hotkey activations.
    pub fn tick(&mut self) {
        if self.controller.pump().is_break() {
            self.should_quit = true;
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(action) = map_key(self.mode(), code, modifiers) {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: Action) {
        debug!(?action, "Key action");
        match action {
            Action::Activate(index) => self.activate(index),
            Action::ActivateSelected => self.activate(self.view().selected()),
            Action::PageDelta(delta) => self.controller.on_page_delta(delta),
            Action::Close => {
                self.controller.on_close();
                self.should_quit = true;
            }
            Action::Move { rows, cols } => self.controller.view_mut().move_selection(rows, cols),
            Action::BeginEdit(field) => self.controller.view_mut().begin_edit(field),
            Action::Input(c) => self.controller.view_mut().input(c),
            Action::Backspace => self.controller.view_mut().backspace(),
            Action::CommitEdit => self.controller.view_mut().commit_edit(),
            Action::CancelEdit => self.controller.view_mut().cancel_edit(),
            Action::Dismiss => self.controller.view_mut().dismiss_popup(),
        }
    }

    fn activate(&mut self, index: usize) {
        self.controller.view_mut().select(index);
        if let Err(e) = self.controller.on_slot_activated(index) {
            self.controller.view_mut().show_rejected(&e);
        }
    }

    /// Closes the board if a key never did.
    pub fn shutdown(&mut self) {
        self.controller.on_close();
    }
}
