//! In-memory state behind the board screen.
//!
//! [`BoardView`] is what the controller talks to: it holds the page being
//! shown with the user's unsaved edits, which slots are running, the
//! selection and any popup.

use cmdboard_core::controller::{ActivationError, SlotGridView};
use cmdboard_core::model::{PageData, PageNumber, SLOTS_PER_PAGE, SlotRef};

/// Number of slot columns (and rows) in the grid.
pub const GRID_SIDE: usize = 4;

/// A field the user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Command,
    Description,
    PageDescription,
}

/// Text shown over the board until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub text: String,
    pub is_error: bool,
}

/// An edit in progress. `original` restores the field on cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub field: Field,
    pub index: usize,
    pub original: String,
}

#[derive(Debug, Clone)]
pub struct BoardView {
    page: PageData,
    enabled: [bool; SLOTS_PER_PAGE],
    selected: usize,
    edit: Option<Edit>,
    popups: Vec<Popup>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            page: PageData::with_defaults(PageNumber::FIRST),
            enabled: [true; SLOTS_PER_PAGE],
            selected: 0,
            edit: None,
            popups: Vec::new(),
        }
    }

    pub fn page(&self) -> &PageData {
        &self.page
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled.get(index).copied().unwrap_or(false)
    }

    pub fn edit(&self) -> Option<&Edit> {
        self.edit.as_ref()
    }

    /// The popup on top, if any.
    pub fn popup(&self) -> Option<&Popup> {
        self.popups.first()
    }

    pub fn dismiss_popup(&mut self) {
        if !self.popups.is_empty() {
            self.popups.remove(0);
        }
    }

    /// Moves the selection within the 4×4 grid, clamping at the edges.
    pub fn move_selection(&mut self, rows: i32, cols: i32) {
        let side = GRID_SIDE as i32;
        let row = (self.selected / GRID_SIDE) as i32 + rows;
        let col = (self.selected % GRID_SIDE) as i32 + cols;
        self.selected = (row.clamp(0, side - 1) * side + col.clamp(0, side - 1)) as usize;
    }

    pub fn select(&mut self, index: usize) {
        if index < SLOTS_PER_PAGE {
            self.selected = index;
        }
    }

    /// Starts editing `field` of the selected slot (or the page description).
    pub fn begin_edit(&mut self, field: Field) {
        let index = self.selected;
        let original = self.field_text(field, index).to_string();
        self.edit = Some(Edit { field, index, original });
    }

    /// Keeps the edited text in the page; it is saved on the next page
    /// change or on close.
    pub fn commit_edit(&mut self) {
        self.edit = None;
    }

    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            *self.field_text_mut(edit.field, edit.index) = edit.original;
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(edit) = self.edit.clone() {
            self.field_text_mut(edit.field, edit.index).push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(edit) = self.edit.clone() {
            self.field_text_mut(edit.field, edit.index).pop();
        }
    }

    /// Text of `field` for slot `index`.
    pub fn field_text(&self, field: Field, index: usize) -> &str {
        match field {
            Field::Command => &self.page.slots[index].command,
            Field::Description => &self.page.slots[index].description,
            Field::PageDescription => &self.page.description,
        }
    }

    fn field_text_mut(&mut self, field: Field, index: usize) -> &mut String {
        match field {
            Field::Command => &mut self.page.slots[index].command,
            Field::Description => &mut self.page.slots[index].description,
            Field::PageDescription => &mut self.page.description,
        }
    }
}

impl SlotGridView for BoardView {
    fn render_page(&mut self, page: &PageData) {
        self.page = page.clone();
        self.edit = None;
    }

    fn show_result(&mut self, slot: SlotRef, text: &str, is_error: bool) {
        let title = if is_error { "Error".to_string() } else { format!("Output of Command {}", slot.ordinal()) };
        self.popups.push(Popup { title, text: text.to_string(), is_error });
    }

    fn set_slot_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(flag) = self.enabled.get_mut(index) {
            *flag = enabled;
        }
    }

    fn current_command_text(&self, index: usize) -> String {
        self.page.slots.get(index).map(|s| s.command.clone()).unwrap_or_default()
    }

    fn page_edits(&self) -> PageData {
        self.page.clone()
    }

    fn show_rejected(&mut self, error: &ActivationError) {
        match error {
            // A disabled control swallows the activation.
            ActivationError::SlotBusy { .. } | ActivationError::Closed => {}
            _ => self.popups.push(Popup { title: "Error".to_string(), text: error.to_string(), is_error: true }),
        }
    }
}
