//! Slot and page data model.
//!
//! The board holds a fixed number of pages, each with [`SLOTS_PER_PAGE`]
//! slots. A slot is addressed either by `(page, index_in_page)` or by its
//! global index `(page - 1) * SLOTS_PER_PAGE + index_in_page`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pages on the board.
pub const MAX_PAGES: usize = 5;

/// Number of slots on a single page.
pub const SLOTS_PER_PAGE: usize = 16;

/// Total slot capacity across all pages.
pub const TOTAL_SLOTS: usize = MAX_PAGES * SLOTS_PER_PAGE;

/// Nominal length of the persisted descriptions sequence
/// (slot descriptions followed by one description per page).
pub const TOTAL_DESCRIPTIONS: usize = TOTAL_SLOTS + MAX_PAGES;

/// Command every slot falls back to when nothing is stored for it.
pub const DEFAULT_COMMAND: &str = "ipconfig /all";

/// A 1-based page number, always within `1..=MAX_PAGES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageNumber(usize);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// The last page.
    pub const LAST: Self = Self(MAX_PAGES);

    /// Creates a page number, returning `None` outside `1..=MAX_PAGES`.
    pub fn new(page: usize) -> Option<Self> {
        (1..=MAX_PAGES).contains(&page).then_some(Self(page))
    }

    /// The 1-based page number.
    pub fn get(self) -> usize {
        self.0
    }

    /// Moves by `delta` pages, or returns `None` if that leaves the board.
    pub fn offset(self, delta: i32) -> Option<Self> {
        let target = i64::try_from(self.0).ok()? + i64::from(delta);
        usize::try_from(target).ok().and_then(Self::new)
    }

    /// Global index of the first slot on this page.
    pub fn first_slot(self) -> usize {
        (self.0 - 1) * SLOTS_PER_PAGE
    }

    /// Global index of slot `index` on this page.
    pub fn global_index(self, index: usize) -> usize {
        self.first_slot() + index
    }

    /// Offset of this page's description within the descriptions sequence.
    pub fn description_offset(self) -> usize {
        TOTAL_SLOTS + self.0 - 1
    }

    /// Iterates over every page on the board.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_PAGES).map(Self)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageNumber {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("page must be between 1 and {}, got {}", MAX_PAGES, value))
    }
}

impl From<PageNumber> for usize {
    fn from(page: PageNumber) -> Self {
        page.0
    }
}

/// One command shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slot {
    /// Raw command text as typed by the user.
    pub command: String,
    /// Free-form description shown as the slot's label.
    pub description: String,
}

impl Slot {
    /// Creates a slot from command and description text.
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self { command: command.into(), description: description.into() }
    }
}

/// Address of a slot on a specific page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub page: PageNumber,
    pub index: usize,
}

impl SlotRef {
    pub fn new(page: PageNumber, index: usize) -> Self {
        Self { page, index }
    }

    /// Slot shown to the user as `ordinal` (1-based, across all pages).
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        let global = ordinal.checked_sub(1)?;
        let page = PageNumber::new(global / SLOTS_PER_PAGE + 1)?;
        Some(Self::new(page, global % SLOTS_PER_PAGE))
    }

    /// Global 0-based slot index.
    pub fn global_index(self) -> usize {
        self.page.global_index(self.index)
    }

    /// 1-based number shown to the user.
    pub fn ordinal(self) -> usize {
        self.global_index() + 1
    }
}

/// The 16 slots of one page plus the page's own description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    pub page: PageNumber,
    pub slots: Vec<Slot>,
    pub description: String,
}

impl PageData {
    /// A page populated with defaults: the default command and empty slot
    /// descriptions.
    pub fn with_defaults(page: PageNumber) -> Self {
        Self {
            page,
            slots: vec![Slot::new(DEFAULT_COMMAND, ""); SLOTS_PER_PAGE],
            description: default_page_description(page),
        }
    }

    /// Label for slot `index`: its description, or its global ordinal when
    /// the description is empty.
    pub fn label(&self, index: usize) -> String {
        match self.slots.get(index) {
            Some(slot) if !slot.description.is_empty() => slot.description.clone(),
            _ => SlotRef::new(self.page, index).ordinal().to_string(),
        }
    }
}

/// Description a page carries before the user edits it.
pub fn default_page_description(page: PageNumber) -> String {
    format!("Page {} Description", page)
}
