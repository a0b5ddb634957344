//! The slot store: per-page load and save over shared flat files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::error::{StoreError, StoreResult};
use super::line_file::{read_lines, stage_lines, write_lines_atomic};
use crate::model::{
    DEFAULT_COMMAND, PageData, PageNumber, SLOTS_PER_PAGE, Slot, TOTAL_DESCRIPTIONS, TOTAL_SLOTS,
    default_page_description,
};

/// Default file name of the commands store.
pub const COMMANDS_FILE: &str = "commands.txt";
/// Default file name of the descriptions store.
pub const DESCRIPTIONS_FILE: &str = "descriptions.txt";
/// Default file name of the reset sentinel.
pub const RESET_FLAG_FILE: &str = "reset.flag";

/// Locations of the files backing a [`SlotStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub commands: PathBuf,
    pub descriptions: PathBuf,
    pub reset_flag: PathBuf,
}

impl StorePaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            commands: dir.join(COMMANDS_FILE),
            descriptions: dir.join(DESCRIPTIONS_FILE),
            reset_flag: dir.join(RESET_FLAG_FILE),
        }
    }
}

/// Persistent, fixed-capacity store for every page's slots.
///
/// All file access goes through a single lock, so a page flip racing with
/// shutdown can never interleave two read-modify-write cycles.
#[derive(Debug)]
pub struct SlotStore {
    paths: StorePaths,
    io_lock: Mutex<()>,
}

impl SlotStore {
    /// Creates a store over the given files. Nothing is touched on disk.
    pub fn new(paths: StorePaths) -> Self {
        Self { paths, io_lock: Mutex::new(()) }
    }

    /// Creates a store with default file names in `dir`, creating the
    /// directory if needed.
    pub fn open_dir(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        Ok(Self::new(StorePaths::in_dir(dir)))
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Loads one page.
    ///
    /// Never fails: an unreadable store is logged and the page comes back
    /// with defaults.
    pub fn load_page(&self, page: PageNumber) -> PageData {
        match self.try_load_page(page) {
            Ok(data) => data,
            Err(e) => {
                warn!(page = page.get(), error = %e, "Failed to load page, using defaults");
                PageData::with_defaults(page)
            }
        }
    }

    /// Loads one page, reporting I/O failures.
    ///
    /// If the commands file is absent or the reset sentinel exists, every
    /// command on the page is the default command and the sentinel is
    /// consumed. Descriptions are always read from disk. Lines beyond the end
    /// of a file load as defaults.
    pub fn try_load_page(&self, page: PageNumber) -> StoreResult<PageData> {
        self.read_page(page, true)
    }

    /// Reads one page the way [`SlotStore::try_load_page`] would, but leaves
    /// a pending reset sentinel in place for the next load.
    pub fn peek_page(&self, page: PageNumber) -> StoreResult<PageData> {
        self.read_page(page, false)
    }

    fn read_page(&self, page: PageNumber, consume_reset: bool) -> StoreResult<PageData> {
        let _guard = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut data = PageData::with_defaults(page);

        let reset = self.paths.reset_flag.exists();
        if reset {
            if consume_reset {
                match fs::remove_file(&self.paths.reset_flag) {
                    Ok(()) => info!(page = page.get(), "Reset sentinel consumed, commands set to default"),
                    Err(e) => warn!(error = %e, "Failed to delete reset sentinel"),
                }
            }
        } else if let Some(commands) = self.read(&self.paths.commands)? {
            for (i, slot) in data.slots.iter_mut().enumerate() {
                if let Some(command) = commands.get(page.global_index(i)) {
                    slot.command.clone_from(command);
                }
            }
        }

        if let Some(descriptions) = self.read(&self.paths.descriptions)? {
            for (i, slot) in data.slots.iter_mut().enumerate() {
                if let Some(description) = descriptions.get(page.global_index(i)) {
                    slot.description.clone_from(description);
                }
            }
            if let Some(description) = descriptions.get(page.description_offset()) {
                data.description.clone_from(description);
            }
        }

        debug!(page = page.get(), reset, "Loaded page");
        Ok(data)
    }

    /// Saves one page without disturbing any other page.
    ///
    /// Reads both full sequences, grows them (never shrinks) to their nominal
    /// length with the same defaults a load would use, and overwrites this
    /// page's 16 slot entries and its page description.
    ///
    /// Both files are written and synced beside their targets before either
    /// is replaced. If replacing the descriptions file fails, the commands
    /// file is put back, so an error leaves the previous content on disk.
    pub fn save_page(&self, data: &PageData) -> StoreResult<()> {
        if data.slots.len() != SLOTS_PER_PAGE {
            return Err(StoreError::InvalidPage(format!(
                "expected {} slots, got {}",
                SLOTS_PER_PAGE,
                data.slots.len()
            )));
        }

        let _guard = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let page = data.page;

        let previous_commands = self.read(&self.paths.commands)?;
        let mut commands = previous_commands.clone().unwrap_or_default();
        let mut descriptions = self.read(&self.paths.descriptions)?.unwrap_or_default();
        grow_commands(&mut commands);
        grow_descriptions(&mut descriptions);

        for (i, Slot { command, description }) in data.slots.iter().enumerate() {
            let index = page.global_index(i);
            commands[index].clone_from(command);
            descriptions[index].clone_from(description);
        }
        descriptions[page.description_offset()].clone_from(&data.description);

        let staged_commands = stage_lines(&self.paths.commands, &commands)
            .map_err(|e| StoreError::io(&self.paths.commands, e))?;
        let staged_descriptions = stage_lines(&self.paths.descriptions, &descriptions)
            .map_err(|e| StoreError::io(&self.paths.descriptions, e))?;

        staged_commands.commit().map_err(|e| StoreError::io(&self.paths.commands, e))?;
        if let Err(e) = staged_descriptions.commit() {
            self.restore_commands(previous_commands.as_deref());
            return Err(StoreError::io(&self.paths.descriptions, e));
        }

        debug!(page = page.get(), "Saved page");
        Ok(())
    }

    /// Creates the reset sentinel so the next load restores default commands.
    pub fn request_reset(&self) -> StoreResult<()> {
        let _guard = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let path = &self.paths.reset_flag;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(path, b"").map_err(|e| StoreError::io(path, e))?;
        info!(path = %path.display(), "Reset requested");
        Ok(())
    }

    /// Whether a reset sentinel is waiting to be consumed.
    pub fn reset_pending(&self) -> bool {
        self.paths.reset_flag.exists()
    }

    fn restore_commands(&self, previous: Option<&[String]>) {
        let path = &self.paths.commands;
        let restored = match previous {
            Some(lines) => write_lines_atomic(path, lines),
            None => fs::remove_file(path),
        };
        if let Err(e) = restored {
            warn!(path = %path.display(), error = %e, "Failed to restore commands after a failed save");
        }
    }

    fn read(&self, path: &Path) -> StoreResult<Option<Vec<String>>> {
        read_lines(path).map_err(|e| StoreError::io(path, e))
    }
}

/// Pads the commands sequence with the default command.
fn grow_commands(lines: &mut Vec<String>) {
    if lines.len() < TOTAL_SLOTS {
        lines.resize(TOTAL_SLOTS, DEFAULT_COMMAND.to_string());
    }
}

/// Pads the descriptions sequence: empty slot descriptions, then each
/// page's default description.
fn grow_descriptions(lines: &mut Vec<String>) {
    while lines.len() < TOTAL_DESCRIPTIONS {
        let index = lines.len();
        let line = if index < TOTAL_SLOTS {
            String::new()
        } else {
            PageNumber::new(index - TOTAL_SLOTS + 1).map(default_page_description).unwrap_or_default()
        };
        lines.push(line);
    }
}
