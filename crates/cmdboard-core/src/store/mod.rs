//! Persistent multi-page slot storage.
//!
//! Slots are kept in two line-oriented text files shared by every page:
//! one line per slot command, and one line per slot description followed by
//! one line per page description. A third, existence-only file acts as a
//! reset sentinel that forces all commands back to their default on the next
//! load.

pub mod error;
mod line_file;
mod slot_store;

pub use error::{StoreError, StoreResult};
pub use slot_store::{COMMANDS_FILE, DESCRIPTIONS_FILE, RESET_FLAG_FILE, SlotStore, StorePaths};
