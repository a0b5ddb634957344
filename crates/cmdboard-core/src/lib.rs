//! Cmdboard core library.
//!
//! A board of paged command slots: five pages of sixteen slots, each slot a
//! command line plus a description. This crate holds everything below the
//! presentation layer:
//!
//! - [`store`]: line-file persistence of every page
//! - [`resolver`]: PATH lookup of a command's executable
//! - [`executor`]: captured or visible execution on independent tasks
//! - [`hotkey`]: global F1–F12 activation
//! - [`controller`]: the control loop tying them to a [`SlotGridView`]
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cmdboard_core::config::BoardConfig;
//! use cmdboard_core::hotkey::HotkeyDispatcher;
//! use cmdboard_core::model::PageNumber;
//!
//! # fn main() -> cmdboard_core::Result<()> {
//! let config = BoardConfig::discover_and_load();
//! let store = Arc::new(config.open_store()?);
//! let page = store.load_page(PageNumber::FIRST);
//! println!("{}: {}", page.description, page.slots[0].command);
//! let _hotkeys = HotkeyDispatcher::platform_default();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod executor;
pub mod hotkey;
pub mod model;
pub mod resolver;
pub mod store;

pub use config::BoardConfig;
pub use controller::{ActivationError, ControllerEvent, SlotGridController, SlotGridView};
pub use error::{CmdboardError, Result};
pub use executor::{CommandRunner, ExecutionEngine, ExecutionMode, ExecutionRequest, ExecutionResult};
pub use hotkey::{HotkeyDispatcher, HotkeyError, HotkeyHandle};
pub use model::{MAX_PAGES, PageData, PageNumber, SLOTS_PER_PAGE, Slot, SlotRef};
pub use resolver::CommandResolver;
pub use store::{SlotStore, StoreError, StorePaths};
