//! Shared helpers for opening the board from the command line.

use std::path::PathBuf;

use anyhow::Context;
use cmdboard_core::model::{MAX_PAGES, PageNumber, SlotRef, TOTAL_SLOTS};
use cmdboard_core::{BoardConfig, SlotStore};

/// Loads configuration files and applies the `--data-dir` override.
pub fn load_config(data_dir: Option<PathBuf>) -> BoardConfig {
    let config = BoardConfig::discover_and_load();
    match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    }
}

/// Opens the slot store in the configured data directory.
pub fn open_store(config: &BoardConfig) -> anyhow::Result<SlotStore> {
    config
        .open_store()
        .with_context(|| format!("Failed to open board in {}", config.data_dir().display()))
}

pub fn parse_slot(value: &str) -> Result<SlotRef, String> {
    value
        .parse::<usize>()
        .ok()
        .and_then(SlotRef::from_ordinal)
        .ok_or_else(|| format!("slot must be a number from 1 to {}", TOTAL_SLOTS))
}

pub fn parse_page(value: &str) -> Result<PageNumber, String> {
    value
        .parse::<usize>()
        .ok()
        .and_then(PageNumber::new)
        .ok_or_else(|| format!("page must be a number from 1 to {}", MAX_PAGES))
}
