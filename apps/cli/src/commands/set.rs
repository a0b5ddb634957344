//! Set command implementation.

use anyhow::bail;
use cmdboard_core::BoardConfig;
use cmdboard_core::model::SlotRef;
use colored::Colorize;

use crate::board;

/// Execute the set command.
///
/// Loads the slot's page, applies the edits and saves the page back.
///
/// Editing a command consumes a pending reset, like a board load. A
/// description-only edit leaves it pending.
pub async fn execute(
    config: &BoardConfig,
    slot: SlotRef,
    command: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    if command.is_none() && description.is_none() {
        bail!("Nothing to change: pass --command and/or --description");
    }

    let store = board::open_store(config)?;
    let mut data = if command.is_some() { store.try_load_page(slot.page)? } else { store.peek_page(slot.page)? };
    let entry = &mut data.slots[slot.index];
    if let Some(command) = command {
        entry.command = command;
    }
    if let Some(description) = description {
        entry.description = description;
    }
    store.save_page(&data)?;

    println!("{} Slot {}: {}", "✓".green(), slot.ordinal(), data.slots[slot.index].command);
    Ok(())
}
