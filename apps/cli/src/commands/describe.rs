//! Describe command implementation.

use cmdboard_core::BoardConfig;
use cmdboard_core::model::PageNumber;
use colored::Colorize;

use crate::board;

/// Execute the describe command.
///
/// Only the description changes, so a pending reset stays pending.
pub async fn execute(config: &BoardConfig, page: PageNumber, description: String) -> anyhow::Result<()> {
    let store = board::open_store(config)?;
    let mut data = store.peek_page(page)?;
    data.description = description;
    store.save_page(&data)?;

    println!("{} Page {}: {}", "✓".green(), page, data.description);
    Ok(())
}
