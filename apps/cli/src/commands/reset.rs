//! Reset command implementation.

use cmdboard_core::BoardConfig;
use colored::Colorize;

use crate::board;

/// Execute the reset command.
///
/// Commands go back to the default the next time a page is loaded.
/// Descriptions are kept.
pub async fn execute(config: &BoardConfig) -> anyhow::Result<()> {
    let store = board::open_store(config)?;
    store.request_reset()?;

    println!("{}", "✓ Reset requested".green().bold());
    println!("  {}", "Commands return to the default on the next page load; descriptions are kept.".dimmed());
    Ok(())
}
