//! Run command implementation.

use anyhow::bail;
use cmdboard_core::controller::ActivationError;
use cmdboard_core::model::SlotRef;
use cmdboard_core::{BoardConfig, CommandResolver};
use colored::Colorize;

use crate::board;

/// Execute the run command.
///
/// Runs the slot's stored command the way the board would and waits for it.
/// Fails when the command is empty or could not be started.
pub async fn execute(config: &BoardConfig, slot: SlotRef, json_output: bool) -> anyhow::Result<()> {
    let store = board::open_store(config)?;
    let data = store.peek_page(slot.page)?;
    let raw = data.slots[slot.index].command.trim();
    if raw.is_empty() {
        return Err(ActivationError::EmptyCommand { slot }.into());
    }

    let resolved = CommandResolver::from_env().resolve(raw);
    let result = config.execution_engine().execute(resolved, slot).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !result.success {
        eprintln!("{}", result.title().red().bold());
        eprintln!("{}", result.output);
    } else if result.should_display() {
        println!("{}", result.title().bold().cyan());
        print!("{}", result.output);
        if !result.output.ends_with('\n') {
            println!();
        }
    } else {
        println!("{}", result.output.dimmed());
    }

    if !result.success {
        bail!("Slot {} could not be started", slot.ordinal());
    }
    Ok(())
}
