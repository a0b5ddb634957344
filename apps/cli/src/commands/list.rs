//! List command implementation.

use cmdboard_core::BoardConfig;
use cmdboard_core::hotkey::HOTKEY_SLOTS;
use cmdboard_core::model::{PageData, PageNumber, SlotRef};
use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::board;

/// Execute the list command.
///
/// Shows every page, or just `page`. A pending reset is shown but left for
/// the board to consume.
pub async fn execute(config: &BoardConfig, page: Option<PageNumber>, json_output: bool) -> anyhow::Result<()> {
    let store = board::open_store(config)?;
    let pages = match page {
        Some(page) => vec![store.peek_page(page)?],
        None => PageNumber::all().map(|page| store.peek_page(page)).collect::<Result<Vec<PageData>, _>>()?,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    for data in &pages {
        display_page(data);
    }
    Ok(())
}

fn display_page(data: &PageData) {
    #[derive(Tabled)]
    struct SlotRow {
        #[tabled(rename = "#")]
        ordinal: usize,
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Label")]
        label: String,
        #[tabled(rename = "Command")]
        command: String,
    }

    let rows: Vec<SlotRow> = data
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| SlotRow {
            ordinal: SlotRef::new(data.page, i).ordinal(),
            key: if i < HOTKEY_SLOTS { format!("F{}", i + 1) } else { "-".to_string() },
            label: data.label(i),
            command: slot.command.clone(),
        })
        .collect();

    println!("{} {}", format!("Page {}:", data.page).bold().cyan(), data.description);
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();
}
