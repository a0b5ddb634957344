//! Cmdboard CLI - headless access to the command board
//!
//! Lists, edits, runs and resets the same slot store the `cmdboard` terminal
//! board uses.

mod board;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cmdboard_core::model::{PageNumber, SlotRef};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{ConfigCommand, config, describe, list, reset, resolve, run, set};

/// Cmdboard CLI - paged command slots from the command line
///
/// The board holds five pages of sixteen slots. Slots are addressed by the
/// number shown on their button, 1 through 80.
#[derive(Parser, Debug)]
#[command(name = "cmdboard-cli", author, version, about = "Cmdboard - paged command slots from the command line")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Data directory (overrides CMDBOARD_DATA_DIR and configuration files)
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show slots and page descriptions
    List {
        /// Only this page (1-5)
        #[arg(short, long, value_parser = board::parse_page)]
        page: Option<PageNumber>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a slot's command or description
    Set {
        /// Slot number (1-80)
        #[arg(value_parser = board::parse_slot)]
        slot: SlotRef,

        /// New command text
        #[arg(short, long)]
        command: Option<String>,

        /// New description (shown as the button label)
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Change a page's description
    Describe {
        /// Page number (1-5)
        #[arg(value_parser = board::parse_page)]
        page: PageNumber,

        /// New page description
        description: String,
    },

    /// Run a slot's stored command and print its output
    Run {
        /// Slot number (1-80)
        #[arg(value_parser = board::parse_slot)]
        slot: SlotRef,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restore every command to the default on the next load
    Reset,

    /// Show how a command line resolves against PATH
    Resolve {
        /// Command line to resolve
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Inspect or create configuration files
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = board::load_config(args.data_dir);

    // Initialize tracing
    let level = match args.log_level.as_deref().or(config.log_level.as_deref()).unwrap_or("warn") {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::List { page, json } => list::execute(&config, page, json).await,
        Command::Set { slot, command, description } => set::execute(&config, slot, command, description).await,
        Command::Describe { page, description } => describe::execute(&config, page, description).await,
        Command::Run { slot, json } => run::execute(&config, slot, json).await,
        Command::Reset => reset::execute(&config).await,
        Command::Resolve { command } => resolve::execute(&command.join(" ")).await,
        Command::Config(command) => config::execute(&config, command).await,
    }
}
