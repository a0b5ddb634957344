//! Cmdboard - paged command slots in the terminal.

use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cmdboard_core::hotkey::{HotkeyDispatcher, UnsupportedBackend};
use cmdboard_core::{BoardConfig, CommandResolver, SlotGridController};
use cmdboard_tui::app::App;
use cmdboard_tui::board_view::BoardView;
use cmdboard_tui::theme::BoardTheme;
use cmdboard_tui::ui;

/// Cmdboard - paged command slots in the terminal
#[derive(Parser, Debug)]
#[command(name = "cmdboard", author, version, about)]
struct Args {
    /// Data directory (overrides CMDBOARD_DATA_DIR and configuration files)
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// Do not install the global F1-F12 hotkeys
    #[arg(long)]
    no_hotkeys: bool,

    /// Log filter written to the log file (e.g. "debug", "cmdboard_core=trace")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, problems) = BoardConfig::discover();
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    if args.no_hotkeys {
        config.global_hotkeys = Some(false);
    }

    let store = config.open_store().context("Failed to open the board's data directory")?;
    init_logging(&config, args.log_level.as_deref())?;
    for e in &problems {
        warn!(error = %e, "Ignoring configuration file");
    }

    let hotkeys = if config.hotkeys_enabled() {
        HotkeyDispatcher::platform_default()
    } else {
        HotkeyDispatcher::new(Box::new(UnsupportedBackend))
    };
    let controller = SlotGridController::new(
        BoardView::new(),
        Arc::new(store),
        Arc::new(config.execution_engine()),
        hotkeys,
    )
    .with_resolver(CommandResolver::from_env());
    let mut app = App::new(controller, BoardTheme::from_map(&config.theme));

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let outcome = run(&mut terminal, &mut app);

    // Persist and unhook before restoring the terminal
    app.shutdown();
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    outcome
}

fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
    }
    Ok(())
}

/// Logs go to a file in the data directory so the board's screen stays clean.
fn init_logging(config: &BoardConfig, level: Option<&str>) -> Result<()> {
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = match level.or(config.log_level.as_deref()) {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}
