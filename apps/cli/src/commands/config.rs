//! Config command implementation.

use anyhow::bail;
use clap::Subcommand;
use cmdboard_core::BoardConfig;
use colored::Colorize;
use serde_json::json;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show where configuration and data files live
    Path {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a configuration file with default values
    Init {
        /// Write the global file instead of ./.cmdboardrc
        #[arg(long)]
        global: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute a config command.
pub async fn execute(config: &BoardConfig, command: ConfigCommand) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show { json } => show(config, json),
        ConfigCommand::Path { json } => path(config, json),
        ConfigCommand::Init { global, force } => init(global, force),
    }
}

fn show(config: &BoardConfig, json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

fn path(config: &BoardConfig, json_output: bool) -> anyhow::Result<()> {
    let global = BoardConfig::default_global_path();
    let local = BoardConfig::default_local_path();
    let paths = config.store_paths();

    if json_output {
        let value = json!({
            "global_config": global,
            "local_config": local,
            "data_dir": config.data_dir(),
            "commands": paths.commands,
            "descriptions": paths.descriptions,
            "reset_flag": paths.reset_flag,
            "log": config.log_path(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let marker = |p: &std::path::Path| if p.exists() { "✓".green() } else { "-".dimmed() };
    println!("{}", "Configuration:".bold());
    println!("  {} Global: {}", marker(&global), global.display());
    println!("  {} Local:  {}", marker(&local), local.display());
    println!();
    println!("{}", "Data:".bold());
    println!("  Directory:    {}", config.data_dir().display());
    println!("  Commands:     {}", paths.commands.display());
    println!("  Descriptions: {}", paths.descriptions.display());
    println!("  Reset flag:   {}", paths.reset_flag.display());
    println!("  Log:          {}", config.log_path().display());
    Ok(())
}

fn init(global: bool, force: bool) -> anyhow::Result<()> {
    let target = if global { BoardConfig::default_global_path() } else { BoardConfig::default_local_path() };
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }

    BoardConfig::default().save_to_file(&target)?;
    println!("{} Wrote {}", "✓".green(), target.display());
    Ok(())
}
