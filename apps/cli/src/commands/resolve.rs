//! Resolve command implementation.

use cmdboard_core::CommandResolver;

/// Execute the resolve command.
pub async fn execute(command: &str) -> anyhow::Result<()> {
    println!("{}", CommandResolver::from_env().resolve(command));
    Ok(())
}
