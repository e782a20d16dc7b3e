/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with issue counts and exit behavior
/// - `Err` if the command fails (e.g., invalid config, missing roots)
use anyhow::{Context, Result};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => {
            let cwd = std::env::current_dir().context("Failed to read the working directory")?;
            init(&cwd)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
