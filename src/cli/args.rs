//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Verify generated implementations of the configured interfaces
//! - `init`: Write a default `.bundlecheckrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::{ArtifactKind, CheckKind};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read sources.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Root of the interface sources (overrides config file)
    #[arg(long)]
    pub interface_root: Option<PathBuf>,

    /// Root of the generated sources (overrides config file)
    #[arg(long)]
    pub generated_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: every check a target declares)
    #[arg(value_enum)]
    pub checks: Vec<CheckKind>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Interface to verify instead of the configured targets.
    /// Can be specified multiple times.
    #[arg(long = "interface", value_name = "FQN")]
    pub interfaces: Vec<String>,

    /// Generator kind of the interfaces given with --interface
    /// (default: taken from a `bundle`/`logger` check, else logger)
    #[arg(long, value_enum)]
    pub kind: Option<ArtifactKind>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify generated logger and message bundle implementations
    Check(CheckCommand),
    /// Initialize a new .bundlecheckrc.json configuration file
    Init,
}
