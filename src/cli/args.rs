//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `migrate`: Rewrite hardcoded Chinese text into translation calls
//! - `sync`: Reconcile the key store and locale files with the sources
//! - `init`: Initialize zhlift configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

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
            Some(Command::Migrate(cmd)) => cmd.args.common.verbose,
            Some(Command::Sync(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite files and persist the store (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct MigrateCommand {
    /// Migrate only these files instead of scanning the include roots
    pub paths: Vec<PathBuf>,
    #[command(flatten)]
    pub args: MigrateArgs,
}

#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Prune store entries and locale keys no longer referenced by sources
    #[arg(long)]
    pub clean: bool,

    /// Sync only this locale file (default: all configured locale files)
    #[arg(long)]
    pub locale_file: Option<String>,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite hardcoded Chinese text into i18n calls and extract templates
    Migrate(MigrateCommand),
    /// Sync locale files (and with --clean, the store) against the sources
    Sync(SyncCommand),
    /// Initialize a new .zhliftrc.json configuration file
    Init,
}
