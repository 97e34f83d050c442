use anyhow::Result;

use super::args::{Arguments, Command};
use super::commands::{init::init, migrate::migrate, sync::sync};
use super::exit_status::ExitStatus;

/// Main entry point for the zhlift CLI. Dispatches to the command handler
/// for the parsed arguments; no command prints help and exits cleanly.
pub fn run(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Migrate(cmd)) => migrate(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Init) => init(),
        None => Ok(ExitStatus::Success),
    }
}
