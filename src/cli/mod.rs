pub mod args;
pub mod commands;
pub mod exit_status;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use run::run;
