pub mod init;
pub mod migrate;
pub mod sync;

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use super::args::CommonArgs;
use crate::config::{Config, load_config};

/// Resolved environment a command runs in.
pub struct CommandContext {
    pub base_dir: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl CommandContext {
    /// Load the config starting from the working directory and resolve the
    /// effective base directory (CLI flag wins over the config file).
    pub fn build(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let loaded = load_config(&cwd)?;

        if common.verbose && !loaded.from_file {
            eprintln!(
                "{} No config file found, using defaults (run `zhlift init` to create one)",
                "note:".bold()
            );
        }

        let base_dir = match &common.source_root {
            Some(path) => path.clone(),
            None => cwd.join(&loaded.config.source_root),
        };

        Ok(Self {
            base_dir,
            config: loaded.config,
            verbose: common.verbose,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.base_dir.join(self.config.source_map_path())
    }

    pub fn locale_path(&self, locale_file: &str) -> PathBuf {
        self.base_dir
            .join(&self.config.resource_dir)
            .join(locale_file)
    }
}
