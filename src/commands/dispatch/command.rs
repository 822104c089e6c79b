//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{Cli, StructureInputs};
use tagreport_core::config::TagReportConfig;
use tagreport_core::error::Result;
use tagreport_core::options::ComposeOverrides;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: TagReportConfig,
    /// File the configuration came from, if any
    pub config_path: Option<PathBuf>,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        cli: &'a Cli,
        config: TagReportConfig,
        config_path: Option<PathBuf>,
        start: Instant,
    ) -> Self {
        Self {
            cli,
            config,
            config_path,
            start,
        }
    }

    /// Compose overrides: configuration defaults, then command-line flags
    pub fn overrides(&self, inputs: &StructureInputs) -> ComposeOverrides {
        let mut overrides = self.config.to_overrides();
        overrides.variant = inputs.variant;
        if inputs.include_sub_column.is_some() {
            overrides.include_sub_column = inputs.include_sub_column;
        }
        overrides
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("tagreport {}", env!("CARGO_PKG_VERSION"));
        println!("Run `tagreport --help` for usage");
        Ok(())
    }
}
