//! Command dispatch logic for tagreport

use std::time::Instant;

use crate::cli::Cli;
use tagreport_core::config::TagReportConfig;
use tagreport_core::error::Result;

pub(crate) mod command;
mod commands;
mod macros;

pub(crate) use command::CommandContext;
use command::{Command, NoCommand};
pub(crate) use macros::trace_command;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let (config, config_path) = TagReportConfig::discover(cli.config.as_deref())?;

    trace_command!(cli, start, "load_config");

    let ctx = CommandContext::new(cli, config, config_path, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
