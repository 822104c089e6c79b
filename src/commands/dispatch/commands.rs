//! Routing of parsed subcommands to their implementations

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{compose, config, hidden, payload, structure, widgets};
use tagreport_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Widgets(args) => widgets::execute(ctx, args),
            Commands::Structure(args) => structure::execute(ctx, args),
            Commands::Payload(args) => payload::execute(ctx, args),
            Commands::Compose(args) => compose::execute(ctx, args),
            Commands::Hidden(args) => hidden::execute(ctx, args),
            Commands::Config => config::execute(ctx),
        }
    }
}
