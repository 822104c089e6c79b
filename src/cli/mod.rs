//! CLI argument parsing for tagreport
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json,
//! --config

pub mod args;
pub mod format;
pub mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tagreport_core::format::OutputFormat;

pub use args::{
    ComposeArgs, HiddenArgs, PayloadArgs, StructureArgs, StructureInputs, WidgetsArgs,
};
use parse::parse_output_format;

/// tagreport - build and reconcile export report structures
#[derive(Parser, Debug)]
#[command(name = "tagreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, value_parser = parse_output_format, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. "debug" or "tagreport_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (defaults to $TAGREPORT_CONFIG, ./tagreport.toml,
    /// then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the widgets of a framework in catalog order
    Widgets(WidgetsArgs),

    /// Build the selectable report structure of a framework
    Structure(StructureArgs),

    /// Flatten a report structure into the export payloads
    Payload(PayloadArgs),

    /// Compose a full export session and print its extraOptions
    Compose(ComposeArgs),

    /// List widgets hidden by their conditionals
    Hidden(HiddenArgs),

    /// Show the effective configuration
    Config,
}
