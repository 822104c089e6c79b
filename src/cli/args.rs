//! Argument structs for subcommands

use std::path::PathBuf;

use clap::Args;
use tagreport_core::report::StructureVariant;

use super::parse::parse_variant;

/// Inputs shared by commands that build a report structure
#[derive(Args, Debug, Clone)]
pub struct StructureInputs {
    /// Framework snapshot (.json, .yaml, .yml, or - for stdin)
    pub framework: PathBuf,

    /// Applied entry filters (a list of {filterKey, valueList})
    #[arg(long, short = 'f')]
    pub filters: Option<PathBuf>,

    /// Saved export options (extraOptions) to restore order and orientation from
    #[arg(long, short = 's')]
    pub saved: Option<PathBuf>,

    /// Structure variant: columnFirst (sector first) or rowFirst (dimension first)
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<StructureVariant>,

    /// Include sub-column levels under 2D matrix columns (`=false` overrides a saved structure)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub include_sub_column: Option<bool>,
}

#[derive(Args, Debug, Clone)]
pub struct WidgetsArgs {
    /// Framework snapshot (.json, .yaml, .yml, or - for stdin)
    pub framework: PathBuf,

    /// Only list contextual widgets (select, date, organigram, ...)
    #[arg(long)]
    pub contextual: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StructureArgs {
    #[command(flatten)]
    pub inputs: StructureInputs,
}

#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// Report structure tree ({key, title, selected, nodes} list)
    pub nodes: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub inputs: StructureInputs,
}

#[derive(Args, Debug, Clone)]
pub struct HiddenArgs {
    /// Framework snapshot (.json, .yaml, .yml, or - for stdin)
    pub framework: PathBuf,

    /// Attribute values ({widget, data: {value}} list)
    #[arg(long, short = 'a')]
    pub attributes: PathBuf,
}
