//! `tagreport payload`: flatten an edited outline into export payloads

use serde_json::json;

use crate::cli::PayloadArgs;
use crate::output_by_format_result;
use tagreport_core::error::Result;
use tagreport_core::input::load_document;
use tagreport_core::report::{
    create_report_levels, create_report_levels_for_export, create_report_structure_for_export,
    ReportNode,
};

use super::dispatch::{trace_command, CommandContext};
use super::render;

pub fn execute(ctx: &CommandContext, args: &PayloadArgs) -> Result<()> {
    let nodes: Vec<ReportNode> = load_document(&args.nodes)?;

    trace_command!(ctx.cli, ctx.start, "load_nodes");

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = json!({
                "reportStructure": create_report_structure_for_export(&nodes),
                "reportLevels": create_report_levels_for_export(&nodes),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            print!("{}", render::levels(&create_report_levels(&nodes)));
        }
    )
}
