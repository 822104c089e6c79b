//! `tagreport structure`: the selectable report outline

use serde_json::json;

use crate::cli::StructureArgs;
use crate::output_by_format_result;
use tagreport_core::error::Result;

use super::dispatch::CommandContext;
use super::inputs::LoadedInputs;
use super::render;

pub fn execute(ctx: &CommandContext, args: &StructureArgs) -> Result<()> {
    let inputs = LoadedInputs::load(ctx, &args.inputs)?;
    let session = inputs.compose(ctx, &args.inputs);
    let nodes = &session.report_structure;

    output_by_format_result!(ctx.cli.format,
        json => {
            let output = json!({
                "variant": session.variant,
                "includeSubColumn": session.include_sub_column,
                "reportStructure": nodes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if !ctx.cli.quiet {
                println!(
                    "variant: {}  sub-columns: {}",
                    session.variant,
                    if session.include_sub_column { "yes" } else { "no" }
                );
            }
            print!("{}", render::outline(nodes));
            if !ctx.cli.quiet {
                println!("{} node(s)", render::count(nodes));
            }
        }
    )
}
