//! `tagreport hidden`: widgets hidden by their conditionals

use crate::cli::HiddenArgs;
use crate::output_by_format_result;
use tagreport_core::conditional::{get_hidden_widget_ids, Attribute};
use tagreport_core::error::Result;
use tagreport_core::framework::{get_widgets, Framework};
use tagreport_core::input::load_document;

use super::dispatch::{trace_command, CommandContext};

pub fn execute(ctx: &CommandContext, args: &HiddenArgs) -> Result<()> {
    let framework: Framework = load_document(&args.framework)?;
    let attributes: Vec<Attribute> = load_document(&args.attributes)?;
    let widgets = get_widgets(Some(&framework)).unwrap_or_default();

    let hidden = get_hidden_widget_ids(&widgets, &attributes);
    let mut ids: Vec<&str> = hidden.iter().map(String::as_str).collect();
    ids.sort_unstable();

    trace_command!(ctx.cli, ctx.start, "evaluate_conditionals");

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&ids)?);
            Ok(())
        },
        human => {
            for widget in widgets.iter().filter(|widget| hidden.contains(&widget.id)) {
                println!("{}  {}  {}", widget.id, widget.key, widget.title);
            }
            if !ctx.cli.quiet {
                println!("{} of {} widget(s) hidden", hidden.len(), widgets.len());
            }
        }
    )
}
