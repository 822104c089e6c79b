//! `tagreport compose`: a full export session and its `extraOptions`

use crate::cli::ComposeArgs;
use crate::output_by_format_result;
use tagreport_core::error::Result;
use tagreport_core::options::ExportSession;
use tagreport_core::report::TreeSelectableWidget;

use super::dispatch::CommandContext;
use super::inputs::LoadedInputs;
use super::render;

pub fn execute(ctx: &CommandContext, args: &ComposeArgs) -> Result<()> {
    let inputs = LoadedInputs::load(ctx, &args.inputs)?;
    let session = inputs.compose(ctx, &args.inputs);

    output_by_format_result!(ctx.cli.format,
        json => {
            let options = session.to_extra_options();
            println!("{}", serde_json::to_string_pretty(&options)?);
            Ok(())
        },
        human => {
            print_session(&session, ctx.cli.quiet);
        }
    )
}

fn print_session(session: &ExportSession, quiet: bool) {
    println!("Report structure ({}):", session.variant);
    print!("{}", render::outline(&session.report_structure));

    print_widgets("Text widgets", &session.text_widgets);
    print_widgets("Contextual widgets", &session.contextual_widgets);

    println!("Excel columns:");
    for column in &session.excel_columns {
        let mark = if column.selected { "[x]" } else { "[ ]" };
        println!("{} {} ({})", mark, column.title, column.key);
    }

    if !quiet {
        let flags = &session.flags;
        println!(
            "excel_decoupled={} lead_entry_id={} assessment_data={} entry_widget_data={} groups={}",
            flags.excel_decoupled,
            flags.show_lead_entry_id,
            flags.show_assessment_data,
            flags.show_entry_widget_data,
            flags.show_groups
        );
    }
}

fn print_widgets(heading: &str, widgets: &[TreeSelectableWidget]) {
    println!("{}:", heading);
    for entry in widgets {
        let mark = if entry.selected { "[x]" } else { "[ ]" };
        println!("{} {} ({})", mark, entry.widget.title, entry.widget.id);
    }
}
