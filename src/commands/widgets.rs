//! `tagreport widgets`: the framework's widget catalog

use crate::cli::WidgetsArgs;
use crate::output_by_format_result;
use tagreport_core::error::Result;
use tagreport_core::framework::{
    filter_contextual_widgets, get_widgets, Framework, Widget, WidgetProperties, WidgetType,
};
use tagreport_core::input::load_document;

use super::dispatch::{trace_command, CommandContext};

pub fn execute(ctx: &CommandContext, args: &WidgetsArgs) -> Result<()> {
    let framework: Framework = load_document(&args.framework)?;
    let mut widgets = get_widgets(Some(&framework)).unwrap_or_default();
    if args.contextual {
        widgets = filter_contextual_widgets(Some(widgets.as_slice())).unwrap_or_default();
    }

    trace_command!(ctx.cli, ctx.start, "collect_widgets");

    output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&widgets)?);
            Ok(())
        },
        human => {
            for widget in &widgets {
                println!("{}", describe(widget));
            }
            if !ctx.cli.quiet {
                println!("{} widget(s)", widgets.len());
            }
        }
    )
}

/// One catalog line: id, type, key, title and a summary of the properties
fn describe(widget: &Widget) -> String {
    let line = format!(
        "{}  {:<12} {}  {}",
        widget.id,
        widget.widget_id.as_str(),
        widget.key,
        widget.title
    );
    match shape(widget) {
        Some(shape) => format!("{}  [{}]", line, shape),
        None => line,
    }
}

fn shape(widget: &Widget) -> Option<String> {
    match widget.properties() {
        WidgetProperties::Matrix1d(props) => Some(format!(
            "rows={} cells={}",
            props.rows.len(),
            props.rows.iter().map(|row| row.cells.len()).sum::<usize>()
        )),
        WidgetProperties::Matrix2d(props) => Some(format!(
            "rows={} sub_rows={} columns={} sub_columns={}",
            props.rows.len(),
            props.rows.iter().map(|row| row.sub_rows.len()).sum::<usize>(),
            props.columns.len(),
            props.columns.iter().map(|column| column.sub_columns.len()).sum::<usize>()
        )),
        WidgetProperties::Scale(props) => Some(format!("options={}", props.options.len())),
        WidgetProperties::Organigram(props) => {
            Some(format!("options={}", props.options.subtree_keys().len()))
        }
        WidgetProperties::Missing
            if matches!(widget.widget_id, WidgetType::Matrix1d | WidgetType::Matrix2d) =>
        {
            Some("properties missing".to_string())
        }
        WidgetProperties::Plain | WidgetProperties::Missing => None,
    }
}
