//! Export payload flattening
//!
//! The interactive tree goes out in two shapes: titled levels
//! (`reportLevels`) and bare ids (`reportStructure`). Only selected nodes
//! are kept in either.

use serde::{Deserialize, Serialize};

use crate::framework::{ids, Widget};
use crate::levels::Level;

use super::ReportNode;

/// One entry of the `reportStructure` wire format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReportStructure {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<ExportReportStructure>>,
}

/// One top-level entry of the `reportLevels` wire format
///
/// The top level names its children `levels`; nested entries keep the
/// `{id, title, sublevels}` shape of [`Level`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReportLevel {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Level>>,
}

impl From<Level> for ExportReportLevel {
    fn from(level: Level) -> Self {
        ExportReportLevel {
            id: level.id,
            levels: level.sublevels,
        }
    }
}

/// A widget with a selection flag, as offered for text/contextual columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSelectableWidget {
    #[serde(flatten)]
    pub widget: Widget,

    #[serde(default)]
    pub selected: bool,
}

/// Selected nodes as titled levels
pub fn create_report_levels(nodes: &[ReportNode]) -> Vec<Level> {
    nodes
        .iter()
        .filter(|node| node.selected)
        .map(|node| Level {
            id: node.key.clone(),
            title: node.title.clone(),
            sublevels: node.nodes.as_deref().map(create_report_levels),
        })
        .collect()
}

/// Selected nodes as the bare-id structure sent to the export job
pub fn create_report_structure_for_export(nodes: &[ReportNode]) -> Vec<ExportReportStructure> {
    nodes
        .iter()
        .filter(|node| node.selected)
        .map(|node| ExportReportStructure {
            id: node.key.clone(),
            levels: node.nodes.as_deref().map(create_report_structure_for_export),
        })
        .collect()
}

/// Selected nodes as `reportLevels` wire entries
pub fn create_report_levels_for_export(nodes: &[ReportNode]) -> Vec<ExportReportLevel> {
    create_report_levels(nodes)
        .into_iter()
        .map(ExportReportLevel::from)
        .collect()
}

/// Ids of the selected widgets, in order
pub fn create_widget_ids(widgets: &[TreeSelectableWidget]) -> Vec<String> {
    widgets
        .iter()
        .filter(|entry| entry.selected)
        .map(|entry| entry.widget.id.clone())
        .collect()
}

/// Widgets named in `sorted_ids` first (in that order, selected), then the
/// remaining widgets unselected.
pub fn select_and_sort_widgets(
    widgets: Option<&[Widget]>,
    sorted_ids: Option<&[String]>,
) -> Vec<TreeSelectableWidget> {
    let widgets = widgets.unwrap_or_default();
    let sorted_ids = sorted_ids.unwrap_or_default();

    let selected = sorted_ids.iter().filter_map(|id| {
        widgets
            .iter()
            .find(|widget| &widget.id == id)
            .map(|widget| TreeSelectableWidget {
                widget: widget.clone(),
                selected: true,
            })
    });

    let rest = widgets
        .iter()
        .filter(|widget| !sorted_ids.contains(&widget.id))
        .map(|widget| TreeSelectableWidget {
            widget: widget.clone(),
            selected: false,
        });

    selected.chain(rest).collect()
}
