//! Export options: composing a session from a framework and saved options,
//! and flattening it back to the `extraOptions` wire format

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::framework::{
    filter_contextual_widgets, get_widgets, EntryFilter, Framework, Widget, WidgetType,
};
use crate::report::{
    create_report_levels_for_export, create_report_structure_for_export, create_widget_ids,
    get_report_structure_variant, is_sub_sector_included, select_and_sort_widgets,
    sort_report_structure, ExportReportLevel, ExportReportStructure, ReportNode,
    ReportStructureBuilder, StructureVariant, TreeSelectableWidget, UNCATEGORIZED_TITLE,
};

/// Persisted export options (`extraOptions`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_structure: Option<Vec<ExportReportStructure>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_levels: Option<Vec<ExportReportLevel>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_text_widget_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_exporting_widgets: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_columns: Option<Vec<ExcelColumnOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excel_decoupled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_show_lead_entry_id: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_show_assessment_data: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_show_entry_widget_data: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_show_groups: Option<bool>,
}

/// One saved spreadsheet column: either a widget or a static column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelColumnOption {
    #[serde(default)]
    pub is_widget: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_column: Option<String>,
}

impl ExcelColumnOption {
    pub fn key(&self) -> Option<&str> {
        if self.is_widget {
            self.widget_key.as_deref()
        } else {
            self.static_column.as_deref()
        }
    }
}

/// A non-widget spreadsheet column (lead title, entry id, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticColumn {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

/// A spreadsheet column offered in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportColumn {
    pub key: String,
    pub title: String,
    pub is_widget: bool,
    pub selected: bool,
}

impl ExportColumn {
    fn matches(&self, is_widget: bool, key: &str) -> bool {
        self.is_widget == is_widget && self.key == key
    }
}

impl From<&ExportColumn> for ExcelColumnOption {
    fn from(column: &ExportColumn) -> Self {
        if column.is_widget {
            ExcelColumnOption {
                is_widget: true,
                widget_key: Some(column.key.clone()),
                static_column: None,
            }
        } else {
            ExcelColumnOption {
                is_widget: false,
                widget_key: None,
                static_column: Some(column.key.clone()),
            }
        }
    }
}

/// Merge saved column choices with the columns currently available.
///
/// Saved columns come first, in saved order and selected; the remaining
/// candidates follow unselected. With nothing saved, every candidate is
/// returned selected in candidate order.
pub fn merge_excel_columns(
    saved: Option<&[ExcelColumnOption]>,
    widgets: &[Widget],
    static_columns: &[StaticColumn],
) -> Vec<ExportColumn> {
    let candidates: Vec<ExportColumn> = static_columns
        .iter()
        .map(|column| ExportColumn {
            key: column.key.clone(),
            title: column.title.clone(),
            is_widget: false,
            selected: true,
        })
        .chain(widgets.iter().map(|widget| ExportColumn {
            key: widget.key.clone(),
            title: widget.title.clone(),
            is_widget: true,
            selected: true,
        }))
        .collect();

    let saved: Vec<(bool, &str)> = saved
        .unwrap_or_default()
        .iter()
        .filter_map(|option| option.key().map(|key| (option.is_widget, key)))
        .collect();
    if saved.is_empty() {
        return candidates;
    }

    let chosen = saved.iter().map(|&(is_widget, key)| {
        candidates
            .iter()
            .find(|candidate| candidate.matches(is_widget, key))
            .map(|candidate| ExportColumn {
                selected: true,
                ..candidate.clone()
            })
            .unwrap_or_else(|| ExportColumn {
                key: key.to_string(),
                title: String::new(),
                is_widget,
                selected: true,
            })
    });

    let rest = candidates
        .iter()
        .filter(|candidate| {
            !saved
                .iter()
                .any(|&(is_widget, key)| candidate.matches(is_widget, key))
        })
        .map(|candidate| ExportColumn {
            selected: false,
            ..candidate.clone()
        });

    chosen.chain(rest).collect()
}

/// Presentation switches of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFlags {
    pub excel_decoupled: bool,
    pub show_lead_entry_id: bool,
    pub show_assessment_data: bool,
    pub show_entry_widget_data: bool,
    pub show_groups: bool,
}

impl Default for ExportFlags {
    fn default() -> Self {
        ExportFlags {
            excel_decoupled: false,
            show_lead_entry_id: true,
            show_assessment_data: true,
            show_entry_widget_data: true,
            show_groups: false,
        }
    }
}

impl ExportFlags {
    /// Saved values where present, `self` otherwise
    fn with_saved(self, saved: &ExtraOptions) -> Self {
        ExportFlags {
            excel_decoupled: saved.excel_decoupled.unwrap_or(self.excel_decoupled),
            show_lead_entry_id: saved
                .report_show_lead_entry_id
                .unwrap_or(self.show_lead_entry_id),
            show_assessment_data: saved
                .report_show_assessment_data
                .unwrap_or(self.show_assessment_data),
            show_entry_widget_data: saved
                .report_show_entry_widget_data
                .unwrap_or(self.show_entry_widget_data),
            show_groups: saved.report_show_groups.unwrap_or(self.show_groups),
        }
    }
}

/// Caller choices applied while composing a session
#[derive(Debug, Clone)]
pub struct ComposeOverrides {
    /// Forced orientation; inferred from the saved structure when `None`
    pub variant: Option<StructureVariant>,
    /// Forced sub-column inclusion; inferred when `None`
    pub include_sub_column: Option<bool>,
    /// Orientation when nothing is forced or saved
    pub default_variant: StructureVariant,
    /// Sub-column inclusion when nothing is forced or saved
    pub default_include_sub_column: bool,
    pub uncategorized_title: String,
    pub static_columns: Vec<StaticColumn>,
    /// Flags used where the saved options say nothing
    pub flags: ExportFlags,
}

impl Default for ComposeOverrides {
    fn default() -> Self {
        ComposeOverrides {
            variant: None,
            include_sub_column: None,
            default_variant: StructureVariant::default(),
            default_include_sub_column: false,
            uncategorized_title: UNCATEGORIZED_TITLE.to_string(),
            static_columns: Vec::new(),
            flags: ExportFlags::default(),
        }
    }
}

/// Everything the user edits while composing one export
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSession {
    pub variant: StructureVariant,
    pub include_sub_column: bool,
    pub report_structure: Vec<ReportNode>,
    pub text_widgets: Vec<TreeSelectableWidget>,
    pub contextual_widgets: Vec<TreeSelectableWidget>,
    pub excel_columns: Vec<ExportColumn>,
    pub flags: ExportFlags,
}

impl ExportSession {
    /// Compose a session from the framework, applied filters and the
    /// options of a previous export, if any.
    pub fn compose(
        framework: Option<&Framework>,
        filters: Option<&[EntryFilter]>,
        saved: Option<&ExtraOptions>,
        overrides: &ComposeOverrides,
    ) -> Self {
        let widgets = get_widgets(framework).unwrap_or_default();
        let saved_structure = saved.and_then(|s| s.report_structure.as_deref());

        let text: Vec<Widget> = widgets
            .iter()
            .filter(|widget| widget.widget_id == WidgetType::Text)
            .cloned()
            .collect();
        let contextual = filter_contextual_widgets(Some(widgets.as_slice())).unwrap_or_default();

        let text_widgets = select_and_sort_widgets(
            Some(text.as_slice()),
            saved.and_then(|s| s.report_text_widget_ids.as_deref()),
        );
        let contextual_widgets = select_and_sort_widgets(
            Some(contextual.as_slice()),
            saved.and_then(|s| s.report_exporting_widgets.as_deref()),
        );

        let variant = overrides.variant.unwrap_or_else(|| match saved_structure {
            Some(structure) => get_report_structure_variant(Some(widgets.as_slice()), Some(structure)),
            None => overrides.default_variant,
        });
        let include_sub_column = overrides
            .include_sub_column
            .unwrap_or_else(|| match saved_structure {
                Some(structure) => is_sub_sector_included(Some(structure)),
                None => overrides.default_include_sub_column,
            });

        let fresh = ReportStructureBuilder::new(variant)
            .include_sub_column(include_sub_column)
            .uncategorized_title(&overrides.uncategorized_title)
            .build(framework, filters);
        let report_structure = match saved_structure {
            Some(structure) => sort_report_structure(&fresh, structure),
            None => fresh,
        };

        let excel_columns = merge_excel_columns(
            saved.and_then(|s| s.excel_columns.as_deref()),
            &widgets,
            &overrides.static_columns,
        );

        let flags = match saved {
            Some(saved) => overrides.flags.with_saved(saved),
            None => overrides.flags,
        };

        debug!(
            %variant,
            include_sub_column,
            reconciled = saved_structure.is_some(),
            "export_session_composed"
        );

        ExportSession {
            variant,
            include_sub_column,
            report_structure,
            text_widgets,
            contextual_widgets,
            excel_columns,
            flags,
        }
    }

    /// Flatten the session into the `extraOptions` sent with the export
    pub fn to_extra_options(&self) -> ExtraOptions {
        ExtraOptions {
            report_structure: Some(create_report_structure_for_export(&self.report_structure)),
            report_levels: Some(create_report_levels_for_export(&self.report_structure)),
            report_text_widget_ids: Some(create_widget_ids(&self.text_widgets)),
            report_exporting_widgets: Some(create_widget_ids(&self.contextual_widgets)),
            excel_columns: Some(
                self.excel_columns
                    .iter()
                    .filter(|column| column.selected)
                    .map(ExcelColumnOption::from)
                    .collect(),
            ),
            excel_decoupled: Some(self.flags.excel_decoupled),
            report_show_lead_entry_id: Some(self.flags.show_lead_entry_id),
            report_show_assessment_data: Some(self.flags.show_assessment_data),
            report_show_entry_widget_data: Some(self.flags.show_entry_widget_data),
            report_show_groups: Some(self.flags.show_groups),
        }
    }
}
