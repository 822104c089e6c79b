//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::options::{ExportFlags, StaticColumn};
use crate::report::{StructureVariant, UNCATEGORIZED_TITLE};

/// tagreport configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagReportConfig {
    /// Report structure defaults
    #[serde(default)]
    pub report: ReportConfig,

    /// Presentation flags used when saved options say nothing
    #[serde(default)]
    pub export: ExportConfig,

    /// Spreadsheet columns offered alongside widget columns
    #[serde(default)]
    pub columns: ColumnsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Orientation used when nothing is forced or saved
    #[serde(default)]
    pub variant: StructureVariant,

    #[serde(default)]
    pub include_sub_column: bool,

    /// Title of the trailing bucket node
    #[serde(default = "default_uncategorized_title")]
    pub uncategorized_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            variant: StructureVariant::default(),
            include_sub_column: false,
            uncategorized_title: default_uncategorized_title(),
        }
    }
}

fn default_uncategorized_title() -> String {
    UNCATEGORIZED_TITLE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default)]
    pub excel_decoupled: bool,

    #[serde(default = "default_true")]
    pub show_lead_entry_id: bool,

    #[serde(default = "default_true")]
    pub show_assessment_data: bool,

    #[serde(default = "default_true")]
    pub show_entry_widget_data: bool,

    #[serde(default)]
    pub show_groups: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig::from(ExportFlags::default())
    }
}

impl From<ExportFlags> for ExportConfig {
    fn from(flags: ExportFlags) -> Self {
        ExportConfig {
            excel_decoupled: flags.excel_decoupled,
            show_lead_entry_id: flags.show_lead_entry_id,
            show_assessment_data: flags.show_assessment_data,
            show_entry_widget_data: flags.show_entry_widget_data,
            show_groups: flags.show_groups,
        }
    }
}

impl From<&ExportConfig> for ExportFlags {
    fn from(config: &ExportConfig) -> Self {
        ExportFlags {
            excel_decoupled: config.excel_decoupled,
            show_lead_entry_id: config.show_lead_entry_id,
            show_assessment_data: config.show_assessment_data,
            show_entry_widget_data: config.show_entry_widget_data,
            show_groups: config.show_groups,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    #[serde(default, rename = "static")]
    pub static_columns: Vec<StaticColumn>,
}
