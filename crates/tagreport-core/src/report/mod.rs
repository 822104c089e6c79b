//! Report structure: the selectable, re-orderable export outline
//!
//! - [`builder`] builds the node tree from a framework and applied filters
//! - [`filter`] prunes level trees against row/column filter sets
//! - [`reconcile`] reorders a fresh tree to match a persisted one
//! - [`payload`] flattens a tree back into the export wire formats

pub mod builder;
pub mod filter;
pub mod payload;
pub mod reconcile;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagReportError;
use crate::framework::ids;

pub use builder::{create_report_structure, ReportStructureBuilder};
pub use filter::{map_report_levels_to_nodes, AxisFilter};
pub use payload::{
    create_report_levels, create_report_levels_for_export, create_report_structure_for_export, create_widget_ids,
    select_and_sort_widgets, ExportReportLevel, ExportReportStructure, TreeSelectableWidget,
};
pub use reconcile::{get_report_structure_variant, is_sub_sector_included, sort_report_structure};

/// Key of the synthetic trailing bucket node
pub const UNCATEGORIZED_KEY: &str = "uncategorized";

/// Default title of the synthetic trailing bucket node
pub const UNCATEGORIZED_TITLE: &str = "Uncategorized";

/// Traversal order of a 2D matrix when building the outline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureVariant {
    /// Column rooted: sector, then dimension
    #[default]
    #[serde(rename = "columnFirst")]
    SectorFirst,
    /// Row rooted: dimension, then sector
    #[serde(rename = "rowFirst")]
    DimensionFirst,
}

impl StructureVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            StructureVariant::SectorFirst => "columnFirst",
            StructureVariant::DimensionFirst => "rowFirst",
        }
    }
}

impl fmt::Display for StructureVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureVariant {
    type Err = TagReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "columnFirst" | "column-first" | "sectorFirst" | "sector-first" => {
                Ok(StructureVariant::SectorFirst)
            }
            "rowFirst" | "row-first" | "dimensionFirst" | "dimension-first" => {
                Ok(StructureVariant::DimensionFirst)
            }
            other => Err(TagReportError::UnknownVariant(other.to_string())),
        }
    }
}

/// An interactive outline node
///
/// `nodes` is `None` for leaves and `Some` (possibly empty) for any node
/// derived from a level that had children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNode {
    #[serde(deserialize_with = "ids::deserialize")]
    pub key: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub selected: bool,

    #[serde(default)]
    pub draggable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<ReportNode>>,
}

impl ReportNode {
    /// A selected, draggable node
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        nodes: Option<Vec<ReportNode>>,
    ) -> Self {
        ReportNode {
            key: key.into(),
            title: title.into(),
            selected: true,
            draggable: true,
            nodes,
        }
    }

    /// The trailing bucket for content outside any structural widget
    pub fn uncategorized(title: impl Into<String>) -> Self {
        ReportNode::new(UNCATEGORIZED_KEY, title, Some(Vec::new()))
    }

    /// Total number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(ReportNode::count).sum::<usize>()
    }

    pub fn children(&self) -> &[ReportNode] {
        self.nodes.as_deref().unwrap_or(&[])
    }
}
