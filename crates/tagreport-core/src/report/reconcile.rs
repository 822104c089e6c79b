//! Reconciliation of a fresh outline against a persisted one

use std::collections::HashSet;

use tracing::debug;

use crate::framework::{Widget, WidgetType};

use super::payload::ExportReportStructure;
use super::{ReportNode, StructureVariant};

/// Reorder `fresh` to follow the key order of `persisted`, recursively.
///
/// Fresh nodes missing from the persisted list are dropped. When a
/// persisted entry has no fresh counterpart, the fresh list at that depth
/// is returned unchanged instead. A persisted entry without `levels` keeps
/// the fresh children as they are.
pub fn sort_report_structure(
    fresh: &[ReportNode],
    persisted: &[ExportReportStructure],
) -> Vec<ReportNode> {
    let mut sorted = Vec::with_capacity(persisted.len());

    for entry in persisted {
        let Some(node) = fresh.iter().find(|node| node.key == entry.id) else {
            debug!(key = %entry.id, "persisted_key_without_fresh_node");
            return fresh.to_vec();
        };

        let nodes = match (node.nodes.as_deref(), entry.levels.as_deref()) {
            (Some(children), Some(levels)) => Some(sort_report_structure(children, levels)),
            (children, _) => children.map(<[ReportNode]>::to_vec),
        };

        sorted.push(ReportNode {
            nodes,
            ..node.clone()
        });
    }

    sorted
}

/// Infer the orientation a persisted structure was built with.
///
/// The structure is row rooted when, under any top-level entry, the next
/// level's ids are raw row keys of some MATRIX2D widget.
pub fn get_report_structure_variant(
    widgets: Option<&[Widget]>,
    persisted: Option<&[ExportReportStructure]>,
) -> StructureVariant {
    let (Some(widgets), Some(persisted)) = (widgets, persisted) else {
        return StructureVariant::SectorFirst;
    };

    let second_level_ids: HashSet<&str> = persisted
        .iter()
        .flat_map(|entry| entry.levels.iter().flatten())
        .map(|level| level.id.as_str())
        .collect();

    let row_rooted = widgets
        .iter()
        .filter(|widget| widget.widget_id == WidgetType::Matrix2d)
        .filter_map(Widget::matrix2d)
        .any(|props| props.row_keys().any(|key| second_level_ids.contains(key)));

    if row_rooted {
        StructureVariant::DimensionFirst
    } else {
        StructureVariant::SectorFirst
    }
}

/// Whether a persisted structure nests deep enough to carry sub-column
/// levels: some entry has a level five deep.
pub fn is_sub_sector_included(persisted: Option<&[ExportReportStructure]>) -> bool {
    /// Depth below a top-level entry at which sub-column levels appear
    const SUB_SECTOR_DEPTH: usize = 4;

    fn reaches(entries: &[ExportReportStructure], remaining: usize) -> bool {
        entries.iter().any(|entry| match remaining {
            0 => true,
            _ => entry
                .levels
                .as_deref()
                .is_some_and(|levels| reaches(levels, remaining - 1)),
        })
    }

    persisted.is_some_and(|entries| reaches(entries, SUB_SECTOR_DEPTH))
}
