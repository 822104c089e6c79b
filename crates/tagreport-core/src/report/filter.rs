//! Level tree pruning against applied row/column filters

use std::collections::HashSet;

use crate::levels::Level;

use super::ReportNode;

/// Row and column key sets applied to one matrix widget
///
/// A set constrains only when non-empty. With both sets constrained a level
/// must match each of them; with one, matching that one is enough.
#[derive(Debug, Clone, Copy)]
pub struct AxisFilter<'a> {
    rows: &'a HashSet<String>,
    columns: &'a HashSet<String>,
}

impl<'a> AxisFilter<'a> {
    pub fn new(rows: &'a HashSet<String>, columns: &'a HashSet<String>) -> Self {
        AxisFilter { rows, columns }
    }

    /// True when neither set constrains anything
    pub fn is_unconstrained(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Whether `level` itself matches the applied filters.
    ///
    /// A set matches a level when it holds the full level id or any of the
    /// id's `-`-separated components.
    pub fn is_active(&self, level: &Level) -> bool {
        let row_active = matches_level(self.rows, level);
        let column_active = matches_level(self.columns, level);

        if !self.rows.is_empty() && !self.columns.is_empty() {
            row_active && column_active
        } else {
            row_active || column_active
        }
    }

    /// Map one level to a node, or `None` when the level is filtered out
    pub fn map_level(&self, level: &Level) -> Option<ReportNode> {
        let children = level
            .sublevels
            .as_ref()
            .map(|sublevels| self.map_levels(sublevels));

        if self.is_unconstrained() {
            return Some(ReportNode::new(&level.id, &level.title, children));
        }

        let active = self.is_active(level);
        match children {
            Some(children) if !children.is_empty() || active => {
                Some(ReportNode::new(&level.id, &level.title, Some(children)))
            }
            Some(_) => None,
            None if active => Some(ReportNode::new(&level.id, &level.title, None)),
            None => None,
        }
    }

    pub fn map_levels(&self, levels: &[Level]) -> Vec<ReportNode> {
        levels
            .iter()
            .filter_map(|level| self.map_level(level))
            .collect()
    }
}

fn matches_level(set: &HashSet<String>, level: &Level) -> bool {
    !set.is_empty()
        && (set.contains(&level.id) || level.components().any(|key| set.contains(key)))
}

/// Map a level tree to selectable nodes, keeping only branches that match
/// the applied row/column sets (everything when both are empty).
pub fn map_report_levels_to_nodes(
    levels: &[Level],
    rows: &HashSet<String>,
    columns: &HashSet<String>,
) -> Vec<ReportNode> {
    AxisFilter::new(rows, columns).map_levels(levels)
}
