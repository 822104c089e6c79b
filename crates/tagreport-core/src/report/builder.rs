//! Report structure builder
//!
//! Turns a framework's exportables into the interactive outline: one top
//! node per MATRIX1D/MATRIX2D exportable, in exportable order, followed by
//! the uncategorized bucket.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, warn};

use crate::framework::catalog::find_widget;
use crate::framework::{get_widgets, EntryFilter, Exportable, Framework, Widget, WidgetType};
use crate::levels::{transform_levels_column_first, transform_levels_row_first, Level};
use crate::trace_time;

use super::filter::AxisFilter;
use super::{ReportNode, StructureVariant, UNCATEGORIZED_TITLE};

/// Applied filter values grouped by the widget they target, in the order
/// the filters were applied
struct AppliedFilters<'a> {
    by_widget: Vec<(&'a str, HashSet<String>)>,
}

impl<'a> AppliedFilters<'a> {
    fn new(framework: &'a Framework, filters: Option<&[EntryFilter]>) -> Self {
        let widget_keys: HashMap<&str, &str> = framework
            .filters()
            .iter()
            .map(|def| (def.key.as_str(), def.widget_key.as_str()))
            .collect();

        let by_widget = filters
            .unwrap_or_default()
            .iter()
            .filter_map(|applied| {
                let Some(widget_key) = widget_keys.get(applied.filter_key.as_str()) else {
                    debug!(filter_key = %applied.filter_key, "ignoring_unknown_filter");
                    return None;
                };
                let values: HashSet<String> = applied.value_list.iter().flatten().cloned().collect();
                Some((*widget_key, values))
            })
            .collect();

        AppliedFilters { by_widget }
    }

    /// Value sets applied to `widget_key`, first applied first
    fn for_widget(&self, widget_key: &str) -> Vec<&HashSet<String>> {
        self.by_widget
            .iter()
            .filter(|(key, _)| *key == widget_key)
            .map(|(_, values)| values)
            .collect()
    }
}

/// Builds report structures with a fixed orientation and bucket title
#[derive(Debug, Clone)]
pub struct ReportStructureBuilder {
    variant: StructureVariant,
    include_sub_column: bool,
    uncategorized_title: String,
}

impl Default for ReportStructureBuilder {
    fn default() -> Self {
        ReportStructureBuilder::new(StructureVariant::default())
    }
}

impl ReportStructureBuilder {
    pub fn new(variant: StructureVariant) -> Self {
        ReportStructureBuilder {
            variant,
            include_sub_column: false,
            uncategorized_title: UNCATEGORIZED_TITLE.to_string(),
        }
    }

    pub fn include_sub_column(mut self, include: bool) -> Self {
        self.include_sub_column = include;
        self
    }

    pub fn uncategorized_title(mut self, title: impl Into<String>) -> Self {
        self.uncategorized_title = title.into();
        self
    }

    /// Build the outline. Empty when there is no framework or the framework
    /// declares no exportables.
    pub fn build(
        &self,
        framework: Option<&Framework>,
        filters: Option<&[EntryFilter]>,
    ) -> Vec<ReportNode> {
        let Some(framework) = framework else {
            return Vec::new();
        };
        let Some(exportables) = framework.exportables.as_deref() else {
            return Vec::new();
        };

        let start = Instant::now();
        let widgets = get_widgets(Some(framework)).unwrap_or_default();
        let applied = AppliedFilters::new(framework, filters);

        let mut nodes: Vec<ReportNode> = exportables
            .iter()
            .filter_map(|exportable| self.exportable_node(exportable, &widgets, &applied))
            .collect();
        nodes.push(ReportNode::uncategorized(&self.uncategorized_title));

        debug!(
            variant = %self.variant,
            include_sub_column = self.include_sub_column,
            top_nodes = nodes.len(),
            "report_structure_built"
        );
        trace_time!(start, "build_report_structure", exportables = exportables.len());
        nodes
    }

    fn exportable_node(
        &self,
        exportable: &Exportable,
        widgets: &[Widget],
        applied: &AppliedFilters<'_>,
    ) -> Option<ReportNode> {
        match exportable.widget_type {
            WidgetType::Matrix2d => self.matrix2d_node(exportable, widgets, applied),
            WidgetType::Matrix1d => matrix1d_node(exportable, widgets, applied),
            WidgetType::Text
            | WidgetType::Number
            | WidgetType::Date
            | WidgetType::Time
            | WidgetType::DateRange
            | WidgetType::TimeRange
            | WidgetType::Select
            | WidgetType::Multiselect
            | WidgetType::Scale
            | WidgetType::Geo
            | WidgetType::Organigram => None,
            WidgetType::Unknown => {
                warn!(
                    exportable = %exportable.id,
                    widget_key = %exportable.widget_key,
                    "unhandled_exportable_widget_type"
                );
                debug_assert!(
                    exportable.widget_type != WidgetType::Unknown,
                    "unhandled widget type on exportable {}",
                    exportable.id
                );
                None
            }
        }
    }

    fn matrix2d_node(
        &self,
        exportable: &Exportable,
        widgets: &[Widget],
        applied: &AppliedFilters<'_>,
    ) -> Option<ReportNode> {
        let widget = resolve_widget(exportable, widgets, WidgetType::Matrix2d)?;
        let Some(props) = widget.matrix2d() else {
            debug!(exportable = %exportable.id, "skipping_matrix2d_without_properties");
            return None;
        };

        let levels: Cow<'_, [Level]> = match self.variant {
            StructureVariant::DimensionFirst => {
                Cow::Owned(transform_levels_row_first(&props, self.include_sub_column))
            }
            StructureVariant::SectorFirst if self.include_sub_column => {
                Cow::Owned(transform_levels_column_first(&props))
            }
            StructureVariant::SectorFirst => Cow::Borrowed(report_levels(exportable)?),
        };

        let empty = HashSet::new();
        let sets = applied.for_widget(&exportable.widget_key);
        let rows = sets.first().copied().unwrap_or(&empty);
        let columns = sets.get(1).copied().unwrap_or(&empty);

        let nodes = AxisFilter::new(rows, columns).map_levels(&levels);
        Some(ReportNode::new(&exportable.id, &widget.title, Some(nodes)))
    }
}

fn matrix1d_node(
    exportable: &Exportable,
    widgets: &[Widget],
    applied: &AppliedFilters<'_>,
) -> Option<ReportNode> {
    let widget = resolve_widget(exportable, widgets, WidgetType::Matrix1d)?;
    let levels = report_levels(exportable)?;

    let empty = HashSet::new();
    let sets = applied.for_widget(&exportable.widget_key);
    let rows = sets.first().copied().unwrap_or(&empty);

    let nodes = AxisFilter::new(rows, &empty).map_levels(levels);
    Some(ReportNode::new(&exportable.id, &widget.title, Some(nodes)))
}

fn resolve_widget<'w>(
    exportable: &Exportable,
    widgets: &'w [Widget],
    widget_type: WidgetType,
) -> Option<&'w Widget> {
    let widget = find_widget(widgets, &exportable.widget_key, widget_type);
    if widget.is_none() {
        debug!(
            exportable = %exportable.id,
            widget_key = %exportable.widget_key,
            widget_type = %widget_type,
            "skipping_exportable_without_widget"
        );
    }
    widget
}

fn report_levels(exportable: &Exportable) -> Option<&[Level]> {
    let levels = exportable.report_levels();
    if levels.is_none() {
        debug!(exportable = %exportable.id, "skipping_exportable_without_levels");
    }
    levels
}

/// Build the report structure for `framework` with the given orientation
/// and applied filters.
pub fn create_report_structure(
    variant: StructureVariant,
    include_sub_column: bool,
    framework: Option<&Framework>,
    filters: Option<&[EntryFilter]>,
) -> Vec<ReportNode> {
    ReportStructureBuilder::new(variant)
        .include_sub_column(include_sub_column)
        .build(framework, filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::UNCATEGORIZED_KEY;
    use serde_json::json;

    fn fruit_framework() -> Framework {
        serde_json::from_value(json!({
            "id": 1,
            "exportables": [{
                "id": "1",
                "widgetKey": "w1",
                "widgetType": "MATRIX1D",
                "data": { "report": { "levels": [
                    { "id": "a", "title": "Apple", "sublevels": [{ "id": "a-ripe", "title": "Ripe" }] }
                ] } }
            }],
            "filters": [{ "id": 1, "key": "w1", "widgetKey": "w1", "widgetType": "MATRIX1D" }],
            "primaryTagging": [{ "widgets": [{
                "id": 10, "key": "w1", "title": "Fruits", "widgetId": "MATRIX1D",
                "properties": { "rows": [] }
            }] }]
        }))
        .unwrap()
    }

    #[test]
    fn test_no_framework_or_exportables_yields_empty() {
        assert!(create_report_structure(StructureVariant::SectorFirst, false, None, None).is_empty());

        let bare: Framework = serde_json::from_value(json!({ "id": 1 })).unwrap();
        for variant in [StructureVariant::SectorFirst, StructureVariant::DimensionFirst] {
            for sub_column in [false, true] {
                assert!(create_report_structure(variant, sub_column, Some(&bare), None).is_empty());
            }
        }
    }

    #[test]
    fn test_empty_exportables_yield_only_uncategorized() {
        let framework: Framework =
            serde_json::from_value(json!({ "exportables": [] })).unwrap();
        let nodes = create_report_structure(StructureVariant::SectorFirst, false, Some(&framework), None);
        assert_eq!(nodes, vec![ReportNode::uncategorized(UNCATEGORIZED_TITLE)]);
    }

    #[test]
    fn test_matrix1d_without_filters() {
        let framework = fruit_framework();
        let nodes =
            create_report_structure(StructureVariant::SectorFirst, false, Some(&framework), Some(&[]));

        assert_eq!(
            serde_json::to_value(&nodes).unwrap(),
            json!([
                { "title": "Fruits", "key": "1", "selected": true, "draggable": true, "nodes": [
                    { "key": "a", "title": "Apple", "selected": true, "draggable": true, "nodes": [
                        { "key": "a-ripe", "title": "Ripe", "selected": true, "draggable": true }
                    ] }
                ] },
                { "title": "Uncategorized", "key": "uncategorized", "selected": true, "draggable": true, "nodes": [] }
            ])
        );
        assert_eq!(nodes[0].children()[0].children()[0].nodes, None);
    }

    #[test]
    fn test_matrix1d_filter_keeps_matching_branch() {
        let mut framework = fruit_framework();
        if let Some(exportables) = framework.exportables.as_mut() {
            if let Some(data) = exportables[0].data.as_mut() {
                data.report = serde_json::from_value(json!({ "levels": [
                    { "id": "a", "title": "Apple", "sublevels": [{ "id": "a-ripe", "title": "Ripe" }] },
                    { "id": "b", "title": "Banana", "sublevels": [{ "id": "b-raw", "title": "Raw" }] }
                ] }))
                .unwrap();
            }
        }

        let filters = vec![EntryFilter {
            filter_key: "w1".to_string(),
            value_list: Some(vec!["a-ripe".to_string()]),
        }];
        let nodes = create_report_structure(
            StructureVariant::SectorFirst,
            false,
            Some(&framework),
            Some(&filters),
        );

        let fruit = &nodes[0];
        assert_eq!(fruit.children().len(), 1);
        assert_eq!(fruit.children()[0].key, "a");
        assert_eq!(fruit.children()[0].children()[0].key, "a-ripe");
        assert_eq!(nodes.last().map(|n| n.key.as_str()), Some(UNCATEGORIZED_KEY));
    }

    #[test]
    fn test_unknown_filter_keys_are_ignored() {
        let framework = fruit_framework();
        let filters = vec![EntryFilter {
            filter_key: "not-a-filter".to_string(),
            value_list: Some(vec!["zzz".to_string()]),
        }];
        let filtered = create_report_structure(
            StructureVariant::SectorFirst,
            false,
            Some(&framework),
            Some(&filters),
        );
        let unfiltered =
            create_report_structure(StructureVariant::SectorFirst, false, Some(&framework), None);
        assert_eq!(filtered, unfiltered);
    }

    #[test]
    fn test_custom_uncategorized_title() {
        let framework = fruit_framework();
        let nodes = ReportStructureBuilder::new(StructureVariant::SectorFirst)
            .uncategorized_title("Other")
            .build(Some(&framework), None);
        let last = nodes.last().unwrap();
        assert_eq!(last.key, UNCATEGORIZED_KEY);
        assert_eq!(last.title, "Other");
    }

    #[test]
    fn test_missing_widget_skips_exportable() {
        let mut framework = fruit_framework();
        framework.primary_tagging = None;
        let nodes =
            create_report_structure(StructureVariant::SectorFirst, false, Some(&framework), None);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].key, UNCATEGORIZED_KEY);
    }
}
