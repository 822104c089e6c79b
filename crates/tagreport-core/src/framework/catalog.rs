//! Widget catalog: one ordered list of every tagging widget

use super::{Framework, Widget, WidgetType};

/// Flatten primary tagging sections, then secondary tagging, into one list.
///
/// Returns `None` only when there is no framework at all; a framework with
/// no tagging sections yields an empty list.
pub fn get_widgets(framework: Option<&Framework>) -> Option<Vec<Widget>> {
    let framework = framework?;

    let primary = framework
        .primary_tagging
        .iter()
        .flatten()
        .flat_map(|section| section.widgets.iter().flatten());
    let secondary = framework.secondary_tagging.iter().flatten();

    Some(primary.chain(secondary).cloned().collect())
}

/// Keep only widgets that can be reported as contextual columns.
pub fn filter_contextual_widgets(widgets: Option<&[Widget]>) -> Option<Vec<Widget>> {
    let widgets = widgets?;
    Some(
        widgets
            .iter()
            .filter(|widget| widget.widget_id.is_contextual())
            .cloned()
            .collect(),
    )
}

/// Find a widget by key and type
pub fn find_widget<'a>(
    widgets: &'a [Widget],
    key: &str,
    widget_type: WidgetType,
) -> Option<&'a Widget> {
    widgets
        .iter()
        .find(|widget| widget.key == key && widget.widget_id == widget_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(id: &str, widget_type: &str) -> serde_json::Value {
        json!({ "id": id, "key": format!("key-{id}"), "title": id, "widgetId": widget_type })
    }

    fn framework(value: serde_json::Value) -> Framework {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_framework_yields_none() {
        assert_eq!(get_widgets(None), None);
    }

    #[test]
    fn test_framework_without_sections_yields_empty() {
        let empty = framework(json!({ "id": 1 }));
        assert_eq!(get_widgets(Some(&empty)), Some(vec![]));

        let explicit = framework(json!({ "id": 1, "primaryTagging": [], "secondaryTagging": [] }));
        assert_eq!(get_widgets(Some(&explicit)), Some(vec![]));
    }

    #[test]
    fn test_primary_then_secondary_order() {
        let fw = framework(json!({
            "primaryTagging": [
                { "widgets": [widget("A", "MATRIX1D"), widget("B", "TEXT")] },
                { "widgets": null },
                { "widgets": [widget("B2", "NUMBER")] }
            ],
            "secondaryTagging": [widget("C", "DATE"), widget("D", "SCALE")]
        }));

        let ids: Vec<String> = get_widgets(Some(&fw))
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["A", "B", "B2", "C", "D"]);
    }

    #[test]
    fn test_get_widgets_is_idempotent() {
        let fw = framework(json!({
            "primaryTagging": [{ "widgets": [widget("A", "MATRIX2D")] }],
            "secondaryTagging": [widget("C", "TEXT")]
        }));
        assert_eq!(get_widgets(Some(&fw)), get_widgets(Some(&fw)));
    }

    #[test]
    fn test_filter_contextual_widgets() {
        assert_eq!(filter_contextual_widgets(None), None);
        assert_eq!(filter_contextual_widgets(Some(&[])), Some(vec![]));

        let widgets: Vec<Widget> = serde_json::from_value(json!([
            widget("1", "TEXT"),
            widget("2", "NUMBER"),
            widget("3", "DATE_RANGE"),
            widget("4", "MATRIX2D"),
            widget("5", "TIME_RANGE"),
            widget("6", "ORGANIGRAM")
        ]))
        .unwrap();

        let ids: Vec<String> = filter_contextual_widgets(Some(&widgets))
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["3", "5", "6"]);
    }

    #[test]
    fn test_find_widget_requires_matching_type() {
        let widgets: Vec<Widget> =
            serde_json::from_value(json!([widget("1", "MATRIX1D"), widget("2", "MATRIX2D")]))
                .unwrap();
        assert!(find_widget(&widgets, "key-1", WidgetType::Matrix1d).is_some());
        assert!(find_widget(&widgets, "key-1", WidgetType::Matrix2d).is_none());
    }
}
