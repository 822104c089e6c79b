use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::framework::{ids, Widget};

use super::predicate::{self, ParentValue};
use super::Condition;

/// The current value of one widget on an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Id of the widget this value belongs to
    #[serde(deserialize_with = "ids::deserialize")]
    pub widget: String,

    #[serde(default)]
    pub data: AttributeData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeData {
    #[serde(default)]
    pub value: Option<Value>,
}

/// Result of one condition, with `invert` applied. An undefined result is
/// false and never inverted.
fn condition_result(condition: &Condition, parent: &ParentValue<'_>) -> bool {
    predicate::evaluate(condition, parent)
        .map(|result| result != condition.invert)
        .unwrap_or(false)
}

/// Whether `widget` is hidden given its parent widget and the parent's
/// current value.
///
/// Widgets without a conditional, or with no conditions, are visible. A
/// conditional that names no parent widget always hides the widget.
pub fn is_widget_hidden(widget: &Widget, parent: Option<&Widget>, value: Option<&Value>) -> bool {
    let Some(conditional) = widget.conditional.as_ref() else {
        return false;
    };
    if conditional.parent_widget.is_none() {
        return true;
    }
    let Some((first, rest)) = conditional.conditions.split_first() else {
        return false;
    };

    let parent = ParentValue {
        widget: parent,
        value,
    };
    let visible = rest.iter().fold(condition_result(first, &parent), |result, condition| {
        condition
            .conjunction_operator
            .combine(result, condition_result(condition, &parent))
    });

    !visible
}

/// Ids of every widget hidden by its conditional under `attributes`
pub fn get_hidden_widget_ids(widgets: &[Widget], attributes: &[Attribute]) -> HashSet<String> {
    let by_id: HashMap<&str, &Widget> = widgets
        .iter()
        .map(|widget| (widget.id.as_str(), widget))
        .collect();
    let values: HashMap<&str, &Value> = attributes
        .iter()
        .filter_map(|attribute| Some((attribute.widget.as_str(), attribute.data.value.as_ref()?)))
        .collect();

    widgets
        .iter()
        .filter(|widget| {
            let parent_id = widget
                .conditional
                .as_ref()
                .and_then(|conditional| conditional.parent_widget.as_deref());
            let parent = parent_id.and_then(|id| by_id.get(id).copied());
            let value = parent_id.and_then(|id| values.get(id).copied());

            let hidden = is_widget_hidden(widget, parent, value);
            if hidden {
                trace!(widget = %widget.id, parent = ?parent_id, "widget_hidden");
            }
            hidden
        })
        .map(|widget| widget.id.clone())
        .collect()
}
