//! Conditional widget visibility
//!
//! A widget may declare a condition list over one parent widget's value.
//! Conditions are evaluated left to right and combined with each
//! condition's conjunction; the widget is hidden when the result is false.

mod evaluate;
mod predicate;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::framework::{ids, WidgetType};

pub use evaluate::{get_hidden_widget_ids, is_widget_hidden, Attribute, AttributeData};

/// A widget's visibility rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    /// Id of the parent widget whose value is tested
    #[serde(
        default,
        alias = "parentId",
        deserialize_with = "ids::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_widget: Option<String>,

    #[serde(
        default,
        alias = "parentWidgetId",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_widget_type: Option<WidgetType>,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// One test against the parent widget's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub order: i64,

    pub operator: Operator,

    /// Operand; shape depends on the operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_modifier: Option<OperatorModifier>,

    /// How this condition combines with the result so far
    #[serde(default)]
    pub conjunction_operator: Conjunction,

    #[serde(default)]
    pub invert: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    Empty,

    NumberGreaterThan,
    NumberLessThan,
    NumberEqualTo,

    TextStartsWith,
    TextEndsWith,
    TextContains,

    SingleSelectionSelected,
    MultiSelectionSelected,

    OrganigramSelected,
    OrganigramDescendentSelected,

    ScaleSelected,
    ScaleMoreThan,
    ScaleLessThan,

    DateAfter,
    DateBefore,
    DateEqualTo,

    TimeAfter,
    TimeBefore,
    TimeEqualTo,

    DateRangeAfter,
    DateRangeBefore,
    DateRangeIncludes,

    TimeRangeAfter,
    TimeRangeBefore,
    TimeRangeIncludes,

    Matrix1dRowsSelected,
    Matrix1dCellsSelected,

    Matrix2dRowsSelected,
    Matrix2dSubRowsSelected,
    Matrix2dColumnsSelected,
    Matrix2dSubColumnsSelected,

    /// Operators this crate cannot evaluate
    #[serde(other)]
    Unknown,
}

/// How a key list is matched against the selected keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorModifier {
    #[default]
    Some,
    Every,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conjunction {
    #[default]
    And,
    Or,
    Xor,
}

impl Conjunction {
    pub fn combine(self, left: bool, right: bool) -> bool {
        match self {
            Conjunction::And => left && right,
            Conjunction::Or => left || right,
            Conjunction::Xor => left ^ right,
        }
    }
}
