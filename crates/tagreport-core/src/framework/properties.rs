//! Typed widget properties, selected by widget type

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::WidgetType;

/// A keyed, labelled option (cell, sub-row, sub-column, scale option, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLabel {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix1dRow {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub cells: Vec<KeyLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix1dProperties {
    #[serde(default)]
    pub rows: Vec<Matrix1dRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix2dRow {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sub_rows: Vec<KeyLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix2dColumn {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sub_columns: Vec<KeyLabel>,
}

/// Rows (dimensions) and columns (sectors) of a 2D matrix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix2dProperties {
    #[serde(default)]
    pub rows: Vec<Matrix2dRow>,
    #[serde(default)]
    pub columns: Vec<Matrix2dColumn>,
}

impl Matrix2dProperties {
    pub fn row_keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.key.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleProperties {
    #[serde(default)]
    pub options: Vec<KeyLabel>,
}

impl ScaleProperties {
    /// Order of the option with `key`, if it exists
    pub fn order_of(&self, key: &str) -> Option<i64> {
        self.options
            .iter()
            .find(|option| option.key == key)
            .map(|option| option.order)
    }
}

/// One node of an organigram option tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganigramOption {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Option<Vec<OrganigramOption>>,
}

impl OrganigramOption {
    /// Find the option with `key` in this subtree
    pub fn find(&self, key: &str) -> Option<&OrganigramOption> {
        if self.key == key {
            return Some(self);
        }
        self.children
            .iter()
            .flatten()
            .find_map(|child| child.find(key))
    }

    /// Keys of this option and every option below it
    pub fn subtree_keys(&self) -> Vec<&str> {
        let mut keys = vec![self.key.as_str()];
        for child in self.children.iter().flatten() {
            keys.extend(child.subtree_keys());
        }
        keys
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganigramProperties {
    pub options: OrganigramOption,
}

/// Properties shaped by widget type
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetProperties {
    Matrix1d(Matrix1dProperties),
    Matrix2d(Matrix2dProperties),
    Scale(ScaleProperties),
    Organigram(OrganigramProperties),
    /// Widget types whose properties carry no structure used here
    Plain,
    /// Properties absent or malformed for the widget type
    Missing,
}

impl WidgetProperties {
    pub fn parse(widget_type: WidgetType, raw: Option<&Value>) -> Self {
        let raw = match raw {
            Some(Value::Null) | None => return WidgetProperties::Missing,
            Some(raw) => raw,
        };

        let parsed = match widget_type {
            WidgetType::Matrix1d => {
                serde_json::from_value(raw.clone()).map(WidgetProperties::Matrix1d)
            }
            WidgetType::Matrix2d => {
                serde_json::from_value(raw.clone()).map(WidgetProperties::Matrix2d)
            }
            WidgetType::Scale => serde_json::from_value(raw.clone()).map(WidgetProperties::Scale),
            WidgetType::Organigram => {
                serde_json::from_value(raw.clone()).map(WidgetProperties::Organigram)
            }
            _ => return WidgetProperties::Plain,
        };

        parsed.unwrap_or_else(|err| {
            debug!(widget_type = %widget_type, error = %err, "malformed_widget_properties");
            WidgetProperties::Missing
        })
    }
}
