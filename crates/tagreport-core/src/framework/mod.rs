//! Analysis framework snapshot
//!
//! The framework is fetched once per export session and treated as
//! read-only. Widgets keep their `properties` as raw JSON; the typed shape
//! is selected by `widget_id` through [`Widget::properties`].

pub mod catalog;
pub(crate) mod ids;
mod properties;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::conditional::Conditional;
use crate::levels::Level;

pub use catalog::{filter_contextual_widgets, get_widgets};
pub use properties::{
    KeyLabel, Matrix1dProperties, Matrix1dRow, Matrix2dColumn, Matrix2dProperties, Matrix2dRow,
    OrganigramOption, OrganigramProperties, ScaleProperties, WidgetProperties,
};

/// Widget type discriminant (`widgetId` / `widgetType` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetType {
    Text,
    Number,
    Date,
    Time,
    DateRange,
    TimeRange,
    Select,
    Multiselect,
    Scale,
    Geo,
    Organigram,
    Matrix1d,
    Matrix2d,
    /// Any widget type this crate does not know about
    #[serde(other)]
    Unknown,
}

impl WidgetType {
    /// Widget types that can be exported as contextual report columns
    pub const CONTEXTUAL: [WidgetType; 9] = [
        WidgetType::Select,
        WidgetType::Multiselect,
        WidgetType::Scale,
        WidgetType::Geo,
        WidgetType::Time,
        WidgetType::Date,
        WidgetType::Organigram,
        WidgetType::DateRange,
        WidgetType::TimeRange,
    ];

    pub fn is_contextual(self) -> bool {
        Self::CONTEXTUAL.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::Text => "TEXT",
            WidgetType::Number => "NUMBER",
            WidgetType::Date => "DATE",
            WidgetType::Time => "TIME",
            WidgetType::DateRange => "DATE_RANGE",
            WidgetType::TimeRange => "TIME_RANGE",
            WidgetType::Select => "SELECT",
            WidgetType::Multiselect => "MULTISELECT",
            WidgetType::Scale => "SCALE",
            WidgetType::Geo => "GEO",
            WidgetType::Organigram => "ORGANIGRAM",
            WidgetType::Matrix1d => "MATRIX1D",
            WidgetType::Matrix2d => "MATRIX2D",
            WidgetType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed tagging field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,

    #[serde(
        default,
        deserialize_with = "ids::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<String>,

    pub key: String,

    #[serde(default)]
    pub title: String,

    pub widget_id: WidgetType,

    #[serde(default)]
    pub order: i64,

    /// Raw properties; shape depends on `widget_id`
    #[serde(default)]
    pub properties: Option<Value>,

    #[serde(default)]
    pub conditional: Option<Conditional>,

    /// Fields this crate does not interpret (width, version, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Widget {
    /// Typed view of `properties`, chosen by `widget_id`.
    ///
    /// Returns [`WidgetProperties::Missing`] when the properties are absent
    /// or do not have the shape the widget type requires.
    pub fn properties(&self) -> WidgetProperties {
        WidgetProperties::parse(self.widget_id, self.properties.as_ref())
    }

    /// MATRIX2D properties, if this is a well-formed MATRIX2D widget
    pub fn matrix2d(&self) -> Option<Matrix2dProperties> {
        match self.properties() {
            WidgetProperties::Matrix2d(props) => Some(props),
            _ => None,
        }
    }
}

/// A primary tagging section: an ordered group of widgets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub widgets: Option<Vec<Widget>>,
}

/// Report data attached to an exportable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportableReport {
    #[serde(default)]
    pub levels: Option<Vec<Level>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportableData {
    #[serde(default)]
    pub report: Option<ExportableReport>,
}

/// Server-declared export metadata for one widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exportable {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,

    pub widget_key: String,

    pub widget_type: WidgetType,

    #[serde(default)]
    pub data: Option<ExportableData>,
}

impl Exportable {
    /// Precomputed (sector-first, no sub-column) report levels
    pub fn report_levels(&self) -> Option<&[Level]> {
        self.data
            .as_ref()
            .and_then(|data| data.report.as_ref())
            .and_then(|report| report.levels.as_deref())
    }
}

/// A framework filter definition, mapping a filter key to its widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    #[serde(
        default,
        deserialize_with = "ids::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    pub key: String,

    pub widget_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<WidgetType>,
}

/// An applied entry filter (`filterableData` entry)
///
/// Only `filterKey` and `valueList` matter here; range and operator fields
/// used by the entry search are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFilter {
    pub filter_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_list: Option<Vec<String>>,
}

/// The analysis framework snapshot consumed by the export core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    #[serde(
        default,
        deserialize_with = "ids::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default)]
    pub exportables: Option<Vec<Exportable>>,

    #[serde(default)]
    pub filters: Option<Vec<FilterDefinition>>,

    #[serde(default)]
    pub primary_tagging: Option<Vec<Section>>,

    #[serde(default)]
    pub secondary_tagging: Option<Vec<Widget>>,
}

impl Framework {
    pub fn filters(&self) -> &[FilterDefinition] {
        self.filters.as_deref().unwrap_or(&[])
    }
}
