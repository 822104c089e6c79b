//! Per-operator predicates over a parent widget's value
//!
//! `None` means the predicate could not be evaluated (missing value,
//! unparsable operand, shape mismatch).

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::framework::{Widget, WidgetProperties};

use super::{Condition, Operator, OperatorModifier};

/// What a condition is evaluated against
pub(super) struct ParentValue<'a> {
    pub widget: Option<&'a Widget>,
    pub value: Option<&'a Value>,
}

pub(super) fn evaluate(condition: &Condition, parent: &ParentValue<'_>) -> Option<bool> {
    let operand = condition.value.as_ref();
    let modifier = condition.operator_modifier.unwrap_or_default();

    match condition.operator {
        Operator::Empty => Some(!parent.value.is_some_and(has_content)),

        Operator::NumberGreaterThan => compare_numbers(parent.value?, operand?, Ordering::is_gt),
        Operator::NumberLessThan => compare_numbers(parent.value?, operand?, Ordering::is_lt),
        Operator::NumberEqualTo => compare_numbers(parent.value?, operand?, Ordering::is_eq),

        Operator::TextStartsWith => Some(parent.value?.as_str()?.starts_with(operand?.as_str()?)),
        Operator::TextEndsWith => Some(parent.value?.as_str()?.ends_with(operand?.as_str()?)),
        Operator::TextContains => Some(parent.value?.as_str()?.contains(operand?.as_str()?)),

        Operator::SingleSelectionSelected | Operator::ScaleSelected => {
            let selected = HashSet::from([parent.value?.as_str()?]);
            Some(matches_keys(&keys(operand?)?, modifier, |key| selected.contains(key)))
        }
        Operator::MultiSelectionSelected | Operator::OrganigramSelected => {
            let selected = key_set(parent.value?)?;
            Some(matches_keys(&keys(operand?)?, modifier, |key| selected.contains(key)))
        }
        Operator::OrganigramDescendentSelected => {
            organigram_descendent_selected(parent, operand?, modifier)
        }

        Operator::ScaleMoreThan => compare_scale(parent, operand?, Ordering::is_ge),
        Operator::ScaleLessThan => compare_scale(parent, operand?, Ordering::is_le),

        Operator::DateAfter => compare_parsed(parent.value?, operand?, parse_date, Ordering::is_gt),
        Operator::DateBefore => compare_parsed(parent.value?, operand?, parse_date, Ordering::is_lt),
        Operator::DateEqualTo => compare_parsed(parent.value?, operand?, parse_date, Ordering::is_eq),

        Operator::TimeAfter => compare_parsed(parent.value?, operand?, parse_time, Ordering::is_gt),
        Operator::TimeBefore => compare_parsed(parent.value?, operand?, parse_time, Ordering::is_lt),
        Operator::TimeEqualTo => compare_parsed(parent.value?, operand?, parse_time, Ordering::is_eq),

        Operator::DateRangeAfter | Operator::DateRangeBefore | Operator::DateRangeIncludes => {
            let range = Range::read(parent.value?, "startDate", "endDate", parse_date)?;
            range.test(condition.operator, parse_date(operand?)?)
        }
        Operator::TimeRangeAfter | Operator::TimeRangeBefore | Operator::TimeRangeIncludes => {
            let range = Range::read(parent.value?, "startTime", "endTime", parse_time)?;
            range.test(condition.operator, parse_time(operand?)?)
        }

        Operator::Matrix1dRowsSelected => {
            let selected = matrix1d_selection(parent.value?, Matrix1dLevel::Rows)?;
            Some(matches_keys(&keys(operand?)?, modifier, |key| selected.contains(key)))
        }
        Operator::Matrix1dCellsSelected => {
            let selected = matrix1d_selection(parent.value?, Matrix1dLevel::Cells)?;
            Some(matches_keys(&keys(operand?)?, modifier, |key| selected.contains(key)))
        }

        Operator::Matrix2dRowsSelected
        | Operator::Matrix2dSubRowsSelected
        | Operator::Matrix2dColumnsSelected
        | Operator::Matrix2dSubColumnsSelected => {
            let depth = match condition.operator {
                Operator::Matrix2dRowsSelected => 0,
                Operator::Matrix2dSubRowsSelected => 1,
                Operator::Matrix2dColumnsSelected => 2,
                _ => 3,
            };
            let selected = matrix2d_selection(parent.value?, depth)?;
            Some(matches_keys(&keys(operand?)?, modifier, |key| selected.contains(key)))
        }

        Operator::Unknown => None,
    }
}

/// Whether a widget value holds anything
///
/// Matrix values count as filled when any cell is set; a matrix2d column
/// entry counts even with no sub-columns listed.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(_) => true,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => entries.values().any(|entry| match entry {
            Value::Array(_) => true,
            other => has_content(other),
        }),
    }
}

fn matches_keys(
    keys: &[&str],
    modifier: OperatorModifier,
    is_selected: impl Fn(&str) -> bool,
) -> bool {
    match modifier {
        OperatorModifier::Some => keys.iter().any(|key| is_selected(key)),
        OperatorModifier::Every => keys.iter().all(|key| is_selected(key)),
    }
}

/// A list of string keys, or a single key
fn keys(value: &Value) -> Option<Vec<&str>> {
    match value {
        Value::String(key) => Some(vec![key.as_str()]),
        Value::Array(items) => items.iter().map(Value::as_str).collect(),
        _ => None,
    }
}

fn key_set(value: &Value) -> Option<HashSet<&str>> {
    keys(value).map(|keys| keys.into_iter().collect())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn compare_numbers(value: &Value, operand: &Value, test: fn(Ordering) -> bool) -> Option<bool> {
    let ordering = as_number(value)?.partial_cmp(&as_number(operand)?)?;
    Some(test(ordering))
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?;
    // Accept full timestamps by reading the date part only
    let date = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn parse_time(value: &Value) -> Option<NaiveTime> {
    let text = value.as_str()?;
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

fn compare_parsed<T: Ord>(
    value: &Value,
    operand: &Value,
    parse: fn(&Value) -> Option<T>,
    test: fn(Ordering) -> bool,
) -> Option<bool> {
    Some(test(parse(value)?.cmp(&parse(operand)?)))
}

struct Range<T> {
    start: T,
    end: T,
}

impl<T: Ord> Range<T> {
    fn read(
        value: &Value,
        start_field: &str,
        end_field: &str,
        parse: fn(&Value) -> Option<T>,
    ) -> Option<Self> {
        Some(Range {
            start: parse(value.get(start_field)?)?,
            end: parse(value.get(end_field)?)?,
        })
    }

    fn test(&self, operator: Operator, point: T) -> Option<bool> {
        match operator {
            Operator::DateRangeAfter | Operator::TimeRangeAfter => Some(self.start > point),
            Operator::DateRangeBefore | Operator::TimeRangeBefore => Some(self.end < point),
            Operator::DateRangeIncludes | Operator::TimeRangeIncludes => {
                Some(self.start <= point && point <= self.end)
            }
            _ => None,
        }
    }
}

fn compare_scale(parent: &ParentValue<'_>, operand: &Value, test: fn(Ordering) -> bool) -> Option<bool> {
    let WidgetProperties::Scale(scale) = parent.widget?.properties() else {
        return None;
    };
    let selected = scale.order_of(parent.value?.as_str()?)?;
    let threshold = scale.order_of(operand.as_str()?)?;
    Some(test(selected.cmp(&threshold)))
}

fn organigram_descendent_selected(
    parent: &ParentValue<'_>,
    operand: &Value,
    modifier: OperatorModifier,
) -> Option<bool> {
    let selected = key_set(parent.value?)?;
    let organigram = match parent.widget.map(Widget::properties) {
        Some(WidgetProperties::Organigram(props)) => Some(props),
        _ => None,
    };

    let is_selected = |key: &str| match organigram.as_ref().and_then(|o| o.options.find(key)) {
        Some(option) => option
            .subtree_keys()
            .into_iter()
            .any(|k| selected.contains(k)),
        None => selected.contains(key),
    };
    Some(matches_keys(&keys(operand)?, modifier, is_selected))
}

#[derive(Clone, Copy)]
enum Matrix1dLevel {
    Rows,
    Cells,
}

/// Selected row or cell keys of a `{row: {cell: bool}}` value
fn matrix1d_selection(value: &Value, level: Matrix1dLevel) -> Option<HashSet<&str>> {
    let rows = value.as_object()?;
    let mut selected = HashSet::new();
    for (row, cells) in rows {
        let Some(cells) = cells.as_object() else {
            continue;
        };
        for (cell, flag) in cells {
            if flag.as_bool() == Some(true) {
                match level {
                    Matrix1dLevel::Rows => selected.insert(row.as_str()),
                    Matrix1dLevel::Cells => selected.insert(cell.as_str()),
                };
            }
        }
    }
    Some(selected)
}

/// Keys present at `depth` of a `{row: {subRow: {column: [subColumn]}}}`
/// value: 0 rows, 1 sub-rows, 2 columns, 3 sub-columns.
fn matrix2d_selection(value: &Value, depth: usize) -> Option<HashSet<&str>> {
    fn collect<'v>(value: &'v Value, depth: usize, out: &mut HashSet<&'v str>) {
        match value {
            Value::Object(entries) => {
                for (key, nested) in entries {
                    if depth == 0 {
                        out.insert(key.as_str());
                    } else {
                        collect(nested, depth - 1, out);
                    }
                }
            }
            Value::Array(items) if depth == 0 => {
                out.extend(items.iter().filter_map(Value::as_str));
            }
            _ => {}
        }
    }

    value.as_object()?;
    let mut selected = HashSet::new();
    collect(value, depth, &mut selected);
    Some(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional::Conjunction;
    use serde_json::json;

    fn condition(operator: Operator, value: Value) -> Condition {
        Condition {
            key: "c".to_string(),
            order: 1,
            operator,
            value: Some(value),
            operator_modifier: None,
            conjunction_operator: Conjunction::And,
            invert: false,
        }
    }

    fn eval(operator: Operator, operand: Value, value: Option<Value>) -> Option<bool> {
        let parent = ParentValue {
            widget: None,
            value: value.as_ref(),
        };
        evaluate(&condition(operator, operand), &parent)
    }

    #[test]
    fn test_empty() {
        assert_eq!(eval(Operator::Empty, Value::Null, None), Some(true));
        assert_eq!(eval(Operator::Empty, Value::Null, Some(json!(""))), Some(true));
        assert_eq!(eval(Operator::Empty, Value::Null, Some(json!([]))), Some(true));
        assert_eq!(eval(Operator::Empty, Value::Null, Some(json!({ "r": { "c": false } }))), Some(true));
        assert_eq!(eval(Operator::Empty, Value::Null, Some(json!(0))), Some(false));
        assert_eq!(eval(Operator::Empty, Value::Null, Some(json!({ "r": { "sr": { "c": [] } } }))), Some(false));
    }

    #[test]
    fn test_numbers_and_text() {
        assert_eq!(eval(Operator::NumberGreaterThan, json!(3), Some(json!(5))), Some(true));
        assert_eq!(eval(Operator::NumberLessThan, json!(3), Some(json!(5))), Some(false));
        assert_eq!(eval(Operator::NumberEqualTo, json!(5), Some(json!(5.0))), Some(true));
        assert_eq!(eval(Operator::NumberEqualTo, json!(5), None), None);

        assert_eq!(eval(Operator::TextStartsWith, json!("he"), Some(json!("hello"))), Some(true));
        assert_eq!(eval(Operator::TextEndsWith, json!("lo"), Some(json!("hello"))), Some(true));
        assert_eq!(eval(Operator::TextContains, json!("xyz"), Some(json!("hello"))), Some(false));
        assert_eq!(eval(Operator::TextContains, json!("x"), Some(json!(12))), None);
    }

    #[test]
    fn test_selection_modifiers() {
        let value = Some(json!(["a", "b"]));
        let mut every = condition(Operator::MultiSelectionSelected, json!(["a", "c"]));
        every.operator_modifier = Some(OperatorModifier::Every);
        let parent = ParentValue {
            widget: None,
            value: value.as_ref(),
        };

        assert_eq!(evaluate(&every, &parent), Some(false));
        assert_eq!(
            eval(Operator::MultiSelectionSelected, json!(["a", "c"]), value.clone()),
            Some(true)
        );
        assert_eq!(
            eval(Operator::SingleSelectionSelected, json!(["x", "y"]), Some(json!("y"))),
            Some(true)
        );
    }

    #[test]
    fn test_dates_and_ranges() {
        assert_eq!(eval(Operator::DateAfter, json!("2021-01-01"), Some(json!("2021-06-01"))), Some(true));
        assert_eq!(eval(Operator::DateBefore, json!("2021-01-01"), Some(json!("2021-06-01"))), Some(false));
        assert_eq!(eval(Operator::DateEqualTo, json!("2021-06-01"), Some(json!("2021-06-01T10:00:00Z"))), Some(true));
        assert_eq!(eval(Operator::DateAfter, json!("not a date"), Some(json!("2021-06-01"))), None);

        assert_eq!(eval(Operator::TimeAfter, json!("09:00"), Some(json!("10:30:00"))), Some(true));

        let range = Some(json!({ "startDate": "2021-02-01", "endDate": "2021-03-01" }));
        assert_eq!(eval(Operator::DateRangeAfter, json!("2021-01-15"), range.clone()), Some(true));
        assert_eq!(eval(Operator::DateRangeBefore, json!("2021-03-15"), range.clone()), Some(true));
        assert_eq!(eval(Operator::DateRangeIncludes, json!("2021-02-10"), range.clone()), Some(true));
        assert_eq!(eval(Operator::DateRangeIncludes, json!("2021-03-10"), range), Some(false));

        let times = Some(json!({ "startTime": "08:00", "endTime": "12:00" }));
        assert_eq!(eval(Operator::TimeRangeIncludes, json!("12:00:00"), times), Some(true));
    }

    #[test]
    fn test_matrix_selections() {
        let m1 = Some(json!({ "r1": { "c1": true, "c2": false }, "r2": { "c3": false } }));
        assert_eq!(eval(Operator::Matrix1dRowsSelected, json!(["r1"]), m1.clone()), Some(true));
        assert_eq!(eval(Operator::Matrix1dRowsSelected, json!(["r2"]), m1.clone()), Some(false));
        assert_eq!(eval(Operator::Matrix1dCellsSelected, json!(["c1"]), m1), Some(true));

        let m2 = Some(json!({ "r1": { "sr1": { "c1": ["sc1"], "c2": [] } } }));
        assert_eq!(eval(Operator::Matrix2dRowsSelected, json!(["r1"]), m2.clone()), Some(true));
        assert_eq!(eval(Operator::Matrix2dSubRowsSelected, json!(["sr1"]), m2.clone()), Some(true));
        assert_eq!(eval(Operator::Matrix2dColumnsSelected, json!(["c2"]), m2.clone()), Some(true));
        assert_eq!(eval(Operator::Matrix2dSubColumnsSelected, json!(["sc1"]), m2.clone()), Some(true));
        assert_eq!(eval(Operator::Matrix2dSubColumnsSelected, json!(["sc2"]), m2), Some(false));
    }

    #[test]
    fn test_scale_and_organigram_use_parent_properties() {
        let scale: Widget = serde_json::from_value(json!({
            "id": 1, "key": "s", "widgetId": "SCALE",
            "properties": { "options": [
                { "key": "low", "label": "Low", "order": 1 },
                { "key": "mid", "label": "Mid", "order": 2 },
                { "key": "high", "label": "High", "order": 3 }
            ] }
        }))
        .unwrap();
        let value = json!("mid");
        let parent = ParentValue { widget: Some(&scale), value: Some(&value) };
        assert_eq!(evaluate(&condition(Operator::ScaleMoreThan, json!("low")), &parent), Some(true));
        assert_eq!(evaluate(&condition(Operator::ScaleMoreThan, json!("mid")), &parent), Some(true));
        assert_eq!(evaluate(&condition(Operator::ScaleLessThan, json!("low")), &parent), Some(false));

        let organigram: Widget = serde_json::from_value(json!({
            "id": 2, "key": "o", "widgetId": "ORGANIGRAM",
            "properties": { "options": { "key": "un", "label": "UN", "children": [
                { "key": "unhcr", "label": "UNHCR", "children": [{ "key": "unhcr-np", "label": "Nepal" }] }
            ] } }
        }))
        .unwrap();
        let selected = json!(["unhcr-np"]);
        let parent = ParentValue { widget: Some(&organigram), value: Some(&selected) };
        assert_eq!(
            evaluate(&condition(Operator::OrganigramDescendentSelected, json!(["unhcr"])), &parent),
            Some(true)
        );
        assert_eq!(
            evaluate(&condition(Operator::OrganigramSelected, json!(["unhcr"])), &parent),
            Some(false)
        );
    }

    #[test]
    fn test_unknown_operator_is_undefined() {
        assert_eq!(eval(Operator::Unknown, json!(1), Some(json!(1))), None);
    }
}
