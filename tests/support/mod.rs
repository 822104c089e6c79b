use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::{json, Value};

/// Get a Command for tagreport running in `dir`, isolated from any user
/// or environment configuration
pub fn tagreport(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("tagreport");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("TAGREPORT_CONFIG")
        .env_remove("TAGREPORT_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write `value` as pretty JSON to `dir/name` and return the path
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// Parse stdout of a successful run as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

/// A framework with a 1D matrix, a 2D matrix with sub-columns, a text
/// widget, a select and a conditional text widget depending on the select
pub fn framework() -> Value {
    json!({
        "id": 7,
        "exportables": [
            { "id": 1, "widgetKey": "fruits", "widgetType": "MATRIX1D",
              "data": { "report": { "levels": [
                  { "id": "apple", "title": "Apple", "sublevels": [
                      { "id": "apple-ripe", "title": "Ripe" }
                  ] },
                  { "id": "pear", "title": "Pear", "sublevels": [
                      { "id": "pear-ripe", "title": "Ripe" }
                  ] }
              ] } } },
            { "id": 2, "widgetKey": "sectors", "widgetType": "MATRIX2D",
              "data": { "report": { "levels": [
                  { "id": "health", "title": "Health", "sublevels": [
                      { "id": "health-needs", "title": "Needs", "sublevels": [
                          { "id": "health-needs-access", "title": "Access" }
                      ] }
                  ] }
              ] } } },
            { "id": 3, "widgetKey": "notes", "widgetType": "TEXT" }
        ],
        "filters": [
            { "id": 1, "key": "fruits", "widgetKey": "fruits", "widgetType": "MATRIX1D" },
            { "id": 2, "key": "sectors-rows", "widgetKey": "sectors", "widgetType": "MATRIX2D" },
            { "id": 3, "key": "sectors-columns", "widgetKey": "sectors", "widgetType": "MATRIX2D" }
        ],
        "primaryTagging": [{
            "title": "Main",
            "widgets": [
                { "id": 10, "key": "fruits", "title": "Fruits", "widgetId": "MATRIX1D",
                  "properties": { "rows": [
                      { "key": "apple", "label": "Apple", "cells": [{ "key": "ripe", "label": "Ripe" }] },
                      { "key": "pear", "label": "Pear", "cells": [{ "key": "ripe", "label": "Ripe" }] }
                  ] } },
                { "id": 11, "key": "sectors", "title": "Sectors", "widgetId": "MATRIX2D",
                  "properties": {
                      "rows": [{ "key": "needs", "label": "Needs", "subRows": [
                          { "key": "access", "label": "Access" }
                      ] }],
                      "columns": [{ "key": "health", "label": "Health", "subColumns": [
                          { "key": "clinics", "label": "Clinics" }
                      ] }]
                  } }
            ]
        }],
        "secondaryTagging": [
            { "id": 12, "key": "notes", "title": "Notes", "widgetId": "TEXT" },
            { "id": 13, "key": "hazard", "title": "Hazard", "widgetId": "SELECT",
              "properties": { "options": [{ "key": "flood", "label": "Flood" }] } },
            { "id": 14, "key": "flood-depth", "title": "Flood depth", "widgetId": "TEXT",
              "conditional": { "parentWidget": 13, "parentWidgetType": "SELECT", "conditions": [
                  { "key": "c1", "order": 1, "operator": "single-selection-selected",
                    "value": ["flood"], "conjunctionOperator": "AND", "invert": false }
              ] } }
        ]
    })
}
