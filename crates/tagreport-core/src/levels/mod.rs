//! Report levels and matrix level transformers
//!
//! A level id is the `-`-joined composite of its ancestor keys, in an order
//! fixed per traversal:
//! - row first: `row`, `row-subRow`, `column-row-subRow`,
//!   `column-subColumn-row-subRow`
//! - column first: `column`, `column-subColumn`, `column-subColumn-row`,
//!   `column-subColumn-row-subRow` (or `column-row`, `column-row-subRow`
//!   when the column has no sub-columns)

use serde::{Deserialize, Serialize};

use crate::framework::{ids, Matrix2dProperties};

/// Separator between component keys of a composite level id
pub const ID_SEPARATOR: char = '-';

/// A node in the canonical report hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sublevels: Option<Vec<Level>>,
}

impl Level {
    pub fn leaf(id: impl Into<String>, title: impl Into<String>) -> Self {
        Level {
            id: id.into(),
            title: title.into(),
            sublevels: None,
        }
    }

    pub fn branch(id: impl Into<String>, title: impl Into<String>, sublevels: Vec<Level>) -> Self {
        Level {
            id: id.into(),
            title: title.into(),
            sublevels: Some(sublevels),
        }
    }

    /// Component keys of this level's composite id
    pub fn components(&self) -> impl Iterator<Item = &str> {
        id_components(&self.id)
    }
}

/// Join component keys into a composite level id
pub fn composite_id(parts: &[&str]) -> String {
    let mut id = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            id.push(ID_SEPARATOR);
        }
        id.push_str(part);
    }
    id
}

/// Split a composite level id back into its component keys
pub fn id_components(id: &str) -> impl Iterator<Item = &str> {
    id.split(ID_SEPARATOR)
}

/// Row-rooted ("dimension first") level tree of a 2D matrix
pub fn transform_levels_row_first(props: &Matrix2dProperties, include_sub_column: bool) -> Vec<Level> {
    props
        .rows
        .iter()
        .map(|row| {
            let sub_rows = row
                .sub_rows
                .iter()
                .map(|sub_row| {
                    let columns = props
                        .columns
                        .iter()
                        .map(|column| {
                            let id = composite_id(&[&column.key, &row.key, &sub_row.key]);
                            if !include_sub_column {
                                return Level::leaf(id, &column.label);
                            }
                            let sub_columns = column
                                .sub_columns
                                .iter()
                                .map(|sub_column| {
                                    Level::leaf(
                                        composite_id(&[
                                            &column.key,
                                            &sub_column.key,
                                            &row.key,
                                            &sub_row.key,
                                        ]),
                                        &sub_column.label,
                                    )
                                })
                                .collect();
                            Level::branch(id, &column.label, sub_columns)
                        })
                        .collect();

                    Level::branch(
                        composite_id(&[&row.key, &sub_row.key]),
                        &sub_row.label,
                        columns,
                    )
                })
                .collect();

            Level::branch(&row.key, &row.label, sub_rows)
        })
        .collect()
}

/// Column-rooted ("sector first") level tree of a 2D matrix
///
/// Sub-columns are always included when a column has any.
pub fn transform_levels_column_first(props: &Matrix2dProperties) -> Vec<Level> {
    props
        .columns
        .iter()
        .map(|column| {
            let sublevels = if column.sub_columns.is_empty() {
                rows_under(props, &[&column.key])
            } else {
                column
                    .sub_columns
                    .iter()
                    .map(|sub_column| {
                        Level::branch(
                            composite_id(&[&column.key, &sub_column.key]),
                            &sub_column.label,
                            rows_under(props, &[&column.key, &sub_column.key]),
                        )
                    })
                    .collect()
            };
            Level::branch(&column.key, &column.label, sublevels)
        })
        .collect()
}

/// Row and sub-row levels below a column (or column and sub-column) prefix
fn rows_under<'a>(props: &'a Matrix2dProperties, prefix: &[&'a str]) -> Vec<Level> {
    props
        .rows
        .iter()
        .map(|row| {
            let mut row_path = prefix.to_vec();
            row_path.push(&row.key);
            let sub_rows = row
                .sub_rows
                .iter()
                .map(|sub_row| {
                    let mut path = row_path.clone();
                    path.push(&sub_row.key);
                    Level::leaf(composite_id(&path), &sub_row.label)
                })
                .collect();
            Level::branch(composite_id(&row_path), &row.label, sub_rows)
        })
        .collect()
}
