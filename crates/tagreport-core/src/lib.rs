//! tagreport core library
//!
//! Builds the export report structure of a tagging framework: the widget
//! catalog, matrix level trees, the filtered selectable outline, its
//! reconciliation with a saved outline, and the flattened export payloads.
//! Also evaluates conditional widget visibility.

pub mod conditional;
pub mod config;
pub mod error;
pub mod format;
pub mod framework;
pub mod input;
pub mod levels;
pub mod logging;
pub mod options;
pub mod report;
