//! Command implementations for tagreport

pub mod dispatch;

mod compose;
mod config;
mod hidden;
mod inputs;
mod payload;
mod render;
mod structure;
mod widgets;
