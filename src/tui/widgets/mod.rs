//! TUI widgets

pub mod help;
pub mod legend;
pub mod schedule;
