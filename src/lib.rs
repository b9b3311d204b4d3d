//! Rectangle selection over a 7x24 week grid, hosted in a terminal UI

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
