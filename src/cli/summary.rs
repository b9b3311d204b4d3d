//! `weekgrid summary` subcommand: report which days and hours are active

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::services::box_state::count_selected;
use crate::services::grid_file;
use crate::services::BorderStates;
use crate::tui::widgets::schedule::{hour_label, DayLabels};
use crate::types::{CellGrid, Result, DAYS_IN_WEEK, HOURS_IN_DAY};

/// Summarize a grid file
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Grid file (JSON array of 168 booleans)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub active_hours: usize,
    /// Active hours per day, Monday first
    pub hours_per_day: [usize; DAYS_IN_WEEK],
    /// Days with every hour active
    pub days: [bool; DAYS_IN_WEEK],
    /// Hours active on every day
    pub hours: [bool; HOURS_IN_DAY],
}

impl GridSummary {
    pub fn from_grid(grid: &CellGrid) -> Self {
        let borders = BorderStates::derive(grid);
        let hours_per_day = std::array::from_fn(|day| {
            grid[day * HOURS_IN_DAY..(day + 1) * HOURS_IN_DAY]
                .iter()
                .filter(|&&c| c)
                .count()
        });
        Self {
            active_hours: count_selected(grid),
            hours_per_day,
            days: borders.days,
            hours: borders.hours,
        }
    }
}

impl SummaryArgs {
    pub fn run(self) -> Result<()> {
        let grid = grid_file::load_grid(&self.file)?;
        log::debug!("loaded grid from {}", self.file.display());

        if self.json {
            let summary = GridSummary::from_grid(&grid);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", format_text(&grid));
        }
        Ok(())
    }
}

/// One row per day plus the fully active days and hours
pub fn format_text(grid: &CellGrid) -> String {
    let summary = GridSummary::from_grid(grid);
    let labels = DayLabels::Full;
    let mut out = String::new();

    for day in 0..DAYS_IN_WEEK {
        let row: String = grid[day * HOURS_IN_DAY..(day + 1) * HOURS_IN_DAY]
            .iter()
            .map(|&c| if c { '█' } else { '·' })
            .collect();
        out.push_str(&format!(
            "{:<10}{} {:>2}h\n",
            labels.label(day),
            row,
            summary.hours_per_day[day]
        ));
    }

    let full_days: Vec<String> = (0..DAYS_IN_WEEK)
        .filter(|&d| summary.days[d])
        .map(|d| labels.label(d))
        .collect();
    let full_hours: Vec<String> = (0..HOURS_IN_DAY)
        .filter(|&h| summary.hours[h])
        .map(hour_label)
        .collect();

    out.push_str(&format!("\nActive hours: {}\n", summary.active_hours));
    out.push_str(&format!("Full days:    {}\n", join_or_none(&full_days)));
    out.push_str(&format!("Full hours:   {}\n", join_or_none(&full_hours)));
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
