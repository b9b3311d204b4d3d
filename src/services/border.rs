//! Day/hour border box states derived from the cell grid

use crate::services::box_state::{derive_day_summary, derive_hour_summary};
use crate::types::{CellGrid, DaySummary, HourSummary, DAYS_IN_WEEK, HOURS_IN_DAY};

/// Toggle indicators shown along the grid edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderStates {
    pub days: DaySummary,
    pub hours: HourSummary,
}

impl BorderStates {
    /// Recompute both summaries from the full grid
    pub fn derive(grid: &CellGrid) -> Self {
        Self {
            days: derive_day_summary(grid),
            hours: derive_hour_summary(grid),
        }
    }
}

impl Default for BorderStates {
    fn default() -> Self {
        Self {
            days: [false; DAYS_IN_WEEK],
            hours: [false; HOURS_IN_DAY],
        }
    }
}
