//! Cell, day and hour box state operations

use crate::types::{
    CellGrid, DaySummary, HourSummary, DAYS_IN_WEEK, EMPTY_GRID, HOURS_IN_DAY, HOURS_IN_WEEK,
};

/// Returns true if both box arrays have the same length and contents
pub fn equal_states(a: &[bool], b: &[bool]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Build a grid from externally supplied data.
/// Only data with exactly one entry per hour of the week is accepted.
pub fn grid_from_data(data: &[bool]) -> Option<CellGrid> {
    if data.len() != HOURS_IN_WEEK {
        return None;
    }
    let mut grid = EMPTY_GRID;
    grid.copy_from_slice(data);
    Some(grid)
}

/// Copy of `grid` with all hours of `day` set to `value`
pub fn set_row(grid: &CellGrid, day: usize, value: bool) -> CellGrid {
    assert!(day < DAYS_IN_WEEK, "day index {day} out of range");
    let mut next = *grid;
    let start = day * HOURS_IN_DAY;
    next[start..start + HOURS_IN_DAY].fill(value);
    next
}

/// Copy of `grid` with `hour` set to `value` on every day
pub fn set_column(grid: &CellGrid, hour: usize, value: bool) -> CellGrid {
    assert!(hour < HOURS_IN_DAY, "hour index {hour} out of range");
    let mut next = *grid;
    for day in 0..DAYS_IN_WEEK {
        next[day * HOURS_IN_DAY + hour] = value;
    }
    next
}

/// For every day, are all hours in that row selected
pub fn derive_day_summary(grid: &CellGrid) -> DaySummary {
    std::array::from_fn(|day| {
        let start = day * HOURS_IN_DAY;
        grid[start..start + HOURS_IN_DAY].iter().all(|&c| c)
    })
}

/// For every hour, are all days in that column selected
pub fn derive_hour_summary(grid: &CellGrid) -> HourSummary {
    std::array::from_fn(|hour| (0..DAYS_IN_WEEK).all(|day| grid[day * HOURS_IN_DAY + hour]))
}

/// Number of selected hours
pub fn count_selected(grid: &CellGrid) -> usize {
    grid.iter().filter(|&&c| c).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random grid for property-style checks
    fn scrambled_grid(seed: u32) -> CellGrid {
        let mut state = seed;
        std::array::from_fn(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) & 1 == 1
        })
    }

    #[test]
    fn test_equal_states() {
        assert!(equal_states(&[true, false], &[true, false]));
        assert!(!equal_states(&[true, false], &[true, true]));
        assert!(!equal_states(&[true], &[true, false]));
        assert!(equal_states(&[], &[]));
    }

    #[test]
    fn test_grid_from_data_exact_length() {
        let mut data = vec![false; HOURS_IN_WEEK];
        data[5] = true;
        let grid = grid_from_data(&data).unwrap();
        assert!(grid[5]);
        assert_eq!(count_selected(&grid), 1);
    }

    #[test]
    fn test_grid_from_data_wrong_length() {
        assert!(grid_from_data(&[true; 5]).is_none());
        assert!(grid_from_data(&[true; HOURS_IN_WEEK + 1]).is_none());
        assert!(grid_from_data(&[]).is_none());
    }

    #[test]
    fn test_set_row_only_touches_that_day() {
        let grid = set_row(&EMPTY_GRID, 2, true);
        for (i, &cell) in grid.iter().enumerate() {
            assert_eq!(cell, i / HOURS_IN_DAY == 2, "cell {i}");
        }
    }

    #[test]
    fn test_set_row_does_not_mutate_input() {
        let before = EMPTY_GRID;
        let _ = set_row(&before, 0, true);
        assert_eq!(count_selected(&before), 0);
    }

    #[test]
    fn test_set_column_only_touches_that_hour() {
        let grid = set_column(&EMPTY_GRID, 9, true);
        for (i, &cell) in grid.iter().enumerate() {
            assert_eq!(cell, i % HOURS_IN_DAY == 9, "cell {i}");
        }
        assert_eq!(count_selected(&grid), DAYS_IN_WEEK);
    }

    #[test]
    #[should_panic]
    fn test_set_row_out_of_range_panics() {
        let _ = set_row(&EMPTY_GRID, DAYS_IN_WEEK, true);
    }

    #[test]
    #[should_panic]
    fn test_set_column_out_of_range_panics() {
        let _ = set_column(&EMPTY_GRID, HOURS_IN_DAY, true);
    }

    #[test]
    fn test_day_summary_matches_rows() {
        for seed in 0..32 {
            let mut grid = scrambled_grid(seed);
            grid = set_row(&grid, (seed as usize) % DAYS_IN_WEEK, true);
            let summary = derive_day_summary(&grid);
            for (day, &all) in summary.iter().enumerate() {
                let row = &grid[day * HOURS_IN_DAY..(day + 1) * HOURS_IN_DAY];
                assert_eq!(all, row.iter().all(|&c| c), "seed {seed} day {day}");
            }
        }
    }

    #[test]
    fn test_hour_summary_matches_columns() {
        for seed in 0..32 {
            let mut grid = scrambled_grid(seed);
            grid = set_column(&grid, (seed as usize) % HOURS_IN_DAY, true);
            let summary = derive_hour_summary(&grid);
            for (hour, &all) in summary.iter().enumerate() {
                let expected = (0..DAYS_IN_WEEK).all(|d| grid[d * HOURS_IN_DAY + hour]);
                assert_eq!(all, expected, "seed {seed} hour {hour}");
            }
        }
    }

    #[test]
    fn test_set_row_then_day_summary_round_trip() {
        let grid = scrambled_grid(7);
        for day in 0..DAYS_IN_WEEK {
            let summary = derive_day_summary(&set_row(&grid, day, true));
            assert!(summary[day]);
        }
    }

    #[test]
    fn test_single_full_row_leaves_hours_unset() {
        let grid = set_row(&EMPTY_GRID, 4, true);
        assert!(derive_hour_summary(&grid).iter().all(|&h| !h));
    }

    #[test]
    fn test_full_grid_summaries() {
        let grid = [true; HOURS_IN_WEEK];
        assert!(derive_day_summary(&grid).iter().all(|&d| d));
        assert!(derive_hour_summary(&grid).iter().all(|&h| h));
    }
}
