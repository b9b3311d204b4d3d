//! Grid files: a JSON array with one boolean per hour of the week

use std::fs;
use std::path::Path;

use crate::services::box_state::grid_from_data;
use crate::types::{CellGrid, Result, WeekgridError, HOURS_IN_WEEK};

/// Read the raw entries without checking the length
pub fn load_data(path: &Path) -> Result<Vec<bool>> {
    let content = fs::read_to_string(path)?;
    let data: Vec<bool> = serde_json::from_str(&content)?;
    Ok(data)
}

/// Read a grid, rejecting files with the wrong number of entries
pub fn load_grid(path: &Path) -> Result<CellGrid> {
    let data = load_data(path)?;
    grid_from_data(&data).ok_or_else(|| {
        WeekgridError::Parse(format!(
            "{}: expected {} cells, found {}",
            path.display(),
            HOURS_IN_WEEK,
            data.len()
        ))
    })
}

/// Serialize a grid as a compact JSON array
pub fn to_json(grid: &CellGrid) -> Result<String> {
    Ok(serde_json::to_string(grid.as_slice())?)
}
