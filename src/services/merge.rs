//! Merging a provisional selection into the committed grid

use crate::types::CellGrid;

/// Combine `overlay` with `committed`.
///
/// In append mode every overlay cell is added; otherwise every overlay cell
/// is cleared. Cells outside the overlay keep their committed value.
pub fn merge(append: bool, overlay: &CellGrid, committed: &CellGrid) -> CellGrid {
    std::array::from_fn(|i| {
        if append {
            overlay[i] || committed[i]
        } else {
            committed[i] && !overlay[i]
        }
    })
}
