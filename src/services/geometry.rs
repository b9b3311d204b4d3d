//! Selection rectangle geometry and cell collision tests
//!
//! Cell positions are derived from fixed layout constants instead of being
//! read back from the rendered frame, so collision results depend only on
//! the selection rectangle.

use crate::types::{
    BoxEdges, BoxRect, CellGrid, Point, DAYS_IN_WEEK, HOURS_IN_DAY, HOURS_IN_WEEK,
};

/// Width of a cell's content (2 chars)
pub const CELL_WIDTH: i32 = 2;
/// Height of a cell's content (1 row)
pub const CELL_HEIGHT: i32 = 1;
/// Horizontal pitch: content plus one border column
pub const FULL_WIDTH: i32 = CELL_WIDTH + 1;
/// Vertical pitch: content plus one border row
pub const FULL_HEIGHT: i32 = CELL_HEIGHT + 1;
/// Offset of the first cell from the selection area's left edge (the border)
pub const PADDING_LEFT: i32 = 1;
/// Offset of the first cell from the selection area's top edge (the border)
pub const PADDING_TOP: i32 = 1;

/// Total width of the selection area including the closing border
pub const AREA_WIDTH: i32 = PADDING_LEFT + HOURS_IN_DAY as i32 * FULL_WIDTH;
/// Total height of the selection area including the closing border
pub const AREA_HEIGHT: i32 = PADDING_TOP + DAYS_IN_WEEK as i32 * FULL_HEIGHT;

/// First cell hit by a selection, with its value before the hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollidingCell {
    pub index: usize,
    pub previous: bool,
}

/// Selection rectangle in the selection area's local space.
///
/// `start`/`end` are page coordinates, `scroll` the page scroll offset at
/// the time and `container` the selection area's bounds in viewport space.
pub fn calculate_rect(start: Point, end: Point, scroll: Point, container: BoxRect) -> BoxRect {
    let left_offset = scroll.x + container.left;
    let top_offset = scroll.y + container.top;

    BoxRect {
        left: start.x.min(end.x) - left_offset,
        top: start.y.min(end.y) - top_offset,
        width: (start.x - end.x).abs(),
        height: (start.y - end.y).abs(),
    }
}

/// True if the two boxes overlap; touching edges count
pub fn overlaps(a: BoxEdges, b: BoxEdges) -> bool {
    a.left <= b.right && a.right >= b.left && a.top <= b.bottom && a.bottom >= b.top
}

/// Bounds of cell `index` in the selection area's local space
pub fn cell_rect(index: usize) -> BoxRect {
    debug_assert!(index < HOURS_IN_WEEK, "cell index {index} out of range");
    let row = index / HOURS_IN_DAY;
    let column = index - row * HOURS_IN_DAY;

    BoxRect {
        left: PADDING_LEFT + column as i32 * FULL_WIDTH,
        top: PADDING_TOP + row as i32 * FULL_HEIGHT,
        width: CELL_WIDTH,
        height: CELL_HEIGHT,
    }
}

/// Mask of every cell the selection rectangle touches
pub fn colliding_mask(selection: BoxRect) -> CellGrid {
    let selection = selection.edges();
    std::array::from_fn(|i| overlaps(selection, cell_rect(i).edges()))
}

/// Lowest-indexed cell the selection touches, if any
pub fn first_colliding_cell(selection: BoxRect, grid: &CellGrid) -> Option<CollidingCell> {
    let selection = selection.edges();
    grid.iter()
        .enumerate()
        .find(|(i, _)| overlaps(selection, cell_rect(*i).edges()))
        .map(|(index, &previous)| CollidingCell { index, previous })
}

/// Cell whose content box contains a local point
pub fn cell_at(local: Point) -> Option<usize> {
    let column = (local.x - PADDING_LEFT).div_euclid(FULL_WIDTH);
    let row = (local.y - PADDING_TOP).div_euclid(FULL_HEIGHT);
    if column < 0 || row < 0 || column >= HOURS_IN_DAY as i32 {
        return None;
    }
    let index = row as usize * HOURS_IN_DAY + column as usize;
    if index >= HOURS_IN_WEEK {
        return None;
    }
    let edges = cell_rect(index).edges();
    // Content spans [left, right); the right edge is the border column
    let inside = local.x >= edges.left
        && local.x < edges.right
        && local.y >= edges.top
        && local.y < edges.bottom;
    inside.then_some(index)
}
