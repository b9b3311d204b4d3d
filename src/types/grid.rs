//! Grid state and geometry value types

pub const DAYS_IN_WEEK: usize = 7;
pub const HOURS_IN_DAY: usize = 24;
pub const HOURS_IN_WEEK: usize = DAYS_IN_WEEK * HOURS_IN_DAY;

/// Selection state for every hour of the week, row-major (`day * 24 + hour`)
pub type CellGrid = [bool; HOURS_IN_WEEK];

/// "Whole day selected" flags, one per row
pub type DaySummary = [bool; DAYS_IN_WEEK];

/// "Whole hour selected" flags, one per column
pub type HourSummary = [bool; HOURS_IN_DAY];

/// A grid with nothing selected
pub const EMPTY_GRID: CellGrid = [false; HOURS_IN_WEEK];

/// Pointer position in page coordinates (terminal cells, scroll included)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Box dimensions expressed as the top-left origin plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Box dimensions expressed as outer-most coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxEdges {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoxRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn edges(self) -> BoxEdges {
        BoxEdges {
            left: self.left,
            top: self.top,
            right: self.left + self.width,
            bottom: self.top + self.height,
        }
    }
}

/// Which mouse button started a pointer interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}
