//! 7x24 schedule grid widget
//!
//! Everything here is laid out in page coordinates: columns from the left
//! of the body and rows from the top of the scrollable content. The
//! selection engine works in the same space, so hit testing and the drag
//! highlight line up with what is drawn.

use chrono::{NaiveDate, NaiveTime, Weekday};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::services::geometry::{
    cell_rect, AREA_HEIGHT, AREA_WIDTH, CELL_WIDTH, FULL_HEIGHT, FULL_WIDTH, PADDING_LEFT,
    PADDING_TOP,
};
use crate::services::SelectionEngine;
use crate::tui::theme::Theme;
use crate::types::{BoxRect, Point, DAYS_IN_WEEK, HOURS_IN_DAY};

/// Rows above the selection area: hour labels, then hour boxes
const HOUR_LABEL_ROW: i32 = 0;
const HOUR_BOX_ROW: i32 = 1;
const SELECTION_ROW: i32 = 2;
/// Day box column plus its gap before the selection area
const DAY_BOX_WIDTH: i32 = FULL_WIDTH;
/// Hours between hour labels
const HOUR_LABEL_STEP: usize = 3;

/// Total rows the widget occupies
pub const SCHEDULE_HEIGHT: i32 = SELECTION_ROW + AREA_HEIGHT;

/// Box drawing characters for the selection area border
const BOX_TOP_LEFT: char = '┌';
const BOX_TOP_RIGHT: char = '┐';
const BOX_BOTTOM_LEFT: char = '└';
const BOX_BOTTOM_RIGHT: char = '┘';
const BOX_HORIZONTAL: char = '─';
const BOX_VERTICAL: char = '│';
const BOX_T_DOWN: char = '┬';
const BOX_T_UP: char = '┴';
const BOX_T_RIGHT: char = '├';
const BOX_T_LEFT: char = '┤';
const BOX_CROSS: char = '┼';

/// Glyphs for boxes; distinct shapes so the grid reads without color
pub const SELECTED_GLYPH: &str = "██";
pub const UNSELECTED_GLYPH: &str = "░░";

const WEEK: [Weekday; DAYS_IN_WEEK] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// How day rows are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabels {
    /// "Wednesday"
    Full,
    /// "Wed"
    Short,
}

impl DayLabels {
    /// Label column width including one space of gap
    pub fn width(self) -> i32 {
        match self {
            Self::Full => 10,
            Self::Short => 4,
        }
    }

    pub fn label(self, day: usize) -> String {
        let weekday = WEEK[day];
        match self {
            Self::Full => NaiveDate::from_isoywd_opt(2024, 1, weekday)
                .map(|date| date.format("%A").to_string())
                .unwrap_or_else(|| weekday.to_string()),
            Self::Short => weekday.to_string(),
        }
    }
}

/// Label for the hour column `hour` (0 -> "12am", 15 -> "3pm")
pub fn hour_label(hour: usize) -> String {
    NaiveTime::from_hms_opt(hour as u32, 0, 0)
        .map(|time| time.format("%-I%P").to_string())
        .unwrap_or_default()
}

/// What a page position lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Day(usize),
    Hour(usize),
    Selection,
}

/// Placement of the widget within the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleLayout {
    /// Page position of the widget's top-left corner
    pub origin: Point,
    pub labels: DayLabels,
}

impl ScheduleLayout {
    /// Pick label style for the body width and center horizontally
    pub fn for_width(width: u16, top: i32) -> Self {
        let full = Self::total_width(DayLabels::Full);
        let labels = if i32::from(width) >= full {
            DayLabels::Full
        } else {
            DayLabels::Short
        };
        let left = (i32::from(width) - Self::total_width(labels)).max(0) / 2;
        Self {
            origin: Point::new(left, top),
            labels,
        }
    }

    fn total_width(labels: DayLabels) -> i32 {
        labels.width() + DAY_BOX_WIDTH + AREA_WIDTH
    }

    pub fn width(&self) -> i32 {
        Self::total_width(self.labels)
    }

    /// Page position of the selection area's top-left border corner
    pub fn selection_origin(&self) -> Point {
        Point::new(
            self.origin.x + self.labels.width() + DAY_BOX_WIDTH,
            self.origin.y + SELECTION_ROW,
        )
    }

    /// Selection area bounds in page space
    pub fn selection_rect(&self) -> BoxRect {
        let origin = self.selection_origin();
        BoxRect::new(origin.x, origin.y, AREA_WIDTH, AREA_HEIGHT)
    }

    /// Selection area bounds in viewport space for the given scroll offset
    pub fn container(&self, scroll: Point) -> BoxRect {
        let rect = self.selection_rect();
        BoxRect::new(
            rect.left - scroll.x,
            rect.top - scroll.y,
            rect.width,
            rect.height,
        )
    }

    /// Page position of a day's toggle box
    pub fn day_box(&self, day: usize) -> Point {
        Point::new(
            self.origin.x + self.labels.width(),
            self.selection_origin().y + PADDING_TOP + day as i32 * FULL_HEIGHT,
        )
    }

    /// Page position of an hour's toggle box
    pub fn hour_box(&self, hour: usize) -> Point {
        Point::new(
            self.selection_origin().x + PADDING_LEFT + hour as i32 * FULL_WIDTH,
            self.origin.y + HOUR_BOX_ROW,
        )
    }

    /// Page position of cell `index`'s content
    pub fn cell(&self, index: usize) -> Point {
        let origin = self.selection_origin();
        let rect = cell_rect(index);
        Point::new(origin.x + rect.left, origin.y + rect.top)
    }

    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        let area = self.selection_rect();
        if point.x >= area.left
            && point.x < area.left + area.width
            && point.y >= area.top
            && point.y < area.top + area.height
        {
            return Some(Hit::Selection);
        }

        let on_box = |at: Point| point.y == at.y && point.x >= at.x && point.x < at.x + CELL_WIDTH;
        if let Some(day) = (0..DAYS_IN_WEEK).find(|&d| on_box(self.day_box(d))) {
            return Some(Hit::Day(day));
        }
        (0..HOURS_IN_DAY)
            .find(|&h| on_box(self.hour_box(h)))
            .map(Hit::Hour)
    }
}

/// Which kind of box is drawn; only the styling differs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Day,
    Hour,
    Cell,
}

/// Buffer writer that maps page coordinates to the visible area
struct Canvas<'b> {
    buf: &'b mut Buffer,
    area: Rect,
    scroll: Point,
}

impl Canvas<'_> {
    fn position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let sx = i32::from(self.area.x) + x - self.scroll.x;
        let sy = i32::from(self.area.y) + y - self.scroll.y;
        let inside = sx >= i32::from(self.area.x)
            && sx < i32::from(self.area.right())
            && sy >= i32::from(self.area.y)
            && sy < i32::from(self.area.bottom());
        inside.then(|| (sx as u16, sy as u16))
    }

    fn put(&mut self, at: Point, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(pos) = self.position(at.x + i as i32, at.y) {
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }

    /// Patch the style of every visible position inside `rect`, edges included
    fn patch(&mut self, rect: BoxRect, style: Style) {
        let edges = rect.edges();
        for y in edges.top..=edges.bottom {
            for x in edges.left..=edges.right {
                if let Some(pos) = self.position(x, y) {
                    if let Some(cell) = self.buf.cell_mut(pos) {
                        cell.set_style(style);
                    }
                }
            }
        }
    }
}

/// Draw a single toggle box
fn render_box(canvas: &mut Canvas, at: Point, kind: BoxKind, selected: bool, theme: Theme) {
    let (glyph, color) = match (kind, selected) {
        (_, false) => (UNSELECTED_GLYPH, theme.empty()),
        (BoxKind::Cell, true) => (SELECTED_GLYPH, theme.selected()),
        (BoxKind::Day | BoxKind::Hour, true) => (SELECTED_GLYPH, theme.summary()),
    };
    canvas.put(at, glyph, Style::default().fg(color));
}

/// One horizontal border line of the selection area, e.g. ├──┼──┤
fn border_row(left: char, junction: char, right: char) -> String {
    let mut row = String::with_capacity(AREA_WIDTH as usize * 3);
    row.push(left);
    for hour in 0..HOURS_IN_DAY {
        for _ in 0..CELL_WIDTH {
            row.push(BOX_HORIZONTAL);
        }
        row.push(if hour + 1 < HOURS_IN_DAY { junction } else { right });
    }
    row
}

/// Schedule widget: labels, edge boxes, the grid and the drag highlight
pub struct ScheduleView<'a> {
    engine: &'a SelectionEngine,
    layout: ScheduleLayout,
    scroll: Point,
    theme: Theme,
}

impl<'a> ScheduleView<'a> {
    pub fn new(engine: &'a SelectionEngine, layout: ScheduleLayout, theme: Theme) -> Self {
        Self {
            engine,
            layout,
            scroll: Point::default(),
            theme,
        }
    }

    /// Page offset of the first visible row/column
    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }

    fn render_hour_header(&self, canvas: &mut Canvas) {
        let label_style = Style::default().fg(self.theme.muted());
        for hour in (0..HOURS_IN_DAY).step_by(HOUR_LABEL_STEP) {
            let at = Point::new(
                self.layout.hour_box(hour).x,
                self.layout.origin.y + HOUR_LABEL_ROW,
            );
            canvas.put(at, &hour_label(hour), label_style);
        }

        let summary = self.engine.hour_summary();
        for (hour, &selected) in summary.iter().enumerate() {
            render_box(
                canvas,
                self.layout.hour_box(hour),
                BoxKind::Hour,
                selected,
                self.theme,
            );
        }
    }

    fn render_day_column(&self, canvas: &mut Canvas) {
        let label_style = Style::default().fg(self.theme.muted());
        let summary = self.engine.day_summary();
        for (day, &selected) in summary.iter().enumerate() {
            let at = self.layout.day_box(day);
            canvas.put(
                Point::new(self.layout.origin.x, at.y),
                &self.layout.labels.label(day),
                label_style,
            );
            render_box(canvas, at, BoxKind::Day, selected, self.theme);
        }
    }

    fn render_selection_area(&self, canvas: &mut Canvas) {
        let origin = self.layout.selection_origin();
        let border_style = Style::default().fg(self.theme.muted());

        canvas.put(
            origin,
            &border_row(BOX_TOP_LEFT, BOX_T_DOWN, BOX_TOP_RIGHT),
            border_style,
        );
        let separator = border_row(BOX_T_RIGHT, BOX_CROSS, BOX_T_LEFT);
        let bottom = border_row(BOX_BOTTOM_LEFT, BOX_T_UP, BOX_BOTTOM_RIGHT);

        for day in 0..DAYS_IN_WEEK {
            let content_y = origin.y + PADDING_TOP + day as i32 * FULL_HEIGHT;
            for hour in 0..=HOURS_IN_DAY {
                let x = origin.x + hour as i32 * FULL_WIDTH;
                canvas.put(
                    Point::new(x, content_y),
                    &BOX_VERTICAL.to_string(),
                    border_style,
                );
            }
            let line = if day + 1 < DAYS_IN_WEEK {
                &separator
            } else {
                &bottom
            };
            canvas.put(Point::new(origin.x, content_y + 1), line, border_style);
        }

        for (index, &selected) in self.engine.preview().iter().enumerate() {
            render_box(
                canvas,
                self.layout.cell(index),
                BoxKind::Cell,
                selected,
                self.theme,
            );
        }
    }

    fn render_highlight(&self, canvas: &mut Canvas) {
        let Some(rect) = self.engine.highlight() else {
            return;
        };
        let origin = self.layout.selection_origin();
        let page_rect = BoxRect::new(
            origin.x + rect.left,
            origin.y + rect.top,
            rect.width,
            rect.height,
        );
        let color = if self.engine.append_mode() {
            self.theme.highlight_add()
        } else {
            self.theme.highlight_remove()
        };
        canvas.patch(
            page_rect,
            Style::default().bg(color).add_modifier(Modifier::BOLD),
        );
    }
}

impl Widget for ScheduleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = Canvas {
            buf,
            area,
            scroll: self.scroll,
        };
        self.render_hour_header(&mut canvas);
        self.render_day_column(&mut canvas);
        self.render_selection_area(&mut canvas);
        self.render_highlight(&mut canvas);
    }
}
