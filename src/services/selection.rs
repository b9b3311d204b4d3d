//! Selection engine: drag lifecycle, commits and change notification
//!
//! Every committed mutation runs the same straight-line pipeline:
//! replace the cell grid, re-derive the border states, then notify the
//! owner if the grid differs from the last one it was told about.

use std::mem;
use std::time::{Duration, Instant};

use crate::services::border::BorderStates;
use crate::services::box_state::{equal_states, grid_from_data, set_column, set_row};
use crate::services::geometry::{calculate_rect, colliding_mask, first_colliding_cell};
use crate::services::listeners::{
    ListenerGuard, ListenerRegistry, DRAG_LISTENERS, MODIFIER_LISTENERS,
};
use crate::services::merge::merge;
use crate::services::throttle::{Throttle, FRAME_INTERVAL};
use crate::types::{
    BoxRect, CellGrid, DaySummary, HourSummary, Point, PointerButton, EMPTY_GRID, HOURS_IN_WEEK,
};

/// Callback fired with the committed grid after a change
pub type ChangeCallback = Box<dyn FnMut(&CellGrid)>;

/// State of a drag between pointer-down and pointer-up
struct DragSession {
    start: Point,
    end: Point,
    scroll: Point,
    container: BoxRect,
    rect: BoxRect,
    overlay: CellGrid,
    moved: bool,
    /// Inputs changed but `rect`/`overlay` were not recomputed yet
    stale: bool,
    throttle: Throttle,
    _listeners: ListenerGuard,
}

impl DragSession {
    fn new(
        point: Point,
        scroll: Point,
        container: BoxRect,
        throttle: Throttle,
        listeners: ListenerGuard,
    ) -> Self {
        Self {
            start: point,
            end: point,
            scroll,
            container,
            rect: calculate_rect(point, point, scroll, container),
            overlay: EMPTY_GRID,
            moved: false,
            stale: false,
            throttle,
            _listeners: listeners,
        }
    }

    fn refresh(&mut self) {
        self.rect = calculate_rect(self.start, self.end, self.scroll, self.container);
        self.overlay = colliding_mask(self.rect);
        self.stale = false;
    }

    /// Recompute now if the throttle allows it, otherwise leave it pending
    fn update(&mut self, now: Instant) {
        if self.throttle.ready(now) {
            self.refresh();
        } else {
            self.stale = true;
        }
    }
}

enum DragState {
    Idle,
    Dragging(Box<DragSession>),
}

/// Owns the week grid and turns pointer/key input into committed selections
pub struct SelectionEngine {
    cells: CellGrid,
    borders: BorderStates,
    last_notified: Option<CellGrid>,
    /// Last externally supplied data, as given
    external: Vec<bool>,
    append: bool,
    state: DragState,
    registry: ListenerRegistry,
    throttle_interval: Duration,
    on_change: ChangeCallback,
    _modifier_listeners: ListenerGuard,
}

impl SelectionEngine {
    /// Create an engine seeded from `initial`.
    /// Anything other than exactly 168 entries starts from an empty grid.
    pub fn new<F>(initial: &[bool], registry: &ListenerRegistry, on_change: F) -> Self
    where
        F: FnMut(&CellGrid) + 'static,
    {
        let cells = match grid_from_data(initial) {
            Some(grid) => grid,
            None => {
                if !initial.is_empty() {
                    log::warn!(
                        "ignoring initial data with {} entries (expected {})",
                        initial.len(),
                        HOURS_IN_WEEK
                    );
                }
                EMPTY_GRID
            }
        };

        Self {
            cells,
            borders: BorderStates::derive(&cells),
            last_notified: None,
            external: initial.to_vec(),
            append: true,
            state: DragState::Idle,
            registry: registry.clone(),
            throttle_interval: FRAME_INTERVAL,
            on_change: Box::new(on_change),
            _modifier_listeners: registry.attach(&MODIFIER_LISTENERS),
        }
    }

    /// Override the pointer/scroll throttle interval
    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    pub fn borders(&self) -> &BorderStates {
        &self.borders
    }

    pub fn day_summary(&self) -> &DaySummary {
        &self.borders.days
    }

    pub fn hour_summary(&self) -> &HourSummary {
        &self.borders.hours
    }

    pub fn append_mode(&self) -> bool {
        self.append
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Cells hit by the drag in progress (all false when idle)
    pub fn overlay(&self) -> CellGrid {
        match &self.state {
            DragState::Dragging(session) => session.overlay,
            DragState::Idle => EMPTY_GRID,
        }
    }

    /// What the grid would look like if the drag ended now
    pub fn preview(&self) -> CellGrid {
        match &self.state {
            DragState::Dragging(session) => merge(self.append, &session.overlay, &self.cells),
            DragState::Idle => self.cells,
        }
    }

    /// Drag rectangle in selection-area space, while dragging
    pub fn highlight(&self) -> Option<BoxRect> {
        match &self.state {
            DragState::Dragging(session) => Some(session.rect),
            DragState::Idle => None,
        }
    }

    /// Start a drag. Returns false (and does nothing) for the secondary button.
    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        point: Point,
        scroll: Point,
        container: BoxRect,
    ) -> bool {
        if button == PointerButton::Secondary {
            return false;
        }

        // Release any drag whose pointer-up never arrived before attaching again
        self.state = DragState::Idle;
        let listeners = self.registry.attach(&DRAG_LISTENERS);
        let session = DragSession::new(
            point,
            scroll,
            container,
            Throttle::new(self.throttle_interval),
            listeners,
        );
        log::debug!("drag started at {:?} (append: {})", point, self.append);
        self.state = DragState::Dragging(Box::new(session));
        true
    }

    pub fn pointer_move(&mut self, point: Point, now: Instant) {
        if let DragState::Dragging(session) = &mut self.state {
            session.end = point;
            session.moved = true;
            session.update(now);
        }
    }

    /// The page scrolled (and the container moved) during a drag
    pub fn scroll(&mut self, scroll: Point, container: BoxRect, now: Instant) {
        if let DragState::Dragging(session) = &mut self.state {
            session.scroll = scroll;
            session.container = container;
            session.update(now);
        }
    }

    /// Apply a throttled update once its interval has passed
    pub fn flush(&mut self, now: Instant) {
        if let DragState::Dragging(session) = &mut self.state {
            if session.stale && session.throttle.ready(now) {
                session.refresh();
            }
        }
    }

    /// Finish the drag: toggle the clicked cell or merge the overlay
    pub fn pointer_up(&mut self) {
        let DragState::Dragging(mut session) = mem::replace(&mut self.state, DragState::Idle)
        else {
            return;
        };

        if session.stale {
            session.refresh();
        }

        let next = if session.moved {
            merge(self.append, &session.overlay, &self.cells)
        } else {
            let mut next = self.cells;
            if let Some(hit) = first_colliding_cell(session.rect, &self.cells) {
                next[hit.index] = !hit.previous;
            }
            next
        };
        log::debug!(
            "drag ended (moved: {}, append: {})",
            session.moved,
            self.append
        );
        drop(session);

        self.commit(next);
    }

    /// Shift held means subtract; applies immediately, even mid-drag
    pub fn modifier_key(&mut self, shift_pressed: bool) {
        self.append = !shift_pressed;
    }

    /// Toggle a whole day row based on its current summary state
    pub fn day_click(&mut self, day: usize) {
        let value = !self.borders.days[day];
        let next = set_row(&self.cells, day, value);
        self.commit(next);
    }

    /// Toggle a whole hour column based on its current summary state
    pub fn hour_click(&mut self, hour: usize) {
        let value = !self.borders.hours[hour];
        let next = set_column(&self.cells, hour, value);
        self.commit(next);
    }

    /// Replace the committed grid with new external data.
    ///
    /// Data equal to the previously supplied data is ignored, as is data of
    /// the wrong length. Does not notify. Returns true if the grid changed.
    pub fn set_data(&mut self, data: &[bool]) -> bool {
        if equal_states(&self.external, data) {
            return false;
        }
        self.external = data.to_vec();

        let Some(grid) = grid_from_data(data) else {
            log::warn!(
                "ignoring data with {} entries (expected {})",
                data.len(),
                HOURS_IN_WEEK
            );
            return false;
        };
        if grid == self.cells {
            return false;
        }

        self.cells = grid;
        self.borders = BorderStates::derive(&self.cells);
        true
    }

    fn commit(&mut self, next: CellGrid) {
        self.cells = next;
        self.borders = BorderStates::derive(&self.cells);
        self.notify();
    }

    fn notify(&mut self) {
        let changed = self
            .last_notified
            .as_ref()
            .is_none_or(|last| !equal_states(last, &self.cells));
        if changed {
            self.last_notified = Some(self.cells);
            (self.on_change)(&self.cells);
        }
    }
}
