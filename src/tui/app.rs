//! TUI application state, event routing and main loop

use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, ModifierKeyCode, MouseButton, MouseEvent,
    MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};

use crate::services::box_state::{count_selected, grid_from_data};
use crate::services::grid_file;
use crate::services::throttle::FRAME_INTERVAL;
use crate::services::{Listener, ListenerRegistry, SelectionEngine};
use crate::types::{CellGrid, Point, PointerButton, HOURS_IN_WEEK};

use super::theme::Theme;
use super::widgets::{
    help::HelpPopup,
    legend::Legend,
    schedule::{Hit, ScheduleLayout, ScheduleView, SCHEDULE_HEIGHT},
};

const HEADER_HEIGHT: u16 = 1;
const FOOTER_HEIGHT: u16 = 2;
/// Page row where the schedule starts
const SCHEDULE_TOP: i32 = 1;
/// Scrollable content height
const PAGE_HEIGHT: i32 = SCHEDULE_TOP + SCHEDULE_HEIGHT + 1;
/// Event poll timeout while idle
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Startup options for the TUI
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub initial: Vec<bool>,
    /// File the initial data came from, re-read on `r`
    pub data_path: Option<PathBuf>,
    pub theme: Theme,
    pub throttle: Duration,
}

pub struct App {
    engine: SelectionEngine,
    registry: ListenerRegistry,
    changes: mpsc::Receiver<CellGrid>,
    last_change: Option<CellGrid>,
    change_count: usize,
    theme: Theme,
    /// Screen area of the scrollable body
    body: Rect,
    /// Rows scrolled off the top of the body
    scroll: i32,
    /// Last pointer position on screen while a drag is in progress
    pointer: Option<(u16, u16)>,
    data_path: Option<PathBuf>,
    /// One-line message shown in the header
    notice: Option<String>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(initial: &[bool], theme: Theme, throttle: Duration) -> Self {
        let registry = ListenerRegistry::new();
        let (tx, rx) = mpsc::channel();
        let engine = SelectionEngine::new(initial, &registry, move |grid| {
            let _ = tx.send(*grid);
        })
        .with_throttle(throttle);

        let notice = (!initial.is_empty() && grid_from_data(initial).is_none()).then(|| {
            format!(
                "data ignored: {} entries, expected {}",
                initial.len(),
                HOURS_IN_WEEK
            )
        });

        Self {
            engine,
            registry,
            changes: rx,
            last_change: None,
            change_count: 0,
            theme,
            body: Rect::default(),
            scroll: 0,
            pointer: None,
            data_path: None,
            notice,
            show_help: false,
            should_quit: false,
        }
    }

    /// Remember where the initial data came from so it can be reloaded
    pub fn with_data_path(mut self, path: Option<PathBuf>) -> Self {
        self.data_path = path;
        self
    }

    /// Split the frame into header, body and footer
    fn split(area: Rect) -> [Rect; 3] {
        let chunks = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }

    fn layout(&self) -> ScheduleLayout {
        ScheduleLayout::for_width(self.body.width, SCHEDULE_TOP)
    }

    fn scroll_point(&self) -> Point {
        Point::new(0, self.scroll)
    }

    fn max_scroll(&self) -> i32 {
        (PAGE_HEIGHT - i32::from(self.body.height)).max(0)
    }

    /// Map a screen position to page coordinates
    fn page_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            i32::from(column) - i32::from(self.body.x),
            i32::from(row) - i32::from(self.body.y) + self.scroll,
        )
    }

    /// Track the frame size; a moved container is reported to an active drag
    pub fn resize(&mut self, area: Rect) {
        let [_, body, _] = Self::split(area);
        if body == self.body {
            return;
        }
        self.body = body;
        self.scroll = self.scroll.min(self.max_scroll());
        if self.registry.is_attached(Listener::Scroll) {
            let scroll = self.scroll_point();
            self.engine
                .scroll(scroll, self.layout().container(scroll), Instant::now());
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
            Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
            _ => {}
        }
        self.drain_changes();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let is_shift = matches!(
            key.code,
            KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift)
        );

        match key.kind {
            KeyEventKind::Release => {
                if is_shift && self.registry.is_attached(Listener::KeyUp) {
                    self.engine.modifier_key(false);
                }
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if is_shift {
                    if self.registry.is_attached(Listener::KeyDown) {
                        self.engine.modifier_key(true);
                    }
                    return;
                }
                if key.kind == KeyEventKind::Press {
                    self.handle_key_press(key);
                }
            }
        }
    }

    fn handle_key_press(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.toggle_help(),
            // Terminals reporting base keys send Shift+'/' for '?'
            KeyCode::Char('/') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.toggle_help()
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1, now),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1, now),
            KeyCode::PageUp => self.scroll_by(-i32::from(self.body.height), now),
            KeyCode::PageDown => self.scroll_by(i32::from(self.body.height), now),
            _ => {}
        }
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.end_drag();
        }
    }

    fn end_drag(&mut self) {
        if self.registry.is_attached(Listener::PointerUp) {
            self.engine.pointer_up();
            self.pointer = None;
        }
    }

    /// Re-read the data file; unchanged contents leave the grid alone
    fn reload(&mut self) {
        let Some(path) = self.data_path.as_ref() else {
            self.notice = Some("no data file to reload".to_string());
            return;
        };
        if self.engine.is_dragging() {
            return;
        }

        self.notice = match grid_file::load_data(path) {
            Ok(data) if grid_from_data(&data).is_none() => Some(format!(
                "reload ignored: {} entries, expected {}",
                data.len(),
                HOURS_IN_WEEK
            )),
            Ok(data) => {
                if self.engine.set_data(&data) {
                    log::info!("reloaded {}", path.display());
                    Some(format!("reloaded {}", path.display()))
                } else {
                    Some("data file unchanged".to_string())
                }
            }
            Err(e) => {
                log::warn!("reload of {} failed: {}", path.display(), e);
                Some(format!("reload failed: {}", e))
            }
        };
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.show_help {
            // A drag started before the popup opened still ends on release
            if matches!(mouse.kind, MouseEventKind::Up(_)) {
                self.end_drag();
            }
            return;
        }
        // Terminals often reserve Shift+drag for text selection; Ctrl works too
        if self.registry.is_attached(Listener::KeyDown) {
            let subtract = mouse
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::CONTROL);
            self.engine.modifier_key(subtract);
        }

        let point = self.page_point(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                self.pointer_down(button, mouse.column, mouse.row, point);
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                if self.registry.is_attached(Listener::PointerMove) {
                    self.pointer = Some((mouse.column, mouse.row));
                    self.engine.pointer_move(point, now);
                }
            }
            MouseEventKind::Up(_) => self.end_drag(),
            MouseEventKind::ScrollUp => self.scroll_by(-1, now),
            MouseEventKind::ScrollDown => self.scroll_by(1, now),
            _ => {}
        }
    }

    fn pointer_down(&mut self, button: MouseButton, column: u16, row: u16, point: Point) {
        if !self.body.contains(Position::new(column, row)) {
            return;
        }
        let button = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Right => PointerButton::Secondary,
        };
        let layout = self.layout();

        match layout.hit_test(point) {
            Some(Hit::Selection) => {
                let scroll = self.scroll_point();
                if self
                    .engine
                    .pointer_down(button, point, scroll, layout.container(scroll))
                {
                    self.pointer = Some((column, row));
                }
            }
            Some(Hit::Day(day)) if button == PointerButton::Primary => self.engine.day_click(day),
            Some(Hit::Hour(hour)) if button == PointerButton::Primary => {
                self.engine.hour_click(hour)
            }
            _ => {}
        }
    }

    /// Scroll the body; an active drag follows the pointer's new page position
    fn scroll_by(&mut self, delta: i32, now: Instant) {
        let next = (self.scroll + delta).clamp(0, self.max_scroll());
        if next == self.scroll {
            return;
        }
        self.scroll = next;

        if self.registry.is_attached(Listener::Scroll) {
            let scroll = self.scroll_point();
            self.engine
                .scroll(scroll, self.layout().container(scroll), now);
            if let Some((column, row)) = self.pointer {
                let point = self.page_point(column, row);
                self.engine.pointer_move(point, now);
            }
        }
    }

    fn drain_changes(&mut self) {
        while let Ok(grid) = self.changes.try_recv() {
            self.change_count += 1;
            log::info!("selection changed: {} hours active", count_selected(&grid));
            self.last_change = Some(grid);
        }
    }

    /// Apply pending throttled drag updates
    pub fn tick(&mut self, now: Instant) {
        self.engine.flush(now);
        self.drain_changes();
    }

    pub fn poll_timeout(&self) -> Duration {
        if self.engine.is_dragging() {
            FRAME_INTERVAL
        } else {
            IDLE_POLL
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Grid from the most recent change notification
    pub fn last_change(&self) -> Option<&CellGrid> {
        self.last_change.as_ref()
    }

    /// The committed grid
    pub fn grid(&self) -> CellGrid {
        *self.engine.cells()
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let hint = match &self.notice {
            Some(notice) => Span::styled(notice.as_str(), Style::default().fg(self.theme.error())),
            None => Span::styled(
                "drag to select, ? for help",
                Style::default().fg(self.theme.muted()),
            ),
        };
        let line = Line::from(vec![
            Span::styled(
                " weekgrid ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            hint,
        ]);
        Paragraph::new(line).render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let (mode, mode_color) = if self.engine.append_mode() {
            ("add", self.theme.selected())
        } else {
            ("remove", self.theme.error())
        };
        let active = count_selected(self.engine.cells());
        let line = Line::from(vec![
            Span::styled(
                format!(" {} hours active", active),
                Style::default().fg(self.theme.text()),
            ),
            Span::styled("  |  mode: ", Style::default().fg(self.theme.muted())),
            Span::styled(mode, Style::default().fg(mode_color)),
            Span::styled(
                format!("  |  {} changes", self.change_count),
                Style::default().fg(self.theme.muted()),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, body, footer] = App::split(area);

        self.render_header(header, buf);

        ScheduleView::new(
            &self.engine,
            ScheduleLayout::for_width(body.width, SCHEDULE_TOP),
            self.theme,
        )
        .with_scroll(self.scroll_point())
        .render(body, buf);

        let footer_rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .split(footer);
        Legend::new(self.theme).render(footer_rows[0], buf);
        self.render_status(footer_rows[1], buf);

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI and return the grid as it was when the user quit
pub fn run(options: TuiOptions) -> anyhow::Result<CellGrid> {
    let mut terminal = ratatui::init();
    let result = enable_input_capture().and_then(|enhanced| {
        let result = run_app(&mut terminal, options);
        disable_input_capture(enhanced);
        result
    });
    ratatui::restore();
    result
}

/// Turn on mouse reporting, plus key release events where supported.
/// Returns whether keyboard enhancement was pushed.
fn enable_input_capture() -> anyhow::Result<bool> {
    let mut out = stdout();
    execute!(out, EnableMouseCapture)?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            out,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }
    log::debug!("input capture enabled (key release events: {})", enhanced);
    Ok(enhanced)
}

fn disable_input_capture(enhanced: bool) {
    let mut out = stdout();
    if enhanced {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(out, DisableMouseCapture);
}

fn run_app(terminal: &mut DefaultTerminal, options: TuiOptions) -> anyhow::Result<CellGrid> {
    let mut app = App::new(&options.initial, options.theme, options.throttle)
        .with_data_path(options.data_path);

    loop {
        let size = terminal.size()?;
        app.resize(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if event::poll(app.poll_timeout())? {
            app.handle_event(event::read()?);
        } else {
            app.tick(Instant::now());
        }
    }

    Ok(app.grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HOURS_IN_DAY, HOURS_IN_WEEK};

    const WIDE: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };
    const SHORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 12,
    };

    fn make_app(area: Rect) -> App {
        let mut app = App::new(&[], Theme::Dark, Duration::ZERO);
        app.resize(area);
        app
    }

    /// Screen position of a page point for the app's current scroll
    fn screen(app: &App, page: Point) -> (u16, u16) {
        (
            (page.x + i32::from(app.body.x)) as u16,
            (page.y - app.scroll + i32::from(app.body.y)) as u16,
        )
    }

    fn mouse(kind: MouseEventKind, at: (u16, u16), modifiers: KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: at.0,
            row: at.1,
            modifiers,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(app: &mut App, at: (u16, u16)) {
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            at,
            KeyModifiers::NONE,
        ));
        app.handle_event(mouse(
            MouseEventKind::Up(MouseButton::Left),
            at,
            KeyModifiers::NONE,
        ));
    }

    fn drag(app: &mut App, from: (u16, u16), to: (u16, u16), modifiers: KeyModifiers) {
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            from,
            modifiers,
        ));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), to, modifiers));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), to, modifiers));
    }

    fn cell_screen(app: &App, index: usize) -> (u16, u16) {
        screen(app, app.layout().cell(index))
    }

    #[test]
    fn test_app_initial_state() {
        let app = make_app(WIDE);
        assert!(!app.should_quit());
        assert!(!app.show_help);
        assert_eq!(app.change_count, 0);
        assert_eq!(app.grid(), [false; HOURS_IN_WEEK]);
        assert!(app.registry.is_attached(Listener::KeyDown));
        assert!(!app.registry.is_attached(Listener::PointerMove));
    }

    #[test]
    fn test_app_quit_on_q() {
        let mut app = make_app(WIDE);
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_app_quit_on_esc() {
        let mut app = make_app(WIDE);
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_app_help_toggle() {
        let mut app = make_app(WIDE);
        app.handle_event(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_event(key(KeyCode::Char('?')));
        assert!(!app.show_help);
    }

    #[test]
    fn test_click_toggles_cell() {
        let mut app = make_app(WIDE);
        let at = cell_screen(&app, 30);
        click(&mut app, at);

        assert!(app.grid()[30]);
        assert_eq!(app.change_count, 1);
        assert_eq!(app.last_change(), Some(&app.grid()));

        click(&mut app, at);
        assert!(!app.grid()[30]);
        assert_eq!(app.change_count, 2);
    }

    #[test]
    fn test_drag_selects_block() {
        let mut app = make_app(WIDE);
        let from = cell_screen(&app, 0);
        let to = cell_screen(&app, HOURS_IN_DAY + 1);
        drag(&mut app, from, to, KeyModifiers::NONE);

        let grid = app.grid();
        for index in [0, 1, HOURS_IN_DAY, HOURS_IN_DAY + 1] {
            assert!(grid[index], "cell {} should be selected", index);
        }
        assert_eq!(count_selected(&grid), 4);
        assert!(!app.engine.is_dragging());
        assert!(!app.registry.is_attached(Listener::PointerUp));
    }

    #[test]
    fn test_shift_drag_removes() {
        let mut app = App::new(&[true; HOURS_IN_WEEK], Theme::Dark, Duration::ZERO);
        app.resize(WIDE);
        let from = cell_screen(&app, 0);
        let to = cell_screen(&app, 2);
        drag(&mut app, from, to, KeyModifiers::SHIFT);

        let grid = app.grid();
        assert!(!grid[0] && !grid[1] && !grid[2]);
        assert!(grid[3]);
        assert_eq!(count_selected(&grid), HOURS_IN_WEEK - 3);
    }

    #[test]
    fn test_shift_key_press_and_release() {
        let mut app = make_app(WIDE);
        let shift = KeyCode::Modifier(ModifierKeyCode::LeftShift);

        app.handle_event(Event::Key(KeyEvent::new(shift, KeyModifiers::SHIFT)));
        assert!(!app.engine.append_mode());

        app.handle_event(Event::Key(KeyEvent::new_with_kind(
            shift,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        )));
        assert!(app.engine.append_mode());
    }

    #[test]
    fn test_day_and_hour_box_clicks() {
        let mut app = make_app(WIDE);
        let layout = app.layout();

        let day = screen(&app, layout.day_box(2));
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            day,
            KeyModifiers::NONE,
        ));
        let grid = app.grid();
        assert!(grid[2 * HOURS_IN_DAY..3 * HOURS_IN_DAY].iter().all(|&c| c));
        assert_eq!(count_selected(&grid), HOURS_IN_DAY);
        assert!(app.engine.day_summary()[2]);

        let hour = screen(&app, layout.hour_box(5));
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            hour,
            KeyModifiers::NONE,
        ));
        assert!(app.engine.hour_summary()[5]);
        assert_eq!(count_selected(&app.grid()), HOURS_IN_DAY + 6);
        assert_eq!(app.change_count, 2);
    }

    #[test]
    fn test_right_click_ignored() {
        let mut app = make_app(WIDE);
        let at = cell_screen(&app, 0);
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Right),
            at,
            KeyModifiers::NONE,
        ));
        assert!(!app.engine.is_dragging());
        assert!(!app.registry.is_attached(Listener::PointerMove));

        app.handle_event(mouse(
            MouseEventKind::Up(MouseButton::Right),
            at,
            KeyModifiers::NONE,
        ));
        assert_eq!(app.change_count, 0);
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let mut app = make_app(WIDE);
        let at = cell_screen(&app, 0);
        app.handle_event(mouse(MouseEventKind::Moved, at, KeyModifiers::NONE));
        app.handle_event(mouse(
            MouseEventKind::Up(MouseButton::Left),
            at,
            KeyModifiers::NONE,
        ));
        assert_eq!(app.change_count, 0);
        assert!(app.pointer.is_none());
    }

    #[test]
    fn test_click_outside_grid_does_nothing() {
        let mut app = make_app(WIDE);
        // Header row
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            (30, 0),
            KeyModifiers::NONE,
        ));
        // Day label column
        let label = screen(&app, Point::new(app.layout().origin.x, 4));
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            label,
            KeyModifiers::NONE,
        ));
        assert!(!app.engine.is_dragging());
        assert_eq!(app.change_count, 0);
    }

    #[test]
    fn test_scroll_clamped() {
        let mut app = make_app(WIDE);
        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.scroll, 0);

        let mut app = make_app(SHORT);
        assert_eq!(app.max_scroll(), PAGE_HEIGHT - 9);
        app.handle_event(key(KeyCode::PageDown));
        assert_eq!(app.scroll, 9);
        app.handle_event(key(KeyCode::PageDown));
        assert_eq!(app.scroll, app.max_scroll());
        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.scroll, app.max_scroll() - 1);
        app.handle_event(key(KeyCode::PageUp));
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_scroll_during_drag_extends_selection() {
        let mut app = make_app(SHORT);
        let at = cell_screen(&app, 0);

        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            at,
            KeyModifiers::NONE,
        ));
        assert!(app.registry.is_attached(Listener::Scroll));
        app.handle_event(mouse(MouseEventKind::ScrollDown, at, KeyModifiers::NONE));
        app.handle_event(mouse(MouseEventKind::ScrollDown, at, KeyModifiers::NONE));
        assert_eq!(app.scroll, 2);
        app.handle_event(mouse(
            MouseEventKind::Up(MouseButton::Left),
            at,
            KeyModifiers::NONE,
        ));

        let grid = app.grid();
        assert!(grid[0]);
        assert!(grid[HOURS_IN_DAY]);
        assert_eq!(count_selected(&grid), 2);
    }

    #[test]
    fn test_mouse_ignored_while_help_open() {
        let mut app = make_app(WIDE);
        app.handle_event(key(KeyCode::Char('?')));
        let at = cell_screen(&app, 0);
        click(&mut app, at);
        assert_eq!(app.change_count, 0);
    }

    #[test]
    fn test_release_with_help_open_ends_drag() {
        let mut app = make_app(WIDE);
        let start = cell_screen(&app, 0);
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            start,
            KeyModifiers::NONE,
        ));
        app.handle_event(key(KeyCode::Char('?')));
        app.handle_event(mouse(
            MouseEventKind::Up(MouseButton::Left),
            start,
            KeyModifiers::NONE,
        ));
        app.handle_event(key(KeyCode::Char('?')));

        let hover = cell_screen(&app, 30);
        app.handle_event(mouse(MouseEventKind::Moved, hover, KeyModifiers::NONE));

        assert!(!app.engine.is_dragging());
        assert!(!app.registry.is_attached(Listener::PointerMove));
        assert!(!app.registry.is_attached(Listener::Scroll));
        assert_eq!(count_selected(&app.engine.preview()), 1);
        assert!(app.grid()[0]);
    }

    #[test]
    fn test_opening_help_ends_drag() {
        let mut app = make_app(WIDE);
        let start = cell_screen(&app, 0);
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            start,
            KeyModifiers::NONE,
        ));
        app.handle_event(key(KeyCode::Char('?')));

        assert!(app.show_help);
        assert!(!app.engine.is_dragging());
        assert!(!app.registry.is_attached(Listener::PointerUp));
        assert_eq!(app.change_count, 1);
    }

    #[test]
    fn test_shifted_slash_toggles_help() {
        let mut app = make_app(WIDE);
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('/'),
            KeyModifiers::SHIFT,
        )));
        assert!(app.show_help);
        app.handle_event(key(KeyCode::Char('/')));
        assert!(app.show_help);
    }

    #[test]
    fn test_wrong_length_data_shows_notice() {
        let mut app = App::new(&[true; 5], Theme::Dark, Duration::ZERO);
        app.resize(WIDE);
        assert_eq!(app.grid(), [false; HOURS_IN_WEEK]);
        assert_eq!(
            app.notice.as_deref(),
            Some("data ignored: 5 entries, expected 168")
        );

        let mut buf = Buffer::empty(WIDE);
        (&app).render(WIDE, &mut buf);
        let header: String = (0..WIDE.width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(header.contains("data ignored"));

        assert!(App::new(&[], Theme::Dark, Duration::ZERO).notice.is_none());
    }

    #[test]
    fn test_reload_data_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("week.json");
        let mut grid = [false; HOURS_IN_WEEK];
        grid[3] = true;
        std::fs::write(&path, grid_file::to_json(&grid).unwrap()).unwrap();

        let mut app = App::new(&grid, Theme::Dark, Duration::ZERO)
            .with_data_path(Some(path.clone()));
        app.resize(WIDE);

        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.notice.as_deref(), Some("data file unchanged"));

        grid[4] = true;
        std::fs::write(&path, grid_file::to_json(&grid).unwrap()).unwrap();
        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.grid(), grid);
        // Reloading is not a user edit
        assert_eq!(app.change_count, 0);

        std::fs::write(&path, "[true]").unwrap();
        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.grid(), grid);
        assert!(app.notice.as_deref().unwrap().starts_with("reload ignored"));
    }

    #[test]
    fn test_reload_without_data_file() {
        let mut app = make_app(WIDE);
        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.notice.as_deref(), Some("no data file to reload"));
        assert_eq!(app.grid(), [false; HOURS_IN_WEEK]);
    }

    #[test]
    fn test_poll_timeout_while_dragging() {
        let mut app = make_app(WIDE);
        assert_eq!(app.poll_timeout(), IDLE_POLL);
        let at = cell_screen(&app, 0);
        app.handle_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            at,
            KeyModifiers::NONE,
        ));
        assert_eq!(app.poll_timeout(), FRAME_INTERVAL);
    }

    #[test]
    fn test_render_header_and_footer() {
        let app = make_app(WIDE);
        let mut buf = Buffer::empty(WIDE);
        (&app).render(WIDE, &mut buf);

        let row = |y: u16| -> String {
            (0..WIDE.width)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect()
        };
        assert!(row(0).contains("weekgrid"));
        assert!(row(28).contains("Active"));
        assert!(row(29).contains("0 hours active"));
        assert!(row(29).contains("mode: add"));
    }
}
