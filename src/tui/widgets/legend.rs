//! Legend explaining the box glyphs

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::schedule::{SELECTED_GLYPH, UNSELECTED_GLYPH};
use crate::tui::theme::Theme;

pub struct Legend {
    theme: Theme,
}

impl Legend {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(SELECTED_GLYPH, Style::default().fg(self.theme.selected())),
            Span::styled(" Active", Style::default().fg(self.theme.text())),
            Span::raw("    "),
            Span::styled(UNSELECTED_GLYPH, Style::default().fg(self.theme.empty())),
            Span::styled(" Pause", Style::default().fg(self.theme.text())),
        ])
    }
}

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_text() {
        let line = Legend::new(Theme::Dark).line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "██ Active    ░░ Pause");
    }

    #[test]
    fn test_legend_renders_centered() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        Legend::new(Theme::Light).render(area, &mut buf);

        // 21 chars centered in 40 columns start at x=9
        assert_eq!(buf.cell((9, 0)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((9, 0)).unwrap().fg, Theme::Light.selected());
        assert_eq!(buf.cell((12, 0)).unwrap().symbol(), "A");
    }
}
