//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::services::ThemeChoice;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Resolve a configured choice, detecting only for `Auto`
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::detect(),
            ThemeChoice::Dark => Self::Dark,
            ThemeChoice::Light => Self::Light,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (keybinding keys, interactive elements)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (labels, grid lines, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Selected hour cell
    pub fn selected(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(34),  // Green3
            Self::Light => Color::Indexed(28), // Green4
        }
    }

    /// Unselected cell or edge box
    pub fn empty(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(236),
            Self::Light => Color::Indexed(254),
        }
    }

    /// Fully selected day/hour edge box
    pub fn summary(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(40),
            Self::Light => Color::Indexed(22),
        }
    }

    /// Drag highlight background while adding
    pub fn highlight_add(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(24),
            Self::Light => Color::Indexed(153),
        }
    }

    /// Drag highlight background while removing
    pub fn highlight_remove(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(52),
            Self::Light => Color::Indexed(224),
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }
}
