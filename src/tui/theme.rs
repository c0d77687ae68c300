//! Color palettes for the terminal form

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Background luma above which the terminal counts as light
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub title_style: Style,

    // Form fields
    pub label: Color,
    pub input: Style,
    pub input_focused: Style,
    pub error: Color,

    // Result panel
    pub result_border: Color,
    pub average: Style,

    // General colors
    pub muted: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_key: Style,
}

impl ThemeColors {
    /// Palette for dark terminal backgrounds
    pub fn dark() -> Self {
        Self {
            title_style: Style::new().fg(Color::Cyan).bold(),
            label: Color::White,
            input: Style::new().fg(Color::White).bg(Color::Indexed(236)),
            input_focused: Style::new().fg(Color::Black).bg(Color::Cyan),
            error: Color::Red,
            result_border: Color::Indexed(244),
            average: Style::new().fg(Color::Green).bold(),
            muted: Color::Gray,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_key: Style::new().fg(Color::Cyan).bold(),
        }
    }

    /// Palette for light terminal backgrounds
    pub fn light() -> Self {
        Self {
            title_style: Style::new().fg(Color::Blue).bold(),
            label: Color::Black,
            input: Style::new().fg(Color::Black).bg(Color::Indexed(254)),
            input_focused: Style::new().fg(Color::White).bg(Color::Blue),
            error: Color::Red,
            result_border: Color::Indexed(246),
            average: Style::new().fg(Color::Indexed(28)).bold(),
            muted: Color::DarkGray,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_key: Style::new().fg(Color::Blue).bold(),
        }
    }
}

/// Pick a palette for `mode`. Auto queries the terminal background and falls
/// back to dark when it can't be determined.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
