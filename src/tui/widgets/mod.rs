// TUI widget modules for each dashboard panel.

pub mod comparison;
pub mod details;
pub mod search;
pub mod selected;
pub mod status_bar;

use ratatui::style::{Color, Modifier, Style};

/// Border style for a panel, highlighted when it has keyboard focus.
pub fn focused_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Style for panel headings.
pub fn heading_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Style for secondary label text.
pub fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
