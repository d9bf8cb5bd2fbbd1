// Top status bar and bottom help bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

use super::label_style;

/// Render the one-line status bar: app name, sport domain, stats slice,
/// compare readiness.
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState) {
    let readiness = if view.comparing {
        Span::styled("comparing...", Style::default().fg(Color::Yellow))
    } else if view.compare_enabled {
        Span::styled("ready to compare", Style::default().fg(Color::Green))
    } else {
        Span::styled("pick two athletes", label_style())
    };

    let mut spans = vec![
        Span::styled("matchup", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(view.sport.label(), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
    ];
    if view.sport.sends_stats_type() {
        spans.push(Span::styled(
            format!("stats: {}", view.stats_type.label()),
            label_style(),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(readiness);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the one-line keyboard hint bar.
pub fn render_help(frame: &mut Frame, area: Rect, view: &ViewState) {
    let mut hints = vec![
        "type to search",
        "Tab focus",
        "↑/↓ pick",
        "Enter select/compare",
        "Ctrl+X clear slot",
    ];
    if view.sport.sends_stats_type() {
        hints.push("Ctrl+T stats type");
    }
    hints.push("Ctrl+Q quit");

    frame.render_widget(
        Paragraph::new(Span::styled(hints.join("  |  "), label_style())),
        area,
    );
}
