// Comparison panel: loading indicator, structured result, and the blocking
// failure alert.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::layout::centered_rect;
use crate::tui::ViewState;

use super::{heading_style, label_style};

/// Render the comparison panel.
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(
            "Comparison",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .border_style(if view.comparing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if view.comparing {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Comparing... this can take a few seconds",
                Style::default().fg(Color::Yellow),
            ))
            .block(block),
            area,
        );
        return;
    }

    let Some(result) = &view.comparison else {
        let hint = if view.compare_enabled {
            "press Enter to compare"
        } else {
            "select two athletes to enable comparison"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, label_style())).block(block),
            area,
        );
        return;
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Overall Winner: ", label_style()),
            Span::styled(
                result.winner.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("1v1 Prediction: ", label_style()),
            Span::raw(result.prediction.clone()),
        ]),
        Line::default(),
        Line::from(Span::styled(result.a_heading.clone(), heading_style())),
        Line::from(result.a_strengths.clone()),
        Line::from(Span::styled(result.b_heading.clone(), heading_style())),
        Line::from(result.b_strengths.clone()),
        Line::default(),
        Line::from(vec![
            Span::styled("Conclusion: ", label_style()),
            Span::raw(result.conclusion.clone()),
        ]),
        Line::from(vec![
            Span::styled("Analysis: ", label_style()),
            Span::raw(result.analysis.clone()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Render the blocking alert overlay. Caller checks `view.alert` first.
pub fn render_alert(frame: &mut Frame, parent: Rect, view: &ViewState) {
    let Some(message) = &view.alert else {
        return;
    };

    let area = centered_rect(parent, 60, 8);
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(l.to_string()))
        .chain([
            Line::default(),
            Line::from(Span::styled("press Enter to dismiss", label_style())),
        ])
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Error")
                    .border_style(Style::default().fg(Color::Red)),
            ),
        area,
    );
}
