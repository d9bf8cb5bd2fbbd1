// Per-athlete detail panel: career stats and accolades (NBA) or bio,
// record and fight stats (MMA).

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::selection::Slot;
use crate::tui::ViewState;
use crate::view::{AthleteCard, MmaCard, NbaCard};

use super::{heading_style, label_style};

/// Render the detail panel for a slot.
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState, slot: Slot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Details {}", slot.label()))
        .border_style(label_style());

    let Some(details) = &view.details else {
        let placeholder = if view.sport.has_details() {
            "select both athletes to load details"
        } else {
            "no detail endpoints for this domain"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(placeholder, label_style())).block(block),
            area,
        );
        return;
    };

    let card = match slot {
        Slot::A => &details.a,
        Slot::B => &details.b,
    };

    let lines = match card {
        AthleteCard::Nba(card) => nba_lines(card, view),
        AthleteCard::Mma(card) => mma_lines(card),
    };

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn stat_row(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style()),
        Span::raw(value.to_string()),
    ])
}

fn nba_lines(card: &NbaCard, view: &ViewState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(card.name.clone(), heading_style()))];
    if let Some(bio) = &card.bio_line {
        lines.push(Line::from(Span::styled(bio.clone(), label_style())));
    }
    lines.push(Line::default());

    match &card.summary {
        None => lines.push(Line::from(Span::styled(
            "No statistics available",
            label_style(),
        ))),
        Some(summary) => {
            lines.push(Line::from(Span::styled(
                format!("Career Overview ({})", view.stats_type.label()),
                heading_style(),
            )));
            lines.push(stat_row(
                "Seasons",
                &format!("{} | Games: {}", summary.seasons, summary.games),
            ));
            lines.push(Line::default());

            lines.push(Line::from(Span::styled("Career Averages", heading_style())));
            lines.push(stat_row("Points", &summary.avg_pts));
            lines.push(stat_row("Assists", &summary.avg_ast));
            lines.push(stat_row("Rebounds", &summary.avg_reb));
            lines.push(stat_row("Minutes", &summary.avg_min));
            lines.push(stat_row("FG%", &format!("{}%", summary.fg_pct)));
            lines.push(stat_row("3P%", &format!("{}%", summary.tp_pct)));

            if let Some(peak) = &summary.peak_regular {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("Peak Regular Season ({})", peak.season),
                    heading_style(),
                )));
                lines.push(Line::from(peak.line.clone()));
                lines.push(stat_row("Total (PPG+APG+RPG)", &peak.total));
                lines.push(Line::from(Span::styled(peak.games.clone(), label_style())));
            }

            if let Some(peak) = &summary.peak_playoff {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("Peak Playoff Run ({})", peak.season),
                    heading_style(),
                )));
                lines.push(Line::from(peak.line.clone()));
                lines.push(stat_row("Total (PPG+APG+RPG)", &peak.total));
                lines.push(Line::from(Span::styled(peak.games.clone(), label_style())));
            }
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Accolades", heading_style())));
    if card.accolades.awards.is_empty() {
        lines.push(Line::from(Span::styled(
            "No accolades available",
            label_style(),
        )));
    } else {
        for award in &card.accolades.awards {
            lines.push(Line::from(Span::styled(
                award.heading.clone(),
                Style::default().fg(Color::Yellow),
            )));
            if let Some(description) = &award.description {
                lines.push(Line::from(Span::styled(
                    format!("  {description}"),
                    label_style(),
                )));
            }
        }
    }

    lines
}

fn mma_lines(card: &MmaCard) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(card.name.clone(), heading_style()))];
    if let Some(nickname) = &card.nickname {
        lines.push(Line::from(Span::styled(
            format!("\"{nickname}\""),
            label_style(),
        )));
    }
    lines.push(Line::from(Span::styled(
        card.class_line.clone(),
        label_style(),
    )));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Fighter Info", heading_style())));
    for (label, value) in &card.info_rows {
        lines.push(stat_row(label, value));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Career Summary", heading_style())));
    lines.push(stat_row("Record", &card.record_line));
    lines.push(stat_row("Win Rate", &card.win_rate));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        "Fight Stats (per 15 min)",
        heading_style(),
    )));
    for (label, value) in &card.fight_stats {
        lines.push(stat_row(label, value));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Finish Rates", heading_style())));
    for (label, value) in &card.finish_rates {
        lines.push(stat_row(label, value));
    }

    lines
}
