// Search box and result dropdown for one slot.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::api::types::SearchResult;
use crate::selection::Slot;
use crate::tui::{ResultsContent, ViewState};

use super::{focused_border_style, label_style};

/// Render the search input box for a slot.
pub fn render_input(frame: &mut Frame, area: Rect, view: &ViewState, slot: Slot) {
    let focused = view.focus == slot;
    let title = Line::from(vec![
        Span::styled(
            format!("Search {} ", slot.label()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("({})", view.sport.entity_noun()),
            label_style(),
        ),
    ]);

    let mut text = view.search_input.get(slot).clone();
    if focused {
        text.push('_');
    }

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focused_border_style(focused)),
    );
    frame.render_widget(paragraph, area);
}

/// Render the result dropdown for a slot, when visible.
///
/// Drawn over whatever sits below the search box, like the absolutely
/// positioned list in the original page.
pub fn render_results(frame: &mut Frame, area: Rect, view: &ViewState, slot: Slot) {
    let pane = view.results.get(slot);
    if !pane.visible || area.height == 0 {
        return;
    }

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focused_border_style(view.focus == slot));

    match &pane.content {
        ResultsContent::Rows(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .map(|(i, row)| result_item(row, i == pane.highlighted))
                .collect();
            frame.render_widget(List::new(items).block(block), area);
        }
        ResultsContent::NoResults => {
            let message = format!("No {} found", view.sport.entity_noun());
            frame.render_widget(
                Paragraph::new(message).style(label_style()).block(block),
                area,
            );
        }
        ResultsContent::Error(message) => {
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                area,
            );
        }
        ResultsContent::Empty => {
            frame.render_widget(block, area);
        }
    }
}

fn result_item(row: &SearchResult, highlighted: bool) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        row.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    // Secondary descriptors vary by domain: position/team for ball sports,
    // nickname/weight class for fighters.
    if let Some(nickname) = &row.nickname {
        spans.push(Span::styled(format!("  \"{nickname}\""), label_style()));
    }
    if let Some(position) = &row.position {
        spans.push(Span::styled(format!("  {position}"), label_style()));
    }
    if let Some(team) = &row.team {
        spans.push(Span::styled(format!("  {team}"), label_style()));
    }
    if let Some(weight_class) = &row.weight_class {
        spans.push(Span::styled(format!("  {weight_class}"), label_style()));
    }

    let style = if highlighted {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(spans)).style(style)
}
