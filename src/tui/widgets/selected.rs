// Selected athlete card for one slot.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::selection::Slot;
use crate::tui::ViewState;

use super::{focused_border_style, heading_style, label_style};

/// Render the selected-athlete card for a slot.
pub fn render(frame: &mut Frame, area: Rect, view: &ViewState, slot: Slot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Selected {}", slot.label()))
        .border_style(focused_border_style(view.focus == slot));

    let Some(selection) = view.selected.get(slot) else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "none - pick from search results",
            label_style(),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        selection.name.clone(),
        heading_style(),
    ))];

    if let Some(nickname) = &selection.nickname {
        lines.push(Line::from(Span::styled(
            format!("\"{nickname}\""),
            label_style(),
        )));
    }

    let descriptors: Vec<&str> = [
        selection.position.as_deref(),
        selection.team.as_deref(),
        selection.weight_class.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !descriptors.is_empty() {
        lines.push(Line::from(Span::styled(
            descriptors.join(" • "),
            label_style(),
        )));
    }

    let bio: Vec<&str> = [selection.height.as_deref(), selection.weight.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !bio.is_empty() {
        lines.push(Line::from(Span::styled(bio.join(" • "), label_style())));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
