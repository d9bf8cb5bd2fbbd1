// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into two athlete columns above a comparison
// panel:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------+------------------------+
// | Slot A column (50%)      | Slot B column (50%)    |
// |   search box (3)         |   search box (3)       |
// |   results dropdown (8)   |   results dropdown (8) |
// |   selected card (5)      |   selected card (5)    |
// |   details (fill)         |   details (fill)       |
// +-------------------------+------------------------+
// | Comparison panel (12 rows)                        |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of one athlete column.
#[derive(Debug, Clone)]
pub struct SlotColumn {
    pub search_box: Rect,
    /// Dropdown area directly under the search box; drawn above the
    /// selected card when visible.
    pub results: Rect,
    pub selected: Rect,
    pub details: Rect,
}

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub column_a: SlotColumn,
    pub column_b: SlotColumn,
    pub comparison: Rect,
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Min(16),    // athlete columns
            Constraint::Length(12), // comparison panel
            Constraint::Length(1),  // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let columns_area = vertical[1];
    let comparison = vertical[2];
    let help_bar = vertical[3];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns_area);

    AppLayout {
        status_bar,
        column_a: build_column(columns[0]),
        column_b: build_column(columns[1]),
        comparison,
        help_bar,
    }
}

fn build_column(area: Rect) -> SlotColumn {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Length(5), // selected card
            Constraint::Min(8),    // details
        ])
        .split(area);

    let search_box = rows[0];
    let selected = rows[1];
    let details = rows[2];

    // The dropdown overlays whatever sits under the search box.
    let results = Rect {
        x: search_box.x,
        y: search_box.y + search_box.height,
        width: search_box.width,
        height: 8.min(area.height.saturating_sub(search_box.height)),
    };

    SlotColumn {
        search_box,
        results,
        selected,
        details,
    }
}

/// A centered rectangle for modal overlays, clamped to the parent area.
pub fn centered_rect(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
