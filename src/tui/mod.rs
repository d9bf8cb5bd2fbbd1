// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The app orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use crate::api::types::SearchResult;
use crate::protocol::{SearchOutcome, UiUpdate, UserCommand};
use crate::selection::{PerSlot, Selection, Slot};
use crate::sport::{Sport, StatsType};
use crate::view::{ComparisonView, DetailsView};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// What one slot's search result area is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsContent {
    #[default]
    Empty,
    Rows(Vec<SearchResult>),
    NoResults,
    Error(String),
}

/// One slot's result dropdown. Visibility is an explicit flag independent
/// of content, mirroring the original's "active" class.
#[derive(Debug, Clone, Default)]
pub struct ResultsPane {
    pub visible: bool,
    pub content: ResultsContent,
    /// Highlighted row index, for keyboard navigation.
    pub highlighted: usize,
}

impl ResultsPane {
    pub fn rows(&self) -> Option<&[SearchResult]> {
        match &self.content {
            ResultsContent::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    fn hide(&mut self) {
        self.visible = false;
        self.content = ResultsContent::Empty;
        self.highlighted = 0;
    }
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator;
/// `render_frame` reads this struct to draw the dashboard.
pub struct ViewState {
    pub sport: Sport,
    /// Which slot's search box has keyboard focus.
    pub focus: Slot,
    pub search_input: PerSlot<String>,
    pub results: PerSlot<ResultsPane>,
    pub selected: PerSlot<Option<Selection>>,
    pub compare_enabled: bool,
    pub stats_type: StatsType,
    pub details: Option<DetailsView>,
    /// Comparison request in flight (loading indicator).
    pub comparing: bool,
    pub comparison: Option<ComparisonView>,
    /// Blocking alert overlay; swallows input until dismissed.
    pub alert: Option<String>,
}

impl ViewState {
    pub fn new(sport: Sport) -> Self {
        ViewState {
            sport,
            focus: Slot::A,
            search_input: PerSlot::default(),
            results: PerSlot::default(),
            selected: PerSlot::default(),
            compare_enabled: false,
            stats_type: StatsType::default(),
            details: None,
            comparing: false,
            comparison: None,
            alert: None,
        }
    }

    /// Apply one update from the app orchestrator.
    pub fn apply_update(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::SearchResults { slot, outcome } => {
                let pane = self.results.get_mut(slot);
                match outcome {
                    SearchOutcome::Hidden => pane.hide(),
                    SearchOutcome::Results(rows) => {
                        pane.visible = true;
                        pane.content = ResultsContent::Rows(rows);
                        pane.highlighted = 0;
                    }
                    SearchOutcome::NoResults => {
                        pane.visible = true;
                        pane.content = ResultsContent::NoResults;
                        pane.highlighted = 0;
                    }
                    SearchOutcome::Error(message) => {
                        pane.visible = true;
                        pane.content = ResultsContent::Error(message);
                        pane.highlighted = 0;
                    }
                }
            }
            UiUpdate::SlotSelected { slot, selection } => {
                *self.selected.get_mut(slot) = Some(selection);
                self.search_input.get_mut(slot).clear();
                self.results.get_mut(slot).hide();
            }
            UiUpdate::SlotCleared(slot) => {
                *self.selected.get_mut(slot) = None;
                // Detail panels only make sense with both athletes present.
                self.details = None;
            }
            UiUpdate::CompareEnabled(enabled) => self.compare_enabled = enabled,
            UiUpdate::DetailsReady(details) => self.details = Some(*details),
            UiUpdate::StatsTypeChanged(stats_type) => self.stats_type = stats_type,
            UiUpdate::CompareStarted => {
                self.comparing = true;
                self.comparison = None;
            }
            UiUpdate::CompareFinished(view) => {
                self.comparing = false;
                self.comparison = Some(*view);
            }
            UiUpdate::CompareFailed(message) => {
                self.comparing = false;
                self.alert = Some(message);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Run the TUI event loop until the user quits or a channel closes.
///
/// Consumes `ui_rx` for state updates and sends user commands through
/// `cmd_tx`. Owns the terminal for its whole lifetime.
pub async fn run(
    ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    sport: Sport,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, ui_rx, cmd_tx, sport).await;
    ratatui::restore();
    result
}

async fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    sport: Sport,
) -> anyhow::Result<()> {
    let mut view = ViewState::new(sport);
    let mut events = EventStream::new();
    let mut frame_timer = tokio::time::interval(FRAME_INTERVAL);

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(cmd) = input::handle_key(key, &mut view) {
                            let quit = matches!(cmd, UserCommand::Quit);
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize is handled implicitly by the next draw.
                    }
                    Some(Err(e)) => warn!(error = %e, "terminal event error"),
                    None => break,
                }
            }

            update = ui_rx.recv() => {
                match update {
                    Some(update) => view.apply_update(update),
                    None => break,
                }
            }

            _ = frame_timer.tick() => {
                terminal.draw(|frame| render_frame(frame, &view))?;
            }
        }
    }

    Ok(())
}

/// Draw the full dashboard for the current view state.
pub fn render_frame(frame: &mut Frame, view: &ViewState) {
    let area = frame.area();
    let layout = build_layout(area);

    widgets::status_bar::render(frame, layout.status_bar, view);

    for (slot, column) in [(Slot::A, &layout.column_a), (Slot::B, &layout.column_b)] {
        widgets::search::render_input(frame, column.search_box, view, slot);
        widgets::selected::render(frame, column.selected, view, slot);
        widgets::details::render(frame, column.details, view, slot);
        // The dropdown draws last so it overlays the panels below the box.
        widgets::search::render_results(frame, column.results, view, slot);
    }

    widgets::comparison::render(frame, layout.comparison, view);
    widgets::status_bar::render_help(frame, layout.help_bar, view);

    if view.alert.is_some() {
        widgets::comparison::render_alert(frame, area, view);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
