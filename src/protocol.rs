// Messages flowing between the TUI, the app orchestrator, and spawned
// fetch tasks.
//
// Three channels, three enums:
//   TUI --UserCommand--> app loop
//   fetch task --FetchEvent--> app loop
//   app loop --UiUpdate--> TUI

use crate::api::types::{AthleteDetails, CompareResult, SearchResult};
use crate::api::ApiError;
use crate::selection::{Selection, Slot};
use crate::sport::StatsType;
use crate::view::{ComparisonView, DetailsView};

/// Commands originating from user input in the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// The full current text of a slot's search box, sent on every edit.
    SearchInput { slot: Slot, text: String },
    /// Activate the result row at `index` in a slot's list.
    SelectResult { slot: Slot, index: usize },
    /// Empty a slot.
    ClearSlot(Slot),
    /// Trigger the comparison. No-op while incomplete or already loading.
    Compare,
    /// Cycle the stats-type selector.
    CycleStatsType,
    Quit,
}

/// What a slot's result area should show.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Query too short: list cleared and hidden.
    Hidden,
    Results(Vec<SearchResult>),
    NoResults,
    /// Inline error message replacing the list.
    Error(String),
}

/// Completion events from spawned fetch tasks. Every variant carries the
/// generation it was spawned under; the app loop discards stale ones.
#[derive(Debug)]
pub enum FetchEvent {
    Search {
        slot: Slot,
        generation: u64,
        result: Result<Vec<SearchResult>, ApiError>,
    },
    Details {
        generation: u64,
        result: Result<(AthleteDetails, AthleteDetails), ApiError>,
    },
    Compare {
        generation: u64,
        result: Result<CompareResult, ApiError>,
    },
}

/// State pushed from the app loop to the TUI render loop.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    SearchResults {
        slot: Slot,
        outcome: SearchOutcome,
    },
    SlotSelected {
        slot: Slot,
        selection: Selection,
    },
    SlotCleared(Slot),
    /// Whether the compare action is currently available.
    CompareEnabled(bool),
    DetailsReady(Box<DetailsView>),
    StatsTypeChanged(StatsType),
    /// Comparison request in flight: show the loading indicator, hide any
    /// prior result.
    CompareStarted,
    CompareFinished(Box<ComparisonView>),
    /// Comparison failed: show a blocking alert, return to interactive.
    CompareFailed(String),
}
