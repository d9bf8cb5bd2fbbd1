// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI with
// completion events from spawned fetch tasks. Maintains the complete
// client-side state (slots, pending debounces, in-flight generations) and
// pushes UI updates to the TUI render loop.
//
// Supersession policy: in-flight requests are never cancelled, but every
// fetch category (per-slot search, detail batch, compare) carries a
// generation counter incremented at spawn time. A completion whose
// generation is stale is discarded at the single apply point, so the last
// request *issued* always wins regardless of response arrival order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::types::CompareRequest;
use crate::api::ApiClient;
use crate::config::Config;
use crate::protocol::{FetchEvent, SearchOutcome, UiUpdate, UserCommand};
use crate::selection::{PerSlot, Selection, SelectionStore, Slot};
use crate::sport::{Sport, StatsType};
use crate::view;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// A search query waiting out its debounce quiet period.
#[derive(Debug, Clone)]
struct PendingQuery {
    text: String,
    deadline: Instant,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state, owned by the orchestrator task.
pub struct AppState {
    pub config: Config,
    pub sport: Sport,
    api: Arc<ApiClient>,
    pub slots: SelectionStore,
    pub stats_type: StatsType,
    /// Last delivered result rows per slot; `SelectResult` indexes into this.
    search_results: PerSlot<Vec<crate::api::types::SearchResult>>,
    pending_search: PerSlot<Option<PendingQuery>>,
    search_generation: PerSlot<u64>,
    details_generation: u64,
    compare_generation: u64,
    compare_in_flight: bool,
    /// Sender side of the fetch-event channel; spawned tasks get a clone.
    fetch_tx: mpsc::Sender<FetchEvent>,
}

impl AppState {
    pub fn new(
        config: Config,
        sport: Sport,
        api: ApiClient,
        fetch_tx: mpsc::Sender<FetchEvent>,
    ) -> Self {
        AppState {
            config,
            sport,
            api: Arc::new(api),
            slots: SelectionStore::default(),
            stats_type: StatsType::default(),
            search_results: PerSlot::default(),
            pending_search: PerSlot::default(),
            search_generation: PerSlot::default(),
            details_generation: 0,
            compare_generation: 0,
            compare_in_flight: false,
            fetch_tx,
        }
    }

    fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.config.search.debounce_ms)
    }

    // -----------------------------------------------------------------------
    // User commands
    // -----------------------------------------------------------------------

    pub async fn handle_user_command(&mut self, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
        match cmd {
            UserCommand::SearchInput { slot, text } => {
                if let Some(update) = self.on_search_input(slot, &text) {
                    let _ = ui_tx.send(update).await;
                }
            }
            UserCommand::SelectResult { slot, index } => {
                self.select_result(slot, index, ui_tx).await;
            }
            UserCommand::ClearSlot(slot) => self.clear_slot(slot, ui_tx).await,
            UserCommand::Compare => self.trigger_compare(ui_tx).await,
            UserCommand::CycleStatsType => self.cycle_stats_type(ui_tx).await,
            UserCommand::Quit => {
                // Handled in the main loop.
            }
        }
    }

    /// Record a keystroke in a slot's search box.
    ///
    /// Short queries clear and hide the result list without touching the
    /// network; anything else (re)arms the slot's debounce timer. Returns
    /// the UI update to deliver, if any.
    fn on_search_input(&mut self, slot: Slot, text: &str) -> Option<UiUpdate> {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.config.search.min_query_len {
            *self.pending_search.get_mut(slot) = None;
            self.search_results.get_mut(slot).clear();
            return Some(UiUpdate::SearchResults {
                slot,
                outcome: SearchOutcome::Hidden,
            });
        }

        // Any new keystroke replaces the pending query and restarts the
        // quiet period.
        *self.pending_search.get_mut(slot) = Some(PendingQuery {
            text: trimmed.to_string(),
            deadline: Instant::now() + self.debounce_window(),
        });
        None
    }

    /// Earliest pending debounce deadline across both slots, for the
    /// event loop's sleep arm.
    pub fn next_search_deadline(&self) -> Option<Instant> {
        Slot::BOTH
            .iter()
            .filter_map(|&slot| self.pending_search.get(slot).as_ref())
            .map(|p| p.deadline)
            .min()
    }

    /// Fire every search whose quiet period has elapsed.
    pub fn fire_due_searches(&mut self) {
        let now = Instant::now();
        for slot in Slot::BOTH {
            let due = self
                .pending_search
                .get(slot)
                .as_ref()
                .is_some_and(|p| p.deadline <= now);
            if !due {
                continue;
            }
            if let Some(pending) = self.pending_search.get_mut(slot).take() {
                self.spawn_search(slot, pending.text);
            }
        }
    }

    fn spawn_search(&mut self, slot: Slot, query: String) {
        *self.search_generation.get_mut(slot) += 1;
        let generation = *self.search_generation.get(slot);

        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        debug!(slot = slot.label(), %query, generation, "issuing search");
        tokio::spawn(async move {
            let result = api.search(&query).await;
            let _ = tx
                .send(FetchEvent::Search {
                    slot,
                    generation,
                    result,
                })
                .await;
        });
    }

    async fn select_result(&mut self, slot: Slot, index: usize, ui_tx: &mpsc::Sender<UiUpdate>) {
        let Some(row) = self.search_results.get(slot).get(index) else {
            debug!(slot = slot.label(), index, "select index out of range, ignoring");
            return;
        };
        let selection = Selection::from(row);
        info!(
            slot = slot.label(),
            id = selection.id,
            name = %selection.name,
            "athlete selected"
        );

        self.slots.select(slot, selection.clone());
        // The slot's search UI resets on selection; bump the generation so a
        // still-in-flight search for the old query cannot reopen the list.
        self.search_results.get_mut(slot).clear();
        *self.pending_search.get_mut(slot) = None;
        *self.search_generation.get_mut(slot) += 1;

        let _ = ui_tx.send(UiUpdate::SlotSelected { slot, selection }).await;
        let complete = self.slots.is_complete();
        let _ = ui_tx.send(UiUpdate::CompareEnabled(complete)).await;

        if complete {
            self.trigger_details();
        }
    }

    async fn clear_slot(&mut self, slot: Slot, ui_tx: &mpsc::Sender<UiUpdate>) {
        if self.slots.get(slot).is_none() {
            return;
        }
        info!(slot = slot.label(), "slot cleared");
        self.slots.clear(slot);
        let _ = ui_tx.send(UiUpdate::SlotCleared(slot)).await;
        let _ = ui_tx.send(UiUpdate::CompareEnabled(false)).await;
    }

    async fn cycle_stats_type(&mut self, ui_tx: &mpsc::Sender<UiUpdate>) {
        if !self.sport.sends_stats_type() {
            return;
        }
        self.stats_type = self.stats_type.cycle();
        info!(stats_type = self.stats_type.label(), "stats type changed");
        let _ = ui_tx.send(UiUpdate::StatsTypeChanged(self.stats_type)).await;

        // The NBA detail panel depends on the selected slice; refresh it.
        if self.slots.is_complete() {
            self.trigger_details();
        }
    }

    // -----------------------------------------------------------------------
    // Detail fetching
    // -----------------------------------------------------------------------

    /// Fan out the per-athlete detail requests for both slots.
    ///
    /// Called on every transition into completeness and on stats-type
    /// changes while complete. The batch joins all-or-nothing.
    fn trigger_details(&mut self) {
        if !self.sport.has_details() {
            return;
        }
        let Some((a, b)) = self.slots.pair() else {
            return;
        };
        let (a_id, b_id) = (a.id, b.id);

        self.details_generation += 1;
        let generation = self.details_generation;
        let stats_type = self.stats_type;
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();

        info!(a_id, b_id, generation, "fetching athlete details");
        tokio::spawn(async move {
            let joined = tokio::try_join!(
                api.athlete_details(a_id, stats_type),
                api.athlete_details(b_id, stats_type)
            );
            let result = match joined {
                Ok((Some(a), Some(b))) => Ok((a, b)),
                // Unreachable for domains with details; nothing to render.
                Ok(_) => return,
                Err(e) => Err(e),
            };
            let _ = tx.send(FetchEvent::Details { generation, result }).await;
        });
    }

    // -----------------------------------------------------------------------
    // Compare
    // -----------------------------------------------------------------------

    async fn trigger_compare(&mut self, ui_tx: &mpsc::Sender<UiUpdate>) {
        if self.compare_in_flight {
            debug!("compare already in flight, ignoring trigger");
            return;
        }
        let Some((a, b)) = self.slots.pair() else {
            debug!("compare triggered while incomplete, ignoring");
            return;
        };

        let request = CompareRequest::new(
            a.id,
            b.id,
            self.sport.sends_stats_type().then_some(self.stats_type),
        );

        self.compare_in_flight = true;
        self.compare_generation += 1;
        let generation = self.compare_generation;
        let _ = ui_tx.send(UiUpdate::CompareStarted).await;

        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        info!(a_id = request.a_id, b_id = request.b_id, generation, "comparison requested");
        tokio::spawn(async move {
            let result = api.compare(&request).await;
            let _ = tx.send(FetchEvent::Compare { generation, result }).await;
        });
    }

    // -----------------------------------------------------------------------
    // Fetch completions
    // -----------------------------------------------------------------------

    pub async fn handle_fetch_event(&mut self, event: FetchEvent, ui_tx: &mpsc::Sender<UiUpdate>) {
        match event {
            FetchEvent::Search {
                slot,
                generation,
                result,
            } => {
                if generation != *self.search_generation.get(slot) {
                    debug!(
                        slot = slot.label(),
                        generation, "discarding stale search response"
                    );
                    return;
                }
                let outcome = match result {
                    Ok(rows) if rows.is_empty() => {
                        self.search_results.get_mut(slot).clear();
                        SearchOutcome::NoResults
                    }
                    Ok(rows) => {
                        *self.search_results.get_mut(slot) = rows.clone();
                        SearchOutcome::Results(rows)
                    }
                    Err(e) => {
                        warn!(slot = slot.label(), error = %e, "search failed");
                        self.search_results.get_mut(slot).clear();
                        SearchOutcome::Error("Search failed. Please try again.".to_string())
                    }
                };
                let _ = ui_tx.send(UiUpdate::SearchResults { slot, outcome }).await;
            }

            FetchEvent::Details { generation, result } => {
                if generation != self.details_generation {
                    debug!(generation, "discarding stale details batch");
                    return;
                }
                let Some((a, b)) = self.slots.pair() else {
                    debug!("details arrived after a slot was cleared, discarding");
                    return;
                };
                match result {
                    Ok((details_a, details_b)) => {
                        let details =
                            view::details_view((a, &details_a), (b, &details_b));
                        let _ = ui_tx.send(UiUpdate::DetailsReady(Box::new(details))).await;
                    }
                    Err(e) => {
                        // Prior detail content stays on screen; the failure is
                        // only visible in the log.
                        warn!(error = %e, "failed to fetch athlete details");
                    }
                }
            }

            FetchEvent::Compare { generation, result } => {
                if generation != self.compare_generation {
                    debug!(generation, "discarding stale compare response");
                    return;
                }
                self.compare_in_flight = false;
                match result {
                    Ok(compare) => {
                        let a_name = self
                            .slots
                            .get(Slot::A)
                            .map(|s| s.name.clone())
                            .or_else(|| compare.athlete1_name.clone())
                            .unwrap_or_else(|| "Athlete 1".to_string());
                        let b_name = self
                            .slots
                            .get(Slot::B)
                            .map(|s| s.name.clone())
                            .or_else(|| compare.athlete2_name.clone())
                            .unwrap_or_else(|| "Athlete 2".to_string());
                        let view = view::comparison_view(&compare, &a_name, &b_name);
                        let _ = ui_tx.send(UiUpdate::CompareFinished(Box::new(view))).await;
                    }
                    Err(e) => {
                        warn!(error = %e, "comparison failed");
                        let _ = ui_tx
                            .send(UiUpdate::CompareFailed(format!(
                                "Comparison failed. Please try again.\n\n{e}"
                            )))
                            .await;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Fallback sleep horizon when no debounce is pending. The arm is disabled
/// by its precondition in that case; this just bounds the timer value.
const IDLE_TICK: Duration = Duration::from_secs(3600);

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Completion events from spawned fetch tasks
///
/// plus a timer arm for the earliest pending search debounce. Pushes UI
/// updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("application event loop started");

    loop {
        let next_deadline = state.next_search_deadline();
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => state.handle_user_command(cmd, &ui_tx).await,
                    None => {
                        info!("command channel closed, shutting down");
                        break;
                    }
                }
            }

            event = fetch_rx.recv() => {
                match event {
                    Some(event) => state.handle_fetch_event(event, &ui_tx).await,
                    None => {
                        info!("fetch channel closed, shutting down");
                        break;
                    }
                }
            }

            _ = tokio::time::sleep_until(
                next_deadline.unwrap_or_else(|| Instant::now() + IDLE_TICK)
            ), if next_deadline.is_some() => {
                state.fire_due_searches();
            }
        }
    }

    info!("application event loop exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{AthleteDetails, CompareResult, SearchResult};
    use crate::api::ApiError;
    use crate::config::{ClientConfig, SearchConfig, ServerConfig};

    // -----------------------------------------------------------------------
    // Test helpers
    // -----------------------------------------------------------------------

    fn test_config(sport: Sport) -> Config {
        Config {
            server: ServerConfig {
                base_url: "http://127.0.0.1:9".to_string(),
            },
            client: ClientConfig {
                sport,
                request_timeout_secs: 1,
            },
            search: SearchConfig {
                debounce_ms: 300,
                min_query_len: 2,
            },
        }
    }

    struct Harness {
        state: AppState,
        ui_rx: mpsc::Receiver<UiUpdate>,
        ui_tx: mpsc::Sender<UiUpdate>,
        /// Kept alive so spawned fetch tasks can complete their sends.
        _fetch_rx: mpsc::Receiver<FetchEvent>,
    }

    fn harness(sport: Sport) -> Harness {
        let config = test_config(sport);
        let api = ApiClient::new(
            &config.server.base_url,
            sport,
            Duration::from_secs(1),
        )
        .unwrap();
        let (fetch_tx, fetch_rx) = mpsc::channel(32);
        let (ui_tx, ui_rx) = mpsc::channel(32);
        Harness {
            state: AppState::new(config, sport, api, fetch_tx),
            ui_rx,
            ui_tx,
            _fetch_rx: fetch_rx,
        }
    }

    fn row(id: u64, name: &str) -> SearchResult {
        SearchResult {
            id,
            name: name.to_string(),
            team: None,
            position: None,
            nickname: None,
            weight_class: None,
            headshot_url: None,
            height: None,
            weight: None,
        }
    }

    /// Deliver a fresh (current-generation) search result to a slot.
    async fn deliver_search(h: &mut Harness, slot: Slot, rows: Vec<SearchResult>) {
        let generation = *h.state.search_generation.get(slot);
        h.state
            .handle_fetch_event(
                FetchEvent::Search {
                    slot,
                    generation,
                    result: Ok(rows),
                },
                &h.ui_tx,
            )
            .await;
    }

    /// Select an athlete into a slot by pushing rows and activating index 0.
    async fn select(h: &mut Harness, slot: Slot, id: u64, name: &str) {
        deliver_search(h, slot, vec![row(id, name)]).await;
        h.state.select_result(slot, 0, &h.ui_tx).await;
    }

    fn drain(ui_rx: &mut mpsc::Receiver<UiUpdate>) -> Vec<UiUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = ui_rx.try_recv() {
            updates.push(update);
        }
        updates
    }

    // -----------------------------------------------------------------------
    // Debounce
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn short_query_hides_results_without_arming_debounce() {
        let mut h = harness(Sport::Nba);
        let update = h.state.on_search_input(Slot::A, "j");
        assert!(matches!(
            update,
            Some(UiUpdate::SearchResults {
                slot: Slot::A,
                outcome: SearchOutcome::Hidden
            })
        ));
        assert!(h.state.next_search_deadline().is_none());
    }

    #[tokio::test]
    async fn whitespace_only_query_is_short() {
        let mut h = harness(Sport::Nba);
        let update = h.state.on_search_input(Slot::A, "  a  ");
        assert!(update.is_some(), "one trimmed char is below min_query_len");
        assert!(h.state.next_search_deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_collapse_to_one_pending_query() {
        let mut h = harness(Sport::Nba);

        h.state.on_search_input(Slot::A, "jo");
        let first_deadline = h.state.next_search_deadline().unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;
        h.state.on_search_input(Slot::A, "jon");
        let second_deadline = h.state.next_search_deadline().unwrap();

        assert!(second_deadline > first_deadline, "keystroke restarts the timer");
        assert_eq!(
            second_deadline - Instant::now(),
            Duration::from_millis(300)
        );

        // Before the quiet period elapses nothing fires.
        h.state.fire_due_searches();
        assert!(h.state.next_search_deadline().is_some());

        // After it elapses the query fires and the pending slot empties.
        tokio::time::advance(Duration::from_millis(301)).await;
        h.state.fire_due_searches();
        assert!(h.state.next_search_deadline().is_none());
        assert_eq!(*h.state.search_generation.get(Slot::A), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slots_debounce_independently() {
        let mut h = harness(Sport::Nba);
        h.state.on_search_input(Slot::A, "le");
        tokio::time::advance(Duration::from_millis(200)).await;
        h.state.on_search_input(Slot::B, "ke");

        // A's deadline comes first.
        let deadline = h.state.next_search_deadline().unwrap();
        assert_eq!(deadline - Instant::now(), Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(101)).await;
        h.state.fire_due_searches();
        assert_eq!(*h.state.search_generation.get(Slot::A), 1);
        assert_eq!(*h.state.search_generation.get(Slot::B), 0);
        assert!(h.state.next_search_deadline().is_some(), "B still pending");
    }

    // -----------------------------------------------------------------------
    // Search result application and staleness
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn search_results_apply_for_current_generation() {
        let mut h = harness(Sport::Nba);
        deliver_search(&mut h, Slot::A, vec![row(1, "LeBron James")]).await;

        let updates = drain(&mut h.ui_rx);
        assert_eq!(updates.len(), 1);
        assert!(matches!(
            &updates[0],
            UiUpdate::SearchResults {
                slot: Slot::A,
                outcome: SearchOutcome::Results(rows)
            } if rows.len() == 1
        ));
    }

    #[tokio::test]
    async fn stale_search_response_is_discarded() {
        let mut h = harness(Sport::Nba);
        *h.state.search_generation.get_mut(Slot::A) = 5;

        h.state
            .handle_fetch_event(
                FetchEvent::Search {
                    slot: Slot::A,
                    generation: 4,
                    result: Ok(vec![row(1, "Stale")]),
                },
                &h.ui_tx,
            )
            .await;

        assert!(drain(&mut h.ui_rx).is_empty());
        assert!(h.state.search_results.get(Slot::A).is_empty());
    }

    #[tokio::test]
    async fn empty_result_set_is_distinct_from_error() {
        let mut h = harness(Sport::Nba);
        deliver_search(&mut h, Slot::B, vec![]).await;

        let updates = drain(&mut h.ui_rx);
        assert!(matches!(
            &updates[0],
            UiUpdate::SearchResults {
                slot: Slot::B,
                outcome: SearchOutcome::NoResults
            }
        ));

        let generation = *h.state.search_generation.get(Slot::B);
        h.state
            .handle_fetch_event(
                FetchEvent::Search {
                    slot: Slot::B,
                    generation,
                    result: Err(ApiError::Http {
                        url: "http://x/search".into(),
                        status: reqwest::StatusCode::BAD_GATEWAY,
                        body: String::new(),
                    }),
                },
                &h.ui_tx,
            )
            .await;

        let updates = drain(&mut h.ui_rx);
        assert!(matches!(
            &updates[0],
            UiUpdate::SearchResults {
                outcome: SearchOutcome::Error(msg),
                ..
            } if msg == "Search failed. Please try again."
        ));
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn selecting_clears_slot_search_state_and_bumps_generation() {
        let mut h = harness(Sport::General);
        h.state.on_search_input(Slot::A, "jo");
        deliver_search(&mut h, Slot::A, vec![row(1, "Jordan")]).await;

        let generation_before = *h.state.search_generation.get(Slot::A);
        h.state.select_result(Slot::A, 0, &h.ui_tx).await;

        assert!(h.state.search_results.get(Slot::A).is_empty());
        assert!(h.state.pending_search.get(Slot::A).is_none());
        assert_eq!(
            *h.state.search_generation.get(Slot::A),
            generation_before + 1,
            "in-flight search for the old query must become stale"
        );

        let updates = drain(&mut h.ui_rx);
        // Results, SlotSelected, CompareEnabled(false)
        assert!(updates
            .iter()
            .any(|u| matches!(u, UiUpdate::SlotSelected { slot: Slot::A, selection } if selection.id == 1)));
        assert!(updates
            .iter()
            .any(|u| matches!(u, UiUpdate::CompareEnabled(false))));
    }

    #[tokio::test]
    async fn select_out_of_range_index_is_ignored() {
        let mut h = harness(Sport::General);
        h.state.select_result(Slot::A, 3, &h.ui_tx).await;
        assert!(drain(&mut h.ui_rx).is_empty());
        assert!(h.state.slots.get(Slot::A).is_none());
    }

    #[tokio::test]
    async fn completing_both_slots_enables_compare() {
        let mut h = harness(Sport::General);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;

        let updates = drain(&mut h.ui_rx);
        assert!(updates
            .iter()
            .any(|u| matches!(u, UiUpdate::CompareEnabled(true))));
    }

    #[tokio::test]
    async fn clearing_a_slot_disables_compare() {
        let mut h = harness(Sport::General);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        drain(&mut h.ui_rx);

        h.state.clear_slot(Slot::B, &h.ui_tx).await;
        let updates = drain(&mut h.ui_rx);
        assert!(matches!(updates[0], UiUpdate::SlotCleared(Slot::B)));
        assert!(matches!(updates[1], UiUpdate::CompareEnabled(false)));
    }

    #[tokio::test]
    async fn clearing_an_empty_slot_is_a_no_op() {
        let mut h = harness(Sport::General);
        h.state.clear_slot(Slot::A, &h.ui_tx).await;
        assert!(drain(&mut h.ui_rx).is_empty());
    }

    // -----------------------------------------------------------------------
    // Details
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn completing_slots_triggers_details_for_nba() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        assert_eq!(h.state.details_generation, 0);
        select(&mut h, Slot::B, 2, "Second").await;
        assert_eq!(h.state.details_generation, 1);
    }

    #[tokio::test]
    async fn general_domain_never_triggers_details() {
        let mut h = harness(Sport::General);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        assert_eq!(h.state.details_generation, 0);
    }

    #[tokio::test]
    async fn stale_details_batch_is_discarded() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        drain(&mut h.ui_rx);

        h.state
            .handle_fetch_event(
                FetchEvent::Details {
                    generation: 0,
                    result: Ok((
                        AthleteDetails::Nba {
                            seasons: vec![],
                            accolades: Default::default(),
                        },
                        AthleteDetails::Nba {
                            seasons: vec![],
                            accolades: Default::default(),
                        },
                    )),
                },
                &h.ui_tx,
            )
            .await;
        assert!(drain(&mut h.ui_rx).is_empty());
    }

    #[tokio::test]
    async fn current_details_batch_renders() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        drain(&mut h.ui_rx);

        h.state
            .handle_fetch_event(
                FetchEvent::Details {
                    generation: h.state.details_generation,
                    result: Ok((
                        AthleteDetails::Nba {
                            seasons: vec![],
                            accolades: Default::default(),
                        },
                        AthleteDetails::Nba {
                            seasons: vec![],
                            accolades: Default::default(),
                        },
                    )),
                },
                &h.ui_tx,
            )
            .await;

        let updates = drain(&mut h.ui_rx);
        assert!(matches!(updates[0], UiUpdate::DetailsReady(_)));
    }

    #[tokio::test]
    async fn failed_details_batch_changes_nothing() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        drain(&mut h.ui_rx);

        h.state
            .handle_fetch_event(
                FetchEvent::Details {
                    generation: h.state.details_generation,
                    result: Err(ApiError::Http {
                        url: "http://x".into(),
                        status: reqwest::StatusCode::NOT_FOUND,
                        body: String::new(),
                    }),
                },
                &h.ui_tx,
            )
            .await;
        assert!(drain(&mut h.ui_rx).is_empty(), "failure must not reach the UI");
    }

    #[tokio::test]
    async fn stats_type_cycle_refetches_details_when_complete() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        let generation = h.state.details_generation;

        h.state.cycle_stats_type(&h.ui_tx).await;
        assert_eq!(h.state.stats_type, StatsType::Playoffs);
        assert_eq!(h.state.details_generation, generation + 1);
    }

    #[tokio::test]
    async fn stats_type_is_fixed_for_mma() {
        let mut h = harness(Sport::Mma);
        h.state.cycle_stats_type(&h.ui_tx).await;
        assert_eq!(h.state.stats_type, StatsType::Regular);
        assert!(drain(&mut h.ui_rx).is_empty());
    }

    // -----------------------------------------------------------------------
    // Compare lifecycle
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn compare_is_noop_while_incomplete() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "Only One").await;
        drain(&mut h.ui_rx);

        h.state.trigger_compare(&h.ui_tx).await;
        assert!(drain(&mut h.ui_rx).is_empty());
        assert!(!h.state.compare_in_flight);
    }

    #[tokio::test]
    async fn compare_enters_loading_and_is_not_retriggerable() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        drain(&mut h.ui_rx);

        h.state.trigger_compare(&h.ui_tx).await;
        assert!(h.state.compare_in_flight);
        assert_eq!(h.state.compare_generation, 1);
        let updates = drain(&mut h.ui_rx);
        assert!(matches!(updates[0], UiUpdate::CompareStarted));

        // The trigger is disabled while loading.
        h.state.trigger_compare(&h.ui_tx).await;
        assert_eq!(h.state.compare_generation, 1);
        assert!(drain(&mut h.ui_rx).is_empty());
    }

    #[tokio::test]
    async fn compare_success_renders_with_fallbacks_and_reenables() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        h.state.trigger_compare(&h.ui_tx).await;
        drain(&mut h.ui_rx);

        h.state
            .handle_fetch_event(
                FetchEvent::Compare {
                    generation: 1,
                    result: Ok(CompareResult::default()),
                },
                &h.ui_tx,
            )
            .await;

        assert!(!h.state.compare_in_flight);
        let updates = drain(&mut h.ui_rx);
        match &updates[0] {
            UiUpdate::CompareFinished(view) => {
                assert_eq!(view.winner, "Tie");
                assert_eq!(view.a_heading, "First Strengths");
                assert_eq!(view.analysis, "No detailed analysis available");
            }
            other => panic!("expected CompareFinished, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn compare_failure_raises_alert_and_reenables() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        h.state.trigger_compare(&h.ui_tx).await;
        drain(&mut h.ui_rx);

        h.state
            .handle_fetch_event(
                FetchEvent::Compare {
                    generation: 1,
                    result: Err(ApiError::Http {
                        url: "http://x/compare".into(),
                        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                        body: "model overloaded".into(),
                    }),
                },
                &h.ui_tx,
            )
            .await;

        assert!(!h.state.compare_in_flight, "finally semantics: re-enabled");
        let updates = drain(&mut h.ui_rx);
        match &updates[0] {
            UiUpdate::CompareFailed(message) => {
                assert!(message.starts_with("Comparison failed. Please try again."));
                assert!(message.contains("500"));
                assert!(message.contains("model overloaded"));
            }
            other => panic!("expected CompareFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stale_compare_response_is_discarded() {
        let mut h = harness(Sport::Nba);
        select(&mut h, Slot::A, 1, "First").await;
        select(&mut h, Slot::B, 2, "Second").await;
        h.state.trigger_compare(&h.ui_tx).await;
        h.state.compare_generation = 2; // a newer compare superseded it
        drain(&mut h.ui_rx);

        h.state
            .handle_fetch_event(
                FetchEvent::Compare {
                    generation: 1,
                    result: Ok(CompareResult::default()),
                },
                &h.ui_tx,
            )
            .await;
        assert!(drain(&mut h.ui_rx).is_empty());
        assert!(h.state.compare_in_flight, "newer compare still loading");
    }

    #[tokio::test]
    async fn mma_compare_body_omits_stats_type() {
        let h = harness(Sport::Mma);
        let request = CompareRequest::new(
            1,
            2,
            h.state.sport.sends_stats_type().then_some(h.state.stats_type),
        );
        assert_eq!(request.stats_type, None);

        let h = harness(Sport::Nba);
        let request = CompareRequest::new(
            1,
            2,
            h.state.sport.sends_stats_type().then_some(h.state.stats_type),
        );
        assert_eq!(request.stats_type, Some(2));
    }

    // -----------------------------------------------------------------------
    // Event loop wiring
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn run_exits_on_quit_command() {
        let h = harness(Sport::General);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (_keep_fetch_tx, fetch_rx) = mpsc::channel(8);

        let handle = tokio::spawn(run(cmd_rx, fetch_rx, h.ui_tx.clone(), h.state));
        cmd_tx.send(UserCommand::Quit).await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop should exit promptly")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn run_exits_when_command_channel_closes() {
        let h = harness(Sport::General);
        let (cmd_tx, cmd_rx) = mpsc::channel::<UserCommand>(8);
        let (_keep_fetch_tx, fetch_rx) = mpsc::channel(8);

        let handle = tokio::spawn(run(cmd_rx, fetch_rx, h.ui_tx.clone(), h.state));
        drop(cmd_tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop should exit promptly")
            .unwrap()
            .unwrap();
    }
}
