//! Dashboard use case: drives the view state machine against the gateway.
//!
//! Transitions on [`DashboardState`] return the fetches they imply; this use
//! case spawns each fetch as its own task and funnels the results through a
//! channel. Outcomes are applied strictly in completion order - an in-flight
//! fetch is never cancelled when a newer one is issued, so the last fetch to
//! complete wins: two rapid page changes can leave the slower, older page on
//! screen.

use datadeck_core::chart::{Aggregation, ChartKind};
use datadeck_core::gateway::DataGateway;
use datadeck_core::view::{DashboardState, FetchOutcome, FetchRequest, ViewMode};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Orchestrates dataset selection, view mode, pagination, and chart
/// configuration, issuing backend fetches as the state machine demands.
pub struct DashboardUseCase {
    gateway: Arc<dyn DataGateway>,
    page_size: u32,
    state: DashboardState,
    in_flight: usize,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl DashboardUseCase {
    pub fn new(gateway: Arc<dyn DataGateway>, page_size: u32) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            page_size,
            state: DashboardState::new(),
            in_flight: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Read access for the presentation layer.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// True while any fetch is in flight.
    pub fn busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Clears the visible error message.
    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    // ============================================================================
    // Transitions (each spawns whatever fetches the state machine implies)
    // ============================================================================

    /// Fetches the dataset directory, setting the loading flag until the
    /// result is applied.
    pub fn refresh_directory(&mut self) {
        let request = self.state.start_directory_fetch();
        self.spawn(request);
    }

    pub fn select_dataset(&mut self, dataset_id: impl Into<String>) {
        let requests = self.state.select_dataset(dataset_id);
        self.spawn_all(requests);
    }

    pub fn set_page(&mut self, page: u32) {
        if let Some(request) = self.state.set_page(page) {
            self.spawn(request);
        }
    }

    /// Moves to the next page, bounded by the last fetched total.
    pub fn next_page(&mut self) {
        let total = self
            .state
            .table
            .as_ref()
            .map(|t| t.total_pages.max(1))
            .unwrap_or(1);
        let current = self.state.page;
        if current < total {
            self.set_page(current + 1);
        }
    }

    pub fn previous_page(&mut self) {
        let current = self.state.page;
        if current > 1 {
            self.set_page(current - 1);
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        let requests = self.state.set_mode(mode);
        self.spawn_all(requests);
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.state.set_chart_kind(kind);
    }

    pub fn set_chart_column(&mut self, column: Option<String>) {
        if let Some(request) = self.state.set_chart_column(column) {
            self.spawn(request);
        }
    }

    pub fn set_chart_aggregation(&mut self, aggregation: Aggregation) {
        if let Some(request) = self.state.set_chart_aggregation(aggregation) {
            self.spawn(request);
        }
    }

    /// Deletes a dataset. The caller is responsible for the destructive-action
    /// confirmation; this method issues the call unconditionally.
    pub fn delete_dataset(&mut self, dataset_id: impl Into<String>) {
        let dataset_id = dataset_id.into();
        self.in_flight += 1;
        let gateway = self.gateway.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = gateway.delete_dataset(&dataset_id).await;
            let _ = tx.send(FetchOutcome::Delete { dataset_id, result });
        });
    }

    // ============================================================================
    // Outcome pump
    // ============================================================================

    /// Waits for the next completed fetch and applies it, together with any
    /// follow-up fetches the new state implies. Returns `false` only if the
    /// channel closed, which cannot happen while `self` is alive.
    pub async fn pump_one(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    /// Applies every already-completed fetch without waiting.
    pub fn pump_ready(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
        }
    }

    /// Waits until no fetch is in flight, applying outcomes as they arrive.
    /// Used by one-shot CLI commands and tests; the TUI pumps instead.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            if !self.pump_one().await {
                break;
            }
        }
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let follow_ups = self.state.apply_outcome(outcome);
        self.spawn_all(follow_ups);
    }

    fn spawn_all(&mut self, requests: Vec<FetchRequest>) {
        for request in requests {
            self.spawn(request);
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        self.in_flight += 1;
        let gateway = self.gateway.clone();
        let tx = self.outcome_tx.clone();
        let page_size = self.page_size;
        tokio::spawn(async move {
            let outcome = match request {
                FetchRequest::Directory => FetchOutcome::Directory(gateway.list_datasets().await),
                FetchRequest::TablePage { dataset_id, page } => FetchOutcome::TablePage(
                    gateway.table_page(&dataset_id, page, page_size).await,
                ),
                FetchRequest::ChartSummary {
                    dataset_id,
                    column,
                    aggregation,
                } => FetchOutcome::ChartSummary(
                    gateway.chart_summary(&dataset_id, &column, aggregation).await,
                ),
            };
            // Receiver dropped means the dashboard is gone; nothing to do.
            let _ = tx.send(outcome);
        });
    }
}
