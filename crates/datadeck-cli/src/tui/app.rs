//! Dashboard key handling and the delete confirmation modal.

use crossterm::event::KeyCode;
use datadeck_application::DashboardUseCase;
use datadeck_core::chart::{Aggregation, ChartKind};
use datadeck_core::view::ViewMode;
use strum::IntoEnumIterator;

/// A delete awaiting its y/n confirmation.
pub struct PendingDelete {
    pub id: String,
    pub filename: String,
}

pub struct DashboardApp {
    dashboard: DashboardUseCase,
    confirm_delete: Option<PendingDelete>,
    should_quit: bool,
}

impl DashboardApp {
    pub fn new(dashboard: DashboardUseCase) -> Self {
        Self {
            dashboard,
            confirm_delete: None,
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> &DashboardUseCase {
        &self.dashboard
    }

    pub fn confirm_delete(&self) -> Option<&PendingDelete> {
        self.confirm_delete.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies every fetch that completed since the last frame.
    pub fn pump(&mut self) {
        self.dashboard.pump_ready();
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.confirm_delete.is_some() {
            self.handle_confirm_key(code);
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.dashboard.refresh_directory(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Left => self.dashboard.previous_page(),
            KeyCode::Right => self.dashboard.next_page(),
            KeyCode::Tab => self.toggle_mode(),
            KeyCode::Char('k') => self.cycle_chart_kind(),
            KeyCode::Char('a') => self.cycle_aggregation(),
            KeyCode::Char('c') => self.cycle_chart_column(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('e') => self.dashboard.dismiss_error(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(pending) = self.confirm_delete.take() {
                    self.dashboard.delete_dataset(pending.id);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let state = self.dashboard.state();
        if state.datasets.is_empty() {
            return;
        }
        let current = state
            .selected
            .as_deref()
            .and_then(|id| state.datasets.iter().position(|d| d.id == id))
            .unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, state.datasets.len() as i64 - 1) as usize;
        if next as i64 != current {
            let id = state.datasets[next].id.clone();
            self.dashboard.select_dataset(id);
        }
    }

    fn toggle_mode(&mut self) {
        let mode = match self.dashboard.state().mode {
            ViewMode::Table => ViewMode::Chart,
            ViewMode::Chart => ViewMode::Table,
        };
        self.dashboard.set_view_mode(mode);
    }

    fn cycle_chart_kind(&mut self) {
        let current = self.dashboard.state().chart.kind;
        let kinds: Vec<ChartKind> = ChartKind::iter().collect();
        let index = kinds.iter().position(|k| *k == current).unwrap_or(0);
        self.dashboard.set_chart_kind(kinds[(index + 1) % kinds.len()]);
    }

    fn cycle_aggregation(&mut self) {
        let current = self.dashboard.state().chart.aggregation;
        let aggregations: Vec<Aggregation> = Aggregation::iter().collect();
        let index = aggregations.iter().position(|a| *a == current).unwrap_or(0);
        self.dashboard
            .set_chart_aggregation(aggregations[(index + 1) % aggregations.len()]);
    }

    /// Steps the grouping column through: none, then each column of the
    /// current table page, then back to none.
    fn cycle_chart_column(&mut self) {
        let state = self.dashboard.state();
        let columns = match &state.table {
            Some(table) => table.columns(),
            None => return,
        };
        if columns.is_empty() {
            return;
        }
        let next = match state.chart.column() {
            None => Some(columns[0].clone()),
            Some(current) => match columns.iter().position(|c| c == current) {
                Some(index) if index + 1 < columns.len() => Some(columns[index + 1].clone()),
                _ => None,
            },
        };
        self.dashboard.set_chart_column(next);
    }

    fn request_delete(&mut self) {
        let state = self.dashboard.state();
        if let Some(summary) = state.selected_summary() {
            self.confirm_delete = Some(PendingDelete {
                id: summary.id.clone(),
                filename: summary.filename.clone(),
            });
        }
    }
}
