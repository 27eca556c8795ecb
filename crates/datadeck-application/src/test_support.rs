//! Hand-rolled test doubles for the gateway and credential store.

use async_trait::async_trait;
use datadeck_core::chart::Aggregation;
use datadeck_core::dataset::{DatasetSummary, Row, TablePage};
use datadeck_core::error::{DeckError, Result};
use datadeck_core::gateway::{
    CredentialStore, DataGateway, ProgressFn, StoredCredentials,
};
use datadeck_core::identity::Identity;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// In-memory gateway with scriptable responses and per-page delays so tests
/// can control fetch completion order.
pub struct MockGateway {
    bearer: RwLock<Option<String>>,
    identity: Identity,
    token_error: Option<DeckError>,
    me_error: Option<DeckError>,
    datasets: Vec<DatasetSummary>,
    list_error: Option<DeckError>,
    pages: HashMap<u32, TablePage>,
    page_delays: HashMap<u32, Duration>,
    chart_rows: Vec<Row>,
    chart_error: Option<DeckError>,
    delete_error: Option<DeckError>,
    signup_count: AtomicUsize,
    token_count: AtomicUsize,
    me_count: AtomicUsize,
    list_count: AtomicUsize,
    page_count: AtomicUsize,
    chart_count: AtomicUsize,
    delete_count: AtomicUsize,
    upload_count: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            bearer: RwLock::new(None),
            identity: Identity {
                email: "ada@example.com".to_string(),
                role: "Member".to_string(),
            },
            token_error: None,
            me_error: None,
            datasets: Vec::new(),
            list_error: None,
            pages: HashMap::new(),
            page_delays: HashMap::new(),
            chart_rows: Vec::new(),
            chart_error: None,
            delete_error: None,
            signup_count: AtomicUsize::new(0),
            token_count: AtomicUsize::new(0),
            me_count: AtomicUsize::new(0),
            list_count: AtomicUsize::new(0),
            page_count: AtomicUsize::new(0),
            chart_count: AtomicUsize::new(0),
            delete_count: AtomicUsize::new(0),
            upload_count: AtomicUsize::new(0),
        }
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn failing_token(mut self, err: DeckError) -> Self {
        self.token_error = Some(err);
        self
    }

    pub fn failing_me(mut self, err: DeckError) -> Self {
        self.me_error = Some(err);
        self
    }

    pub fn with_datasets(mut self, datasets: Vec<DatasetSummary>) -> Self {
        self.datasets = datasets;
        self
    }

    pub fn with_page(mut self, page: u32, data: TablePage) -> Self {
        self.pages.insert(page, data);
        self
    }

    /// Delays the table fetch for `page`, letting tests script which of two
    /// in-flight fetches resolves last.
    pub fn with_page_delay(mut self, page: u32, delay: Duration) -> Self {
        self.page_delays.insert(page, delay);
        self
    }

    pub fn with_chart_rows(mut self, rows: Vec<Row>) -> Self {
        self.chart_rows = rows;
        self
    }

    pub fn failing_delete(mut self, err: DeckError) -> Self {
        self.delete_error = Some(err);
        self
    }

    pub async fn bearer(&self) -> Option<String> {
        self.bearer.read().await.clone()
    }

    pub fn signup_calls(&self) -> usize {
        self.signup_count.load(Ordering::SeqCst)
    }

    pub fn token_calls(&self) -> usize {
        self.token_count.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_count.load(Ordering::SeqCst)
    }

    pub fn chart_calls(&self) -> usize {
        self.chart_count.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_count.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.signup_calls()
            + self.token_calls()
            + self.me_count.load(Ordering::SeqCst)
            + self.list_calls()
            + self.page_calls()
            + self.chart_calls()
            + self.delete_count.load(Ordering::SeqCst)
            + self.upload_calls()
    }
}

#[async_trait]
impl DataGateway for MockGateway {
    async fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write().await = token;
    }

    async fn signup(&self, _email: &str, _password: &str, _role: &str) -> Result<Identity> {
        self.signup_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.identity.clone())
    }

    async fn exchange_token(&self, _email: &str, _password: &str) -> Result<String> {
        self.token_count.fetch_add(1, Ordering::SeqCst);
        match &self.token_error {
            Some(err) => Err(err.clone()),
            None => Ok("token-1".to_string()),
        }
    }

    async fn current_user(&self) -> Result<Identity> {
        self.me_count.fetch_add(1, Ordering::SeqCst);
        match &self.me_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.identity.clone()),
        }
    }

    async fn list_datasets(&self) -> Result<Vec<DatasetSummary>> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        match &self.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.datasets.clone()),
        }
    }

    async fn table_page(&self, _dataset_id: &str, page: u32, _page_size: u32) -> Result<TablePage> {
        self.page_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.page_delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        match self.pages.get(&page) {
            Some(data) => Ok(data.clone()),
            None => Ok(TablePage {
                rows: Vec::new(),
                page,
                total_pages: 1,
            }),
        }
    }

    async fn chart_summary(
        &self,
        _dataset_id: &str,
        _column: &str,
        _aggregation: Aggregation,
    ) -> Result<Vec<Row>> {
        self.chart_count.fetch_add(1, Ordering::SeqCst);
        match &self.chart_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.chart_rows.clone()),
        }
    }

    async fn delete_dataset(&self, _dataset_id: &str) -> Result<()> {
        self.delete_count.fetch_add(1, Ordering::SeqCst);
        match &self.delete_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn upload(
        &self,
        filename: &str,
        _mime: &str,
        bytes: Vec<u8>,
        progress: Option<ProgressFn>,
    ) -> Result<DatasetSummary> {
        self.upload_count.fetch_add(1, Ordering::SeqCst);
        let total = bytes.len() as u64;
        if let Some(callback) = progress {
            callback(total, total);
        }
        Ok(DatasetSummary {
            id: "uploaded-1".to_string(),
            filename: filename.to_string(),
            upload_date: "2026-01-05T10:00:00Z".to_string(),
            row_count: 1,
            column_count: 1,
            file_size: total,
        })
    }
}

/// Credential store backed by a mutex-guarded option.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<StoredCredentials>>,
    save_error: Option<DeckError>,
}

impl MemoryCredentialStore {
    pub fn failing_save(mut self, err: DeckError) -> Self {
        self.save_error = Some(err);
        self
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        if let Some(err) = &self.save_error {
            return Err(err.clone());
        }
        *self.slot.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
