//! Trait seams between the domain and the outside world.
//!
//! `DataGateway` is the sole network egress: every backend call used by the
//! use cases goes through it, and the HTTP implementation attaches the bearer
//! credential to each request. `CredentialStore` is the durable key-value
//! storage holding the bearer token and the serialized identity; both entries
//! are always written and cleared together.

use crate::chart::Aggregation;
use crate::dataset::{DatasetSummary, Row, TablePage};
use crate::error::Result;
use crate::identity::Identity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Callback invoked while an upload body streams out: (bytes sent, total).
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// The backend HTTP contract, one method per endpoint.
///
/// Implementations attach the current bearer credential (if any) to every
/// request. The gateway is not a retry layer: no retries, no backoff, no
/// timeout policy beyond the transport default.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Sets or clears the bearer credential attached to subsequent requests.
    async fn set_bearer(&self, token: Option<String>);

    /// `POST /auth/signup` - creates an account.
    async fn signup(&self, email: &str, password: &str, role: &str) -> Result<Identity>;

    /// `POST /auth/token` - exchanges credentials for a bearer token.
    async fn exchange_token(&self, email: &str, password: &str) -> Result<String>;

    /// `GET /auth/users/me` - fetches the caller's own profile.
    async fn current_user(&self) -> Result<Identity>;

    /// `GET /data/datasets` - lists datasets owned by the current identity.
    async fn list_datasets(&self) -> Result<Vec<DatasetSummary>>;

    /// `GET /data/{id}` - fetches one page of table rows.
    async fn table_page(&self, dataset_id: &str, page: u32, page_size: u32) -> Result<TablePage>;

    /// `GET /data/{id}/summary` - fetches aggregated chart rows.
    async fn chart_summary(
        &self,
        dataset_id: &str,
        column: &str,
        aggregation: Aggregation,
    ) -> Result<Vec<Row>>;

    /// `DELETE /data/{id}` - deletes a dataset.
    async fn delete_dataset(&self, dataset_id: &str) -> Result<()>;

    /// `POST /upload/` - uploads a tabular file as multipart form data,
    /// reporting progress through `progress` as the body streams out.
    async fn upload(
        &self,
        filename: &str,
        mime: &str,
        bytes: Vec<u8>,
        progress: Option<ProgressFn>,
    ) -> Result<DatasetSummary>;
}

/// The persisted credential pair: bearer token plus serialized identity.
///
/// The token is an opaque bearer string, owned exclusively by the session
/// store; it is never inspected, only attached to outgoing requests and
/// persisted or removed together with the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub identity: Identity,
}

/// Durable storage for the credential pair.
///
/// An absent entry means logged out. Save and clear act on both values
/// atomically; there is never a state with a token but no identity.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the persisted credentials, or `None` when logged out.
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Persists the credential pair, replacing any previous one.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Removes the persisted credentials. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<()>;
}
