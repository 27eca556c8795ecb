//! HttpGateway - REST implementation of the backend contract.
//!
//! A single configuration point for all HTTP traffic: it centralizes the base
//! address and attaches the current bearer credential (if present) to every
//! outgoing request. It performs no retries, no backoff, and no timeout
//! policy beyond the transport default.

use async_trait::async_trait;
use datadeck_core::chart::Aggregation;
use datadeck_core::dataset::{DatasetSummary, Row, TablePage};
use datadeck_core::error::{DeckError, Result};
use datadeck_core::gateway::{DataGateway, ProgressFn};
use datadeck_core::identity::Identity;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tokio::sync::RwLock;

/// Upload bodies stream out in chunks of this size so progress can be
/// reported while the transfer runs.
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// HTTP gateway to the DataDeck backend.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl HttpGateway {
    /// Creates a gateway for the given base URL, without a credential.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            bearer: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the current bearer credential, read at call time.
    async fn with_bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        on_error: fn(String) -> DeckError,
    ) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|err| on_error(format!("request failed: {err}")))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body).unwrap_or_else(|| format!("server returned {status}"));
        tracing::warn!(%status, detail, "backend request failed");
        Err(on_error(detail))
    }

    async fn json<T: serde::de::DeserializeOwned>(
        response: Response,
        on_error: fn(String) -> DeckError,
    ) -> Result<T> {
        response
            .json()
            .await
            .map_err(|err| on_error(format!("invalid response body: {err}")))
    }
}

#[async_trait]
impl DataGateway for HttpGateway {
    async fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write().await = token;
    }

    async fn signup(&self, email: &str, password: &str, role: &str) -> Result<Identity> {
        let builder = self.client.post(self.url("/auth/signup")).json(
            &serde_json::json!({ "email": email, "password": password, "role": role }),
        );
        let response = self.send(builder, DeckError::Auth).await?;
        Self::json(response, DeckError::Auth).await
    }

    async fn exchange_token(&self, email: &str, password: &str) -> Result<String> {
        // OAuth2 password flow: form-encoded username/password.
        let builder = self
            .client
            .post(self.url("/auth/token"))
            .form(&[("username", email), ("password", password)]);
        let response = self.send(builder, DeckError::Auth).await?;
        let token: TokenResponse = Self::json(response, DeckError::Auth).await?;
        Ok(token.access_token)
    }

    async fn current_user(&self) -> Result<Identity> {
        let builder = self
            .with_bearer(self.client.get(self.url("/auth/users/me")))
            .await;
        let response = self.send(builder, DeckError::Auth).await?;
        Self::json(response, DeckError::Auth).await
    }

    async fn list_datasets(&self) -> Result<Vec<DatasetSummary>> {
        let builder = self
            .with_bearer(self.client.get(self.url("/data/datasets")))
            .await;
        let response = self.send(builder, DeckError::Fetch).await?;
        Self::json(response, DeckError::Fetch).await
    }

    async fn table_page(&self, dataset_id: &str, page: u32, page_size: u32) -> Result<TablePage> {
        let builder = self
            .with_bearer(
                self.client
                    .get(self.url(&format!("/data/{dataset_id}")))
                    .query(&[("page", page), ("page_size", page_size)]),
            )
            .await;
        let response = self.send(builder, DeckError::Fetch).await?;
        let body: TablePageResponse = Self::json(response, DeckError::Fetch).await?;
        Ok(TablePage {
            rows: body.data,
            page: body.page,
            total_pages: body.total_pages,
        })
    }

    async fn chart_summary(
        &self,
        dataset_id: &str,
        column: &str,
        aggregation: Aggregation,
    ) -> Result<Vec<Row>> {
        let builder = self
            .with_bearer(
                self.client
                    .get(self.url(&format!("/data/{dataset_id}/summary")))
                    .query(&[
                        ("column", column.to_string()),
                        ("aggregation", aggregation.to_string()),
                    ]),
            )
            .await;
        let response = self.send(builder, DeckError::Fetch).await?;
        Self::json(response, DeckError::Fetch).await
    }

    async fn delete_dataset(&self, dataset_id: &str) -> Result<()> {
        let builder = self
            .with_bearer(self.client.delete(self.url(&format!("/data/{dataset_id}"))))
            .await;
        self.send(builder, DeckError::Fetch).await?;
        Ok(())
    }

    async fn upload(
        &self,
        filename: &str,
        mime: &str,
        bytes: Vec<u8>,
        progress: Option<ProgressFn>,
    ) -> Result<DatasetSummary> {
        let total = bytes.len() as u64;
        let chunks: Vec<Vec<u8>> = bytes
            .chunks(UPLOAD_CHUNK_BYTES)
            .map(|chunk| chunk.to_vec())
            .collect();

        let mut sent: u64 = 0;
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            if let Some(callback) = &progress {
                callback(sent, total);
            }
            Ok::<Vec<u8>, std::io::Error>(chunk)
        }));

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|err| DeckError::internal(format!("invalid MIME type: {err}")))?;
        let form = Form::new().part("file", part);

        let builder = self
            .with_bearer(self.client.post(self.url("/upload/")).multipart(form))
            .await;
        // The server's detail field becomes the visible message when present.
        let response = self.send(builder, DeckError::UploadTransport).await?;
        Self::json(response, DeckError::UploadTransport).await
    }
}

/// Extracts the backend's `detail` message from an error body, if any.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TablePageResponse {
    #[serde(default)]
    data: Vec<Row>,
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page")]
    total_pages: u32,
}

fn default_page() -> u32 {
    1
}
