//! Upload use case: validate locally, then upload with progress.
//!
//! The MIME type and size checks run before the file content is read or any
//! network call is made; violations never reach the backend.

use datadeck_core::dataset::DatasetSummary;
use datadeck_core::error::{DeckError, Result};
use datadeck_core::gateway::{DataGateway, ProgressFn};
use datadeck_core::upload::{mime_for_path, validate_upload};
use std::path::Path;
use std::sync::Arc;

/// Validated multipart upload of a local tabular file.
pub struct UploadUseCase {
    gateway: Arc<dyn DataGateway>,
}

impl UploadUseCase {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    /// Uploads `path`, reporting progress through `progress` as the body
    /// streams out.
    ///
    /// # Errors
    ///
    /// - `UploadValidation` when the extension-derived MIME type is not
    ///   CSV/Excel or the file exceeds 50 MiB (checked before any network
    ///   call).
    /// - `UploadTransport` on network or server failure, carrying the
    ///   server's detail message when present.
    pub async fn upload_file(
        &self,
        path: &Path,
        progress: Option<ProgressFn>,
    ) -> Result<DatasetSummary> {
        let metadata = tokio::fs::metadata(path).await?;
        let mime = mime_for_path(path);
        validate_upload(mime, metadata.len())?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DeckError::upload_validation("File has no usable name"))?;
        let bytes = tokio::fs::read(path).await?;

        tracing::info!(filename, size = bytes.len(), "uploading dataset");
        self.gateway.upload(filename, mime, bytes, progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGateway;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, size: usize) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![b'x'; size]).unwrap();
        path
    }

    #[tokio::test]
    async fn test_upload_valid_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "cities.csv", 64);
        let gateway = Arc::new(MockGateway::new());
        let usecase = UploadUseCase::new(gateway.clone());

        let summary = usecase.upload_file(&path, None).await.unwrap();
        assert_eq!(summary.filename, "cities.csv");
        assert_eq!(gateway.upload_calls(), 1);
    }

    #[tokio::test]
    async fn test_oversized_file_rejected_without_network_call() {
        let dir = TempDir::new().unwrap();
        // 60 MiB exceeds the 50 MiB limit.
        let path = write_file(&dir, "huge.csv", 60 * 1024 * 1024);
        let gateway = Arc::new(MockGateway::new());
        let usecase = UploadUseCase::new(gateway.clone());

        let err = usecase.upload_file(&path, None).await.unwrap_err();
        assert!(err.is_upload_validation());
        assert_eq!(gateway.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_rejected_without_network_call() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "report.pdf", 64);
        let gateway = Arc::new(MockGateway::new());
        let usecase = UploadUseCase::new(gateway.clone());

        let err = usecase.upload_file(&path, None).await.unwrap_err();
        assert!(err.is_upload_validation());
        assert_eq!(gateway.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_progress_callback_reaches_total() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "cities.csv", 128);
        let gateway = Arc::new(MockGateway::new());
        let usecase = UploadUseCase::new(gateway);

        let seen = Arc::new(AtomicU64::new(0));
        let seen_in_cb = seen.clone();
        let progress: ProgressFn = Arc::new(move |sent, _total| {
            seen_in_cb.store(sent, Ordering::SeqCst);
        });
        usecase.upload_file(&path, Some(progress)).await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 128);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(MockGateway::new());
        let usecase = UploadUseCase::new(gateway);

        let err = usecase
            .upload_file(&dir.path().join("absent.csv"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}
