//! File-backed credential storage.
//!
//! The bearer token and the serialized identity are persisted as a single
//! JSON document so they are always written and removed together. The file is
//! replaced via a temp-file rename, never updated in place.

use crate::paths::DeckPaths;
use async_trait::async_trait;
use datadeck_core::error::{DeckError, Result};
use datadeck_core::gateway::{CredentialStore, StoredCredentials};
use std::path::PathBuf;

/// Credential store writing to `credentials.json` in the config directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store over the default credentials path.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_paths(&DeckPaths::from_env()?))
    }

    /// Creates a store over an explicit path set (used in tests).
    pub fn with_paths(paths: &DeckPaths) -> Self {
        Self {
            path: paths.credentials_file(),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let credentials: StoredCredentials = serde_json::from_slice(&bytes)?;
        Ok(Some(credentials))
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| DeckError::config("Credentials path has no parent directory"))?;
        tokio::fs::create_dir_all(parent).await?;

        // Write token and identity in one atomic replace.
        let json = serde_json::to_vec_pretty(credentials)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "persisted credentials");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
