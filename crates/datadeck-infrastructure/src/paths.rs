//! Unified path management for DataDeck configuration files.
//!
//! All client state lives under one config directory:
//!
//! ```text
//! ~/.config/datadeck/          # Linux (platform-appropriate elsewhere)
//! ├── config.toml              # Client configuration
//! └── credentials.json         # Bearer token + identity (cleared on logout)
//! ```

use std::path::{Path, PathBuf};

use datadeck_core::error::{DeckError, Result};

/// Unified path management for DataDeck.
///
/// Constructed with an explicit base directory in tests; production code uses
/// [`DeckPaths::from_env`] which resolves the platform config directory.
#[derive(Debug, Clone)]
pub struct DeckPaths {
    config_dir: PathBuf,
}

impl DeckPaths {
    /// Creates path management rooted at an explicit directory.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Resolves the platform config directory (e.g. `~/.config/datadeck`).
    ///
    /// # Errors
    ///
    /// Returns `DeckError::Config` when the home directory cannot be
    /// determined.
    pub fn from_env() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| DeckError::config("Cannot find config directory"))?;
        Ok(Self::new(base.join("datadeck")))
    }

    /// The DataDeck config directory.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to the persisted credentials file.
    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_base() {
        let paths = DeckPaths::new("/tmp/datadeck-test");
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/datadeck-test/config.toml")
        );
        assert_eq!(
            paths.credentials_file(),
            PathBuf::from("/tmp/datadeck-test/credentials.json")
        );
    }
}
