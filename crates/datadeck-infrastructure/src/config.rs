//! Client configuration.
//!
//! Loaded from `config.toml` in the config directory, with an environment
//! override for the base URL. Missing file means defaults; a malformed file
//! is an error rather than a silent fallback.

use crate::paths::DeckPaths;
use datadeck_core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default backend address when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default number of table rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "DATADECK_BASE_URL";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base address, e.g. "http://localhost:8000"
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Table rows requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration with the standard priority order:
    ///
    /// 1. `DATADECK_BASE_URL` environment variable (base URL only)
    /// 2. `config.toml` in the config directory
    /// 3. Built-in defaults
    pub fn load() -> Result<Self> {
        let paths = DeckPaths::from_env()?;
        let mut config = Self::load_from(&paths.config_file())?;
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    /// Loads configuration from an explicit file, defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}
