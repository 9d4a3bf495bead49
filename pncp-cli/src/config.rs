//! Application configuration management
//!
//! Handles loading configuration from `config.toml` in the platform config
//! directory, or from an explicit path. Every key is optional.
//!
//! ```toml
//! base_url = "https://pncp.gov.br/api/search/"
//! timeout_secs = 30
//! max_pages = 500
//! export_path = "contratos.csv"
//!
//! [query]
//! term = "Cidades Inteligentes"
//! page_size = 100
//! contract_types = [1, 2, 3]
//! ```

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use pncp_lib::PncpClient;
use pncp_lib::api::SearchQuery;
use serde::Deserialize;
use serde::Serialize;

use crate::paths;

/// File the full table is written to when no path is configured.
pub const DEFAULT_EXPORT_PATH: &str = "contratos.csv";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search endpoint; the library default when unset.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Connection timeout in seconds.
    pub connect_timeout_secs: Option<u64>,

    /// Page ceiling for a full fetch.
    pub max_pages: Option<u32>,

    /// Where the full table is written after fetching.
    pub export_path: Option<PathBuf>,

    /// The search to run.
    pub query: SearchQuery,
}

impl AppConfig {
    /// Loads the default config file, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        match paths::config_file() {
            Some(path) if path.exists() => Self::load_from(path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Returns the export path, falling back to [`DEFAULT_EXPORT_PATH`].
    pub fn export_path(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH))
    }

    /// Builds a client from this configuration.
    pub fn client(&self) -> Result<PncpClient> {
        let mut builder = PncpClient::builder().query(self.query.clone());

        if let Some(ref url) = self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(max_pages) = self.max_pages {
            builder = builder.max_pages(max_pages);
        }

        builder.build().context("Failed to build PNCP client")
    }
}
