//! Service configuration: which store to open and how loudly to log

use crate::storage::{ClassificationStore, JsonFileStore, MemoryStore, StoreError};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default location of the JSON store
pub const DEFAULT_STORE_FILE: &str = "mutant-store.json";

/// Where classification records live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, gone on exit
    Memory,
    /// Pretty JSON file, rewritten on every insert
    File { path: PathBuf },
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::File {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub store: StoreBackend,
    /// env_logger filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceConfig {
    /// Load a config file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config if the file exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::load(path)?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Open the configured backend
    pub fn open_store(&self) -> Result<Arc<dyn ClassificationStore>, StoreError> {
        match &self.store {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::File { path } => Ok(Arc::new(JsonFileStore::open(path)?)),
        }
    }
}
