//! JSON file store: persistent index of classification records
//!
//! The whole index lives in memory behind a mutex and is rewritten to disk
//! on every insert:
//! - Uniqueness is checked and the record inserted under one lock
//! - A failed write rolls the insert back, so memory never runs ahead of disk
//! - The file is written to a sibling temp path and renamed into place
//! - On open, every key must be a valid fingerprint matching its record

use super::{ClassificationRecord, ClassificationStore, StoreError};
use crate::genome::Fingerprint;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// On-disk layout: records keyed uniquely by fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreIndex {
    pub records: HashMap<Fingerprint, ClassificationRecord>,
    pub last_updated: DateTime<Utc>,
}

impl StoreIndex {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            last_updated: Utc::now(),
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        for (key, record) in &self.records {
            if Fingerprint::parse(key.as_str()).is_none() {
                return Err(StoreError::Unavailable(format!("Malformed fingerprint key '{}'", key)));
            }
            if &record.fingerprint != key {
                return Err(StoreError::Unavailable(format!(
                    "Record under {} carries fingerprint {}",
                    key.short(),
                    record.fingerprint
                )));
            }
        }
        Ok(())
    }
}

impl Default for StoreIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// File-backed classification store
pub struct JsonFileStore {
    path: PathBuf,
    index: Mutex<StoreIndex>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty index if the file is absent.
    /// An unreadable or corrupt file is an error, never silently replaced.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let index = if path.exists() {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| StoreError::Unavailable(format!("Read {}: {}", path.display(), e)))?;
            let index: StoreIndex = serde_json::from_str(&json)
                .map_err(|e| StoreError::Unavailable(format!("Parse {}: {}", path.display(), e)))?;
            index.check()?;
            info!("Loaded {} classification records from {}", index.records.len(), path.display());
            index
        } else {
            info!("No store at {}, starting fresh", path.display());
            StoreIndex::new()
        };
        Ok(Self {
            path,
            index: Mutex::new(index),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn summary(&self) -> String {
        let count = self.lock().map(|index| index.records.len()).unwrap_or(0);
        format!("JsonFileStore: {} records, path={}", count, self.path.display())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreIndex>, StoreError> {
        self.index
            .lock()
            .map_err(|_| StoreError::Unavailable("file store lock poisoned".into()))
    }

    fn save_index(&self, index: &StoreIndex) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("Create dir: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(index)
            .map_err(|e| StoreError::Unavailable(format!("Serialize: {}", e)))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .map_err(|e| StoreError::Unavailable(format!("Write: {}", e)))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Unavailable(format!("Rename: {}", e)))?;
        Ok(())
    }
}

impl ClassificationStore for JsonFileStore {
    fn find(&self, fingerprint: &Fingerprint) -> Result<Option<ClassificationRecord>, StoreError> {
        Ok(self.lock()?.records.get(fingerprint).cloned())
    }

    fn insert_if_absent(
        &self,
        fingerprint: &Fingerprint,
        is_mutant: bool,
    ) -> Result<ClassificationRecord, StoreError> {
        let mut index = self.lock()?;
        if index.records.contains_key(fingerprint) {
            return Err(StoreError::Conflict(fingerprint.clone()));
        }

        let record = ClassificationRecord::new(fingerprint.clone(), is_mutant);
        let previous_update = index.last_updated;
        index.records.insert(fingerprint.clone(), record.clone());
        index.last_updated = Utc::now();

        if let Err(e) = self.save_index(&index) {
            index.records.remove(fingerprint);
            index.last_updated = previous_update;
            return Err(e);
        }

        debug!("Persisted {} to {}", record.summary(), self.path.display());
        Ok(record)
    }

    fn count_where(&self, is_mutant: bool) -> Result<u64, StoreError> {
        let index = self.lock()?;
        Ok(index.records.values().filter(|r| r.is_mutant == is_mutant).count() as u64)
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.records.len())
    }
}
