//! Classification storage: fingerprint → verdict, at most one record per key
//!
//! Backends enforce uniqueness themselves, under their own lock, so two
//! writers racing on the same fingerprint can never both succeed. The loser
//! gets `StoreError::Conflict` and is expected to re-read.

mod memory;
mod file;

pub use memory::MemoryStore;
pub use file::{JsonFileStore, StoreIndex};

use crate::genome::Fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted verdict. Created once per fingerprint, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub id: Uuid,
    pub fingerprint: Fingerprint,
    pub is_mutant: bool,
    pub created_at: DateTime<Utc>,
}

impl ClassificationRecord {
    pub fn new(fingerprint: Fingerprint, is_mutant: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            fingerprint,
            is_mutant,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Record [{}] {} | {} | {}",
            &self.id.to_string()[..8],
            self.fingerprint.short(),
            if self.is_mutant { "mutant" } else { "human" },
            self.created_at.to_rfc3339()
        )
    }
}

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Record already exists for fingerprint {0}")]
    Conflict(Fingerprint),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store of classification records
pub trait ClassificationStore: Send + Sync {
    fn find(&self, fingerprint: &Fingerprint) -> Result<Option<ClassificationRecord>, StoreError>;

    /// Create a record unless one exists. Never overwrites: an existing key
    /// yields `StoreError::Conflict`.
    fn insert_if_absent(
        &self,
        fingerprint: &Fingerprint,
        is_mutant: bool,
    ) -> Result<ClassificationRecord, StoreError>;

    fn count_where(&self, is_mutant: bool) -> Result<u64, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
