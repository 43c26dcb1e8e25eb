//! In-memory store: a locked HashMap, lost on exit

use super::{ClassificationRecord, ClassificationStore, StoreError};
use crate::genome::Fingerprint;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Fingerprint, ClassificationRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

impl ClassificationStore for MemoryStore {
    fn find(&self, fingerprint: &Fingerprint) -> Result<Option<ClassificationRecord>, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(fingerprint).cloned())
    }

    fn insert_if_absent(
        &self,
        fingerprint: &Fingerprint,
        is_mutant: bool,
    ) -> Result<ClassificationRecord, StoreError> {
        let mut records = self.records.write().map_err(poisoned)?;
        match records.entry(fingerprint.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(fingerprint.clone())),
            Entry::Vacant(slot) => {
                let record = ClassificationRecord::new(fingerprint.clone(), is_mutant);
                debug!("Stored {}", record.summary());
                Ok(slot.insert(record).clone())
            }
        }
    }

    fn count_where(&self, is_mutant: bool) -> Result<u64, StoreError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().filter(|r| r.is_mutant == is_mutant).count() as u64)
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }
}
