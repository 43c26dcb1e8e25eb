//! Classification service: validate, fingerprint, look up, scan, persist
//!
//! Each distinct grid is scanned and persisted at most once per store. Repeat
//! submissions are answered from the store. When two callers race on the
//! same new grid, the store lets one insert win and the other re-reads the
//! winner's verdict.

mod stats;

pub use stats::StatsSnapshot;

use crate::genome::{self, DnaSample, Fingerprint, Grid, ValidationError};
use crate::storage::{ClassificationStore, StoreError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Errors surfaced to callers. Store conflicts are recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Invalid DNA: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a verdict was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Scanned and persisted by this call
    Computed,
    /// Served from an existing record, no scan
    Cached,
    /// Scanned, but another writer persisted first; its record was returned
    RaceRecovered,
}

/// Verdict plus the key and path that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub fingerprint: Fingerprint,
    pub is_mutant: bool,
    pub outcome: Outcome,
}

pub struct ClassificationService {
    store: Arc<dyn ClassificationStore>,
}

impl ClassificationService {
    pub fn new(store: Arc<dyn ClassificationStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ClassificationStore> {
        &self.store
    }

    /// Classify raw rows: `Ok(true)` mutant, `Ok(false)` human
    pub fn classify<S: AsRef<str>>(&self, rows: &[S]) -> Result<bool, ClassifyError> {
        self.analyze(rows).map(|a| a.is_mutant)
    }

    /// Classify a request-shaped sample, rejecting null matrix or rows
    pub fn classify_sample(&self, sample: DnaSample) -> Result<bool, ClassifyError> {
        let rows = sample.into_rows()?;
        self.classify(&rows)
    }

    /// Classify and report whether the verdict was computed or reused
    pub fn analyze<S: AsRef<str>>(&self, rows: &[S]) -> Result<Analysis, ClassifyError> {
        // Nothing reaches the store before validation succeeds
        let grid = Grid::parse(rows)?;
        let fingerprint = Fingerprint::of(&grid);

        if let Some(record) = self.store.find(&fingerprint)? {
            debug!("Cache hit {} -> mutant={}", fingerprint.short(), record.is_mutant);
            return Ok(Analysis {
                fingerprint,
                is_mutant: record.is_mutant,
                outcome: Outcome::Cached,
            });
        }

        let report = genome::scan(&grid);
        let is_mutant = report.is_mutant();
        debug!(
            "Scanned {} ({}x{}): {} runs in {} cells -> mutant={}",
            fingerprint.short(),
            grid.size(),
            grid.size(),
            report.runs.len(),
            report.cells_visited,
            is_mutant
        );

        match self.store.insert_if_absent(&fingerprint, is_mutant) {
            Ok(record) => {
                info!("Classified {} as {}", fingerprint.short(), verdict_name(record.is_mutant));
                Ok(Analysis {
                    fingerprint,
                    is_mutant: record.is_mutant,
                    outcome: Outcome::Computed,
                })
            }
            Err(StoreError::Conflict(_)) => {
                warn!("Concurrent insert for {}, re-reading stored verdict", fingerprint.short());
                let record = self.store.find(&fingerprint)?.ok_or_else(|| {
                    StoreError::Unavailable(format!(
                        "record for {} missing after insert conflict",
                        fingerprint
                    ))
                })?;
                info!("Recovered {} as {} after race", fingerprint.short(), verdict_name(record.is_mutant));
                Ok(Analysis {
                    fingerprint,
                    is_mutant: record.is_mutant,
                    outcome: Outcome::RaceRecovered,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Aggregate counts over every stored record
    pub fn stats(&self) -> Result<StatsSnapshot, StoreError> {
        let mutants = self.store.count_where(true)?;
        let humans = self.store.count_where(false)?;
        Ok(StatsSnapshot::from_counts(mutants, humans))
    }
}

pub fn verdict_name(is_mutant: bool) -> &'static str {
    if is_mutant { "mutant" } else { "human" }
}
