//! mutant-core: mutant DNA detection with deduplicated verdicts
//!
//! A DNA sample is an N×N grid of bases. It is mutant when more than one run
//! of four identical bases appears horizontally, vertically or diagonally.
//! Verdicts are stored under a SHA-256 fingerprint of the grid so that each
//! distinct sample is analyzed at most once.

pub mod genome;
pub mod storage;
pub mod service;
pub mod config;

pub use genome::{DnaSample, Fingerprint, Grid, ScanReport, ValidationError};
pub use storage::{ClassificationRecord, ClassificationStore, JsonFileStore, MemoryStore, StoreError};
pub use service::{Analysis, ClassificationService, ClassifyError, Outcome, StatsSnapshot};
pub use config::{ConfigError, ServiceConfig, StoreBackend};
