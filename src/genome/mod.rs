//! Genome: DNA grids and the pure operations over them
//!
//! A grid is validated once, then scanned and fingerprinted:
//! - Grid: square matrix of bases, built only through validation
//! - Scanner: single-pass run counting with early exit
//! - Fingerprint: SHA-256 key for the classification store

mod grid;
mod scanner;
mod fingerprint;

pub use grid::{Base, DnaSample, Grid, ValidationError, MIN_SIZE};
pub use scanner::{is_mutant, scan, Direction, Run, ScanReport, SEQUENCE_LENGTH};
pub use fingerprint::{Fingerprint, FINGERPRINT_LEN};
