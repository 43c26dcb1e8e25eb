//! Grid: a validated N×N matrix of DNA bases
//!
//! Raw rows are checked for shape and alphabet before anything else in the
//! crate is allowed to look at them. A `Grid` can only be obtained through
//! `Grid::parse`, so every scanner and fingerprint call sees valid data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest side length that can hold a run
pub const MIN_SIZE: usize = 4;

/// One nitrogenous base, the only symbols a grid may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    C,
    G,
}

impl Base {
    /// Uppercase only: `'a'` is not a base
    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Base::A),
            'T' => Some(Base::T),
            'C' => Some(Base::C),
            'G' => Some(Base::G),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::C => 'C',
            Base::G => 'G',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Why a set of raw rows was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Malformed DNA shape: {0}")]
    Shape(String),

    #[error("Invalid base {symbol:?} at row {row}, column {col}")]
    Alphabet { row: usize, col: usize, symbol: char },

    #[error("DNA matrix is {0}x{0}, minimum is 4x4")]
    Size(usize),
}

/// Immutable, square, in-alphabet matrix of bases (row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Base>,
    n: usize,
}

impl Grid {
    /// Validate raw rows and build a grid.
    ///
    /// Shape is checked first, then the alphabet, then the minimum size, so a
    /// short ragged input reports `Shape` rather than `Size`.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::Shape("DNA has no rows".into()));
        }

        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);

        for (row, sequence) in rows.iter().enumerate() {
            let sequence = sequence.as_ref();
            let len = sequence.chars().count();
            if len != n {
                return Err(ValidationError::Shape(format!(
                    "row {} has length {}, expected {} (matrix must be NxN)",
                    row, len, n
                )));
            }
            for (col, symbol) in sequence.chars().enumerate() {
                let base = Base::from_char(symbol)
                    .ok_or(ValidationError::Alphabet { row, col, symbol })?;
                cells.push(base);
            }
        }

        if n < MIN_SIZE {
            return Err(ValidationError::Size(n));
        }

        Ok(Self { cells, n })
    }

    /// Side length N
    pub fn size(&self) -> usize {
        self.n
    }

    /// Base at (row, col). Callers stay in bounds; the scanner gates every
    /// access with its boundary tests.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Base {
        self.cells[row * self.n + col]
    }

    /// Rows as strings, in order
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.n)
            .map(|row| row.iter().map(Base::as_char).collect())
    }

    /// Rows concatenated with no separator (the fingerprint input)
    pub fn canonical(&self) -> String {
        self.cells.iter().map(Base::as_char).collect()
    }
}

/// Request-shaped input: `{"dna": ["ATGC", ...]}`. Either level may be null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DnaSample {
    pub dna: Option<Vec<Option<String>>>,
}

impl DnaSample {
    pub fn new<S: Into<String>>(rows: impl IntoIterator<Item = S>) -> Self {
        Self {
            dna: Some(rows.into_iter().map(|r| Some(r.into())).collect()),
        }
    }

    /// Strip the nullable layers, rejecting an absent matrix or row
    pub fn into_rows(self) -> Result<Vec<String>, ValidationError> {
        let dna = self
            .dna
            .ok_or_else(|| ValidationError::Shape("DNA is missing".into()))?;
        dna.into_iter()
            .enumerate()
            .map(|(i, row)| row.ok_or_else(|| ValidationError::Shape(format!("row {} is null", i))))
            .collect()
    }
}
