//! Fingerprint: SHA-256 digest of a grid's content, used as the store key
//!
//! Rows are concatenated in order with no separator. Row boundaries stay
//! implicit because a `Grid` is always square.

use super::grid::Grid;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex length of a SHA-256 digest
pub const FINGERPRINT_LEN: usize = 64;

/// Lowercase hex SHA-256 of a grid's canonical form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a validated grid
    pub fn of(grid: &Grid) -> Self {
        Self(hex::encode(Sha256::digest(grid.canonical().as_bytes())))
    }

    /// Accept a stored digest, rejecting anything not shaped like one
    pub fn parse(digest: &str) -> Option<Self> {
        let well_formed = digest.len() == FINGERPRINT_LEN
            && digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(digest.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex chars, for log lines
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(rows: &[&str]) -> Fingerprint {
        Fingerprint::of(&Grid::parse(rows).unwrap())
    }

    #[test]
    fn test_known_digest() {
        let f = fp(&["AAAA", "CCCC", "TATA", "GAGA"]);
        assert_eq!(
            f.as_str(),
            "f7aae737be6f615632d9712d49836321a75129173e788b31e357de45cdb66e70"
        );
        assert_eq!(f.as_str().len(), FINGERPRINT_LEN);
        assert_eq!(f.short(), "f7aae737be6f");
    }

    #[test]
    fn test_identical_grids_same_fingerprint() {
        let rows = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"];
        assert_eq!(fp(&rows), fp(&rows.clone()));
        assert_eq!(
            fp(&rows).as_str(),
            "a65d94c3e61fa21513338bde031f53064ad9cb63d8a9b4514e3869cc67db6d32"
        );
    }

    #[test]
    fn test_symbol_or_order_change_differs() {
        let base = fp(&["AAAA", "CCCC", "TATA", "GAGA"]);
        let one_symbol = fp(&["AAAA", "CCCC", "TATA", "GAGT"]);
        let swapped = fp(&["CCCC", "AAAA", "TATA", "GAGA"]);
        assert_ne!(base, one_symbol);
        assert_ne!(base, swapped);
        assert_ne!(one_symbol, swapped);
    }

    #[test]
    fn test_parse_roundtrip_and_rejects() {
        let f = fp(&["ATGC", "CGTA", "TACG", "GCAT"]);
        assert_eq!(Fingerprint::parse(f.as_str()), Some(f.clone()));
        assert_eq!(Fingerprint::parse("abc"), None);
        assert_eq!(Fingerprint::parse(&f.as_str().to_uppercase()), None);
        assert_eq!(Fingerprint::parse(&"z".repeat(FINGERPRINT_LEN)), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let f = fp(&["ATGC", "CGTA", "TACG", "GCAT"]);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, format!("\"{}\"", f));
    }
}
