//! Sequence scanner: decides mutant vs. human in a single pass
//!
//! Every cell is visited once, row-major. At each cell up to four direction
//! checks run (horizontal, vertical, diagonal down-right, diagonal up-right),
//! each gated by a boundary test. The scan stops the moment a second run is
//! found. Runs are counted per starting cell, so overlapping or colinear runs
//! of the same base each count.

use super::grid::{Base, Grid};
use serde::{Deserialize, Serialize};

/// Length of a qualifying run
pub const SEQUENCE_LENGTH: usize = 4;

/// Runs needed before a grid is mutant ("more than one")
const MUTANT_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
    /// (row+k, col+k)
    DiagonalDown,
    /// (row+k, col-k)
    DiagonalUp,
}

impl Direction {
    /// Check order at each cell
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Whether a run starting at (row, col) fits inside an n×n grid
    fn fits(&self, n: usize, row: usize, col: usize) -> bool {
        let last = n - SEQUENCE_LENGTH;
        match self {
            Direction::Horizontal => col <= last,
            Direction::Vertical => row <= last,
            Direction::DiagonalDown => row <= last && col <= last,
            Direction::DiagonalUp => row <= last && col >= SEQUENCE_LENGTH - 1,
        }
    }

    /// Cell k steps from (row, col). Only called once `fits` has passed.
    fn step(&self, row: usize, col: usize, k: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (row, col + k),
            Direction::Vertical => (row + k, col),
            Direction::DiagonalDown => (row + k, col + k),
            Direction::DiagonalUp => (row + k, col - k),
        }
    }
}

/// A run of identical bases found during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub base: Base,
}

/// What a scan saw before it stopped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Runs in discovery order; never more than the threshold
    pub runs: Vec<Run>,
    pub cells_visited: usize,
}

impl ScanReport {
    pub fn is_mutant(&self) -> bool {
        self.runs.len() >= MUTANT_THRESHOLD
    }
}

/// Scan a grid and report the runs seen up to early termination
pub fn scan(grid: &Grid) -> ScanReport {
    let n = grid.size();
    let mut report = ScanReport::default();

    for row in 0..n {
        for col in 0..n {
            report.cells_visited += 1;
            for direction in Direction::ALL {
                if !direction.fits(n, row, col) {
                    continue;
                }
                if let Some(run) = check(grid, row, col, direction) {
                    report.runs.push(run);
                    if report.is_mutant() {
                        return report;
                    }
                }
            }
        }
    }

    report
}

/// True when the grid holds more than one run
pub fn is_mutant(grid: &Grid) -> bool {
    scan(grid).is_mutant()
}

fn check(grid: &Grid, row: usize, col: usize, direction: Direction) -> Option<Run> {
    let base = grid.at(row, col);
    let matches = (1..SEQUENCE_LENGTH).all(|k| {
        let (r, c) = direction.step(row, col, k);
        grid.at(r, c) == base
    });
    matches.then_some(Run { row, col, direction, base })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::parse(rows).unwrap()
    }

    /// Run-free n×n grid: neighbours in every scanned direction differ
    fn striped(n: usize) -> Grid {
        const BASES: [char; 4] = ['A', 'T', 'C', 'G'];
        let rows: Vec<String> = (0..n)
            .map(|r| (0..n).map(|c| BASES[(r + 2 * c) % 4]).collect())
            .collect();
        Grid::parse(&rows).unwrap()
    }

    #[test]
    fn test_mutant_scenario() {
        let g = grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]);
        let report = scan(&g);
        assert!(report.is_mutant());
        assert_eq!(
            report.runs,
            vec![
                Run { row: 0, col: 0, direction: Direction::DiagonalDown, base: Base::A },
                Run { row: 0, col: 4, direction: Direction::Vertical, base: Base::G },
            ]
        );
        // Stops on (0,4); the CCCC row is never reached
        assert_eq!(report.cells_visited, 5);
    }

    #[test]
    fn test_human_scenario() {
        let g = grid(&["ATGCGA", "CAGTGC", "TTATGT", "AGACGG", "GCGTCA", "TCACTG"]);
        let report = scan(&g);
        assert!(!report.is_mutant());
        assert_eq!(report.runs.len(), 1);
        assert_eq!(report.cells_visited, 36);
    }

    #[test]
    fn test_minimum_size_mutant() {
        let g = grid(&["AAAA", "CCCC", "TATA", "GAGA"]);
        let report = scan(&g);
        assert!(report.is_mutant());
        assert_eq!(report.runs[0].direction, Direction::Horizontal);
        assert_eq!(report.runs[1], Run { row: 1, col: 0, direction: Direction::Horizontal, base: Base::C });
        assert_eq!(report.cells_visited, 5);
    }

    #[test]
    fn test_minimum_size_human() {
        assert!(!is_mutant(&grid(&["ATGC", "CGTA", "TACG", "GCAT"])));
    }

    #[test]
    fn test_two_horizontal() {
        let g = grid(&["AAAATG", "TGCAGT", "GCTTCC", "CCCCTG", "GTAGTC", "AGTCAC"]);
        assert!(is_mutant(&g));
    }

    #[test]
    fn test_two_vertical() {
        let g = grid(&["AGAATG", "GGCAGT", "GGTTCC", "GGCCTG", "GGAGTC", "AGTCAC"]);
        let report = scan(&g);
        assert!(report.is_mutant());
        assert!(report.runs.iter().all(|r| r.direction == Direction::Vertical));
    }

    #[test]
    fn test_single_run_each_direction_is_human() {
        let horizontal = grid(&["AAAATG", "TGCAGT", "GCATCC", "TTCCTG", "GTAGTC", "AGTCAC"]);
        let vertical = grid(&["ATGCTA", "AGGTAC", "ATATCT", "AGACAG", "GCGTCA", "TCACTG"]);
        let diagonal_down = grid(&["ACACAC", "TTTGTG", "CATACA", "GTGTGT", "ACACTC", "TGTGTG"]);
        let diagonal_up = grid(&["ACAGAC", "TGGGTG", "CGCACA", "GTGTGT", "ACACAC", "TGTGTG"]);

        for (g, direction) in [
            (horizontal, Direction::Horizontal),
            (vertical, Direction::Vertical),
            (diagonal_down, Direction::DiagonalDown),
            (diagonal_up, Direction::DiagonalUp),
        ] {
            let report = scan(&g);
            assert!(!report.is_mutant(), "{:?} single run must be human", direction);
            assert_eq!(report.runs.len(), 1);
            assert_eq!(report.runs[0].direction, direction);
        }
    }

    #[test]
    fn test_diagonal_up_plus_horizontal() {
        let g = grid(&["ACAGAC", "TGGGTG", "CGCACA", "GTGTGT", "ACACAC", "TTTTTG"]);
        let report = scan(&g);
        assert!(report.is_mutant());
        assert_eq!(report.runs[0], Run { row: 0, col: 3, direction: Direction::DiagonalUp, base: Base::G });
        assert_eq!(report.runs[1].direction, Direction::Horizontal);
    }

    #[test]
    fn test_overlapping_runs_count_twice() {
        // AAAAA holds two overlapping horizontal runs
        let g = grid(&["AAAAAT", "CGTCGT", "TCGATC", "GTACGA", "CATGCA", "GCTAGC"]);
        let report = scan(&g);
        assert!(report.is_mutant());
        assert_eq!(report.runs[0].col, 0);
        assert_eq!(report.runs[1].col, 1);
        assert_eq!(report.cells_visited, 2);
    }

    #[test]
    fn test_colinear_vertical_runs_count_twice() {
        let g = grid(&["ACACAC", "TGTGTC", "CACACC", "GTGTGC", "ACACAC", "TGTGTG"]);
        let report = scan(&g);
        assert!(report.is_mutant());
        assert_eq!((report.runs[0].row, report.runs[0].col), (0, 5));
        assert_eq!((report.runs[1].row, report.runs[1].col), (1, 5));
    }

    #[test]
    fn test_large_mutant() {
        let g = grid(&[
            "ATGCGATTTT", "CAGTGCATCG", "TTATGTACGA", "AGAAGGTTCC", "CCCCTAACGT",
            "TCACTGAAAA", "ATGCGATTTT", "CAGTGCATCG", "TTATGTACGA", "AGAAGGTTCC",
        ]);
        assert!(is_mutant(&g));
    }

    #[test]
    fn test_run_free_grid_visits_every_cell() {
        let g = striped(50);
        let report = scan(&g);
        assert!(report.runs.is_empty());
        assert_eq!(report.cells_visited, 2500);
    }
}
