//! Statistics: mutant/human counts and their ratio, derived on every read

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub count_mutant_dna: u64,
    pub count_human_dna: u64,
    /// mutants / humans, or 0.0 when there are no humans
    pub ratio: f64,
}

impl StatsSnapshot {
    pub fn from_counts(mutants: u64, humans: u64) -> Self {
        let ratio = if humans == 0 { 0.0 } else { mutants as f64 / humans as f64 };
        Self {
            count_mutant_dna: mutants,
            count_human_dna: humans,
            ratio,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Stats | mutants={} | humans={} | ratio={:.3}",
            self.count_mutant_dna, self.count_human_dna, self.ratio
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let stats = StatsSnapshot::from_counts(40, 100);
        assert!((stats.ratio - 0.4).abs() < 1e-9);
        assert_eq!(StatsSnapshot::from_counts(7, 7).ratio, 1.0);
    }

    #[test]
    fn test_no_humans_ratio_zero() {
        assert_eq!(StatsSnapshot::from_counts(5, 0).ratio, 0.0);
        assert_eq!(StatsSnapshot::from_counts(0, 0).ratio, 0.0);
        assert_eq!(StatsSnapshot::from_counts(0, 20).ratio, 0.0);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(StatsSnapshot::from_counts(1, 4)).unwrap();
        assert_eq!(json["count_mutant_dna"], 1);
        assert_eq!(json["count_human_dna"], 4);
        assert_eq!(json["ratio"], 0.25);
    }
}
