//! Aggregate figures over a batch of scored variants.

use reguloscan_common::{EvidenceVector, Priority};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::scorer::ScoreResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Variants with at least one defaulted evidence dimension.
    pub degraded: usize,
    /// Wall-clock runtime, rounded to 2 decimals.
    pub runtime_secs: f64,
    /// Mean of each evidence dimension across the batch.
    pub mean_evidence: EvidenceVector,
}

impl BatchSummary {
    pub fn from_results(results: &[ScoreResult], elapsed: Duration) -> Self {
        let count = |p: Priority| results.iter().filter(|r| r.priority == p).count();

        let mut sums = [0.0f64; 4];
        for r in results {
            for (acc, v) in sums.iter_mut().zip(r.evidence.as_array()) {
                *acc += v;
            }
        }
        let n = results.len().max(1) as f64;
        let mean_evidence = EvidenceVector {
            regulatory: sums[0] / n,
            functional: sums[1] / n,
            expression: sums[2] / n,
            conservation: sums[3] / n,
        };

        Self {
            total: results.len(),
            high: count(Priority::High),
            medium: count(Priority::Medium),
            low: count(Priority::Low),
            degraded: results.iter().filter(|r| r.is_degraded()).count(),
            runtime_secs: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            mean_evidence,
        }
    }
}
