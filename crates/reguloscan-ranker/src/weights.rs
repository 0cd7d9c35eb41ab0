//! Weight vector for evidence aggregation.

use serde::{Deserialize, Serialize};

/// One weight per evidence dimension. Weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceWeights {
    /// Regulatory-feature overlap (Ensembl Regulatory Build via VEP)
    pub regulatory: f64,
    /// Deleteriousness (CADD raw score)
    pub functional: f64,
    /// eQTL association for the affected gene (GTEx)
    pub expression: f64,
    /// Conservation placeholder (VEP colocated variants)
    pub conservation: f64,
}

impl Default for EvidenceWeights {
    fn default() -> Self {
        Self {
            regulatory:   0.25,
            functional:   0.35,
            expression:   0.25,
            conservation: 0.15,
        }
    }
}

impl EvidenceWeights {
    /// Validate that all weights are non-negative and sum to ~1.0
    pub fn validate(&self) -> bool {
        let arr = self.as_array();
        if arr.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return false;
        }
        (arr.iter().sum::<f64>() - 1.0).abs() < 1e-6
    }

    /// Convert to array for iteration, ordered as `reguloscan_common::EvidenceKind::ALL`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.regulatory, self.functional, self.expression, self.conservation]
    }
}
