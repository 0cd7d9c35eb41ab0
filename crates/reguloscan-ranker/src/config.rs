//! Scoring configuration: weights, tier thresholds and the placeholder
//! heuristic constants. Deserialised from the `[scoring]` table.

use reguloscan_common::{ReguloError, Result};
use serde::{Deserialize, Serialize};

use crate::classify::PriorityThresholds;
use crate::weights::EvidenceWeights;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: EvidenceWeights,
    pub thresholds: PriorityThresholds,
    pub heuristics: HeuristicConfig,
}

/// Constants used by the default evidence strategies.
///
/// The regulatory, expression and conservation values are presence
/// placeholders, not calibrated scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Assigned when VEP reports a regulatory-feature overlap.
    pub regulatory_value: f64,
    /// Assigned when GTEx reports any eQTL association for the gene.
    pub expression_value: f64,
    /// Assigned when VEP reports colocated variants.
    pub conservation_value: f64,
    /// CADD raw score mapped to 0.0.
    pub functional_min: f64,
    /// CADD raw score mapped to 1.0.
    pub functional_max: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            regulatory_value:   0.7,
            expression_value:   0.6,
            conservation_value: 0.5,
            functional_min:     0.0,
            functional_max:     30.0,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.weights.validate() {
            return Err(ReguloError::Config(format!(
                "scoring.weights must be non-negative and sum to 1.0 (got {:?})",
                self.weights.as_array()
            )));
        }
        if !self.thresholds.validate() {
            return Err(ReguloError::Config(format!(
                "scoring.thresholds must satisfy 0 <= medium <= high <= 1 (got medium={}, high={})",
                self.thresholds.medium, self.thresholds.high
            )));
        }
        let h = &self.heuristics;
        for (name, v) in [
            ("regulatory_value", h.regulatory_value),
            ("expression_value", h.expression_value),
            ("conservation_value", h.conservation_value),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ReguloError::Config(format!(
                    "scoring.heuristics.{} must be within [0, 1] (got {})",
                    name, v
                )));
            }
        }
        if !h.functional_min.is_finite() || !h.functional_max.is_finite() {
            return Err(ReguloError::Config(
                "scoring.heuristics functional bounds must be finite".to_string(),
            ));
        }
        if h.functional_max <= h.functional_min {
            return Err(ReguloError::Config(format!(
                "scoring.heuristics.functional_max must exceed functional_min (got min={}, max={})",
                h.functional_min, h.functional_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let c: ScoringConfig = toml::from_str(
            r#"
            [thresholds]
            high = 0.8

            [heuristics]
            functional_max = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(c.thresholds.high, 0.8);
        assert_eq!(c.thresholds.medium, 0.4);
        assert_eq!(c.heuristics.functional_max, 40.0);
        assert_eq!(c.heuristics.regulatory_value, 0.7);
        assert_eq!(c.weights, EvidenceWeights::default());
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let mut c = ScoringConfig::default();
        c.weights.expression = 0.5;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("scoring.weights"));
    }

    #[test]
    fn test_rejects_out_of_range_heuristic() {
        let mut c = ScoringConfig::default();
        c.heuristics.conservation_value = 1.5;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("conservation_value"));
    }

    #[test]
    fn test_rejects_empty_or_inverted_functional_range() {
        let mut c = ScoringConfig::default();
        c.heuristics.functional_min = 30.0;
        c.heuristics.functional_max = 30.0;
        let err = c.validate().unwrap_err();
        assert!(matches!(err, ReguloError::Config(_)));
        assert!(err.to_string().contains("scoring.heuristics.functional_max"), "{}", err);

        c.heuristics.functional_max = 10.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut c = ScoringConfig::default();
        c.thresholds.medium = 0.9;
        assert!(c.validate().is_err());
    }
}
