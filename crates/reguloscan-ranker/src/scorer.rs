//! Composite variant score computation.
//!
//! overall = Σ(w_k × e_k) over the four evidence dimensions, clamped to [0, 1],
//! then classified into a priority tier.

use reguloscan_common::{EvidenceKind, EvidenceVector, Priority, VariantQuery};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::cadd_provider::CaddProvider;
use crate::classify::PriorityThresholds;
use crate::config::ScoringConfig;
use crate::evidence::{
    AnnotationBundle, CaddFunctionalEvidence, EvidenceOutcome, EvidenceStrategy,
    FallbackReason, GtexExpressionEvidence, MarkerPresenceEvidence,
};
use crate::gtex_provider::GtexProvider;
use crate::vep_provider::VepProvider;
use crate::weights::EvidenceWeights;

/// An evidence dimension that was defaulted to 0.0, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceFallback {
    pub kind: EvidenceKind,
    #[serde(flatten)]
    pub reason: FallbackReason,
}

/// Final scored variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub variant: VariantQuery,
    pub evidence: EvidenceVector,
    pub score: f64,
    pub priority: Priority,
    /// Empty unless some evidence could not be derived.
    #[serde(default)]
    pub fallbacks: Vec<EvidenceFallback>,
}

impl ScoreResult {
    pub fn is_degraded(&self) -> bool {
        !self.fallbacks.is_empty()
    }

    pub fn fallback_for(&self, kind: EvidenceKind) -> Option<&FallbackReason> {
        self.fallbacks.iter().find(|f| f.kind == kind).map(|f| &f.reason)
    }
}

/// Weighted sum of the evidence vector, clamped to [0, 1].
pub fn compute_overall_score(evidence: &EvidenceVector, weights: &EvidenceWeights) -> f64 {
    let weighted_sum: f64 = evidence
        .as_array()
        .iter()
        .zip(weights.as_array().iter())
        .map(|(e, w)| e * w)
        .sum();

    if weighted_sum.is_nan() { 0.0 } else { weighted_sum.clamp(0.0, 1.0) }
}

/// Fetches annotations for a variant and runs one strategy per evidence
/// dimension over them. Never fails: upstream problems become fallbacks.
pub struct EvidenceScorer {
    vep: Arc<dyn VepProvider>,
    cadd: Arc<dyn CaddProvider>,
    strategies: Vec<Box<dyn EvidenceStrategy>>,
    weights: EvidenceWeights,
    thresholds: PriorityThresholds,
}

impl EvidenceScorer {
    /// Build a scorer with the default heuristic strategies, parameterised by
    /// `config.heuristics`. The expression lookup is restricted to `tissue`.
    pub fn new(
        vep: Arc<dyn VepProvider>,
        cadd: Arc<dyn CaddProvider>,
        gtex: Arc<dyn GtexProvider>,
        tissue: impl Into<String>,
        config: &ScoringConfig,
    ) -> Self {
        let h = &config.heuristics;
        let strategies: Vec<Box<dyn EvidenceStrategy>> = vec![
            Box::new(MarkerPresenceEvidence::regulatory(h.regulatory_value)),
            Box::new(CaddFunctionalEvidence::new(h.functional_min, h.functional_max)),
            Box::new(GtexExpressionEvidence::new(gtex, tissue, h.expression_value)),
            Box::new(MarkerPresenceEvidence::conservation(h.conservation_value)),
        ];

        Self {
            vep,
            cadd,
            strategies,
            weights: config.weights.clone(),
            thresholds: config.thresholds.clone(),
        }
    }

    /// Replace the strategy for `strategy.kind()`.
    pub fn with_strategy(mut self, strategy: Box<dyn EvidenceStrategy>) -> Self {
        let kind = strategy.kind();
        self.strategies.retain(|s| s.kind() != kind);
        self.strategies.push(strategy);
        self.strategies.sort_by_key(|s| s.kind());
        self
    }

    /// Query VEP and CADD for one variant. Failures are kept in the bundle.
    pub async fn fetch_annotations(&self, variant: &VariantQuery) -> AnnotationBundle {
        let id = variant.as_str();
        let vep = self.vep.annotate(id).await;
        let cadd = self.cadd.annotate(&[id]).await;
        AnnotationBundle {
            variant: variant.clone(),
            vep,
            cadd,
        }
    }

    /// Score a single variant.
    #[instrument(skip_all, fields(variant = %variant))]
    pub async fn score(&self, variant: &VariantQuery) -> ScoreResult {
        let bundle = self.fetch_annotations(variant).await;

        let mut evidence = EvidenceVector::default();
        let mut fallbacks = Vec::new();

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let outcome = strategy.evaluate(&bundle).await;
            if let EvidenceOutcome::Fallback(reason) = &outcome {
                warn!(variant = %variant, evidence = %kind, "Evidence defaulted to 0.0: {}", reason);
                fallbacks.push(EvidenceFallback { kind, reason: reason.clone() });
            }
            debug!(evidence = %kind, value = outcome.value(), "Evidence evaluated");
            evidence = evidence.with(kind, outcome.value());
        }

        let score = compute_overall_score(&evidence, &self.weights);
        let priority = self.thresholds.classify(score);

        info!(
            variant = %variant,
            score = score,
            priority = %priority,
            fallbacks = fallbacks.len(),
            "Variant scored"
        );

        ScoreResult {
            variant: variant.clone(),
            evidence,
            score,
            priority,
            fallbacks,
        }
    }

    /// Score variants one at a time, preserving input order.
    pub async fn score_batch(&self, variants: &[VariantQuery]) -> Vec<ScoreResult> {
        let mut results = Vec::with_capacity(variants.len());
        for variant in variants {
            results.push(self.score(variant).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadd_provider::MockCaddProvider;
    use crate::gtex_provider::MockGtexProvider;
    use crate::vep_provider::MockVepProvider;
    use async_trait::async_trait;
    use serde_json::json;

    fn q(id: &str) -> VariantQuery {
        VariantQuery::new(id).unwrap()
    }

    fn scorer(vep: MockVepProvider, cadd: MockCaddProvider, gtex: MockGtexProvider) -> EvidenceScorer {
        EvidenceScorer::new(
            Arc::new(vep),
            Arc::new(cadd),
            Arc::new(gtex),
            "Brain_Cortex",
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_overall_score_range() {
        let weights = EvidenceWeights::default();
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for r in steps {
            for f in steps {
                for e in steps {
                    for c in steps {
                        let v = EvidenceVector { regulatory: r, functional: f, expression: e, conservation: c };
                        let s = compute_overall_score(&v, &weights);
                        assert!((0.0..=1.0).contains(&s), "score {} out of range for {:?}", s, v);
                    }
                }
            }
        }
    }

    #[test]
    fn test_overall_score_all_max_is_one() {
        let v = EvidenceVector { regulatory: 1.0, functional: 1.0, expression: 1.0, conservation: 1.0 };
        assert!((compute_overall_score(&v, &EvidenceWeights::default()) - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_all_signals_present() {
        let s = scorer(
            MockVepProvider::new().with(
                "rs1625579",
                json!([{
                    "transcript_consequences": [{ "gene_symbol": "MIR137HG" }],
                    "regulatory_feature_consequences": [{}],
                    "colocated_variants": [{ "id": "rs1625579" }]
                }]),
            ),
            MockCaddProvider::new().with("rs1625579", 30.0),
            MockGtexProvider::new().with("MIR137HG", "Brain_Cortex"),
        );
        let r = s.score(&q("rs1625579")).await;

        // 0.7*0.25 + 1.0*0.35 + 0.6*0.25 + 0.5*0.15
        assert!((r.score - 0.75).abs() < 1e-9, "got {}", r.score);
        assert_eq!(r.priority, Priority::High);
        assert!(!r.is_degraded());
    }

    #[tokio::test]
    async fn test_total_upstream_failure_yields_low() {
        let s = scorer(
            MockVepProvider::new().failing("rs1", "connection refused"),
            MockCaddProvider::new().failing("connection refused"),
            MockGtexProvider::new().failing("connection refused"),
        );
        let r = s.score(&q("rs1")).await;

        assert_eq!(r.evidence, EvidenceVector::default());
        assert_eq!(r.score, 0.0);
        assert_eq!(r.priority, Priority::Low);
        assert_eq!(r.fallbacks.len(), 4);
        for kind in EvidenceKind::ALL {
            assert!(matches!(r.fallback_for(kind), Some(FallbackReason::SourceFailed(_))));
        }
    }

    struct FixedEvidence(EvidenceKind, f64);

    #[async_trait]
    impl EvidenceStrategy for FixedEvidence {
        fn kind(&self) -> EvidenceKind {
            self.0
        }

        async fn evaluate(&self, _bundle: &AnnotationBundle) -> EvidenceOutcome {
            EvidenceOutcome::Observed(self.1)
        }
    }

    #[tokio::test]
    async fn test_with_strategy_replaces_dimension() {
        let s = scorer(
            MockVepProvider::new().with("rs1", json!([{ "colocated_variants": [{}] }])),
            MockCaddProvider::new(),
            MockGtexProvider::new(),
        )
        .with_strategy(Box::new(FixedEvidence(EvidenceKind::Conservation, 0.9)));

        let r = s.score(&q("rs1")).await;
        assert_eq!(r.evidence.conservation, 0.9);
        assert_eq!(s.strategies.len(), 4);
        let kinds: Vec<EvidenceKind> = s.strategies.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, EvidenceKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_custom_weights_and_thresholds() {
        let config = ScoringConfig {
            weights: EvidenceWeights { regulatory: 1.0, functional: 0.0, expression: 0.0, conservation: 0.0 },
            thresholds: PriorityThresholds { high: 0.9, medium: 0.5 },
            ..Default::default()
        };
        let s = EvidenceScorer::new(
            Arc::new(MockVepProvider::new().with("rs1", json!([{ "regulatory_feature_consequences": [] }]))),
            Arc::new(MockCaddProvider::new()),
            Arc::new(MockGtexProvider::new()),
            "Brain_Cortex",
            &config,
        );
        let r = s.score(&q("rs1")).await;
        assert!((r.score - 0.7).abs() < 1e-9);
        assert_eq!(r.priority, Priority::Medium);
    }

    #[test]
    fn test_score_result_serializes_fallback_reason() {
        let r = ScoreResult {
            variant: q("rs1"),
            evidence: EvidenceVector::default(),
            score: 0.0,
            priority: Priority::Low,
            fallbacks: vec![EvidenceFallback {
                kind: EvidenceKind::Functional,
                reason: FallbackReason::FieldMissing("scores".to_string()),
            }],
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["variant"], "rs1");
        assert_eq!(v["priority"], "Low");
        assert_eq!(
            v["fallbacks"][0],
            json!({ "kind": "functional", "reason": "field_missing", "detail": "scores" })
        );
    }
}
