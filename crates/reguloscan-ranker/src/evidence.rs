//! Evidence strategies: one per evidence dimension.
//!
//! Each strategy reads the shared [`AnnotationBundle`] for a variant and
//! yields either an observed value in [0, 1] or a fallback with a reason.
//! The default strategies are presence heuristics:
//!
//! | Dimension | Source | Rule |
//! |-----------|--------|------|
//! | regulatory | VEP | `regulatory_feature_consequences` present → 0.7 |
//! | functional | CADD | raw score min-max normalised over [0, 30] |
//! | expression | VEP + GTEx | any eQTL for the first affected gene → 0.6 |
//! | conservation | VEP | `colocated_variants` present → 0.5 (placeholder) |
//!
//! Replace a strategy through [`EvidenceScorer::with_strategy`](crate::EvidenceScorer::with_strategy)
//! to plug in a real model for that dimension.

use async_trait::async_trait;
use reguloscan_common::{EvidenceKind, ReguloError, VariantQuery};
use reguloscan_sources::{cadd, gtex, vep};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::gtex_provider::GtexProvider;
use crate::normalise::minmax_normalise;

/// Raw upstream responses for one variant. Either response may be the
/// error that replaced it.
#[derive(Debug)]
pub struct AnnotationBundle {
    pub variant: VariantQuery,
    pub vep: Result<Value, ReguloError>,
    pub cadd: Result<Value, ReguloError>,
}

impl AnnotationBundle {
    pub fn vep(&self) -> Result<&Value, FallbackReason> {
        self.vep
            .as_ref()
            .map_err(|e| FallbackReason::source_failed(vep::SERVICE, e))
    }

    pub fn cadd(&self) -> Result<&Value, FallbackReason> {
        self.cadd
            .as_ref()
            .map_err(|e| FallbackReason::source_failed(cadd::SERVICE, e))
    }
}

/// Why an evidence value was defaulted to 0.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Transport, HTTP status or decode failure of an upstream call.
    SourceFailed(String),
    /// The response lacked the field the strategy reads.
    FieldMissing(String),
}

impl FallbackReason {
    pub fn source_failed(service: &str, err: &ReguloError) -> Self {
        FallbackReason::SourceFailed(format!("{}: {}", service, err))
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::SourceFailed(msg) => write!(f, "source failed ({})", msg),
            FallbackReason::FieldMissing(path) => write!(f, "field missing ({})", path),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceOutcome {
    Observed(f64),
    Fallback(FallbackReason),
}

impl EvidenceOutcome {
    /// Value contributed to the evidence vector; fallbacks contribute 0.0.
    pub fn value(&self) -> f64 {
        match self {
            EvidenceOutcome::Observed(v) => *v,
            EvidenceOutcome::Fallback(_) => 0.0,
        }
    }
}

/// A scoring rule for one evidence dimension. Must not panic and must not
/// fail: problems are reported as [`EvidenceOutcome::Fallback`].
#[async_trait]
pub trait EvidenceStrategy: Send + Sync {
    fn kind(&self) -> EvidenceKind;

    async fn evaluate(&self, bundle: &AnnotationBundle) -> EvidenceOutcome;
}

// ── Presence of a VEP marker field ─────────────────────────────────────────

/// Fixed value when a marker key appears anywhere in the VEP response.
///
/// Placeholder used for both regulatory and conservation evidence: it does
/// not grade regulatory strength nor compute phyloP/phastCons.
pub struct MarkerPresenceEvidence {
    kind: EvidenceKind,
    marker: String,
    value: f64,
}

impl MarkerPresenceEvidence {
    pub fn new(kind: EvidenceKind, marker: impl Into<String>, value: f64) -> Self {
        Self { kind, marker: marker.into(), value }
    }

    pub fn regulatory(value: f64) -> Self {
        Self::new(EvidenceKind::Regulatory, "regulatory_feature_consequences", value)
    }

    pub fn conservation(value: f64) -> Self {
        Self::new(EvidenceKind::Conservation, "colocated_variants", value)
    }
}

#[async_trait]
impl EvidenceStrategy for MarkerPresenceEvidence {
    fn kind(&self) -> EvidenceKind {
        self.kind
    }

    async fn evaluate(&self, bundle: &AnnotationBundle) -> EvidenceOutcome {
        match bundle.vep() {
            Ok(resp) if vep::contains_field(resp, &self.marker) => EvidenceOutcome::Observed(self.value),
            Ok(_) => EvidenceOutcome::Observed(0.0),
            Err(reason) => EvidenceOutcome::Fallback(reason),
        }
    }
}

// ── CADD raw score ─────────────────────────────────────────────────────────

/// Functional evidence from the CADD raw score, min-max normalised.
pub struct CaddFunctionalEvidence {
    min: f64,
    max: f64,
}

impl CaddFunctionalEvidence {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Default for CaddFunctionalEvidence {
    fn default() -> Self {
        Self::new(0.0, 30.0)
    }
}

#[async_trait]
impl EvidenceStrategy for CaddFunctionalEvidence {
    fn kind(&self) -> EvidenceKind {
        EvidenceKind::Functional
    }

    async fn evaluate(&self, bundle: &AnnotationBundle) -> EvidenceOutcome {
        let resp = match bundle.cadd() {
            Ok(resp) => resp,
            Err(reason) => return EvidenceOutcome::Fallback(reason),
        };
        if resp.get("scores").is_none() {
            return EvidenceOutcome::Fallback(FallbackReason::FieldMissing("scores".to_string()));
        }
        let variant = bundle.variant.as_str();
        match cadd::raw_score(resp, variant) {
            Some(raw) => {
                debug!(variant, raw, "CADD raw score");
                EvidenceOutcome::Observed(minmax_normalise(Some(raw), self.min, self.max))
            }
            None => EvidenceOutcome::Fallback(FallbackReason::FieldMissing(format!(
                "scores.{}.raw",
                variant
            ))),
        }
    }
}

// ── GTEx eQTL for the affected gene ────────────────────────────────────────

/// Fixed value when GTEx reports any eQTL for the gene VEP names, in one tissue.
pub struct GtexExpressionEvidence {
    provider: Arc<dyn GtexProvider>,
    tissue: String,
    value: f64,
}

impl GtexExpressionEvidence {
    pub fn new(provider: Arc<dyn GtexProvider>, tissue: impl Into<String>, value: f64) -> Self {
        Self { provider, tissue: tissue.into(), value }
    }
}

#[async_trait]
impl EvidenceStrategy for GtexExpressionEvidence {
    fn kind(&self) -> EvidenceKind {
        EvidenceKind::Expression
    }

    async fn evaluate(&self, bundle: &AnnotationBundle) -> EvidenceOutcome {
        let resp = match bundle.vep() {
            Ok(resp) => resp,
            Err(reason) => return EvidenceOutcome::Fallback(reason),
        };
        let Some(gene) = vep::first_gene_symbol(resp) else {
            return EvidenceOutcome::Fallback(FallbackReason::FieldMissing(
                "transcript_consequences[0].gene_symbol".to_string(),
            ));
        };

        match self.provider.single_tissue_eqtl(gene, &self.tissue).await {
            Ok(eqtl) if gtex::has_associations(&eqtl) => {
                debug!(gene, tissue = %self.tissue, "eQTL association found");
                EvidenceOutcome::Observed(self.value)
            }
            Ok(_) => EvidenceOutcome::Observed(0.0),
            Err(e) => EvidenceOutcome::Fallback(FallbackReason::source_failed(gtex::SERVICE, &e)),
        }
    }
}
