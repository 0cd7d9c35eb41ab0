//! reguloscan-ranker: Variant evidence scoring engine.
//!
//! Fetches annotations through the provider traits, derives one evidence
//! value per [`EvidenceKind`](reguloscan_common::EvidenceKind) through a
//! pluggable [`EvidenceStrategy`](evidence::EvidenceStrategy), blends them
//! with configured weights and assigns a priority tier.

pub mod scorer;
pub mod evidence;
pub mod normalise;
pub mod weights;
pub mod classify;
pub mod config;
pub mod summary;
pub mod vep_provider;
pub mod cadd_provider;
pub mod gtex_provider;

pub use classify::PriorityThresholds;
pub use config::{HeuristicConfig, ScoringConfig};
pub use evidence::{AnnotationBundle, EvidenceOutcome, EvidenceStrategy, FallbackReason};
pub use scorer::{EvidenceFallback, EvidenceScorer, ScoreResult};
pub use summary::BatchSummary;
pub use weights::EvidenceWeights;
