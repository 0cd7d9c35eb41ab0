//! Core domain entities shared between the sources, ranker and CLI crates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReguloError, Result};

/// Opaque variant identifier, e.g. a dbSNP accession such as `rs1625579`.
///
/// The only validation applied is that the identifier is non-empty once
/// surrounding whitespace is trimmed; format is left to the upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantQuery(String);

impl VariantQuery {
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReguloError::InvalidVariant(
                "variant identifier must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VariantQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VariantQuery {
    type Error = ReguloError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<VariantQuery> for String {
    fn from(value: VariantQuery) -> Self {
        value.0
    }
}

/// One of the four independent evidence dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Regulatory,
    Functional,
    Expression,
    Conservation,
}

impl EvidenceKind {
    /// All dimensions, in the canonical column order.
    pub const ALL: [EvidenceKind; 4] = [
        EvidenceKind::Regulatory,
        EvidenceKind::Functional,
        EvidenceKind::Expression,
        EvidenceKind::Conservation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceKind::Regulatory => "regulatory",
            EvidenceKind::Functional => "functional",
            EvidenceKind::Expression => "expression",
            EvidenceKind::Conservation => "conservation",
        }
    }

    fn index(&self) -> usize {
        match self {
            EvidenceKind::Regulatory => 0,
            EvidenceKind::Functional => 1,
            EvidenceKind::Expression => 2,
            EvidenceKind::Conservation => 3,
        }
    }
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence values for one variant. Every component is kept in [0.0, 1.0].
///
/// Deserialisation rejects components outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawEvidenceVector")]
pub struct EvidenceVector {
    pub regulatory: f64,
    pub functional: f64,
    pub expression: f64,
    pub conservation: f64,
}

#[derive(Deserialize)]
struct RawEvidenceVector {
    regulatory: f64,
    functional: f64,
    expression: f64,
    conservation: f64,
}

impl TryFrom<RawEvidenceVector> for EvidenceVector {
    type Error = String;

    fn try_from(raw: RawEvidenceVector) -> std::result::Result<Self, Self::Error> {
        let v = EvidenceVector {
            regulatory: raw.regulatory,
            functional: raw.functional,
            expression: raw.expression,
            conservation: raw.conservation,
        };
        for (kind, value) in EvidenceKind::ALL.iter().zip(v.as_array()) {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} evidence must be within [0, 1], got {}", kind, value));
            }
        }
        Ok(v)
    }
}

impl EvidenceVector {
    /// Return a copy with `kind` set to `value`, clamped into [0, 1].
    /// Non-finite values collapse to 0.0.
    pub fn with(mut self, kind: EvidenceKind, value: f64) -> Self {
        let value = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
        match kind {
            EvidenceKind::Regulatory => self.regulatory = value,
            EvidenceKind::Functional => self.functional = value,
            EvidenceKind::Expression => self.expression = value,
            EvidenceKind::Conservation => self.conservation = value,
        }
        self
    }

    pub fn get(&self, kind: EvidenceKind) -> f64 {
        self.as_array()[kind.index()]
    }

    /// Convert to array for iteration, ordered as [`EvidenceKind::ALL`].
    pub fn as_array(&self) -> [f64; 4] {
        [self.regulatory, self.functional, self.expression, self.conservation]
    }
}

/// Priority tier assigned from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_query_trims_and_rejects_empty() {
        let q = VariantQuery::new("  rs1625579 ").unwrap();
        assert_eq!(q.as_str(), "rs1625579");
        assert!(VariantQuery::new("").is_err());
        assert!(VariantQuery::new("   ").is_err());
    }

    #[test]
    fn test_variant_query_deserialize_validates() {
        let ok: VariantQuery = serde_json::from_str("\"rs123\"").unwrap();
        assert_eq!(ok.to_string(), "rs123");
        assert!(serde_json::from_str::<VariantQuery>("\"\"").is_err());
    }

    #[test]
    fn test_evidence_vector_clamps() {
        let v = EvidenceVector::default()
            .with(EvidenceKind::Functional, 1.7)
            .with(EvidenceKind::Regulatory, -0.2)
            .with(EvidenceKind::Expression, f64::NAN);
        assert_eq!(v.functional, 1.0);
        assert_eq!(v.regulatory, 0.0);
        assert_eq!(v.expression, 0.0);
    }

    #[test]
    fn test_evidence_vector_get_matches_fields() {
        let v = EvidenceVector::default()
            .with(EvidenceKind::Conservation, 0.5)
            .with(EvidenceKind::Regulatory, 0.7);
        assert_eq!(v.get(EvidenceKind::Conservation), 0.5);
        assert_eq!(v.get(EvidenceKind::Regulatory), 0.7);
        assert_eq!(v.as_array(), [0.7, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_evidence_vector_deserialize_rejects_out_of_range() {
        let ok: EvidenceVector = serde_json::from_str(
            r#"{"regulatory":0.7,"functional":1.0,"expression":0.0,"conservation":0.5}"#,
        )
        .unwrap();
        assert_eq!(ok.as_array(), [0.7, 1.0, 0.0, 0.5]);

        let err = serde_json::from_str::<EvidenceVector>(
            r#"{"regulatory":0.7,"functional":1.5,"expression":0.0,"conservation":0.5}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("functional"), "{}", err);

        assert!(serde_json::from_str::<EvidenceVector>(
            r#"{"regulatory":-0.1,"functional":0.0,"expression":0.0,"conservation":0.0}"#,
        )
        .is_err());
    }

    #[test]
    fn test_evidence_kind_serializes_lowercase() {
        let s = serde_json::to_string(&EvidenceKind::Conservation).unwrap();
        assert_eq!(s, "\"conservation\"");
    }
}
