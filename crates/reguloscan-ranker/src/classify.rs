//! Priority tier assignment.

use reguloscan_common::Priority;
use serde::{Deserialize, Serialize};

/// Lower bounds (inclusive) of the High and Medium tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self { high: 0.7, medium: 0.4 }
    }
}

impl PriorityThresholds {
    /// Requires `0 <= medium <= high <= 1`.
    pub fn validate(&self) -> bool {
        (0.0..=1.0).contains(&self.medium)
            && (0.0..=1.0).contains(&self.high)
            && self.medium <= self.high
    }

    /// Step function: `>= high` is High, `>= medium` is Medium, anything else
    /// (including NaN) is Low.
    pub fn classify(&self, score: f64) -> Priority {
        if score >= self.high {
            Priority::High
        } else if score >= self.medium {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let t = PriorityThresholds::default();
        assert_eq!(t.classify(0.7), Priority::High);
        assert_eq!(t.classify(0.69999), Priority::Medium);
        assert_eq!(t.classify(0.4), Priority::Medium);
        assert_eq!(t.classify(0.39999), Priority::Low);
    }

    #[test]
    fn test_extremes() {
        let t = PriorityThresholds::default();
        assert_eq!(t.classify(1.0), Priority::High);
        assert_eq!(t.classify(0.0), Priority::Low);
        assert_eq!(t.classify(f64::NAN), Priority::Low);
    }

    #[test]
    fn test_validate() {
        assert!(PriorityThresholds::default().validate());
        assert!(!PriorityThresholds { high: 0.3, medium: 0.4 }.validate());
        assert!(!PriorityThresholds { high: 1.2, medium: 0.4 }.validate());
        assert!(!PriorityThresholds { high: 0.7, medium: f64::NAN }.validate());
    }

    #[test]
    fn test_custom_thresholds() {
        let t = PriorityThresholds { high: 0.5, medium: 0.2 };
        assert_eq!(t.classify(0.5), Priority::High);
        assert_eq!(t.classify(0.2), Priority::Medium);
        assert_eq!(t.classify(0.19), Priority::Low);
    }
}
