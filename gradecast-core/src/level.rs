//! Risk level mapping
//!
//! Global invariants enforced:
//! - Every risk score maps to exactly one level
//! - Level boundaries are half-open on the lower side (strict `<`)
//! - Monotonic: a higher score never maps to a healthier level

use serde::{Deserialize, Serialize};

/// Ordinal risk level, `A` healthiest through `E` worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    A,
    B,
    C,
    D,
    E,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::A => "A",
            RiskLevel::B => "B",
            RiskLevel::C => "C",
            RiskLevel::D => "D",
            RiskLevel::E => "E",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable level breakpoints
///
/// Each field is the lowest score that is NOT in the level below it:
/// scores below `b` are level A, scores below `c` are level B, and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelThresholds {
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        LevelThresholds {
            b: 80.0,
            c: 130.0,
            d: 170.0,
            e: 230.0,
        }
    }
}

/// Map a risk score to its level with default thresholds
pub fn level_for_score(score: f64) -> RiskLevel {
    level_for_score_with_thresholds(score, &LevelThresholds::default())
}

/// Map a risk score to its level with custom thresholds
///
/// First match wins. A NaN score fails every comparison and lands in E.
pub fn level_for_score_with_thresholds(score: f64, thresholds: &LevelThresholds) -> RiskLevel {
    if score < thresholds.b {
        RiskLevel::A
    } else if score < thresholds.c {
        RiskLevel::B
    } else if score < thresholds.d {
        RiskLevel::C
    } else if score < thresholds.e {
        RiskLevel::D
    } else {
        RiskLevel::E
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries_are_half_open() {
        // A boundary score belongs to the level above it, not below
        assert_eq!(level_for_score(79.999), RiskLevel::A);
        assert_eq!(level_for_score(80.0), RiskLevel::B);
        assert_eq!(level_for_score(129.999), RiskLevel::B);
        assert_eq!(level_for_score(130.0), RiskLevel::C);
        assert_eq!(level_for_score(170.0), RiskLevel::D);
        assert_eq!(level_for_score(230.0), RiskLevel::E);
    }

    #[test]
    fn test_extreme_scores() {
        assert_eq!(level_for_score(0.0), RiskLevel::A);
        assert_eq!(level_for_score(-50.0), RiskLevel::A);
        assert_eq!(level_for_score(10_000.0), RiskLevel::E);
        assert_eq!(level_for_score(f64::INFINITY), RiskLevel::E);
    }

    #[test]
    fn test_nan_falls_through_to_e() {
        assert_eq!(level_for_score(f64::NAN), RiskLevel::E);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = LevelThresholds {
            b: 10.0,
            c: 20.0,
            d: 30.0,
            e: 40.0,
        };
        assert_eq!(level_for_score_with_thresholds(5.0, &thresholds), RiskLevel::A);
        assert_eq!(level_for_score_with_thresholds(10.0, &thresholds), RiskLevel::B);
        assert_eq!(level_for_score_with_thresholds(45.0, &thresholds), RiskLevel::E);
    }

    #[test]
    fn test_monotonic_over_sweep() {
        let mut previous = RiskLevel::A;
        for i in 0..3000 {
            let level = level_for_score(i as f64 / 10.0);
            assert!(level >= previous, "level must never improve as score grows");
            previous = level;
        }
    }
}
