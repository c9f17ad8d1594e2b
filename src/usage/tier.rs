//! Tier classification — mapping a tokens/minute value onto a small ordered
//! ladder of visual tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete visual classification of a burn rate, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Idle,
    Low,
    Medium,
    High,
    Burning,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Idle => "idle",
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
            Tier::Burning => "burning",
        };
        write!(f, "{}", label)
    }
}

/// Tier boundaries in tokens/minute.
///
/// Must be strictly increasing with a floor of 1; [`Thresholds::normalize`]
/// repairs out-of-range values instead of rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Rates at or above this are at least Medium
    #[serde(default = "default_medium")]
    pub medium_tok_per_min: f64,
    /// Rates at or above this are at least High
    #[serde(default = "default_high")]
    pub high_tok_per_min: f64,
    /// Rates at or above this are Burning
    #[serde(default = "default_burning")]
    pub burning_tok_per_min: f64,
}

fn default_medium() -> f64 {
    1_000.0
}

fn default_high() -> f64 {
    10_000.0
}

fn default_burning() -> f64 {
    50_000.0
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            medium_tok_per_min: default_medium(),
            high_tok_per_min: default_high(),
            burning_tok_per_min: default_burning(),
        }
    }
}

impl Thresholds {
    /// Classify a tokens/minute value.
    ///
    /// A rate exactly equal to a threshold belongs to the tier above it:
    /// "Low" is everything below `medium`, so `rate == medium` is already
    /// Medium. A rate of exactly zero is Idle regardless of thresholds.
    pub fn tier(&self, tokens_per_minute: f64) -> Tier {
        if tokens_per_minute == 0.0 {
            Tier::Idle
        } else if tokens_per_minute < self.medium_tok_per_min {
            Tier::Low
        } else if tokens_per_minute < self.high_tok_per_min {
            Tier::Medium
        } else if tokens_per_minute < self.burning_tok_per_min {
            Tier::High
        } else {
            Tier::Burning
        }
    }

    /// Repair the thresholds in place: floor each at 1, then bump each upper
    /// bound until it strictly exceeds the one below.
    pub fn normalize(&mut self) {
        const MIN_THRESHOLD: f64 = 1.0;

        if !self.medium_tok_per_min.is_finite() || self.medium_tok_per_min < MIN_THRESHOLD {
            self.medium_tok_per_min = MIN_THRESHOLD;
        }
        if !self.high_tok_per_min.is_finite() || self.high_tok_per_min <= self.medium_tok_per_min {
            self.high_tok_per_min = self.medium_tok_per_min + 1.0;
        }
        if !self.burning_tok_per_min.is_finite()
            || self.burning_tok_per_min <= self.high_tok_per_min
        {
            self.burning_tok_per_min = self.high_tok_per_min + 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_is_idle() {
        let t = Thresholds::default();
        assert_eq!(t.tier(0.0), Tier::Idle);
    }

    #[test]
    fn test_ladder() {
        let t = Thresholds::default();
        assert_eq!(t.tier(0.5), Tier::Low);
        assert_eq!(t.tier(999.9), Tier::Low);
        assert_eq!(t.tier(5_000.0), Tier::Medium);
        assert_eq!(t.tier(20_000.0), Tier::High);
        assert_eq!(t.tier(100_000.0), Tier::Burning);
    }

    #[test]
    fn test_boundary_belongs_to_higher_tier() {
        let t = Thresholds::default();
        assert_eq!(t.tier(1_000.0), Tier::Medium);
        assert_eq!(t.tier(10_000.0), Tier::High);
        assert_eq!(t.tier(50_000.0), Tier::Burning);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Idle < Tier::Low);
        assert!(Tier::High < Tier::Burning);
    }

    #[test]
    fn test_normalize_floors_and_orders() {
        let mut t = Thresholds {
            medium_tok_per_min: 0.0,
            high_tok_per_min: 0.5,
            burning_tok_per_min: 0.5,
        };
        t.normalize();
        assert_eq!(t.medium_tok_per_min, 1.0);
        assert!(t.high_tok_per_min > t.medium_tok_per_min);
        assert!(t.burning_tok_per_min > t.high_tok_per_min);
    }

    #[test]
    fn test_normalize_keeps_valid_values() {
        let mut t = Thresholds::default();
        let before = t;
        t.normalize();
        assert_eq!(t, before);
    }
}
