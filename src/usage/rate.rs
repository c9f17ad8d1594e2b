//! Rate derivation — turning the window's endpoints into a published
//! tokens/minute rate and an optional cost-per-hour estimate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::usage::tier::{Thresholds, Tier};
use crate::usage::window::SampleWindow;

/// The published burn rate for one source.
///
/// Replaces, never merges with, the previously published value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rate {
    /// Total tokens consumed per minute
    pub tokens_per_minute: f64,
    /// Input-side tokens per minute
    pub input_rate: f64,
    /// Output-side tokens per minute
    pub output_rate: f64,
    /// Tier classification of `tokens_per_minute`
    pub tier: Tier,
    /// Seconds between the oldest and newest sample used
    pub sample_interval: f64,
    /// When this rate was computed
    pub timestamp: DateTime<Utc>,
}

impl Rate {
    /// The rate published for a source whose window cannot support a
    /// derivation (fewer than two samples).
    pub fn idle(now: DateTime<Utc>) -> Self {
        Self {
            tokens_per_minute: 0.0,
            input_rate: 0.0,
            output_rate: 0.0,
            tier: Tier::Idle,
            sample_interval: 0.0,
            timestamp: now,
        }
    }
}

/// Estimated spend rate in USD per hour.
///
/// An explicit two-variant type rather than an `Option` so every consumer
/// handles the unavailable case; it is unavailable whenever either window
/// endpoint lacks a cost or the cost regressed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum CostRate {
    #[default]
    Unavailable,
    PerHour(f64),
}

impl CostRate {
    pub fn is_available(&self) -> bool {
        matches!(self, CostRate::PerHour(_))
    }

    pub fn per_hour(&self) -> Option<f64> {
        match self {
            CostRate::Unavailable => None,
            CostRate::PerHour(v) => Some(*v),
        }
    }
}

/// Outcome of one rate derivation, applied to the state store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateUpdate {
    /// A fresh rate (and cost rate) to publish
    Publish { rate: Rate, cost_rate: CostRate },
    /// The window is too thin; publish an explicit idle rate
    Idle { rate: Rate },
    /// Non-positive sample interval; leave the previous values untouched
    Skip,
}

/// Derive the current rate from the post-eviction window.
///
/// - Fewer than two samples: the source is idle.
/// - Zero or negative interval between the endpoints (duplicate or
///   out-of-order timestamps): skip this cycle entirely.
/// - Otherwise: clamped counter deltas over the endpoint interval, scaled
///   to per-minute; cost delta scaled to per-hour when both endpoints
///   carry a non-decreasing cost.
pub fn compute(window: &SampleWindow, thresholds: &Thresholds, now: DateTime<Utc>) -> RateUpdate {
    let (Some(oldest), Some(newest)) = (window.oldest(), window.newest()) else {
        return RateUpdate::Idle { rate: Rate::idle(now) };
    };
    if window.len() < 2 {
        return RateUpdate::Idle { rate: Rate::idle(now) };
    }

    let interval_secs = (newest.timestamp - oldest.timestamp).num_milliseconds() as f64 / 1000.0;
    if interval_secs <= 0.0 {
        return RateUpdate::Skip;
    }

    // Deltas are clamped even though resets are handled upstream.
    let delta_total = newest.total_tokens.saturating_sub(oldest.total_tokens);
    let delta_input = newest.input_tokens.saturating_sub(oldest.input_tokens);
    let delta_output = newest.output_tokens.saturating_sub(oldest.output_tokens);

    let tokens_per_minute = delta_total as f64 / interval_secs * 60.0;
    let rate = Rate {
        tokens_per_minute,
        input_rate: delta_input as f64 / interval_secs * 60.0,
        output_rate: delta_output as f64 / interval_secs * 60.0,
        tier: thresholds.tier(tokens_per_minute),
        sample_interval: interval_secs,
        timestamp: newest.timestamp,
    };

    let cost_rate = match (oldest.cost_usd, newest.cost_usd) {
        (Some(c0), Some(c1)) if c1 >= c0 => CostRate::PerHour((c1 - c0) / interval_secs * 3600.0),
        _ => CostRate::Unavailable,
    };

    RateUpdate::Publish { rate, cost_rate }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::sample::Sample;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample(secs: i64, total: u64, input: u64, output: u64, cost: Option<f64>) -> Sample {
        Sample {
            total_tokens: total,
            input_tokens: input,
            output_tokens: output,
            cost_usd: cost,
            timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    fn window_of(samples: &[Sample]) -> SampleWindow {
        let mut w = SampleWindow::new();
        for s in samples {
            w.ingest(*s);
        }
        w
    }

    #[test]
    fn test_rate_is_exact_for_two_samples() {
        let w = window_of(&[
            sample(0, 0, 0, 0, None),
            sample(60, 1_000, 600, 400, None),
        ]);
        let update = compute(&w, &Thresholds::default(), Utc::now());
        let RateUpdate::Publish { rate, .. } = update else {
            panic!("expected publish, got {:?}", update);
        };
        assert_eq!(rate.tokens_per_minute, 1_000.0);
        assert_eq!(rate.input_rate, 600.0);
        assert_eq!(rate.output_rate, 400.0);
        assert_eq!(rate.sample_interval, 60.0);
    }

    #[test]
    fn test_boundary_rate_classifies_upward() {
        // 1000 tok/min against medium=1000 is already Medium.
        let w = window_of(&[sample(0, 0, 0, 0, None), sample(60, 1_000, 600, 400, None)]);
        let RateUpdate::Publish { rate, .. } = compute(&w, &Thresholds::default(), Utc::now())
        else {
            panic!("expected publish");
        };
        assert_eq!(rate.tier, Tier::Medium);
    }

    #[test]
    fn test_thin_window_is_idle() {
        let now = Utc::now();
        let w = window_of(&[sample(0, 500, 300, 200, None)]);
        let RateUpdate::Idle { rate } = compute(&w, &Thresholds::default(), now) else {
            panic!("expected idle");
        };
        assert_eq!(rate.tokens_per_minute, 0.0);
        assert_eq!(rate.tier, Tier::Idle);
        assert_eq!(rate.sample_interval, 0.0);
        assert_eq!(rate.timestamp, now);
    }

    #[test]
    fn test_empty_window_is_idle() {
        let w = SampleWindow::new();
        assert!(matches!(
            compute(&w, &Thresholds::default(), Utc::now()),
            RateUpdate::Idle { .. }
        ));
    }

    #[test]
    fn test_zero_interval_skips() {
        let w = window_of(&[sample(0, 0, 0, 0, None), sample(0, 1_000, 600, 400, None)]);
        assert_eq!(
            compute(&w, &Thresholds::default(), Utc::now()),
            RateUpdate::Skip
        );
    }

    #[test]
    fn test_cost_rate_from_two_cost_bearing_samples() {
        let w = window_of(&[
            sample(0, 0, 0, 0, Some(0.10)),
            sample(60, 1_000, 600, 400, Some(0.22)),
        ]);
        let RateUpdate::Publish { cost_rate, .. } =
            compute(&w, &Thresholds::default(), Utc::now())
        else {
            panic!("expected publish");
        };
        let per_hour = cost_rate.per_hour().unwrap();
        assert!((per_hour - 7.20).abs() < 1e-9);
    }

    #[test]
    fn test_cost_rate_unavailable_when_endpoint_missing_cost() {
        let w = window_of(&[
            sample(0, 0, 0, 0, None),
            sample(60, 1_000, 600, 400, Some(0.22)),
        ]);
        let RateUpdate::Publish { cost_rate, .. } =
            compute(&w, &Thresholds::default(), Utc::now())
        else {
            panic!("expected publish");
        };
        assert_eq!(cost_rate, CostRate::Unavailable);
    }

    #[test]
    fn test_cost_rate_unavailable_on_regressing_cost() {
        let w = window_of(&[
            sample(0, 0, 0, 0, Some(0.30)),
            sample(60, 1_000, 600, 400, Some(0.22)),
        ]);
        let RateUpdate::Publish { cost_rate, .. } =
            compute(&w, &Thresholds::default(), Utc::now())
        else {
            panic!("expected publish");
        };
        assert_eq!(cost_rate, CostRate::Unavailable);
    }
}
