//! Trend summaries — a fixed-width sparkline and a qualitative direction,
//! derived fresh from the current window on every query.

use std::fmt;

use serde::Serialize;

use crate::usage::window::SampleWindow;

/// Maximum number of adjacent-pair rates fed into a trend summary
const MAX_TREND_POINTS: usize = 12;

/// Minimum points required before a direction other than Steady is claimed
const MIN_DIRECTION_POINTS: usize = 4;

/// Placeholder shown while the window has no derivable pair yet
const COLLECTING_PLACEHOLDER: &str = "collecting data";

/// Density ramp, lowest to highest. 10 levels.
const DENSITY_RAMP: [char; 10] = [' ', '·', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Qualitative direction of the recent burn rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TrendDirection {
    Rising,
    #[default]
    Steady,
    Falling,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Steady => "steady",
            TrendDirection::Falling => "falling",
        };
        write!(f, "{}", label)
    }
}

/// Per-interval tokens/minute rates for up to the last [`MAX_TREND_POINTS`]
/// adjacent sample pairs, oldest first. Pairs with a non-positive interval
/// are skipped. Recomputed fresh on every call, never cached.
pub fn pair_rates(window: &SampleWindow) -> Vec<f64> {
    let samples: Vec<_> = window.iter().collect();
    let mut rates: Vec<f64> = samples
        .windows(2)
        .filter_map(|pair| {
            let interval_secs =
                (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 1000.0;
            if interval_secs <= 0.0 {
                return None;
            }
            let delta = pair[1].total_tokens.saturating_sub(pair[0].total_tokens);
            Some(delta as f64 / interval_secs * 60.0)
        })
        .collect();

    let start = rates.len().saturating_sub(MAX_TREND_POINTS);
    rates.drain(..start);
    rates
}

/// Render a rate sequence as a sparkline, one glyph per point.
///
/// Each point is normalized against the peak of the sequence (floored at 1
/// to avoid division by zero) and quantized onto [`DENSITY_RAMP`]. An empty
/// sequence yields the "collecting data" placeholder.
pub fn sparkline_of(rates: &[f64]) -> String {
    if rates.is_empty() {
        return COLLECTING_PLACEHOLDER.to_string();
    }
    let peak = rates.iter().fold(0.0_f64, |acc, r| acc.max(*r)).max(1.0);
    rates
        .iter()
        .map(|r| {
            let norm = (r / peak).clamp(0.0, 1.0);
            let idx = (norm * (DENSITY_RAMP.len() - 1) as f64).round() as usize;
            DENSITY_RAMP[idx.min(DENSITY_RAMP.len() - 1)]
        })
        .collect()
}

/// Compare the older half of the sequence against the newer half.
///
/// Fewer than [`MIN_DIRECTION_POINTS`] points is always Steady. The dead
/// band is `max(50, 20% of the older average)` tokens/minute, so a quiet
/// source does not flap between directions on noise.
pub fn direction_of(rates: &[f64]) -> TrendDirection {
    if rates.len() < MIN_DIRECTION_POINTS {
        return TrendDirection::Steady;
    }
    let mid = rates.len() / 2;
    let older_avg = rates[..mid].iter().sum::<f64>() / mid as f64;
    let newer_avg = rates[mid..].iter().sum::<f64>() / (rates.len() - mid) as f64;

    let threshold = (older_avg * 0.2).max(50.0);
    let delta = newer_avg - older_avg;
    if delta > threshold {
        TrendDirection::Rising
    } else if delta < -threshold {
        TrendDirection::Falling
    } else {
        TrendDirection::Steady
    }
}
