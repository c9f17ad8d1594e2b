//! The sliding sample window — a per-source, time-bounded, timestamp-ordered
//! buffer of recent observations.
//!
//! The window is the crate's only history. It detects counter restarts on
//! ingest (a session boundary shows up as cumulative counters going
//! backwards) and evicts entries older than the window bound after every
//! ingest, so rate derivation only ever sees a consistent monotone run.

use chrono::Duration;
use std::collections::VecDeque;
use tracing::debug;

use crate::usage::sample::Sample;

/// Time-bounded, timestamp-ascending sequence of [`Sample`]s.
///
/// Mutated only through [`ingest`](Self::ingest) and
/// [`evict`](Self::evict); never contains a sample older than
/// `newest.timestamp - window_duration` once evicted.
#[derive(Debug, Clone, Default)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
}

impl SampleWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, resetting the window first if any cumulative
    /// counter went backwards.
    ///
    /// A regression in total, input or output means the underlying counters
    /// restarted (e.g. a new session); the old samples describe a different
    /// epoch and would produce a huge negative delta, so the whole window is
    /// discarded and the new sample becomes its sole member.
    pub fn ingest(&mut self, sample: Sample) {
        if let Some(last) = self.samples.back() {
            let regressed = sample.total_tokens < last.total_tokens
                || sample.input_tokens < last.input_tokens
                || sample.output_tokens < last.output_tokens;
            if regressed {
                debug!(
                    dropped = self.samples.len(),
                    "counter reset detected, restarting window"
                );
                self.samples.clear();
            }
        }
        self.samples.push_back(sample);
    }

    /// Drop every sample older than `newest.timestamp - window_duration`.
    ///
    /// The cutoff is anchored at the newest sample, not wall clock, so a
    /// quiet period does not silently empty the window between cycles —
    /// stale samples fall out when the next one arrives.
    pub fn evict(&mut self, window_duration: Duration) {
        let Some(newest) = self.samples.back() else {
            return;
        };
        let cutoff = newest.timestamp - window_duration;
        while let Some(front) = self.samples.front() {
            if front.timestamp < cutoff {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Oldest sample in the window, if any
    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    /// Newest sample in the window, if any
    pub fn newest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate samples oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_at(secs: i64, total: u64, input: u64, output: u64) -> Sample {
        Sample {
            total_tokens: total,
            input_tokens: input,
            output_tokens: output,
            cost_usd: None,
            timestamp: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_ingest_keeps_order() {
        let mut w = SampleWindow::new();
        w.ingest(sample_at(0, 100, 60, 40));
        w.ingest(sample_at(10, 200, 120, 80));
        assert_eq!(w.len(), 2);
        assert_eq!(w.oldest().unwrap().total_tokens, 100);
        assert_eq!(w.newest().unwrap().total_tokens, 200);
    }

    #[test]
    fn test_total_regression_resets_window() {
        let mut w = SampleWindow::new();
        w.ingest(sample_at(0, 500, 300, 200));
        w.ingest(sample_at(10, 600, 350, 250));
        w.ingest(sample_at(20, 50, 30, 20));
        assert_eq!(w.len(), 1);
        assert_eq!(w.newest().unwrap().total_tokens, 50);
    }

    #[test]
    fn test_any_counter_regression_resets() {
        // Total grows but output shrinks: still a reset.
        let mut w = SampleWindow::new();
        w.ingest(sample_at(0, 500, 300, 200));
        w.ingest(sample_at(10, 600, 500, 100));
        assert_eq!(w.len(), 1);
        assert_eq!(w.newest().unwrap().output_tokens, 100);
    }

    #[test]
    fn test_equal_counters_do_not_reset() {
        let mut w = SampleWindow::new();
        w.ingest(sample_at(0, 500, 300, 200));
        w.ingest(sample_at(10, 500, 300, 200));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_evict_drops_stale_samples() {
        let mut w = SampleWindow::new();
        w.ingest(sample_at(0, 100, 60, 40));
        w.ingest(sample_at(30, 200, 120, 80));
        w.ingest(sample_at(90, 300, 180, 120));
        w.evict(Duration::seconds(60));
        assert_eq!(w.len(), 2);
        assert_eq!(w.oldest().unwrap().total_tokens, 200);
    }

    #[test]
    fn test_evict_keeps_sample_exactly_at_cutoff() {
        let mut w = SampleWindow::new();
        w.ingest(sample_at(0, 100, 60, 40));
        w.ingest(sample_at(60, 200, 120, 80));
        w.evict(Duration::seconds(60));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_evict_on_empty_window() {
        let mut w = SampleWindow::new();
        w.evict(Duration::seconds(60));
        assert!(w.is_empty());
    }
}
