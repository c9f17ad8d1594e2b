//! Read-only query methods on [`BurnbarCore`].
//!
//! Every method acquires a read lock internally, clones out owned values,
//! and releases the lock before returning. Callers never hold a lock.

use crate::source::SourceKind;
use crate::usage::rate::{CostRate, Rate};
use crate::usage::tier::Thresholds;
use crate::usage::trend::{self, TrendDirection};

use super::core::BurnbarCore;
use super::types::SourceRateSnapshot;

impl BurnbarCore {
    /// The most recently published rate for a source, if any.
    pub fn rate(&self, source: &SourceKind) -> Option<Rate> {
        let state = self.state().read();
        state.record(source).and_then(|r| r.rate)
    }

    /// The current cost rate for a source.
    ///
    /// Unavailable both for unknown sources and for sources whose window
    /// endpoints cannot support a cost delta.
    pub fn cost_rate(&self, source: &SourceKind) -> CostRate {
        let state = self.state().read();
        state
            .record(source)
            .map(|r| r.cost_rate)
            .unwrap_or_default()
    }

    /// Sparkline over the source's current window, recomputed fresh.
    ///
    /// Returns the "collecting data" placeholder until the window holds a
    /// derivable sample pair.
    pub fn sparkline(&self, source: &SourceKind) -> String {
        let rates = {
            let state = self.state().read();
            state
                .record(source)
                .map(|r| trend::pair_rates(&r.window))
                .unwrap_or_default()
        };
        trend::sparkline_of(&rates)
    }

    /// Qualitative trend direction over the source's current window.
    pub fn trend_direction(&self, source: &SourceKind) -> TrendDirection {
        let rates = {
            let state = self.state().read();
            state
                .record(source)
                .map(|r| trend::pair_rates(&r.window))
                .unwrap_or_default()
        };
        trend::direction_of(&rates)
    }

    /// Full owned snapshot for one source, or `None` if it has no record.
    pub fn snapshot(&self, source: &SourceKind) -> Option<SourceRateSnapshot> {
        let state = self.state().read();
        state.record(source).map(|record| {
            let rates = trend::pair_rates(&record.window);
            SourceRateSnapshot {
                source: source.clone(),
                rate: record.rate,
                cost_rate: record.cost_rate,
                sparkline: trend::sparkline_of(&rates),
                trend: trend::direction_of(&rates),
                updated_at: record.updated_at,
            }
        })
    }

    /// Snapshots for every registry source, in registry (display) order.
    ///
    /// Sources without a record yet are included with empty values so the
    /// display layer always sees a stable list.
    pub fn snapshots(&self) -> Vec<SourceRateSnapshot> {
        let sources = self.registry().sources();
        let state = self.state().read();
        sources
            .into_iter()
            .map(|source| match state.record(&source) {
                Some(record) => {
                    let rates = trend::pair_rates(&record.window);
                    SourceRateSnapshot {
                        source,
                        rate: record.rate,
                        cost_rate: record.cost_rate,
                        sparkline: trend::sparkline_of(&rates),
                        trend: trend::direction_of(&rates),
                        updated_at: record.updated_at,
                    }
                }
                None => SourceRateSnapshot {
                    source,
                    rate: None,
                    cost_rate: CostRate::Unavailable,
                    sparkline: trend::sparkline_of(&[]),
                    trend: TrendDirection::Steady,
                    updated_at: None,
                },
            })
            .collect()
    }

    /// Thresholds currently in effect
    pub fn thresholds(&self) -> Thresholds {
        self.state().read().thresholds()
    }

    /// Monotonic change token; bumped by every observable mutation.
    pub fn version(&self) -> u64 {
        self.state().read().version()
    }
}
