//! Per-source tracker state — the single record everything composes around.
//!
//! One [`TrackerState`] behind a `parking_lot::RwLock` holds every source's
//! window and published values. Writers hold the lock only for the
//! synchronous ingest→rate→publish step of a cycle, so readers never
//! observe a half-updated `Rate`/`CostRate` pair. Every observable mutation
//! bumps a version counter, giving hosts a cheap change token to poll in
//! addition to the broadcast events.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::source::SourceKind;
use crate::usage::rate::{self, CostRate, Rate, RateUpdate};
use crate::usage::sample::Sample;
use crate::usage::tier::Thresholds;
use crate::usage::window::SampleWindow;

/// Shared state type alias
pub type SharedState = Arc<RwLock<TrackerState>>;

/// Everything tracked for one source.
///
/// Created lazily on the source's first eligible cycle, destroyed on
/// clear, never shared across sources.
#[derive(Debug, Default)]
pub struct SourceRecord {
    /// Sliding window of recent samples
    pub window: SampleWindow,
    /// Most recently published rate (`None` until the first cycle lands)
    pub rate: Option<Rate>,
    /// Most recently published cost rate
    pub cost_rate: CostRate,
    /// When the record last changed
    pub updated_at: Option<DateTime<Utc>>,
}

/// Root state for all tracked sources.
#[derive(Debug)]
pub struct TrackerState {
    records: HashMap<SourceKind, SourceRecord>,
    thresholds: Thresholds,
    version: u64,
}

impl TrackerState {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            records: HashMap::new(),
            thresholds,
            version: 0,
        }
    }

    /// Create a shared (thread-safe) state instance
    pub fn shared(thresholds: Thresholds) -> SharedState {
        Arc::new(RwLock::new(Self::new(thresholds)))
    }

    /// Monotonic change token; bumped by every observable mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Look up a source's record, if one exists
    pub fn record(&self, source: &SourceKind) -> Option<&SourceRecord> {
        self.records.get(source)
    }

    /// Ingest a fresh sample for a source and publish the resulting rate.
    ///
    /// Runs the whole synchronous tail of a cycle under one borrow:
    /// window ingest → eviction → rate derivation → publish. Returns the
    /// update that was applied; [`RateUpdate::Skip`] leaves the previous
    /// published values untouched and does not bump the version.
    pub fn ingest(
        &mut self,
        source: &SourceKind,
        sample: Sample,
        window_duration: Duration,
    ) -> RateUpdate {
        let thresholds = self.thresholds;
        let now = Utc::now();

        let record = self.records.entry(source.clone()).or_default();
        record.window.ingest(sample);
        record.window.evict(window_duration);

        let update = rate::compute(&record.window, &thresholds, now);
        match update {
            RateUpdate::Publish { rate, cost_rate } => {
                record.rate = Some(rate);
                record.cost_rate = cost_rate;
                record.updated_at = Some(now);
                self.version += 1;
            }
            RateUpdate::Idle { rate } => {
                record.rate = Some(rate);
                record.cost_rate = CostRate::Unavailable;
                record.updated_at = Some(now);
                self.version += 1;
            }
            RateUpdate::Skip => {
                debug!(source = %source, "non-positive sample interval, keeping previous rate");
            }
        }
        update
    }

    /// Whether a rate has ever been published for this source
    pub fn has_rate(&self, source: &SourceKind) -> bool {
        self.records
            .get(source)
            .is_some_and(|r| r.rate.is_some())
    }

    /// Destroy all per-source state. Returns whether a record existed.
    pub fn clear(&mut self, source: &SourceKind) -> bool {
        let removed = self.records.remove(source).is_some();
        if removed {
            info!(source = %source, "cleared source state");
            self.version += 1;
        }
        removed
    }

    /// Install new thresholds and reclassify every cached rate against them.
    ///
    /// Only the `tier` field of each published rate changes; magnitudes and
    /// windows are untouched. Independent of the sampling cadence — no new
    /// sample is needed for the display to follow a threshold edit.
    pub fn remap_all(&mut self, mut thresholds: Thresholds) {
        thresholds.normalize();
        self.thresholds = thresholds;
        for record in self.records.values_mut() {
            if let Some(rate) = record.rate.as_mut() {
                rate.tier = thresholds.tier(rate.tokens_per_minute);
            }
        }
        self.version += 1;
        info!(
            medium = thresholds.medium_tok_per_min,
            high = thresholds.high_tok_per_min,
            burning = thresholds.burning_tok_per_min,
            "thresholds changed, remapped cached tiers"
        );
    }
}
