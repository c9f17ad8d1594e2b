//! The refresh coordinator — gates one compute cycle at a time per source
//! and decides how a cycle's outcome lands in the state store.
//!
//! Single-writer discipline: each source has one async gate; a trigger that
//! finds the gate held is dropped, never queued, so no backlog accumulates
//! behind a slow fetch. Only the fetch await runs while holding just the
//! gate; the synchronous tail of the cycle runs under one state write lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::pricing;
use crate::source::SourceKind;
use crate::state::SharedState;
use crate::usage::fetcher::{SourceRegistry, UsageFetcher};
use crate::usage::rate::RateUpdate;
use crate::usage::sample::Sample;

/// What a single refresh trigger resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fresh rate (possibly idle) was published
    Published,
    /// The sample had a non-positive interval; previous values kept
    Skipped,
    /// The fetch failed but a previous rate exists and was retained
    Retained,
    /// Per-source state existed and was cleared (ineligible source, or a
    /// failure with nothing published yet)
    Cleared,
    /// The source is ineligible or failed, but nothing was tracked for it;
    /// no state changed
    Ignored,
    /// Another cycle was already in flight; the trigger was dropped
    Dropped,
}

/// Per-source cycle orchestrator.
pub struct RefreshCoordinator {
    state: SharedState,
    fetcher: Arc<dyn UsageFetcher>,
    registry: Arc<dyn SourceRegistry>,
    settings: Arc<Settings>,
    /// One async gate per source; `try_lock` failure is the drop signal
    gates: Mutex<HashMap<SourceKind, Arc<AsyncMutex<()>>>>,
}

impl RefreshCoordinator {
    pub fn new(
        state: SharedState,
        fetcher: Arc<dyn UsageFetcher>,
        registry: Arc<dyn SourceRegistry>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            state,
            fetcher,
            registry,
            settings,
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate_for(&self, source: &SourceKind) -> Arc<AsyncMutex<()>> {
        let mut gates = self.gates.lock();
        gates.entry(source.clone()).or_default().clone()
    }

    #[cfg(test)]
    fn gate_count(&self) -> usize {
        self.gates.lock().len()
    }

    /// Run one refresh cycle for a source.
    ///
    /// Exactly one cycle per source is ever in flight; a concurrent
    /// trigger returns [`RefreshOutcome::Dropped`] immediately.
    pub async fn refresh(&self, source: &SourceKind) -> RefreshOutcome {
        let gate = self.gate_for(source);
        let Ok(_guard) = gate.try_lock_owned() else {
            debug!(source = %source, "refresh already in flight, dropping trigger");
            return RefreshOutcome::Dropped;
        };

        if !self.registry.is_enabled(source) || !self.registry.supports_rate_tracking(source) {
            let removed = self.state.write().clear(source);
            // A retired source does not keep a gate entry around, so hosts
            // cycling through custom source names do not grow the map.
            self.gates.lock().remove(source);
            return if removed {
                RefreshOutcome::Cleared
            } else {
                RefreshOutcome::Ignored
            };
        }

        match self.fetcher.fetch_usage(source).await {
            Ok(report) => {
                let sample = Sample::from_report(report, pricing::price_for(source), Utc::now());
                let update =
                    self.state
                        .write()
                        .ingest(source, sample, self.settings.window_duration());
                match update {
                    RateUpdate::Skip => RefreshOutcome::Skipped,
                    RateUpdate::Publish { .. } | RateUpdate::Idle { .. } => {
                        RefreshOutcome::Published
                    }
                }
            }
            Err(err) => {
                warn!(source = %source, error = %err, "usage fetch failed");
                let mut state = self.state.write();
                if state.has_rate(source) {
                    // Transient failure: keep the displayed rate steady.
                    RefreshOutcome::Retained
                } else if state.clear(source) {
                    RefreshOutcome::Cleared
                } else {
                    RefreshOutcome::Ignored
                }
            }
        }
    }

    /// Refresh every registry source concurrently.
    ///
    /// No ordering between sources; each cycle runs independently under
    /// its own gate.
    pub async fn refresh_all(&self) -> Vec<(SourceKind, RefreshOutcome)> {
        let sources = self.registry.sources();
        let outcomes = join_all(sources.iter().map(|s| self.refresh(s))).await;
        sources.into_iter().zip(outcomes).collect()
    }
}
