//! Action methods on [`BurnbarCore`].
//!
//! These methods run refresh cycles, edit thresholds and clear sources,
//! emitting [`CoreEvent`]s for every observable change.

use crate::monitor::RefreshOutcome;
use crate::source::SourceKind;
use crate::usage::tier::Thresholds;

use super::core::BurnbarCore;
use super::events::CoreEvent;

impl BurnbarCore {
    /// Run one refresh cycle for a source.
    ///
    /// Returns immediately with [`RefreshOutcome::Dropped`] if a cycle is
    /// already in flight for the source.
    pub async fn refresh(&self, source: &SourceKind) -> RefreshOutcome {
        let outcome = self.coordinator().refresh(source).await;
        self.emit_for(source, outcome);
        outcome
    }

    /// Refresh every registry source concurrently.
    pub async fn refresh_all(&self) -> Vec<(SourceKind, RefreshOutcome)> {
        let outcomes = self.coordinator().refresh_all().await;
        for (source, outcome) in &outcomes {
            self.emit_for(source, *outcome);
        }
        outcomes
    }

    /// Install new thresholds and reclassify all cached rates.
    ///
    /// The thresholds are normalized first; magnitudes and windows are
    /// untouched. Emits [`CoreEvent::ThresholdsChanged`].
    pub fn set_thresholds(&self, thresholds: Thresholds) {
        self.state().write().remap_all(thresholds);
        self.emit(CoreEvent::ThresholdsChanged);
    }

    /// Destroy all state for a source.
    ///
    /// Emits [`CoreEvent::SourceCleared`] if a record existed.
    pub fn clear(&self, source: &SourceKind) {
        let removed = self.state().write().clear(source);
        if removed {
            self.emit(CoreEvent::SourceCleared {
                source: source.clone(),
            });
        }
    }

    fn emit_for(&self, source: &SourceKind, outcome: RefreshOutcome) {
        match outcome {
            RefreshOutcome::Published => self.emit(CoreEvent::RateUpdated {
                source: source.clone(),
            }),
            RefreshOutcome::Cleared => self.emit(CoreEvent::SourceCleared {
                source: source.clone(),
            }),
            // No observable change
            RefreshOutcome::Skipped
            | RefreshOutcome::Retained
            | RefreshOutcome::Ignored
            | RefreshOutcome::Dropped => {}
        }
    }
}
