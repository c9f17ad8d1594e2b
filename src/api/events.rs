//! Core event system for push-based change notification.
//!
//! Consumers that prefer polling can watch [`BurnbarCore::version`]
//! instead; both surfaces observe the same mutations.

use tokio::sync::broadcast;

use crate::source::SourceKind;

use super::core::BurnbarCore;

/// Events emitted by the core when state changes occur.
///
/// Consumers call [`BurnbarCore::subscribe()`] to receive these events
/// via a `broadcast::Receiver`.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// A fresh rate was published for a source
    RateUpdated {
        /// The source whose rate changed
        source: SourceKind,
    },

    /// A source's per-source state was cleared
    SourceCleared {
        /// The source that was cleared
        source: SourceKind,
    },

    /// Thresholds changed and all cached tiers were remapped
    ThresholdsChanged,
}

impl BurnbarCore {
    /// Subscribe to core events.
    ///
    /// Returns a broadcast receiver that will receive [`CoreEvent`]s.
    /// If the receiver falls behind, older events are dropped (lagged).
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.event_sender().subscribe()
    }

    /// Emit an event, ignoring the no-subscriber case.
    pub(crate) fn emit(&self, event: CoreEvent) {
        let _ = self.event_sender().send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::builder::tests::{test_fetcher, test_registry};
    use crate::api::BurnbarCoreBuilder;

    #[tokio::test]
    async fn test_subscribe_receives_events() {
        let core = BurnbarCoreBuilder::new(test_fetcher(), test_registry()).build();
        let mut rx = core.subscribe();

        core.emit(CoreEvent::ThresholdsChanged);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, CoreEvent::ThresholdsChanged));
    }

    #[tokio::test]
    async fn test_subscribe_multiple_receivers() {
        let core = BurnbarCoreBuilder::new(test_fetcher(), test_registry()).build();
        let mut rx1 = core.subscribe();
        let mut rx2 = core.subscribe();

        core.emit(CoreEvent::RateUpdated {
            source: SourceKind::ClaudeCode,
        });

        assert!(matches!(
            rx1.recv().await.unwrap(),
            CoreEvent::RateUpdated { .. }
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            CoreEvent::RateUpdated { .. }
        ));
    }

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        let core = BurnbarCoreBuilder::new(test_fetcher(), test_registry()).build();
        core.emit(CoreEvent::ThresholdsChanged);
    }
}
