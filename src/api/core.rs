//! BurnbarCore — the Facade entry-point for all consumers.
//!
//! This struct owns the shared state, the refresh coordinator and the
//! event bus. Consumers never need to acquire locks or wire services
//! themselves.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Settings;
use crate::monitor::RefreshCoordinator;
use crate::state::SharedState;
use crate::usage::fetcher::{SourceRegistry, UsageFetcher};

use super::events::CoreEvent;

/// Default broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The Facade that wraps all burnbar-core services.
///
/// Constructed via [`BurnbarCoreBuilder`](super::builder::BurnbarCoreBuilder).
pub struct BurnbarCore {
    /// Shared tracker state (windows, published rates, thresholds)
    state: SharedState,
    /// Per-source cycle orchestrator
    coordinator: RefreshCoordinator,
    /// Host's source registry (eligibility gates, display order)
    registry: Arc<dyn SourceRegistry>,
    /// Application settings
    settings: Arc<Settings>,
    /// Broadcast sender for core events
    event_tx: broadcast::Sender<CoreEvent>,
}

impl BurnbarCore {
    /// Create a new BurnbarCore instance (prefer `BurnbarCoreBuilder`)
    pub(crate) fn new(
        state: SharedState,
        fetcher: Arc<dyn UsageFetcher>,
        registry: Arc<dyn SourceRegistry>,
        settings: Arc<Settings>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let coordinator = RefreshCoordinator::new(
            state.clone(),
            fetcher,
            registry.clone(),
            settings.clone(),
        );
        Self {
            state,
            coordinator,
            registry,
            settings,
            event_tx,
        }
    }

    /// Access application settings (read-only)
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a clone of the broadcast event sender.
    pub(crate) fn event_sender(&self) -> broadcast::Sender<CoreEvent> {
        self.event_tx.clone()
    }

    // =========================================================
    // Internal accessors for query/action impls
    // =========================================================

    /// Borrow the shared state (for query/action modules)
    pub(crate) fn state(&self) -> &SharedState {
        &self.state
    }

    /// Borrow the refresh coordinator (for action modules)
    pub(crate) fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Borrow the source registry (for query modules)
    pub(crate) fn registry(&self) -> &Arc<dyn SourceRegistry> {
        &self.registry
    }
}
