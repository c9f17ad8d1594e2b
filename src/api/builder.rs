//! Builder for constructing a [`BurnbarCore`] instance.
//!
//! ```ignore
//! let core = BurnbarCoreBuilder::new(fetcher, registry)
//!     .with_settings(settings)
//!     .with_state(state)
//!     .build();
//! ```

use std::sync::Arc;

use crate::config::Settings;
use crate::state::{SharedState, TrackerState};
use crate::usage::fetcher::{SourceRegistry, UsageFetcher};

use super::core::BurnbarCore;

/// Builder for constructing a [`BurnbarCore`] Facade instance
pub struct BurnbarCoreBuilder {
    fetcher: Arc<dyn UsageFetcher>,
    registry: Arc<dyn SourceRegistry>,
    settings: Option<Settings>,
    state: Option<SharedState>,
}

impl BurnbarCoreBuilder {
    /// Create a new builder with the host's fetcher and registry
    pub fn new(fetcher: Arc<dyn UsageFetcher>, registry: Arc<dyn SourceRegistry>) -> Self {
        Self {
            fetcher,
            registry,
            settings: None,
            state: None,
        }
    }

    /// Use explicit settings instead of defaults.
    ///
    /// Settings are validated (normalized) during `build`.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Use an existing shared state instead of creating a fresh one
    pub fn with_state(mut self, state: SharedState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the `BurnbarCore` instance.
    ///
    /// If no state was provided, a fresh one is created seeded with the
    /// settings' thresholds.
    pub fn build(self) -> BurnbarCore {
        let mut settings = self.settings.unwrap_or_default();
        settings.validate();
        let state = self
            .state
            .unwrap_or_else(|| TrackerState::shared(settings.thresholds));

        BurnbarCore::new(state, self.fetcher, self.registry, Arc::new(settings))
    }
}
