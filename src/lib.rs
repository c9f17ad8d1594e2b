//! burnbar-core — the analytic core beneath a token burn-rate status display.
//!
//! Periodically fetched cumulative usage reports go in; per-source
//! tokens/minute rates, discrete tiers, cost-per-hour estimates and short
//! trend summaries come out. The crate renders nothing, performs no I/O of
//! its own (hosts supply a [`UsageFetcher`]) and persists nothing — all
//! state is in-process and rebuilt from live samples.
//!
//! # Quick Start
//!
//! ```ignore
//! use burnbar_core::{BurnbarCore, BurnbarCoreBuilder, Settings};
//!
//! let core = BurnbarCoreBuilder::new(fetcher, registry)
//!     .with_settings(Settings::load(None)?)
//!     .build();
//!
//! core.refresh_all().await;
//! let rate = core.rate(&source);        // Option<Rate>
//! let spark = core.sparkline(&source);  // "▁▂▄█"
//! ```

pub mod api;
pub mod config;
pub mod monitor;
pub mod pricing;
pub mod source;
pub mod state;
pub mod usage;

pub use api::{BurnbarCore, BurnbarCoreBuilder, CoreEvent, SourceRateSnapshot};
pub use config::Settings;
pub use monitor::{RefreshCoordinator, RefreshOutcome};
pub use source::SourceKind;
pub use usage::fetcher::{FetchError, RawUsageReport, SourceRegistry, UsageFetcher};
pub use usage::rate::{CostRate, Rate};
pub use usage::tier::{Thresholds, Tier};
pub use usage::trend::TrendDirection;
