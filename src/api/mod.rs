//! Public API layer (Facade) for burnbar-core.
//!
//! This module provides [`BurnbarCore`] — a high-level entry-point that
//! wires the state store, the refresh coordinator and the event bus
//! together behind typed query/action methods. Consumers (menu bar apps,
//! status lines, web dashboards) should use this API instead of operating
//! on `SharedState` directly.
//!
//! # Quick Start
//!
//! ```ignore
//! use burnbar_core::api::{BurnbarCore, BurnbarCoreBuilder};
//!
//! let core = BurnbarCoreBuilder::new(fetcher, registry).build();
//!
//! core.refresh_all().await;
//! let snapshots = core.snapshots();
//!
//! let mut rx = core.subscribe();
//! ```

mod actions;
mod builder;
mod core;
pub mod events;
mod queries;
pub mod types;

pub use builder::BurnbarCoreBuilder;
pub use core::BurnbarCore;
pub use events::CoreEvent;
pub use types::SourceRateSnapshot;
