//! Owned snapshot types for the Facade API.
//!
//! These types are returned by query methods and do not hold any lock.
//! They are safe to pass across async boundaries and serialize for a
//! host's own API surface.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::source::SourceKind;
use crate::usage::rate::{CostRate, Rate};
use crate::usage::trend::TrendDirection;

/// Owned per-source snapshot, returned by query methods.
///
/// Everything a display layer needs for one source in one value: the
/// published rate (if any), the cost estimate, and the trend summary
/// derived fresh at snapshot time.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRateSnapshot {
    /// Which source this snapshot describes
    pub source: SourceKind,
    /// Most recently published rate (`None` before the first cycle)
    pub rate: Option<Rate>,
    /// Estimated spend rate
    pub cost_rate: CostRate,
    /// Sparkline over the current window
    pub sparkline: String,
    /// Qualitative direction over the current window
    pub trend: TrendDirection,
    /// When this source's state last changed
    pub updated_at: Option<DateTime<Utc>>,
}
