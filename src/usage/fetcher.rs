//! The fetch boundary — the only I/O seam of the crate.
//!
//! Hosts implement [`UsageFetcher`] (however they obtain usage data: local
//! session files, a vendor API, a scraped TUI) and [`SourceRegistry`] (which
//! sources exist and whether they are eligible). The core never performs
//! network or file access itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::source::SourceKind;

/// A raw cumulative usage report as returned by the fetch collaborator.
///
/// Counters are cumulative since whatever epoch the source uses (typically
/// a session start); the core detects counter restarts itself, so fetchers
/// should report values as-is without smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUsageReport {
    /// Cumulative total token count
    pub total_tokens: u64,
    /// Cumulative input token count
    pub input_tokens: u64,
    /// Cumulative output token count
    pub output_tokens: u64,
    /// Cumulative cost in USD, if the source reports one
    pub cost_usd: Option<f64>,
    /// When the source observed these counters (`None` = "just now")
    pub observed_at: Option<DateTime<Utc>>,
}

/// Error taxonomy for the fetch boundary.
///
/// These are transport-level failures and are non-fatal to the core: a
/// failed cycle retains the previously published rate (or stays idle if
/// none exists). Retry and backoff belong to the fetcher, not the core.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure reaching the source
    #[error("network error: {0}")]
    Network(String),

    /// Authentication or authorization failure
    #[error("auth error: {0}")]
    Auth(String),

    /// The raw report could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// The source is temporarily unable to report usage
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous usage fetcher implemented by the host.
///
/// `fetch_usage` may suspend for as long as the underlying I/O takes; the
/// core holds only the per-source in-flight gate across the await.
#[async_trait]
pub trait UsageFetcher: Send + Sync {
    /// Fetch the current cumulative usage report for a source.
    async fn fetch_usage(&self, source: &SourceKind) -> Result<RawUsageReport, FetchError>;
}

/// Eligibility gates, queried at the start of every refresh cycle.
pub trait SourceRegistry: Send + Sync {
    /// All sources the host wants tracked, in display order.
    fn sources(&self) -> Vec<SourceKind>;

    /// Whether the source is currently enabled.
    fn is_enabled(&self, source: &SourceKind) -> bool;

    /// Whether the source supports rate tracking at all.
    fn supports_rate_tracking(&self, source: &SourceKind) -> bool;
}
