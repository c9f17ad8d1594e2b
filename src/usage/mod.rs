//! Usage analytics — samples, the sliding window, rate/tier derivation
//! and trend summaries.

pub mod fetcher;
pub mod rate;
pub mod sample;
pub mod tier;
pub mod trend;
pub mod window;

pub use fetcher::{FetchError, RawUsageReport, SourceRegistry, UsageFetcher};
pub use rate::{CostRate, Rate, RateUpdate};
pub use sample::Sample;
pub use tier::{Thresholds, Tier};
pub use trend::TrendDirection;
pub use window::SampleWindow;
