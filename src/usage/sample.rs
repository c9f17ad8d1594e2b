//! Sample collection — normalizing a raw usage report into an immutable
//! observation the window can store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pricing::TokenPrice;
use crate::usage::fetcher::RawUsageReport;

/// One normalized usage observation. Immutable; created once per
/// successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Cumulative total token count
    pub total_tokens: u64,
    /// Cumulative input token count
    pub input_tokens: u64,
    /// Cumulative output token count
    pub output_tokens: u64,
    /// Cumulative cost in USD, if known or estimable
    pub cost_usd: Option<f64>,
    /// Observation timestamp
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// Normalize a raw report into a `Sample`.
    ///
    /// - A missing observation timestamp falls back to `now`.
    /// - A negative reported cost is treated as absent.
    /// - A report without a cost gets a best-effort estimate from the
    ///   fallback price table when the source kind has an entry; sources
    ///   without one simply carry no cost.
    pub fn from_report(
        report: RawUsageReport,
        fallback_price: Option<TokenPrice>,
        now: DateTime<Utc>,
    ) -> Self {
        let cost_usd = report
            .cost_usd
            .filter(|c| *c >= 0.0)
            .or_else(|| {
                fallback_price.map(|p| {
                    report.input_tokens as f64 * p.input_per_tok
                        + report.output_tokens as f64 * p.output_per_tok
                })
            });

        Self {
            total_tokens: report.total_tokens,
            input_tokens: report.input_tokens,
            output_tokens: report.output_tokens,
            cost_usd,
            timestamp: report.observed_at.unwrap_or(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report(total: u64, input: u64, output: u64) -> RawUsageReport {
        RawUsageReport {
            total_tokens: total,
            input_tokens: input,
            output_tokens: output,
            cost_usd: None,
            observed_at: None,
        }
    }

    #[test]
    fn test_timestamp_falls_back_to_now() {
        let now = Utc::now();
        let sample = Sample::from_report(report(10, 6, 4), None, now);
        assert_eq!(sample.timestamp, now);
    }

    #[test]
    fn test_explicit_timestamp_kept() {
        let now = Utc::now();
        let observed = now - chrono::Duration::seconds(5);
        let mut r = report(10, 6, 4);
        r.observed_at = Some(observed);
        let sample = Sample::from_report(r, None, now);
        assert_eq!(sample.timestamp, observed);
    }

    #[test]
    fn test_negative_cost_scrubbed() {
        let mut r = report(10, 6, 4);
        r.cost_usd = Some(-0.5);
        let sample = Sample::from_report(r, None, Utc::now());
        assert_eq!(sample.cost_usd, None);
    }

    #[test]
    fn test_reported_cost_wins_over_estimate() {
        let mut r = report(10, 6, 4);
        r.cost_usd = Some(0.42);
        let price = TokenPrice {
            input_per_tok: 1.0,
            output_per_tok: 1.0,
        };
        let sample = Sample::from_report(r, Some(price), Utc::now());
        assert_eq!(sample.cost_usd, Some(0.42));
    }

    #[test]
    fn test_missing_cost_estimated_from_price_table() {
        let price = TokenPrice {
            input_per_tok: 3e-6,
            output_per_tok: 15e-6,
        };
        let sample = Sample::from_report(report(1_500_000, 1_000_000, 500_000), Some(price), Utc::now());
        // 1M * $3/M + 0.5M * $15/M
        assert_eq!(sample.cost_usd, Some(3.0 + 7.5));
    }

    #[test]
    fn test_missing_cost_without_price_stays_absent() {
        let sample = Sample::from_report(report(100, 60, 40), None, Utc::now());
        assert_eq!(sample.cost_usd, None);
    }
}
