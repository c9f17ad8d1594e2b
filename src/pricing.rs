//! Fallback per-token pricing, used to estimate a cost for usage reports
//! that carry no cost field of their own.
//!
//! A lookup table keyed by source kind, not a branch chain: absence of an
//! entry means "no estimate", resolved once at lookup time. Figures are the
//! published list prices of each vendor's current default model and are
//! intentionally best-effort — exact billing is out of scope.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::source::SourceKind;

/// USD price per single token, split by direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenPrice {
    pub input_per_tok: f64,
    pub output_per_tok: f64,
}

static PRICE_TABLE: Lazy<HashMap<SourceKind, TokenPrice>> = Lazy::new(|| {
    HashMap::from([
        // Claude Sonnet list price: $3 / $15 per 1M
        (
            SourceKind::ClaudeCode,
            TokenPrice {
                input_per_tok: 3e-6,
                output_per_tok: 15e-6,
            },
        ),
        // GPT-5 list price: $1.25 / $10 per 1M
        (
            SourceKind::CodexCli,
            TokenPrice {
                input_per_tok: 1.25e-6,
                output_per_tok: 10e-6,
            },
        ),
        // Gemini 2.5 Pro list price: $1.25 / $10 per 1M
        (
            SourceKind::GeminiCli,
            TokenPrice {
                input_per_tok: 1.25e-6,
                output_per_tok: 10e-6,
            },
        ),
        // Cursor routes to Sonnet by default
        (
            SourceKind::Cursor,
            TokenPrice {
                input_per_tok: 3e-6,
                output_per_tok: 15e-6,
            },
        ),
    ])
});

/// Look up the fallback token price for a source kind.
///
/// Returns `None` for kinds without a table entry (notably `Custom(_)`),
/// in which case no cost estimate is attached and any derived
/// [`CostRate`](crate::CostRate) stays unavailable.
pub fn price_for(kind: &SourceKind) -> Option<TokenPrice> {
    PRICE_TABLE.get(kind).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_have_prices() {
        for kind in [
            SourceKind::ClaudeCode,
            SourceKind::CodexCli,
            SourceKind::GeminiCli,
            SourceKind::Cursor,
        ] {
            let price = price_for(&kind).expect("known kind should be priced");
            assert!(price.input_per_tok > 0.0);
            assert!(price.output_per_tok > price.input_per_tok);
        }
    }

    #[test]
    fn test_custom_kind_has_no_price() {
        assert!(price_for(&SourceKind::Custom("local-llm".to_string())).is_none());
    }
}
