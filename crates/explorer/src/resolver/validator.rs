//! Provider data validation.
//!
//! Providers are untrusted: before an answer takes part in aggregation,
//! amounts that must be non-negative are checked and holder lists are
//! brought into shape (valid shares only, largest first).

use log::warn;
use rust_decimal::Decimal;

use crate::models::{HolderShare, ProviderLookup};

/// Validates and normalizes provider answers.
#[derive(Clone, Debug, Default)]
pub struct LookupValidator;

impl LookupValidator {
    pub fn new() -> Self {
        Self
    }

    /// Drop invalid values from a provider answer.
    ///
    /// A rejected field becomes missing, so a lower-priority provider may
    /// still supply it.
    pub fn sanitize(&self, provider: &str, mut lookup: ProviderLookup) -> ProviderLookup {
        let metrics = &mut lookup.metrics;
        reject_negative(provider, "totalSupply", &mut metrics.total_supply);
        reject_negative(provider, "unitPrice", &mut metrics.unit_price);
        reject_negative(
            provider,
            "marketCapitalization",
            &mut metrics.market_capitalization,
        );
        reject_negative(provider, "rollingVolume", &mut metrics.rolling_volume);

        lookup.top_holders = lookup
            .top_holders
            .map(|holders| self.normalize_holders(provider, holders))
            .filter(|holders| !holders.is_empty());

        lookup
    }

    /// Keep shares within `[0, 100]`, ordered by descending share.
    pub fn normalize_holders(&self, provider: &str, holders: Vec<HolderShare>) -> Vec<HolderShare> {
        let total = holders.len();
        let mut valid: Vec<HolderShare> = holders.into_iter().filter(HolderShare::is_valid).collect();

        if valid.len() < total {
            warn!(
                "Dropped {} holder entries with invalid shares from '{}'",
                total - valid.len(),
                provider
            );
        }

        // Stable sort keeps the provider's order among equal shares.
        valid.sort_by(|a, b| b.share_percentage.total_cmp(&a.share_percentage));
        valid
    }
}

fn reject_negative(provider: &str, field: &str, value: &mut Option<Decimal>) {
    if let Some(v) = *value {
        if v < Decimal::ZERO {
            warn!("Rejected negative {} from '{}': {}", field, provider, v);
            *value = None;
        }
    }
}
