//! Offline metric provider backed by an in-memory table.
//!
//! Useful for well-known mints that should render even when every live
//! provider is down, for demos, and as a fake in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ExplorerError;
use crate::identifier::AccountIdentifier;
use crate::models::{HolderShare, ProviderLookup, TokenMetrics};
use crate::provider::MetricProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "STATIC";

/// Wrapped SOL mint
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// BONK mint
pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

/// Number of holder entries in the built-in table
const WELL_KNOWN_HOLDERS: usize = 5;

/// A table entry.
#[derive(Clone, Debug)]
struct StaticEntry {
    metrics: TokenMetrics,
    top_holders: Option<Vec<HolderShare>>,
}

/// Static provider answering from a fixed table of token contracts.
///
/// Every entry is reported as a token contract; identifiers missing from
/// the table are not found.
///
/// # Example
///
/// ```
/// use solantics_explorer::provider::StaticProvider;
///
/// let provider = StaticProvider::well_known();
/// assert_eq!(provider.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct StaticProvider {
    entries: HashMap<String, StaticEntry>,
    priority: u8,
}

impl StaticProvider {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            priority: 20,
        }
    }

    /// Table preloaded with wrapped SOL and BONK.
    pub fn well_known() -> Self {
        Self::new()
            .with_token(
                WRAPPED_SOL_MINT,
                TokenMetrics::named("Wrapped SOL", "wSOL")
                    .decimal_places(9)
                    .total_supply(Decimal::from(10_000_000u64))
                    .holder_count(123_456)
                    .unit_price(Decimal::new(6845, 2))
                    .market_capitalization(Decimal::from(684_500_000u64))
                    .rolling_volume(Decimal::from(12_345_678u64)),
                Some(labelled_holders("So111", "111111111111111111111111111111111", 30.0)),
            )
            .with_token(
                BONK_MINT,
                TokenMetrics::named("BONK", "BONK")
                    .decimal_places(5)
                    .total_supply(Decimal::from(990_000_000_000_000u64))
                    .holder_count(987_654)
                    .unit_price(Decimal::new(1234, 8))
                    .market_capitalization(Decimal::from(12_211_600u64))
                    .rolling_volume(Decimal::from(3_456_789u64)),
                Some(labelled_holders("DezXA", "8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB26", 20.0)),
            )
    }

    /// Add or replace a token entry.
    pub fn with_token(
        mut self,
        address: &str,
        metrics: TokenMetrics,
        top_holders: Option<Vec<HolderShare>>,
    ) -> Self {
        self.entries.insert(
            address.to_string(),
            StaticEntry {
                metrics,
                top_holders,
            },
        );
        self
    }

    /// Override the default priority (20, after live providers).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains_key(address)
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Holder labels `<head><i><tail><i>` with shares `top / (i + 1)`.
fn labelled_holders(head: &str, tail: &str, top: f64) -> Vec<HolderShare> {
    (0..WELL_KNOWN_HOLDERS)
        .map(|i| HolderShare::new(format!("{head}{i}{tail}{i}"), top / (i as f64 + 1.0)))
        .collect()
}

#[async_trait]
impl MetricProvider for StaticProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    async fn lookup(
        &self,
        identifier: &AccountIdentifier,
    ) -> Result<ProviderLookup, ExplorerError> {
        let entry = self
            .entries
            .get(identifier.as_str())
            .ok_or_else(|| ExplorerError::not_found(PROVIDER_ID))?;

        let lookup = ProviderLookup::token(entry.metrics.clone());
        Ok(match &entry.top_holders {
            Some(holders) => lookup.with_holders(holders.clone()),
            None => lookup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityKind;

    #[test]
    fn test_well_known_entries_are_valid_addresses() {
        for address in [WRAPPED_SOL_MINT, BONK_MINT] {
            assert!(crate::identifier::validate(address), "{address}");
        }
    }

    #[test]
    fn test_provider_defaults() {
        let provider = StaticProvider::well_known();
        assert_eq!(provider.id(), "STATIC");
        assert_eq!(provider.priority(), 20);
        assert_eq!(provider.len(), 2);
        assert!(provider.contains(WRAPPED_SOL_MINT));
        assert!(provider.contains(BONK_MINT));
        assert!(!provider.contains("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM"));
        assert_eq!(provider.with_priority(1).priority(), 1);
    }

    #[tokio::test]
    async fn test_lookup_wrapped_sol() {
        let provider = StaticProvider::well_known();
        let id = AccountIdentifier::parse(WRAPPED_SOL_MINT).unwrap();

        let lookup = provider.lookup(&id).await.unwrap();

        assert_eq!(lookup.kind_hint, Some(EntityKind::TokenContract));
        assert_eq!(lookup.metrics.symbol.as_deref(), Some("wSOL"));
        assert_eq!(lookup.metrics.decimal_places, Some(9));
        assert_eq!(lookup.metrics.unit_price, Some(Decimal::new(6845, 2)));

        let holders = lookup.top_holders.unwrap();
        assert_eq!(holders.len(), 5);
        assert!(holders[0].holder_address.starts_with("So1110"));
        assert!(holders[4].holder_address.ends_with('4'));
        assert_eq!(holders[0].share_percentage, 30.0);
        assert_eq!(holders[1].share_percentage, 15.0);
    }

    #[tokio::test]
    async fn test_unknown_address_not_found() {
        let provider = StaticProvider::well_known();
        let id = AccountIdentifier::parse("11111111111111111111111111111111").unwrap();

        let err = provider.lookup(&id).await.unwrap_err();
        assert_eq!(err, ExplorerError::not_found("STATIC"));
    }
}
