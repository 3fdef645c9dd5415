use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holders::HolderShare;
use super::record::EntityKind;

/// Token metrics from metric providers.
///
/// Every field is optional: a provider may supply any subset, and the
/// resolver merges subsets from several providers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetrics {
    /// Token name (e.g., "Wrapped SOL")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Ticker symbol (e.g., "wSOL")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Number of decimal places of the mint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u8>,

    /// Total supply in whole tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<Decimal>,

    /// Number of accounts holding the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_count: Option<u64>,

    /// Price of one token in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Market capitalization in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_capitalization: Option<Decimal>,

    /// Trading volume over the last 24 hours, in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_volume: Option<Decimal>,
}

impl TokenMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metrics with a display name and symbol
    pub fn named(display_name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    pub fn decimal_places(mut self, decimals: u8) -> Self {
        self.decimal_places = Some(decimals);
        self
    }

    pub fn total_supply(mut self, supply: Decimal) -> Self {
        self.total_supply = Some(supply);
        self
    }

    pub fn holder_count(mut self, count: u64) -> Self {
        self.holder_count = Some(count);
        self
    }

    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    pub fn market_capitalization(mut self, market_cap: Decimal) -> Self {
        self.market_capitalization = Some(market_cap);
        self
    }

    pub fn rolling_volume(mut self, volume: Decimal) -> Self {
        self.rolling_volume = Some(volume);
        self
    }

    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy every field of `other` that is still missing here.
    ///
    /// Populated fields are never overwritten. Returns the number of fields
    /// that were filled.
    pub fn fill_missing_from(&mut self, other: &TokenMetrics) -> usize {
        fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) -> usize {
            match (slot.is_none(), value) {
                (true, Some(v)) => {
                    *slot = Some(v.clone());
                    1
                }
                _ => 0,
            }
        }

        fill(&mut self.display_name, &other.display_name)
            + fill(&mut self.symbol, &other.symbol)
            + fill(&mut self.decimal_places, &other.decimal_places)
            + fill(&mut self.total_supply, &other.total_supply)
            + fill(&mut self.holder_count, &other.holder_count)
            + fill(&mut self.unit_price, &other.unit_price)
            + fill(&mut self.market_capitalization, &other.market_capitalization)
            + fill(&mut self.rolling_volume, &other.rolling_volume)
    }
}

/// A successful answer from a metric provider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderLookup {
    /// What the provider believes the identifier names. `None` when the
    /// provider has data but no opinion on the entity kind.
    pub kind_hint: Option<EntityKind>,

    /// Token fields; ignored by the resolver unless the identifier ends up
    /// classified as a token contract.
    pub metrics: TokenMetrics,

    /// Holder distribution (tokens) or largest counterpart flows (accounts).
    pub top_holders: Option<Vec<HolderShare>>,
}

impl ProviderLookup {
    /// A definitive token contract match.
    pub fn token(metrics: TokenMetrics) -> Self {
        Self {
            kind_hint: Some(EntityKind::TokenContract),
            metrics,
            top_holders: None,
        }
    }

    /// The identifier names an ordinary account.
    pub fn account() -> Self {
        Self {
            kind_hint: Some(EntityKind::Account),
            ..Default::default()
        }
    }

    /// Data without a classification opinion.
    pub fn unclassified(metrics: TokenMetrics) -> Self {
        Self {
            kind_hint: None,
            metrics,
            top_holders: None,
        }
    }

    pub fn with_holders(mut self, holders: Vec<HolderShare>) -> Self {
        self.top_holders = Some(holders);
        self
    }

    pub fn is_token(&self) -> bool {
        self.kind_hint == Some(EntityKind::TokenContract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder() {
        let metrics = TokenMetrics::named("Wrapped SOL", "wSOL")
            .decimal_places(9)
            .unit_price(dec!(68.45));

        assert_eq!(metrics.display_name.as_deref(), Some("Wrapped SOL"));
        assert_eq!(metrics.symbol.as_deref(), Some("wSOL"));
        assert_eq!(metrics.decimal_places, Some(9));
        assert_eq!(metrics.unit_price, Some(dec!(68.45)));
        assert!(metrics.holder_count.is_none());
    }

    #[test]
    fn test_fill_missing_never_overwrites() {
        let mut primary = TokenMetrics::named("Wrapped SOL", "wSOL").decimal_places(9);
        let secondary = TokenMetrics::named("Other Name", "OTHER")
            .decimal_places(6)
            .total_supply(dec!(10000000))
            .holder_count(42);

        let filled = primary.fill_missing_from(&secondary);

        assert_eq!(filled, 2);
        assert_eq!(primary.display_name.as_deref(), Some("Wrapped SOL"));
        assert_eq!(primary.symbol.as_deref(), Some("wSOL"));
        assert_eq!(primary.decimal_places, Some(9));
        assert_eq!(primary.total_supply, Some(dec!(10000000)));
        assert_eq!(primary.holder_count, Some(42));
    }

    #[test]
    fn test_is_empty() {
        assert!(TokenMetrics::new().is_empty());
        assert!(!TokenMetrics::new().holder_count(0).is_empty());
    }

    #[test]
    fn test_missing_fields_not_serialized() {
        let json = serde_json::to_string(&TokenMetrics::new().decimal_places(5)).unwrap();
        assert_eq!(json, r#"{"decimalPlaces":5}"#);
    }

    #[test]
    fn test_lookup_constructors() {
        assert!(ProviderLookup::token(TokenMetrics::new()).is_token());
        assert!(!ProviderLookup::account().is_token());
        assert_eq!(ProviderLookup::unclassified(TokenMetrics::new()).kind_hint, None);
    }
}
