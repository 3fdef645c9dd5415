//! End-to-end resolution scenarios and properties.
//!
//! Everything runs against in-process providers; no network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;
use solantics_explorer::identifier::ADDRESS_BYTES;
use solantics_explorer::resolver::PLACEHOLDER_SHARES;
use solantics_explorer::{
    validate, AccountIdentifier, AddressResolver, EntityKind, ExplorerError, MetricProvider,
    ProviderLookup, RecordView, SearchError, SearchSession, StaticProvider, TokenMetrics,
};

const WSOL: &str = "So11111111111111111111111111111111111111112";
const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

// =============================================================================
// Providers
// =============================================================================

/// Provider that never answers in time.
struct StalledProvider;

#[async_trait]
impl MetricProvider for StalledProvider {
    fn id(&self) -> &'static str {
        "STALLED"
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn lookup(&self, _identifier: &AccountIdentifier) -> Result<ProviderLookup, ExplorerError> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Ok(ProviderLookup::token(TokenMetrics::named("Stale", "STALE")))
    }
}

/// Provider that counts its calls and knows nothing.
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl MetricProvider for CountingProvider {
    fn id(&self) -> &'static str {
        "COUNTING"
    }

    async fn lookup(&self, _identifier: &AccountIdentifier) -> Result<ProviderLookup, ExplorerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExplorerError::not_found("COUNTING"))
    }
}

fn well_known_resolver() -> AddressResolver {
    AddressResolver::new(vec![Arc::new(StaticProvider::well_known())])
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn wrapped_sol_resolves_as_token_contract() {
    let identifier = AccountIdentifier::parse(WSOL).unwrap();
    let record = well_known_resolver().resolve(&identifier).await;

    assert_eq!(record.kind, EntityKind::TokenContract);
    assert_eq!(record.metrics.symbol.as_deref(), Some("wSOL"));
    assert_eq!(record.metrics.decimal_places, Some(9));
    assert_eq!(record.address.as_str(), WSOL);

    let view = RecordView::new(&record);
    assert_eq!(view.heading, "Token Information");
    assert_eq!(view.card("Price").unwrap().to_string(), "$68.4500");
}

#[tokio::test]
async fn malformed_input_never_reaches_resolver() {
    assert!(!validate("not-a-real-address"));
    assert!(AccountIdentifier::parse("not-a-real-address").is_err());

    let counting = Arc::new(CountingProvider::default());
    let shared: Arc<dyn MetricProvider> = counting.clone();
    let session = SearchSession::new(Arc::new(AddressResolver::new(vec![shared])));

    assert_eq!(
        session.search("not-a-real-address").await,
        Err(SearchError::InvalidAddressFormat)
    );
    assert_eq!(
        session.search(&format!(" {} ", WSOL)).await,
        Err(SearchError::InvalidAddressFormat)
    );
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_wallet_gets_deterministic_placeholders() {
    let identifier = AccountIdentifier::parse(WALLET).unwrap();
    let resolver = well_known_resolver();

    let first = resolver.resolve(&identifier).await;
    let second = resolver.resolve(&identifier).await;

    assert_eq!(first.kind, EntityKind::Account);
    assert!(first.synthetic);
    assert!(first.is_fallback());
    assert!(first.metrics.is_empty());
    assert_eq!(first.top_holders, second.top_holders);

    let holders = first.top_holders.unwrap();
    assert_eq!(holders.len(), PLACEHOLDER_SHARES.len());
    assert!(holders
        .iter()
        .all(|h| h.holder_address.starts_with(&WALLET[..10])));
}

#[tokio::test(start_paused = true)]
async fn timed_out_provider_does_not_hide_other_answers() {
    let resolver = AddressResolver::new(vec![
        Arc::new(StalledProvider),
        Arc::new(StaticProvider::well_known()),
    ])
    .with_timeout(Duration::from_secs(2));

    let identifier = AccountIdentifier::parse(WSOL).unwrap();
    let (record, diagnostics) = resolver.resolve_with_diagnostics(&identifier).await;

    assert_eq!(record.kind, EntityKind::TokenContract);
    assert_eq!(record.metrics.symbol.as_deref(), Some("wSOL"));
    assert_eq!(record.sources.len(), 1);
    assert_eq!(record.sources[0], "STATIC");
    assert_eq!(diagnostics.unavailable().len(), 1);
    assert!(diagnostics.summary().contains("STALLED: TIMEOUT"));
}

#[tokio::test]
async fn search_session_publishes_resolved_record() {
    let session = SearchSession::new(Arc::new(well_known_resolver()));
    let mut updates = session.subscribe();

    let record = session.search(WSOL).await.unwrap();

    updates.changed().await.unwrap();
    let published = updates.borrow().clone().unwrap();
    assert_eq!(published.record, record);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// `validate` agrees with decoding to exactly 32 bytes.
    #[test]
    fn validate_matches_reference_decoder(raw in "[1-9A-HJ-NP-Za-km-z]{0,50}") {
        let decodes_to_key = bs58::decode(&raw)
            .into_vec()
            .map(|bytes| bytes.len() == ADDRESS_BYTES)
            .unwrap_or(false);
        prop_assert_eq!(validate(&raw), decodes_to_key);
    }

    /// Strings with characters outside the base58 alphabet never validate.
    #[test]
    fn non_base58_characters_rejected(prefix in "[1-9A-HJ-NP-Za-km-z]{20,40}", bad in "[0OIl+/=_-]") {
        let raw = format!("{}{}", prefix, bad);
        prop_assert!(!validate(&raw));
    }

    /// Any 32-byte key resolves to a record for that exact address.
    #[test]
    fn resolve_is_total_over_valid_keys(bytes in proptest::array::uniform32(any::<u8>())) {
        let raw = bs58::encode(bytes).into_string();
        let identifier = AccountIdentifier::parse(&raw).unwrap();
        prop_assert_eq!(identifier.to_bytes(), bytes);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let record = runtime.block_on(well_known_resolver().resolve(&identifier));

        prop_assert_eq!(record.address.as_str(), raw.as_str());
        let holders = record.top_holders.unwrap_or_default();
        for pair in holders.windows(2) {
            prop_assert!(pair[0].share_percentage >= pair[1].share_percentage);
        }
        let total: f64 = holders.iter().map(|h| h.share_percentage).sum();
        prop_assert!(total <= 100.0);
    }
}
