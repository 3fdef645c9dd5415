//! Address resolution across metric providers.
//!
//! The resolver asks every registered provider about an identifier at once,
//! then folds their answers into a single [`DescriptiveRecord`]:
//! 1. Classify: the first provider (in priority order) that claims a token
//!    contract decides `TokenContract`, otherwise `Account`
//! 2. Aggregate: token fields are merged field by field, the highest-priority
//!    non-missing value winning
//! 3. Fall back: with no usable answer at all, a placeholder account record
//!    is synthesized from the address
//!
//! Provider failures never escape. Each one only removes that provider's
//! answer from the aggregation.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::time::{timeout, Instant};

use super::diagnostics::{AttemptOutcome, ResolutionDiagnostics};
use super::fallback::{fallback_record, placeholder_holders};
use super::validator::LookupValidator;
use crate::context::ExplorerContext;
use crate::errors::{ExplorerError, LookupFailure};
use crate::identifier::AccountIdentifier;
use crate::models::{DescriptiveRecord, EntityKind, ProviderId, ProviderLookup, TokenMetrics};
use crate::provider::{MetricProvider, SingleFlight, SolanaRpcProvider, StaticProvider};

/// Deadline for providers that do not declare their own.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one provider lookup, before aggregation.
struct LookupResult {
    provider_id: ProviderId,
    result: Result<ProviderLookup, ExplorerError>,
    elapsed: Duration,
}

/// Resolves account identifiers into descriptive records.
///
/// Holds no mutable state: concurrent `resolve` calls are independent and
/// the same provider set always classifies an identifier the same way.
pub struct AddressResolver {
    providers: Vec<Arc<dyn MetricProvider>>,
    default_timeout: Duration,
    validator: LookupValidator,
}

impl AddressResolver {
    /// Create a resolver over `providers`.
    ///
    /// Providers are ordered by ascending priority; equal priorities keep
    /// their registration order.
    pub fn new(mut providers: Vec<Arc<dyn MetricProvider>>) -> Self {
        providers.sort_by_key(|p| p.priority());

        Self {
            providers,
            default_timeout: DEFAULT_PROVIDER_TIMEOUT,
            validator: LookupValidator::new(),
        }
    }

    /// Set the deadline used for providers without their own timeout.
    pub fn with_timeout(mut self, default_timeout: Duration) -> Self {
        self.default_timeout = default_timeout;
        self
    }

    /// Build the provider set described by the context's configuration.
    ///
    /// The RPC provider shares the context's HTTP client and is wrapped in
    /// [`SingleFlight`] so concurrent searches for one address cost a
    /// single upstream lookup.
    pub fn from_context(context: &ExplorerContext) -> Self {
        let config = context.config();
        let mut providers: Vec<Arc<dyn MetricProvider>> = Vec::new();

        if config.enable_rpc {
            let rpc = SolanaRpcProvider::with_client(context.http().clone(), config.rpc_url.clone());
            providers.push(Arc::new(SingleFlight::new(rpc)));
        }
        if config.enable_static {
            providers.push(Arc::new(StaticProvider::well_known()));
        }

        if providers.is_empty() {
            warn!("No metric providers enabled; every address will resolve to a placeholder");
        } else {
            info!(
                "Address resolver using {} on {} (timeout {}ms)",
                providers
                    .iter()
                    .map(|p| p.id())
                    .collect::<Vec<_>>()
                    .join(", "),
                config.cluster,
                config.provider_timeout.as_millis()
            );
        }

        Self::new(providers).with_timeout(config.provider_timeout)
    }

    /// Registered providers, in the order they are consulted.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.providers
            .iter()
            .map(|p| Cow::Borrowed(p.id()))
            .collect()
    }

    /// Resolve an identifier into a record. Never fails.
    pub async fn resolve(&self, identifier: &AccountIdentifier) -> DescriptiveRecord {
        self.resolve_with_diagnostics(identifier).await.0
    }

    /// Resolve an identifier and report what each provider did.
    ///
    /// Dropping the returned future cancels every in-flight provider lookup.
    pub async fn resolve_with_diagnostics(
        &self,
        identifier: &AccountIdentifier,
    ) -> (DescriptiveRecord, ResolutionDiagnostics) {
        let lookups = self
            .providers
            .iter()
            .map(|provider| self.lookup_with_deadline(provider.as_ref(), identifier));

        // join_all keeps input order, so results stay in priority order.
        let results = join_all(lookups).await;

        let mut diagnostics = ResolutionDiagnostics::new();
        let mut answers: Vec<(ProviderId, ProviderLookup)> = Vec::new();

        for LookupResult {
            provider_id,
            result,
            elapsed,
        } in results
        {
            let outcome = match result {
                Ok(lookup) => {
                    let lookup = self.validator.sanitize(&provider_id, lookup);
                    let outcome = if lookup.is_token() {
                        AttemptOutcome::MatchedToken
                    } else {
                        AttemptOutcome::Answered
                    };
                    answers.push((provider_id.clone(), lookup));
                    outcome
                }
                Err(e) => {
                    match e.failure_class() {
                        LookupFailure::NotFound => {
                            debug!("Provider '{}' has no data for {}", provider_id, identifier)
                        }
                        LookupFailure::Unavailable => {
                            warn!("Provider '{}' unavailable for {}: {}", provider_id, identifier, e)
                        }
                    }
                    AttemptOutcome::from_error(&e)
                }
            };
            diagnostics.record(provider_id, outcome, elapsed);
        }

        let record = aggregate(identifier, answers);
        diagnostics.kind = Some(record.kind);
        diagnostics.fallback = record.is_fallback();

        debug!(
            "Resolved {} as {} [{}]",
            identifier,
            record.kind.as_str(),
            diagnostics.summary()
        );

        (record, diagnostics)
    }

    async fn lookup_with_deadline(
        &self,
        provider: &dyn MetricProvider,
        identifier: &AccountIdentifier,
    ) -> LookupResult {
        let provider_id: ProviderId = Cow::Borrowed(provider.id());
        let deadline = provider.timeout().unwrap_or(self.default_timeout);
        let started = Instant::now();

        let result = match timeout(deadline, provider.lookup(identifier)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(
                    "Provider '{}' hit its {}ms deadline for {}",
                    provider_id,
                    deadline.as_millis(),
                    identifier
                );
                Err(ExplorerError::Timeout {
                    provider: provider_id.to_string(),
                })
            }
        };

        LookupResult {
            provider_id,
            result,
            elapsed: started.elapsed(),
        }
    }
}

/// Fold sanitized answers (in priority order) into a record.
fn aggregate(
    identifier: &AccountIdentifier,
    answers: Vec<(ProviderId, ProviderLookup)>,
) -> DescriptiveRecord {
    if answers.is_empty() {
        return fallback_record(identifier);
    }

    let is_token = answers.iter().any(|(_, lookup)| lookup.is_token());
    // A token's holders never come from a provider that saw an account.
    let top_holders = answers
        .iter()
        .filter(|(_, lookup)| !is_token || lookup.kind_hint != Some(EntityKind::Account))
        .find_map(|(_, lookup)| lookup.top_holders.clone());
    let sources: Vec<ProviderId> = answers.iter().map(|(id, _)| id.clone()).collect();

    if is_token {
        let mut metrics = TokenMetrics::default();
        for (_, lookup) in &answers {
            metrics.fill_missing_from(&lookup.metrics);
        }
        return DescriptiveRecord::token_contract(identifier.clone(), metrics, top_holders, sources);
    }

    match top_holders {
        Some(flows) => DescriptiveRecord::account(identifier.clone(), Some(flows), sources),
        None => DescriptiveRecord::account(identifier.clone(), None, sources)
            .with_placeholder_holders(placeholder_holders(identifier)),
    }
}
