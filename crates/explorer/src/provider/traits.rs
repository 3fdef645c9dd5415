//! Metric provider trait definitions.
//!
//! This module defines the core `MetricProvider` trait that every source of
//! address metrics implements, whether it is an offline table or a live
//! network service.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::ExplorerError;
use crate::identifier::AccountIdentifier;
use crate::models::ProviderLookup;

/// Trait for metric providers.
///
/// Implement this trait to add a new source of classification hints or
/// token metrics. The resolver queries every registered provider for each
/// identifier, in priority order, and merges their answers.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use solantics_explorer::provider::MetricProvider;
///
/// struct MyIndexer {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MetricProvider for MyIndexer {
///     fn id(&self) -> &'static str {
///         "MY_INDEXER"
///     }
///
///     async fn lookup(
///         &self,
///         identifier: &AccountIdentifier,
///     ) -> Result<ProviderLookup, ExplorerError> {
///         // ... query the indexer
///     }
/// }
/// ```
#[async_trait]
pub trait MetricProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "STATIC", "SOLANA_RPC", etc.
    /// Used for logging, diagnostics and record provenance.
    fn id(&self) -> &'static str;

    /// Provider priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10. Providers with equal
    /// priority keep their registration order.
    fn priority(&self) -> u8 {
        10
    }

    /// Lookup deadline for this provider.
    ///
    /// `None` uses the resolver's default. The resolver enforces the
    /// deadline; providers do not need to.
    fn timeout(&self) -> Option<Duration> {
        None
    }

    /// Look up everything this provider knows about an identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(lookup)` - The provider has data (and possibly a kind hint)
    /// * `Err(ExplorerError::NotFound { .. })` - The provider does not know the identifier
    /// * `Err(_)` - Any other failure; the resolver treats it like not-found
    async fn lookup(&self, identifier: &AccountIdentifier)
        -> Result<ProviderLookup, ExplorerError>;
}
