use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;
use tokio::sync::watch;

use crate::context::ExplorerContext;
use crate::identifier::AccountIdentifier;
use crate::models::DescriptiveRecord;
use crate::resolver::AddressResolver;

/// A connected wallet, as far as searching is concerned.
pub trait WalletSession: Send + Sync {
    fn is_connected(&self) -> bool;
}

/// Reasons a search produced no record. The messages are user-facing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please connect your wallet to search")]
    WalletNotConnected,

    #[error("Please enter a Solana address or token contract")]
    EmptyQuery,

    #[error("Invalid Solana address format")]
    InvalidAddressFormat,

    /// A newer search started before this one finished.
    #[error("Search superseded by a newer request")]
    Superseded,
}

/// The most recent record published by a session.
#[derive(Clone, Debug, PartialEq)]
pub struct PublishedRecord {
    /// Sequence number of the search that produced the record
    pub sequence: u64,
    pub record: DescriptiveRecord,
}

pub struct SearchSession {
    resolver: Arc<AddressResolver>,
    wallet: Option<Arc<dyn WalletSession>>,
    require_wallet: bool,
    next_sequence: AtomicU64,
    /// Sequence number of the newest search started
    started: watch::Sender<u64>,
    published: watch::Sender<Option<PublishedRecord>>,
}

impl SearchSession {
    /// Session without wallet gating.
    pub fn new(resolver: Arc<AddressResolver>) -> Self {
        let (started, _) = watch::channel(0);
        let (published, _) = watch::channel(None);

        Self {
            resolver,
            wallet: None,
            require_wallet: false,
            next_sequence: AtomicU64::new(0),
            started,
            published,
        }
    }

    /// Session over the context's providers, gated as configured.
    pub fn from_context(context: &ExplorerContext) -> Self {
        Self::new(Arc::new(AddressResolver::from_context(context)))
            .require_wallet(context.config().require_wallet)
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletSession>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn require_wallet(mut self, required: bool) -> Self {
        self.require_wallet = required;
        self
    }

    /// Watch the published record.
    pub fn subscribe(&self) -> watch::Receiver<Option<PublishedRecord>> {
        self.published.subscribe()
    }

    /// The record currently published, if any.
    pub fn latest(&self) -> Option<PublishedRecord> {
        self.published.borrow().clone()
    }

    /// Run the pre-search checks on a query.
    ///
    /// A blank query is reported as empty. Anything else is validated as
    /// typed, so surrounding whitespace makes the address invalid. A query
    /// that fails here never reaches the resolver and does not cancel a
    /// search in flight.
    pub fn check(&self, query: &str) -> Result<AccountIdentifier, SearchError> {
        if self.require_wallet && !self.wallet.as_ref().is_some_and(|w| w.is_connected()) {
            return Err(SearchError::WalletNotConnected);
        }

        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        AccountIdentifier::parse(query).map_err(|_| SearchError::InvalidAddressFormat)
    }

    /// Search for an address or token contract.
    ///
    /// Returns [`SearchError::Superseded`] when a newer search started
    /// before this one completed; its record is then never published.
    pub async fn search(&self, query: &str) -> Result<DescriptiveRecord, SearchError> {
        let identifier = self.check(query)?;

        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.started.send_modify(|newest| *newest = (*newest).max(sequence));
        let mut newest = self.started.subscribe();

        debug!("Search #{} for {}", sequence, identifier);

        let record = tokio::select! {
            record = self.resolver.resolve(&identifier) => record,
            _ = newest.wait_for(|newest| *newest > sequence) => {
                debug!("Search #{} for {} cancelled by a newer search", sequence, identifier);
                return Err(SearchError::Superseded);
            }
        };

        let published = self.published.send_if_modified(|current| match current {
            Some(existing) if existing.sequence > sequence => false,
            _ => {
                *current = Some(PublishedRecord {
                    sequence,
                    record: record.clone(),
                });
                true
            }
        });

        if !published {
            return Err(SearchError::Superseded);
        }

        info!(
            "Search #{} resolved {} as {}",
            sequence,
            identifier,
            record.kind.as_str()
        );
        Ok(record)
    }
}
