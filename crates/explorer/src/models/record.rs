use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::holders::HolderShare;
use super::metrics::TokenMetrics;
use super::types::ProviderId;
use crate::identifier::AccountIdentifier;

/// What an account identifier names on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A fungible token mint.
    TokenContract,
    /// Any other account (wallets, programs, data accounts).
    Account,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenContract => "TOKEN_CONTRACT",
            Self::Account => "ACCOUNT",
        }
    }
}

/// Normalized description of an identifier, handed to the presentation layer.
///
/// Built fresh for every resolution and owned by the caller. Token fields are
/// only ever populated for [`EntityKind::TokenContract`]; an absent field
/// means "unavailable", never zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveRecord {
    /// The identifier that was resolved, verbatim
    pub address: AccountIdentifier,

    /// Classification decided during resolution
    pub kind: EntityKind,

    /// Token fields (empty for accounts)
    #[serde(flatten)]
    pub metrics: TokenMetrics,

    /// Holders for tokens, largest counterpart flows for accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_holders: Option<Vec<HolderShare>>,

    /// Providers that contributed data, in priority order
    pub sources: Vec<ProviderId>,

    /// Whether `top_holders` are placeholders derived from the address
    pub synthetic: bool,

    /// When the record was assembled
    pub resolved_at: DateTime<Utc>,
}

impl DescriptiveRecord {
    /// Record for a token contract.
    pub fn token_contract(
        address: AccountIdentifier,
        metrics: TokenMetrics,
        top_holders: Option<Vec<HolderShare>>,
        sources: Vec<ProviderId>,
    ) -> Self {
        Self {
            address,
            kind: EntityKind::TokenContract,
            metrics,
            top_holders,
            sources,
            synthetic: false,
            resolved_at: Utc::now(),
        }
    }

    /// Record for an ordinary account. Token fields stay empty.
    pub fn account(
        address: AccountIdentifier,
        top_holders: Option<Vec<HolderShare>>,
        sources: Vec<ProviderId>,
    ) -> Self {
        Self {
            address,
            kind: EntityKind::Account,
            metrics: TokenMetrics::default(),
            top_holders,
            sources,
            synthetic: false,
            resolved_at: Utc::now(),
        }
    }

    /// Replace the holders with synthetic placeholders.
    pub fn with_placeholder_holders(mut self, holders: Vec<HolderShare>) -> Self {
        self.top_holders = Some(holders);
        self.synthetic = true;
        self
    }

    pub fn is_token(&self) -> bool {
        self.kind == EntityKind::TokenContract
    }

    /// True when no provider contributed anything.
    pub fn is_fallback(&self) -> bool {
        self.sources.is_empty()
    }
}
