//! Solantics Explorer Crate
//!
//! This crate turns user-supplied Solana addresses into descriptive records
//! for the Solantics explorer.
//!
//! # Overview
//!
//! The explorer crate supports:
//! - Account identifier validation (base58, 32-byte public keys)
//! - Classification of identifiers as token contracts or ordinary accounts
//! - Metric aggregation across prioritized providers
//! - Deterministic placeholder data when no provider can help
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +-------------------+
//! |   Search input   | --> | AccountIdentifier |  (validated address)
//! +------------------+     +-------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | AddressResolver  |  (concurrent, per-provider timeout)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | MetricProvider   |  (Solana RPC, static table, etc.)
//!                          +------------------+
//!                                  |
//!                                  v
//!                         +--------------------+
//!                         | DescriptiveRecord  |  (classified, merged, or placeholder)
//!                         +--------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   RecordView     |  (presentation)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`AccountIdentifier`] - A validated Solana address
//! - [`DescriptiveRecord`] - The resolved description of an identifier
//! - [`TokenMetrics`] - Optional token fields merged across providers
//! - [`EntityKind`] - Token contract or ordinary account
//! - [`SearchSession`] - Last-request-wins search boundary
//!
//! # Type Aliases
//!
//! - [`ProviderId`] - Provider identifier (e.g., "STATIC", "SOLANA_RPC")

pub mod config;
pub mod context;
pub mod errors;
pub mod identifier;
pub mod models;
pub mod placeholder;
pub mod provider;
pub mod resolver;
pub mod search;
pub mod view;

pub use config::{Cluster, ResolverConfig};
pub use context::ExplorerContext;
pub use errors::{ExplorerError, LookupFailure};
pub use identifier::{validate, AccountIdentifier, AddressError};

pub use models::{DescriptiveRecord, EntityKind, HolderShare, ProviderId, ProviderLookup, TokenMetrics};

// Re-export provider types
pub use provider::{MetricProvider, SingleFlight, SolanaRpcProvider, StaticProvider};

// Re-export resolver types
pub use resolver::{AddressResolver, AttemptOutcome, ProviderAttempt, ResolutionDiagnostics};

pub use placeholder::TokenNetwork;
pub use search::{PublishedRecord, SearchError, SearchSession, WalletSession};
pub use view::{MetricValue, RecordView};
