//! Metric provider abstractions and implementations.
//!
//! This module contains:
//! - The `MetricProvider` trait that all providers implement
//! - `StaticProvider`, an offline table of well-known tokens
//! - `SolanaRpcProvider`, live classification through Solana JSON-RPC
//! - `SingleFlight`, a wrapper coalescing concurrent lookups
//!
//! Providers are interchangeable: the resolver only sees the trait, so
//! offline tables, live services and test fakes compose freely.

mod single_flight;
mod traits;

pub mod solana_rpc;
pub mod static_table;

// Re-exports
pub use single_flight::SingleFlight;
pub use solana_rpc::SolanaRpcProvider;
pub use static_table::StaticProvider;
pub use traits::MetricProvider;
