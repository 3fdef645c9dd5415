//! Explorer models
//!
//! This module contains the core data types for address resolution:
//! - `types` - Type aliases for common identifiers (ProviderId)
//! - `metrics` - Partial metric sets returned by providers (TokenMetrics, ProviderLookup)
//! - `holders` - Holder / counterpart distribution entries (HolderShare)
//! - `record` - The normalized output handed to the presentation layer (DescriptiveRecord)

mod holders;
mod metrics;
mod record;
mod types;

pub use holders::{HolderShare, MAX_SHARE_PERCENTAGE};
pub use metrics::{ProviderLookup, TokenMetrics};
pub use record::{DescriptiveRecord, EntityKind};
pub use types::ProviderId;
