//! Address resolution.
//!
//! [`AddressResolver`] queries the registered metric providers, classifies
//! the identifier and assembles a [`DescriptiveRecord`](crate::models::DescriptiveRecord),
//! synthesizing placeholder data when no provider can help.

mod address_resolver;
mod diagnostics;
mod fallback;
mod validator;

pub use address_resolver::{AddressResolver, DEFAULT_PROVIDER_TIMEOUT};
pub use diagnostics::{AttemptOutcome, ProviderAttempt, ResolutionDiagnostics};
pub use fallback::{fallback_record, placeholder_holders, PLACEHOLDER_SHARES};
pub use validator::LookupValidator;
