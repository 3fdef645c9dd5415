//! Error types and failure classification for the explorer crate.
//!
//! This module provides:
//! - [`ExplorerError`]: The main error enum for validation and provider lookups
//! - [`LookupFailure`]: How the resolver folds a provider failure into its policy

mod failure;

pub use failure::LookupFailure;

use thiserror::Error;

/// Errors that can occur while validating identifiers or querying providers.
///
/// Only [`ExplorerError::InvalidIdentifier`] ever reaches an end user. Every
/// provider-side variant is absorbed by the resolver, which treats the
/// provider as not having answered (see [`failure_class`](Self::failure_class)).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// The input string is not a valid account identifier for the network.
    #[error("Invalid Solana address: {0}")]
    InvalidIdentifier(String),

    /// The provider has no data for the identifier.
    #[error("Not found by {provider}")]
    NotFound {
        /// The provider that did not recognize the identifier
        provider: String,
    },

    /// The lookup did not complete within its deadline.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider rejected the request because of its rate limits (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// A provider-specific failure: transport error, malformed payload,
    /// JSON-RPC error object.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },
}

impl ExplorerError {
    /// Returns how the resolver should treat this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use solantics_explorer::errors::{ExplorerError, LookupFailure};
    ///
    /// let error = ExplorerError::Timeout { provider: "SOLANA_RPC".to_string() };
    /// assert_eq!(error.failure_class(), LookupFailure::Unavailable);
    ///
    /// let error = ExplorerError::NotFound { provider: "STATIC".to_string() };
    /// assert_eq!(error.failure_class(), LookupFailure::NotFound);
    /// ```
    pub fn failure_class(&self) -> LookupFailure {
        match self {
            Self::NotFound { .. } => LookupFailure::NotFound,

            Self::Timeout { .. } | Self::RateLimited { .. } | Self::ProviderError { .. } => {
                LookupFailure::Unavailable
            }

            // Providers only ever receive validated identifiers, so this can
            // only come from a provider re-parsing something it produced itself.
            Self::InvalidIdentifier(_) => LookupFailure::NotFound,
        }
    }

    /// Shorthand used by providers that did not recognize an identifier.
    pub fn not_found(provider: &str) -> Self {
        Self::NotFound {
            provider: provider.to_string(),
        }
    }

    /// Shorthand for a provider-specific failure.
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
