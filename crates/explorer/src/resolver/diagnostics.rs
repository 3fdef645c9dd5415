//! Per-provider outcome tracking for a single resolution.

use std::time::Duration;

use crate::errors::{ExplorerError, LookupFailure};
use crate::models::{EntityKind, ProviderId};

/// What happened when a provider was asked about an identifier.
#[derive(Clone, Debug, PartialEq)]
pub enum AttemptOutcome {
    /// Provider answered with a definitive token contract match.
    MatchedToken,

    /// Provider answered without claiming a token contract.
    Answered,

    /// Provider does not know the identifier.
    NotFound,

    /// Provider did not answer within its deadline.
    TimedOut,

    /// Provider failed (transport, rate limit, malformed payload).
    Failed { message: String },
}

impl AttemptOutcome {
    pub(crate) fn from_error(error: &ExplorerError) -> Self {
        match error {
            ExplorerError::Timeout { .. } => Self::TimedOut,
            _ if error.failure_class() == LookupFailure::NotFound => Self::NotFound,
            other => Self::Failed {
                message: other.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::MatchedToken | Self::Answered)
    }
}

/// Record of a single provider attempt during a resolution.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider_id: ProviderId,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

/// Detailed result of a resolution: one attempt per registered provider,
/// in priority order.
#[derive(Clone, Debug, Default)]
pub struct ResolutionDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
    /// Classification the resolver settled on
    pub kind: Option<EntityKind>,
    /// Whether the record was synthesized without any provider data
    pub fallback: bool,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, provider_id: ProviderId, outcome: AttemptOutcome, elapsed: Duration) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            outcome,
            elapsed,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        if self.attempts.is_empty() {
            return "no providers registered".to_string();
        }

        self.attempts
            .iter()
            .map(|a| match &a.outcome {
                AttemptOutcome::MatchedToken => format!("{}: TOKEN", a.provider_id),
                AttemptOutcome::Answered => format!("{}: ANSWERED", a.provider_id),
                AttemptOutcome::NotFound => format!("{}: NOT_FOUND", a.provider_id),
                AttemptOutcome::TimedOut => {
                    format!("{}: TIMEOUT ({}ms)", a.provider_id, a.elapsed.as_millis())
                }
                AttemptOutcome::Failed { message } => {
                    format!("{}: ERROR ({})", a.provider_id, message)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Check if any provider answered.
    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(|a| a.outcome.is_success())
    }

    /// Providers that timed out or failed.
    pub fn unavailable(&self) -> Vec<&ProviderId> {
        self.attempts
            .iter()
            .filter(|a| {
                matches!(
                    a.outcome,
                    AttemptOutcome::TimedOut | AttemptOutcome::Failed { .. }
                )
            })
            .map(|a| &a.provider_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[test]
    fn test_diagnostics_summary() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record(
            Cow::Borrowed("SOLANA_RPC"),
            AttemptOutcome::TimedOut,
            Duration::from_millis(5000),
        );
        diag.record(
            Cow::Borrowed("INDEXER"),
            AttemptOutcome::Failed {
                message: "HTTP 502".to_string(),
            },
            Duration::from_millis(12),
        );
        diag.record(
            Cow::Borrowed("STATIC"),
            AttemptOutcome::MatchedToken,
            Duration::ZERO,
        );

        let summary = diag.summary();
        assert!(summary.contains("SOLANA_RPC: TIMEOUT (5000ms)"));
        assert!(summary.contains("INDEXER: ERROR (HTTP 502)"));
        assert!(summary.contains("STATIC: TOKEN"));
    }

    #[test]
    fn test_has_success() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record(Cow::Borrowed("A"), AttemptOutcome::NotFound, Duration::ZERO);
        assert!(!diag.has_success());

        diag.record(Cow::Borrowed("B"), AttemptOutcome::Answered, Duration::ZERO);
        assert!(diag.has_success());
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(
            AttemptOutcome::from_error(&ExplorerError::not_found("A")),
            AttemptOutcome::NotFound
        );
        assert_eq!(
            AttemptOutcome::from_error(&ExplorerError::Timeout {
                provider: "A".to_string()
            }),
            AttemptOutcome::TimedOut
        );
        assert!(matches!(
            AttemptOutcome::from_error(&ExplorerError::provider("A", "boom")),
            AttemptOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_unavailable() {
        let mut diag = ResolutionDiagnostics::new();
        diag.record(Cow::Borrowed("A"), AttemptOutcome::TimedOut, Duration::ZERO);
        diag.record(Cow::Borrowed("B"), AttemptOutcome::NotFound, Duration::ZERO);
        assert_eq!(diag.unavailable().len(), 1);
        assert_eq!(ResolutionDiagnostics::new().summary(), "no providers registered");
    }
}
