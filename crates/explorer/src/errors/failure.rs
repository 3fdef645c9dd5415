/// Classification of a failed provider lookup.
///
/// Both classes are absorbed by the resolver: the provider simply does not
/// contribute to classification or aggregation for that call. The split is
/// kept for diagnostics and logging.
///
/// | Class | Meaning | Logged at |
/// |-------|---------|-----------|
/// | `NotFound` | Provider answered, has nothing for this identifier | debug |
/// | `Unavailable` | Timeout, rate limit or provider error | warn |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupFailure {
    /// The provider does not know the identifier.
    NotFound,

    /// The provider could not answer at all.
    Unavailable,
}
