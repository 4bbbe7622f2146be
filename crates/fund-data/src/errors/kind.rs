/// Classification of fund fetch failures.
///
/// Used to determine how a per-fund failure should be treated by the
/// orchestrator and reported to callers.
///
/// # Behavior Summary
///
/// | Kind | Fund excluded from run? | Worth retrying later? |
/// |------|------------------------|-----------------------|
/// | `NotFound` | Yes | No |
/// | `RateLimited` | Yes | Yes (provider backpressure) |
/// | `Transient` | Yes | Yes (network/timeout) |
/// | `Malformed` | Yes | No (provider contract changed) |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// The fund code is unknown to the provider.
    /// The code is fundamentally invalid and retrying won't help.
    NotFound,

    /// The provider signaled backpressure (HTTP 429).
    ///
    /// The transport has already slept once before surfacing this, so the
    /// next caller's attempt is naturally delayed. The failed request itself
    /// is not replayed inside this crate; retry policy belongs to the caller.
    RateLimited,

    /// A timeout or connection-level error.
    /// Another attempt in a later run may succeed.
    Transient,

    /// The response did not match the expected structured format.
    ///
    /// Treated like `Transient` for propagation purposes, but recorded
    /// separately since it usually means the provider contract drifted.
    Malformed,
}

impl FailureKind {
    /// Short identifier for logging and failure reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Transient => "transient",
            Self::Malformed => "malformed",
        }
    }
}
