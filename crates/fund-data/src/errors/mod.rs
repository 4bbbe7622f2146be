//! Error types and failure classification for the fund data crate.
//!
//! This module provides:
//! - [`FetchError`]: The main error enum for all fund data operations
//! - [`FailureKind`]: Classification for reporting and retry decisions
//! - [`FetchFailure`]: A per-fund failure record collected during batch runs

mod kind;

pub use kind::FailureKind;

use thiserror::Error;

/// Errors that can occur while fetching fund data from a provider.
///
/// Each variant is classified into a [`FailureKind`] via the
/// [`failure_kind`](Self::failure_kind) method, which determines how the
/// orchestrator reports the failure.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The requested fund was not found by the provider (HTTP 404).
    /// This is a terminal error - retrying won't help.
    #[error("Fund not found: {0}")]
    NotFound(String),

    /// The provider rate limited the request (HTTP 429).
    /// The transport has already applied its backpressure delay.
    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    /// The request timed out or failed at the connection level.
    #[error("Transient transport error: {0}")]
    Transient(String),

    /// The response body did not parse as the expected structured format,
    /// or the provider's response envelope reported a non-success status.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use fundinsight_fund_data::errors::{FetchError, FailureKind};
    ///
    /// let error = FetchError::NotFound("000000".to_string());
    /// assert_eq!(error.failure_kind(), FailureKind::NotFound);
    ///
    /// let error = FetchError::Transient("connection reset".to_string());
    /// assert_eq!(error.failure_kind(), FailureKind::Transient);
    /// ```
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::NotFound(_) => FailureKind::NotFound,
            Self::RateLimited(_) => FailureKind::RateLimited,
            Self::Transient(_) => FailureKind::Transient,
            Self::Malformed(_) => FailureKind::Malformed,
        }
    }
}

/// A per-fund failure collected during a batch run.
///
/// Failures never abort the batch; the orchestrator collects one record per
/// failed code and returns them alongside the successfully fetched funds.
#[derive(Clone, Debug)]
pub struct FetchFailure {
    /// The fund code that failed.
    pub code: String,
    /// Classified cause of the failure.
    pub kind: FailureKind,
    /// Human-readable detail from the underlying error.
    pub message: String,
}

impl FetchFailure {
    /// Build a failure record for a code from the error that sank it.
    pub fn new(code: impl Into<String>, error: &FetchError) -> Self {
        Self {
            code: code.into(),
            kind: error.failure_kind(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let error = FetchError::NotFound("999999".to_string());
        assert_eq!(error.failure_kind(), FailureKind::NotFound);
    }

    #[test]
    fn test_rate_limited_classification() {
        let error = FetchError::RateLimited("funds/515890/fees".to_string());
        assert_eq!(error.failure_kind(), FailureKind::RateLimited);
    }

    #[test]
    fn test_transient_classification() {
        let error = FetchError::Transient("timeout".to_string());
        assert_eq!(error.failure_kind(), FailureKind::Transient);
    }

    #[test]
    fn test_malformed_classification() {
        let error = FetchError::Malformed("invalid JSON".to_string());
        assert_eq!(error.failure_kind(), FailureKind::Malformed);
    }

    #[test]
    fn test_error_display() {
        let error = FetchError::NotFound("999999".to_string());
        assert_eq!(format!("{}", error), "Fund not found: 999999");

        let error = FetchError::Malformed("missing data field".to_string());
        assert_eq!(
            format!("{}", error),
            "Malformed provider response: missing data field"
        );
    }

    #[test]
    fn test_fetch_failure_record() {
        let error = FetchError::Transient("connection reset".to_string());
        let failure = FetchFailure::new("515890", &error);
        assert_eq!(failure.code, "515890");
        assert_eq!(failure.kind, FailureKind::Transient);
        assert!(failure.message.contains("connection reset"));
    }

    #[test]
    fn test_failure_kind_as_str() {
        assert_eq!(FailureKind::NotFound.as_str(), "not_found");
        assert_eq!(FailureKind::RateLimited.as_str(), "rate_limited");
        assert_eq!(FailureKind::Transient.as_str(), "transient");
        assert_eq!(FailureKind::Malformed.as_str(), "malformed");
    }
}
