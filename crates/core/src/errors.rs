//! Core error types for the ranking pipeline.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the scoring and ranking pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Scoring is cohort-relative and needs at least one fund.
    #[error("Cannot score an empty cohort")]
    EmptyCohort,
}
