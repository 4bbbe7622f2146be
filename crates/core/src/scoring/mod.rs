//! Cohort-relative scoring: percentile-based factor scores, composites,
//! and the final deterministic ordering.

mod bands;
mod engine;
mod ranker;

pub use engine::{score_cohort, FactorScores, ScoredFund};
pub use ranker::rank;
