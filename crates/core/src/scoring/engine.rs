//! Cohort-relative scoring engine.
//!
//! Six independent factor computations share one shape: extract the defined
//! values for a dimension across the cohort, compute the fund's inclusive
//! percentile ("fraction of the pool performing no better"), and map it
//! through the dimension's band table. Funds missing the underlying data get
//! the dimension's neutral default and, where the dimension says so, are
//! also excluded from the comparison pool.
//!
//! The engine is a pure function of the cohort snapshot plus one `as_of`
//! instant captured per run: identical inputs produce bit-identical scores.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fundinsight_fund_data::Fund;

use crate::errors::{Error, Result};

use super::bands::{self, Dimension};

/// Average days per year, leap years included.
const DAYS_PER_YEAR: f64 = 365.25;

/// Comparison direction for a dimension.
#[derive(Clone, Copy, Debug)]
enum Direction {
    /// Larger field values rank higher (returns, age).
    HigherIsBetter,
    /// Smaller field values rank higher (fees, deviation from ideal scale).
    LowerIsBetter,
}

/// The six factor scores of one fund, each within its dimension's cap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorScores {
    /// Fee reasonableness, up to 15 points.
    pub fee_reasonableness: f64,
    /// Scale fitness, up to 15 points.
    pub scale_fitness: f64,
    /// Short-term (year-to-date) performance, up to 20 points.
    pub short_term_performance: f64,
    /// Long-term (annualized five-year) performance, up to 25 points.
    pub long_term_performance: f64,
    /// Excess-return quality over the benchmark, up to 10 points.
    pub excess_return_quality: f64,
    /// Stability from fund age, up to 15 points.
    pub stability: f64,
}

impl FactorScores {
    /// Composite score: the fixed-order sum of the six factors, max 100.
    pub fn composite(&self) -> f64 {
        self.fee_reasonableness
            + self.scale_fitness
            + self.short_term_performance
            + self.long_term_performance
            + self.excess_return_quality
            + self.stability
    }
}

/// A fund with its factor scores, composite score, and final rank.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFund {
    /// The underlying fund snapshot.
    pub fund: Fund,
    /// Per-dimension scores.
    pub factor_scores: FactorScores,
    /// Sum of the six factor scores, in [0, 100].
    pub composite_score: f64,
    /// 1-based position in the final ordering. Zero until assigned by
    /// [`rank`](super::rank).
    pub rank: u32,
}

/// Score every fund in the cohort relative to the batch.
///
/// `as_of` is the run's single "current moment": every age computation uses
/// it, so scoring the same cohort with the same `as_of` twice is
/// bit-identical. Requires a non-empty cohort; a singleton cohort puts the
/// sole fund at percentile 1.0 on every dimension it has data for.
pub fn score_cohort(cohort: &[Fund], as_of: DateTime<Utc>) -> Result<Vec<ScoredFund>> {
    if cohort.is_empty() {
        return Err(Error::EmptyCohort);
    }

    let fee_pool: Vec<f64> = cohort.iter().map(|f| f.total_annual_fee).collect();
    let deviation_pool: Vec<f64> = cohort
        .iter()
        .map(|f| (f.scale - bands::IDEAL_SCALE).abs())
        .collect();
    let ytd_pool: Vec<f64> = cohort.iter().filter_map(|f| f.year_to_date).collect();
    // Funds without a five-year record never enter the long-term pool.
    let long_term_pool: Vec<f64> = cohort
        .iter()
        .filter_map(|f| f.five_year)
        .map(annualized_five_year)
        .collect();
    let excess_pool: Vec<f64> = cohort.iter().filter_map(|f| f.excess_return).collect();
    let age_pool: Vec<f64> = cohort
        .iter()
        .filter_map(|f| f.established_on)
        .map(|d| age_years(d, as_of))
        .collect();

    let scored = cohort
        .iter()
        .map(|fund| {
            let factor_scores = FactorScores {
                fee_reasonableness: relative_score(
                    Some(fund.total_annual_fee),
                    &fee_pool,
                    Direction::LowerIsBetter,
                    &bands::FEE,
                ),
                scale_fitness: relative_score(
                    Some((fund.scale - bands::IDEAL_SCALE).abs()),
                    &deviation_pool,
                    Direction::LowerIsBetter,
                    &bands::SCALE,
                ),
                short_term_performance: relative_score(
                    fund.year_to_date,
                    &ytd_pool,
                    Direction::HigherIsBetter,
                    &bands::SHORT_TERM,
                ),
                long_term_performance: relative_score(
                    fund.five_year.map(annualized_five_year),
                    &long_term_pool,
                    Direction::HigherIsBetter,
                    &bands::LONG_TERM,
                ),
                excess_return_quality: relative_score(
                    fund.excess_return,
                    &excess_pool,
                    Direction::HigherIsBetter,
                    &bands::EXCESS,
                ),
                stability: relative_score(
                    fund.established_on.map(|d| age_years(d, as_of)),
                    &age_pool,
                    Direction::HigherIsBetter,
                    &bands::STABILITY,
                ),
            };

            let composite_score = factor_scores.composite();
            ScoredFund {
                fund: fund.clone(),
                factor_scores,
                composite_score,
                rank: 0,
            }
        })
        .collect();

    Ok(scored)
}

/// Score one dimension for one fund.
///
/// Returns the neutral default when the fund has no value for the dimension
/// or the comparison pool is empty.
fn relative_score(
    value: Option<f64>,
    pool: &[f64],
    direction: Direction,
    dimension: &Dimension,
) -> f64 {
    let Some(value) = value else {
        return dimension.neutral;
    };
    if pool.is_empty() {
        return dimension.neutral;
    }

    bands::score_percentile(dimension, percentile(pool, value, direction))
}

/// Inclusive percentile: the fraction of the pool performing no better than
/// `value` under the dimension's direction. Ties share the same percentile,
/// which is why a singleton pool always yields 1.0.
fn percentile(pool: &[f64], value: f64, direction: Direction) -> f64 {
    let no_better = pool
        .iter()
        .filter(|&&other| match direction {
            Direction::HigherIsBetter => other <= value,
            Direction::LowerIsBetter => other >= value,
        })
        .count();

    no_better as f64 / pool.len() as f64
}

/// Annualize a cumulative five-year return fraction.
fn annualized_five_year(cumulative: f64) -> f64 {
    (1.0 + cumulative).powf(1.0 / 5.0) - 1.0
}

/// Fund age in years at the scoring run's captured instant.
fn age_years(established_on: NaiveDate, as_of: DateTime<Utc>) -> f64 {
    (as_of.date_naive() - established_on).num_days() as f64 / DAYS_PER_YEAR
}
