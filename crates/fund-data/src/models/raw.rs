//! Provider-neutral raw payload shapes.
//!
//! These structs are the normalizer's input contract: the minimal shape a
//! provider has to fill in, independent of its wire format. Numeric fee and
//! return fields carry the provider's percentage units (0.15 means 0.15%);
//! the normalizer owns the conversion to fractions.

use serde::{Deserialize, Serialize};

/// Structural attributes of a fund: identity, size, inception.
///
/// This sub-resource is mandatory - a fund without it cannot be normalized.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawAttributes {
    /// Display name as reported by the provider.
    pub name: Option<String>,

    /// Fund size in raw currency units.
    pub fund_size: Option<f64>,

    /// Inception date string, `YYYY-MM-DD`.
    pub inception_date: Option<String>,
}

/// Period returns and benchmark comparison for a fund.
///
/// All returns are percentages as reported by the provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawPerformance {
    /// Name of the comparison index.
    pub benchmark_name: Option<String>,

    /// Year-to-date return, percent.
    pub year_to_date: Option<f64>,

    /// Trailing three-year return, percent.
    pub three_year: Option<f64>,

    /// Trailing five-year return, percent.
    pub five_year: Option<f64>,

    /// The benchmark's year-to-date return, percent.
    pub benchmark_year_to_date: Option<f64>,
}

/// Fee schedule for a fund, percentages as reported by the provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawFees {
    /// Management fee, percent per year.
    pub management_fee: Option<f64>,

    /// Custodian fee, percent per year.
    pub custodian_fee: Option<f64>,

    /// Distribution (sales service) fee, percent per year.
    pub distribution_fee: Option<f64>,

    /// Estimated trading cost, percent per year.
    pub trade_cost: Option<f64>,

    /// Estimated other cost, percent per year.
    pub other_cost: Option<f64>,
}
