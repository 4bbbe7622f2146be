//! Response payload structures for the Morningstar fund API.

use serde::Deserialize;

use crate::models::{RawAttributes, RawFees, RawPerformance};

/// Payload of the `common-data` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct CommonData {
    /// Fund name.
    name: Option<String>,
    /// Alternate name field some listings use instead of `name`.
    fund_name: Option<String>,
    /// Fund size in raw currency units.
    fund_size: Option<f64>,
    /// Inception date, `YYYY-MM-DD`.
    inception_date: Option<String>,
}

impl CommonData {
    pub(super) fn into_raw(self) -> RawAttributes {
        RawAttributes {
            name: self.name.or(self.fund_name),
            fund_size: self.fund_size,
            inception_date: self.inception_date,
        }
    }
}

/// Payload of the `performance` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct PerformanceData {
    /// Name of the comparison index.
    benchmark_name: Option<String>,
    /// Day-end return block.
    day_end: Option<DayEnd>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DayEnd {
    returns: Option<PeriodReturns>,
    benchmark_returns: Option<PeriodReturns>,
}

/// Period returns keyed by the provider's period labels, percent units.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PeriodReturns {
    #[serde(rename = "YTD")]
    ytd: Option<f64>,
    #[serde(rename = "Y3")]
    y3: Option<f64>,
    #[serde(rename = "Y5")]
    y5: Option<f64>,
}

impl PerformanceData {
    pub(super) fn into_raw(self) -> RawPerformance {
        let day_end = self.day_end.unwrap_or_default();
        let returns = day_end.returns.unwrap_or_default();
        let benchmark_returns = day_end.benchmark_returns.unwrap_or_default();

        RawPerformance {
            benchmark_name: self.benchmark_name,
            year_to_date: returns.ytd,
            three_year: returns.y3,
            five_year: returns.y5,
            benchmark_year_to_date: benchmark_returns.ytd,
        }
    }
}

/// Payload of the `fees` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FeesData {
    fees: Option<FeeSchedule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FeeSchedule {
    management_fee: Option<f64>,
    custodian_fee: Option<f64>,
    distribution_fee: Option<f64>,
    trade_cost: Option<f64>,
    other_cost: Option<f64>,
}

impl FeesData {
    /// Returns `None` when the payload carries no fee schedule at all,
    /// letting the normalizer substitute the default profile.
    pub(super) fn into_raw(self) -> Option<RawFees> {
        self.fees.map(|fees| RawFees {
            management_fee: fees.management_fee,
            custodian_fee: fees.custodian_fee,
            distribution_fee: fees.distribution_fee,
            trade_cost: fees.trade_cost,
            other_cost: fees.other_cost,
        })
    }
}
