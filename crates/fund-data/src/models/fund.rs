use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Code prefixes that identify exchange-traded funds.
///
/// 51/588 are Shanghai ETFs, 159 Shenzhen ETFs, 16 LOFs, 15 closed-end funds.
/// Anything else is treated as an over-the-counter fund.
const EXCHANGE_TRADED_PREFIXES: &[&str] = &["51", "588", "159", "16", "15"];

/// Trading venue category of a fund, derived from its code prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FundCategory {
    /// Traded on an exchange (ETF, LOF, closed-end).
    ExchangeTraded,
    /// Subscribed and redeemed over the counter.
    OverTheCounter,
}

impl FundCategory {
    /// Derive the category from a fund code's structural prefix.
    ///
    /// The lookup is a fixed table of known prefixes; unmatched codes
    /// default to [`FundCategory::OverTheCounter`].
    pub fn from_code(code: &str) -> Self {
        if EXCHANGE_TRADED_PREFIXES.iter().any(|p| code.starts_with(p)) {
            Self::ExchangeTraded
        } else {
            Self::OverTheCounter
        }
    }

    /// Display label for reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExchangeTraded => "exchange-traded",
            Self::OverTheCounter => "over-the-counter",
        }
    }
}

/// One fund's canonical attributes for a single acquisition run.
///
/// Produced by the normalizer from raw provider payloads and immutable from
/// then on. All fee and return fields are fractions (0.0015 means 0.15%);
/// `scale` is in units of hundred-million currency.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    /// Fund code, unique within a cohort.
    pub code: String,

    /// Display name. Falls back to a synthesized placeholder when the
    /// provider omits it.
    pub name: String,

    /// Management fee, annual fraction.
    pub management_fee: f64,

    /// Custody fee, annual fraction.
    pub custody_fee: f64,

    /// Subscription fee fraction (0 for ETFs).
    pub subscription_fee: f64,

    /// Redemption fee fraction (0 assuming long-term holding).
    pub redemption_fee: f64,

    /// Sales service (distribution) fee, annual fraction.
    pub sales_service_fee: f64,

    /// Estimated transaction cost fraction, derived from turnover.
    pub transaction_cost: f64,

    /// Estimated other cost fraction (audit, legal, disclosure).
    pub other_cost: f64,

    /// Total annual fee: the fixed-order sum of all seven components above.
    /// Computed once at normalization and authoritative downstream.
    pub total_annual_fee: f64,

    /// Fund size in hundred-million currency units.
    pub scale: f64,

    /// Year-to-date return fraction. `None` means not disclosed, never zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_to_date: Option<f64>,

    /// Trailing three-year return fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_year: Option<f64>,

    /// Trailing five-year return fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub five_year: Option<f64>,

    /// Inception date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_on: Option<NaiveDate>,

    /// Name of the comparison index the provider reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_name: Option<String>,

    /// Year-to-date return minus the benchmark's year-to-date return.
    /// Present only when both sides are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess_return: Option<f64>,

    /// Whether the fund beats its benchmark, derived from the sign of
    /// `excess_return`. Present exactly when `excess_return` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beats_benchmark: Option<bool>,

    /// Trading venue category derived from the code prefix.
    pub category: FundCategory,
}
