//! Raw payload to [`Fund`] normalization.
//!
//! `normalize` is a pure function: given the three raw sub-resource payloads
//! for one fund it produces the canonical model, applying unit conversions,
//! derived-field computation, and defaults for absent optional data. The
//! total annual fee is computed exactly once here and treated as
//! authoritative everywhere downstream.

use chrono::NaiveDate;
use log::debug;

use crate::models::{Fund, FundCategory, RawAttributes, RawFees, RawPerformance};

/// Management fee substituted when the fee sub-resource has no data.
pub const DEFAULT_MANAGEMENT_FEE: f64 = 0.0015;

/// Custody fee substituted when the fee sub-resource has no data.
pub const DEFAULT_CUSTODY_FEE: f64 = 0.0005;

/// Per-field fallbacks applied inside a present fee schedule, percent units.
const FALLBACK_MANAGEMENT_FEE_PCT: f64 = 0.15;
const FALLBACK_CUSTODY_FEE_PCT: f64 = 0.05;

/// One hundred million currency units, the scale normalization magnitude.
const SCALE_UNIT: f64 = 100_000_000.0;

/// The seven fee components of a fund, as fractions.
#[derive(Clone, Copy, Debug)]
struct FeeProfile {
    management: f64,
    custody: f64,
    subscription: f64,
    redemption: f64,
    sales_service: f64,
    transaction: f64,
    other: f64,
}

impl FeeProfile {
    /// Build the profile from a present fee schedule, converting the
    /// provider's percentages to fractions. Subscription and redemption
    /// fees are fixed at zero: ETFs carry no subscription fee, and the
    /// redemption fee assumes long-term holding.
    fn from_raw(fees: &RawFees) -> Self {
        Self {
            management: fees.management_fee.unwrap_or(FALLBACK_MANAGEMENT_FEE_PCT) / 100.0,
            custody: fees.custodian_fee.unwrap_or(FALLBACK_CUSTODY_FEE_PCT) / 100.0,
            subscription: 0.0,
            redemption: 0.0,
            sales_service: fees.distribution_fee.unwrap_or(0.0) / 100.0,
            transaction: fees.trade_cost.unwrap_or(0.0) / 100.0,
            other: fees.other_cost.unwrap_or(0.0) / 100.0,
        }
    }

    /// Conservative default profile for funds whose fee data is absent.
    fn conservative_default() -> Self {
        Self {
            management: DEFAULT_MANAGEMENT_FEE,
            custody: DEFAULT_CUSTODY_FEE,
            subscription: 0.0,
            redemption: 0.0,
            sales_service: 0.0,
            transaction: 0.0,
            other: 0.0,
        }
    }

    /// Fixed-order sum of all seven components.
    fn total(&self) -> f64 {
        self.management
            + self.custody
            + self.subscription
            + self.redemption
            + self.sales_service
            + self.transaction
            + self.other
    }
}

/// Map raw provider payloads into the canonical [`Fund`] shape.
///
/// `performance` and `fees` may be absent; the fund still normalizes with
/// defaults for that sub-resource only. Returns are never defaulted - a
/// missing return stays `None` so the scoring engine can apply its
/// neutral-score rule instead of treating absence as zero.
pub fn normalize(
    code: &str,
    name_override: Option<&str>,
    attributes: &RawAttributes,
    performance: Option<&RawPerformance>,
    fees: Option<&RawFees>,
) -> Fund {
    let name = name_override
        .map(str::to_string)
        .or_else(|| attributes.name.clone().filter(|n| !n.is_empty()))
        .unwrap_or_else(|| format!("Fund {}", code));

    let scale = attributes
        .fund_size
        .map(|size| round_dp(size / SCALE_UNIT, 2))
        .unwrap_or(0.0);

    let established_on = attributes
        .inception_date
        .as_deref()
        .and_then(parse_inception_date);

    let profile = match fees {
        Some(raw) => FeeProfile::from_raw(raw),
        None => {
            debug!("{}: no fee data, using conservative defaults", code);
            FeeProfile::conservative_default()
        }
    };

    let year_to_date = performance.and_then(|p| p.year_to_date).map(percent_to_fraction);
    let three_year = performance.and_then(|p| p.three_year).map(percent_to_fraction);
    let five_year = performance.and_then(|p| p.five_year).map(percent_to_fraction);
    let benchmark_year_to_date = performance
        .and_then(|p| p.benchmark_year_to_date)
        .map(percent_to_fraction);

    // Derived only when both sides are known; absent must never collapse
    // to zero/false, which would bias the relative scoring.
    let excess_return = match (year_to_date, benchmark_year_to_date) {
        (Some(fund), Some(benchmark)) => Some(round_dp(fund - benchmark, 4)),
        _ => None,
    };
    let beats_benchmark = excess_return.map(|excess| excess > 0.0);

    Fund {
        code: code.to_string(),
        name,
        management_fee: profile.management,
        custody_fee: profile.custody,
        subscription_fee: profile.subscription,
        redemption_fee: profile.redemption,
        sales_service_fee: profile.sales_service,
        transaction_cost: profile.transaction,
        other_cost: profile.other,
        total_annual_fee: profile.total(),
        scale,
        year_to_date,
        three_year,
        five_year,
        established_on,
        benchmark_name: performance.and_then(|p| p.benchmark_name.clone()),
        excess_return,
        beats_benchmark,
        category: FundCategory::from_code(code),
    }
}

/// Provider percent (0.15 meaning 0.15%) to fraction (0.0015), rounded.
fn percent_to_fraction(percent: f64) -> f64 {
    round_dp(percent / 100.0, 4)
}

fn parse_inception_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn round_dp(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
