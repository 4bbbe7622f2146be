//! Fund data provider trait definitions.
//!
//! This module defines the `FundDataProvider` trait that fund data sources
//! implement. A provider exposes one operation per sub-resource; the fetcher
//! fans the three out concurrently and the normalizer turns the raw payloads
//! into a [`Fund`](crate::models::Fund).

pub mod morningstar;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{RawAttributes, RawFees, RawPerformance};

/// Trait for fund data providers.
///
/// The three operations mirror the provider's per-fund sub-resources.
/// Attributes are structural and mandatory; performance and fees frequently
/// have no data for new or illiquid funds, so those operations return
/// `Ok(None)` when the provider has nothing to report - absence is not an
/// error.
#[async_trait]
pub trait FundDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the structural attributes of a fund: name, size, inception.
    async fn fetch_attributes(&self, code: &str) -> Result<RawAttributes, FetchError>;

    /// Fetch period returns and the benchmark comparison for a fund.
    async fn fetch_performance(&self, code: &str)
        -> Result<Option<RawPerformance>, FetchError>;

    /// Fetch the fee schedule for a fund.
    async fn fetch_fees(&self, code: &str) -> Result<Option<RawFees>, FetchError>;
}
