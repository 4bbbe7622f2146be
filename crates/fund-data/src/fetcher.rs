//! Per-fund sub-resource fan-out/fan-in.
//!
//! For one fund code the fetcher issues the three sub-requests (attributes,
//! performance, fees) concurrently and waits for all of them. Attributes are
//! structural and mandatory - without them the fund fetch fails. Performance
//! and fees degrade gracefully: a failure or empty payload on either leaves
//! that sub-resource to the normalizer's defaults instead of excluding the
//! fund.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crate::errors::FetchError;
use crate::models::Fund;
use crate::normalizer::normalize;
use crate::provider::FundDataProvider;

/// Fetches and normalizes one fund at a time.
pub struct FundFetcher {
    provider: Arc<dyn FundDataProvider>,
    name_overrides: HashMap<String, String>,
}

impl FundFetcher {
    /// Create a fetcher over the given provider.
    pub fn new(provider: Arc<dyn FundDataProvider>) -> Self {
        Self::with_name_overrides(provider, HashMap::new())
    }

    /// Create a fetcher with a sidecar code-to-name mapping that takes
    /// precedence over the provider-reported fund name.
    pub fn with_name_overrides(
        provider: Arc<dyn FundDataProvider>,
        name_overrides: HashMap<String, String>,
    ) -> Self {
        Self {
            provider,
            name_overrides,
        }
    }

    /// Fetch one fund's three sub-resources concurrently and normalize.
    pub async fn fetch_fund(&self, code: &str) -> Result<Fund, FetchError> {
        debug!("Fetching fund {} from {}", code, self.provider.id());

        let (attributes, performance, fees) = tokio::join!(
            self.provider.fetch_attributes(code),
            self.provider.fetch_performance(code),
            self.provider.fetch_fees(code),
        );

        // Attributes are mandatory; the other two degrade to defaults.
        let attributes = attributes?;

        let performance = performance.unwrap_or_else(|e| {
            warn!("{}: performance unavailable ({}), degrading", code, e);
            None
        });
        let fees = fees.unwrap_or_else(|e| {
            warn!("{}: fees unavailable ({}), degrading", code, e);
            None
        });

        let fund = normalize(
            code,
            self.name_overrides.get(code).map(String::as_str),
            &attributes,
            performance.as_ref(),
            fees.as_ref(),
        );

        debug!("{}: fetched \"{}\"", code, fund.name);
        Ok(fund)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::models::{RawAttributes, RawFees, RawPerformance};
    use crate::normalizer::DEFAULT_MANAGEMENT_FEE;
    use async_trait::async_trait;

    /// Scriptable provider: each sub-resource either succeeds with canned
    /// data or fails with a fresh error of the configured kind.
    #[derive(Default)]
    struct MockProvider {
        fail_attributes: Option<FailureKind>,
        fail_performance: Option<FailureKind>,
        fail_fees: Option<FailureKind>,
        empty_fees: bool,
    }

    fn error_of(kind: FailureKind) -> FetchError {
        match kind {
            FailureKind::NotFound => FetchError::NotFound("mock".to_string()),
            FailureKind::RateLimited => FetchError::RateLimited("mock".to_string()),
            FailureKind::Transient => FetchError::Transient("mock".to_string()),
            FailureKind::Malformed => FetchError::Malformed("mock".to_string()),
        }
    }

    #[async_trait]
    impl FundDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn fetch_attributes(&self, _code: &str) -> Result<RawAttributes, FetchError> {
            if let Some(kind) = self.fail_attributes {
                return Err(error_of(kind));
            }
            Ok(RawAttributes {
                name: Some("测试基金".to_string()),
                fund_size: Some(2_600_000_000.0),
                inception_date: Some("2019-05-20".to_string()),
            })
        }

        async fn fetch_performance(
            &self,
            _code: &str,
        ) -> Result<Option<RawPerformance>, FetchError> {
            if let Some(kind) = self.fail_performance {
                return Err(error_of(kind));
            }
            Ok(Some(RawPerformance {
                benchmark_name: Some("基准指数".to_string()),
                year_to_date: Some(20.5),
                three_year: None,
                five_year: Some(60.0),
                benchmark_year_to_date: Some(15.3),
            }))
        }

        async fn fetch_fees(&self, _code: &str) -> Result<Option<RawFees>, FetchError> {
            if let Some(kind) = self.fail_fees {
                return Err(error_of(kind));
            }
            if self.empty_fees {
                return Ok(None);
            }
            Ok(Some(RawFees {
                management_fee: Some(0.5),
                custodian_fee: Some(0.1),
                distribution_fee: Some(0.0),
                trade_cost: Some(0.03),
                other_cost: Some(0.2),
            }))
        }
    }

    #[tokio::test]
    async fn test_fetch_fund_joins_all_three_sub_resources() {
        let fetcher = FundFetcher::new(Arc::new(MockProvider::default()));
        let fund = fetcher.fetch_fund("516160").await.unwrap();

        assert_eq!(fund.code, "516160");
        assert_eq!(fund.name, "测试基金");
        assert_eq!(fund.scale, 26.0);
        assert_eq!(fund.year_to_date, Some(0.205));
        assert!((fund.management_fee - 0.005).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_attributes_failure_fails_the_fund() {
        let provider = MockProvider {
            fail_attributes: Some(FailureKind::NotFound),
            ..MockProvider::default()
        };
        let fetcher = FundFetcher::new(Arc::new(provider));
        let error = fetcher.fetch_fund("999999").await.unwrap_err();

        assert_eq!(error.failure_kind(), FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_performance_failure_degrades_to_absent_returns() {
        let provider = MockProvider {
            fail_performance: Some(FailureKind::Transient),
            ..MockProvider::default()
        };
        let fetcher = FundFetcher::new(Arc::new(provider));
        let fund = fetcher.fetch_fund("516160").await.unwrap();

        assert_eq!(fund.year_to_date, None);
        assert_eq!(fund.excess_return, None);
        assert_eq!(fund.beats_benchmark, None);
        // Fees still came through.
        assert!((fund.management_fee - 0.005).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_fees_failure_degrades_to_default_profile() {
        let provider = MockProvider {
            fail_fees: Some(FailureKind::Malformed),
            ..MockProvider::default()
        };
        let fetcher = FundFetcher::new(Arc::new(provider));
        let fund = fetcher.fetch_fund("516160").await.unwrap();

        assert_eq!(fund.management_fee, DEFAULT_MANAGEMENT_FEE);
        // Performance still came through.
        assert_eq!(fund.year_to_date, Some(0.205));
    }

    #[tokio::test]
    async fn test_empty_fees_payload_degrades_to_default_profile() {
        let provider = MockProvider {
            empty_fees: true,
            ..MockProvider::default()
        };
        let fetcher = FundFetcher::new(Arc::new(provider));
        let fund = fetcher.fetch_fund("516160").await.unwrap();

        assert_eq!(fund.management_fee, DEFAULT_MANAGEMENT_FEE);
    }

    #[tokio::test]
    async fn test_name_override_takes_precedence() {
        let mut overrides = HashMap::new();
        overrides.insert("516160".to_string(), "新能源ETF".to_string());
        let fetcher =
            FundFetcher::with_name_overrides(Arc::new(MockProvider::default()), overrides);
        let fund = fetcher.fetch_fund("516160").await.unwrap();

        assert_eq!(fund.name, "新能源ETF");
    }
}
