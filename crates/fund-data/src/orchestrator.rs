//! Batch fetch orchestration.
//!
//! Drives [`FundFetcher`](crate::fetcher::FundFetcher) over an ordered list
//! of fund codes: deduplicates the list (first occurrence wins), partitions
//! it into chunks sized at the concurrency cap, dispatches each chunk as a
//! set of concurrent fetches, and collects successes and failures. A chunk
//! must fully settle before the next one starts, so peak concurrency stays
//! at exactly the cap instead of drifting with slow outliers.
//!
//! Per-code failures never abort the batch; a run with partial failures
//! still returns every fund that succeeded.

use std::collections::HashSet;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::errors::FetchFailure;
use crate::fetcher::FundFetcher;
use crate::models::Fund;

/// Result of one batch fetch: the deduplicated fund collection plus one
/// failure record per code that could not be fetched.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully fetched funds, at most one per requested code.
    pub funds: Vec<Fund>,
    /// Per-code failures with their classified cause.
    pub failures: Vec<FetchFailure>,
}

/// Batch orchestrator with bounded-concurrency chunking.
pub struct FetchOrchestrator {
    fetcher: FundFetcher,
    chunk_size: usize,
}

impl FetchOrchestrator {
    /// Create an orchestrator dispatching at most `chunk_size` concurrent
    /// fund fetches at a time.
    pub fn new(fetcher: FundFetcher, chunk_size: usize) -> Self {
        Self {
            fetcher,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Fetch every code in the list, tolerating per-code failures.
    ///
    /// An empty input yields an empty outcome, not an error. Dropping the
    /// returned future abandons the current chunk's in-flight sub-fetches
    /// best-effort and dispatches no further chunks.
    pub async fn fetch_all(&self, codes: &[String]) -> BatchOutcome {
        let deduped = dedup_preserving_order(codes);
        if deduped.len() < codes.len() {
            debug!("Dropped {} duplicate codes", codes.len() - deduped.len());
        }

        let mut funds = Vec::with_capacity(deduped.len());
        let mut failures = Vec::new();

        let total_chunks = deduped.len().div_ceil(self.chunk_size);
        for (index, chunk) in deduped.chunks(self.chunk_size).enumerate() {
            debug!(
                "Dispatching chunk {}/{} ({} funds)",
                index + 1,
                total_chunks,
                chunk.len()
            );

            let results = join_all(chunk.iter().map(|code| self.fetcher.fetch_fund(code))).await;

            for (code, result) in chunk.iter().zip(results) {
                match result {
                    Ok(fund) => funds.push(fund),
                    Err(error) => {
                        warn!("{}: fetch failed ({})", code, error);
                        failures.push(FetchFailure::new(code.clone(), &error));
                    }
                }
            }
        }

        info!(
            "Batch fetch complete: {} succeeded, {} failed",
            funds.len(),
            failures.len()
        );

        BatchOutcome { funds, failures }
    }
}

/// Remove duplicate codes, keeping the first occurrence of each in order.
fn dedup_preserving_order(codes: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .iter()
        .filter(|code| seen.insert(code.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FailureKind, FetchError};
    use crate::models::{RawAttributes, RawFees, RawPerformance};
    use crate::provider::FundDataProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Provider whose behavior is keyed by the code: codes starting with
    /// "404" are unknown, codes starting with "503" hit transient errors.
    /// Tracks attribute-request concurrency for the chunking test.
    #[derive(Default)]
    struct CodedProvider {
        attribute_calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    #[async_trait]
    impl FundDataProvider for CodedProvider {
        fn id(&self) -> &'static str {
            "CODED"
        }

        async fn fetch_attributes(&self, code: &str) -> Result<RawAttributes, FetchError> {
            self.attribute_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if code.starts_with("404") {
                return Err(FetchError::NotFound(code.to_string()));
            }
            if code.starts_with("503") {
                return Err(FetchError::Transient(code.to_string()));
            }
            Ok(RawAttributes {
                name: Some(format!("基金{}", code)),
                fund_size: Some(1_000_000_000.0),
                inception_date: Some("2018-01-01".to_string()),
            })
        }

        async fn fetch_performance(
            &self,
            _code: &str,
        ) -> Result<Option<RawPerformance>, FetchError> {
            Ok(None)
        }

        async fn fetch_fees(&self, _code: &str) -> Result<Option<RawFees>, FetchError> {
            Ok(None)
        }
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn orchestrator(provider: Arc<CodedProvider>, chunk_size: usize) -> FetchOrchestrator {
        FetchOrchestrator::new(FundFetcher::new(provider), chunk_size)
    }

    #[tokio::test]
    async fn test_dedup_first_occurrence_wins() {
        let provider = Arc::new(CodedProvider::default());
        let outcome = orchestrator(provider.clone(), 4)
            .fetch_all(&codes(&["100001", "100002", "100001"]))
            .await;

        assert_eq!(outcome.funds.len(), 2);
        assert_eq!(outcome.funds[0].code, "100001");
        assert_eq!(outcome.funds[1].code, "100002");
        // The duplicate was never dispatched.
        assert_eq!(provider.attribute_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successes() {
        let provider = Arc::new(CodedProvider::default());
        let outcome = orchestrator(provider, 4)
            .fetch_all(&codes(&["100001", "404001", "100002"]))
            .await;

        assert_eq!(outcome.funds.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].code, "404001");
        assert_eq!(outcome.failures[0].kind, FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_all_failures_returns_empty_collection() {
        let provider = Arc::new(CodedProvider::default());
        let outcome = orchestrator(provider, 2)
            .fetch_all(&codes(&["404001", "503001"]))
            .await;

        assert!(outcome.funds.is_empty());
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].kind, FailureKind::NotFound);
        assert_eq!(outcome.failures[1].kind, FailureKind::Transient);
    }

    #[tokio::test]
    async fn test_empty_input_is_not_an_error() {
        let provider = Arc::new(CodedProvider::default());
        let outcome = orchestrator(provider, 4).fetch_all(&[]).await;

        assert!(outcome.funds.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_chunking_bounds_concurrency() {
        let provider = Arc::new(CodedProvider::default());
        let outcome = orchestrator(provider.clone(), 2)
            .fetch_all(&codes(&["100001", "100002", "100003", "100004", "100005"]))
            .await;

        assert_eq!(outcome.funds.len(), 5);
        // Each fund issues one attributes call; chunks of 2 mean at most
        // 2 attribute requests in flight at any moment.
        assert!(provider.peak_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_dedup_preserving_order() {
        let deduped = dedup_preserving_order(&codes(&["A", "B", "A", "C", "B"]));
        assert_eq!(deduped, codes(&["A", "B", "C"]));
    }
}
