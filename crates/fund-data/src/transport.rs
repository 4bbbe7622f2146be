//! Rate-limited HTTP transport for provider requests.
//!
//! All outbound requests in one acquisition run flow through a single
//! [`RateLimitedTransport`]:
//! - a shared semaphore caps the number of concurrently in-flight requests;
//! - after every completed request - success or failure - a fixed minimum
//!   delay elapses before the permit is released, smoothing request rate
//!   regardless of outcome;
//! - transport-level failures are classified into [`FetchError`] variants.
//!
//! The transport is an explicit object handed to every call site, never
//! ambient state, so separate runs (and tests) get isolated instances.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::errors::FetchError;

/// Default cap on concurrently in-flight requests.
const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Default minimum delay after each request before its permit is released.
const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(500);

/// Extra pause applied once when the provider signals backpressure, so the
/// next caller's attempt is naturally delayed.
const DEFAULT_BACKPRESSURE_DELAY: Duration = Duration::from_secs(5);

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser-like user agent; the provider rejects bare client strings.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Transport configuration for one acquisition run.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Maximum number of concurrently in-flight requests.
    pub max_concurrent: usize,
    /// Minimum delay after each request before the permit is released.
    pub min_delay: Duration,
    /// One-shot pause applied when the provider rate limits a request.
    pub backpressure_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            min_delay: DEFAULT_MIN_DELAY,
            backpressure_delay: DEFAULT_BACKPRESSURE_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP transport with a concurrency cap and minimum inter-request delay.
pub struct RateLimitedTransport {
    client: Client,
    permits: Semaphore,
    min_delay: Duration,
    backpressure_delay: Duration,
}

impl RateLimitedTransport {
    /// Create a transport with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            permits: Semaphore::new(config.max_concurrent.max(1)),
            min_delay: config.min_delay,
            backpressure_delay: config.backpressure_delay,
        }
    }

    /// Fetch a URL and parse the body as JSON.
    ///
    /// Holds one concurrency permit for the full duration of the request
    /// plus the minimum delay, so the observed request rate stays smooth
    /// even when requests fail fast.
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.throttled(self.request(url)).await
    }

    /// Run `op` under a concurrency permit, keeping the permit through the
    /// post-request smoothing delay.
    async fn throttled<T>(
        &self,
        op: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| FetchError::Transient("transport closed".to_string()))?;

        let result = op.await;
        tokio::time::sleep(self.min_delay).await;
        result
    }

    async fn request(&self, url: &str) -> Result<Value, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Transient(format!("timeout: {}", url))
            } else {
                FetchError::Transient(format!("request failed: {}", e))
            }
        })?;

        if let Some(error) = classify_status(response.status(), url) {
            if matches!(error, FetchError::RateLimited(_)) {
                warn!(
                    "Provider backpressure on {}, pausing {:?}",
                    url, self.backpressure_delay
                );
                tokio::time::sleep(self.backpressure_delay).await;
            }
            return Err(error);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Malformed(format!("invalid JSON from {}: {}", url, e)))
    }
}

/// Map a non-success HTTP status to its failure classification.
///
/// Returns `None` for success statuses.
fn classify_status(status: StatusCode, url: &str) -> Option<FetchError> {
    if status == StatusCode::NOT_FOUND {
        return Some(FetchError::NotFound(url.to_string()));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(FetchError::RateLimited(url.to_string()));
    }
    if !status.is_success() {
        return Some(FetchError::Transient(format!("HTTP {} from {}", status, url)));
    }
    None
}
