//! Morningstar fund data provider implementation.
//!
//! Fetches per-fund sub-resources from the Morningstar CN fund API:
//! - `common-data`: name, size, inception date
//! - `performance`: day-end period returns and benchmark comparison
//! - `fees`: the fee schedule
//!
//! Every response is wrapped in an envelope carrying a provider status code
//! under `_meta.response_status`; only `"200011"` marks a usable payload.

mod models;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::FetchError;
use crate::models::{RawAttributes, RawFees, RawPerformance};
use crate::provider::FundDataProvider;
use crate::transport::RateLimitedTransport;

use models::{CommonData, FeesData, PerformanceData};

const BASE_URL: &str = "https://www.morningstar.cn/cn-api/v2/funds";
const PROVIDER_ID: &str = "MORNINGSTAR";

/// Envelope status marking a successful payload.
const STATUS_OK: &str = "200011";

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "_meta")]
    meta: Option<Meta>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    response_status: Option<String>,
}

/// Morningstar fund data provider.
///
/// All requests go through the shared [`RateLimitedTransport`], so one
/// provider instance respects the run's concurrency cap and request delay.
pub struct MorningstarProvider {
    transport: Arc<RateLimitedTransport>,
    base_url: String,
}

impl MorningstarProvider {
    /// Create a provider over the given transport.
    pub fn new(transport: Arc<RateLimitedTransport>) -> Self {
        Self::with_base_url(transport, BASE_URL)
    }

    /// Create a provider against a non-default base URL (mirrors, tests).
    pub fn with_base_url(
        transport: Arc<RateLimitedTransport>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Fetch one endpoint and unwrap the response envelope.
    ///
    /// Returns `Ok(None)` when the envelope is valid but carries no data.
    async fn fetch_payload(
        &self,
        code: &str,
        endpoint: &str,
    ) -> Result<Option<Value>, FetchError> {
        let url = format!("{}/{}/{}", self.base_url, code, endpoint);
        let body = self.transport.get_json(&url).await?;
        debug!("{}: fetched {} for {}", PROVIDER_ID, endpoint, code);
        unwrap_envelope(body)
    }
}

/// Unwrap the provider envelope, checking its status code.
fn unwrap_envelope(body: Value) -> Result<Option<Value>, FetchError> {
    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| FetchError::Malformed(format!("unexpected envelope: {}", e)))?;

    let status = envelope
        .meta
        .and_then(|m| m.response_status)
        .unwrap_or_default();
    if status != STATUS_OK {
        return Err(FetchError::Malformed(format!(
            "provider response status {:?}",
            status
        )));
    }

    match envelope.data {
        None | Some(Value::Null) => Ok(None),
        Some(data) => Ok(Some(data)),
    }
}

#[async_trait]
impl FundDataProvider for MorningstarProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_attributes(&self, code: &str) -> Result<RawAttributes, FetchError> {
        let data = self
            .fetch_payload(code, "common-data")
            .await?
            .ok_or_else(|| {
                FetchError::Malformed(format!("empty attributes payload for {}", code))
            })?;

        let common: CommonData = serde_json::from_value(data).map_err(|e| {
            FetchError::Malformed(format!("attributes payload for {}: {}", code, e))
        })?;

        Ok(common.into_raw())
    }

    async fn fetch_performance(
        &self,
        code: &str,
    ) -> Result<Option<RawPerformance>, FetchError> {
        let Some(data) = self.fetch_payload(code, "performance").await? else {
            return Ok(None);
        };

        let performance: PerformanceData = serde_json::from_value(data).map_err(|e| {
            FetchError::Malformed(format!("performance payload for {}: {}", code, e))
        })?;

        Ok(Some(performance.into_raw()))
    }

    async fn fetch_fees(&self, code: &str) -> Result<Option<RawFees>, FetchError> {
        let Some(data) = self.fetch_payload(code, "fees").await? else {
            return Ok(None);
        };

        let fees: FeesData = serde_json::from_value(data)
            .map_err(|e| FetchError::Malformed(format!("fees payload for {}: {}", code, e)))?;

        Ok(fees.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_ok() {
        let body = json!({
            "_meta": {"response_status": "200011"},
            "data": {"name": "测试基金"}
        });

        let data = unwrap_envelope(body).unwrap().unwrap();
        assert_eq!(data["name"], "测试基金");
    }

    #[test]
    fn test_unwrap_envelope_null_data() {
        let body = json!({
            "_meta": {"response_status": "200011"},
            "data": null
        });

        assert!(unwrap_envelope(body).unwrap().is_none());
    }

    #[test]
    fn test_unwrap_envelope_bad_status() {
        let body = json!({
            "_meta": {"response_status": "500000"},
            "data": {}
        });

        let error = unwrap_envelope(body).unwrap_err();
        assert_eq!(error.failure_kind(), FailureKind::Malformed);
    }

    #[test]
    fn test_unwrap_envelope_missing_meta() {
        let body = json!({"data": {}});

        let error = unwrap_envelope(body).unwrap_err();
        assert_eq!(error.failure_kind(), FailureKind::Malformed);
    }
}
