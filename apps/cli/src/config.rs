//! Environment-driven runtime configuration.

use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration for the acquisition pipeline.
#[derive(Clone, Debug)]
pub struct Config {
    /// Cap on concurrently in-flight provider requests.
    pub max_concurrent: usize,
    /// Minimum delay between provider requests.
    pub request_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            max_concurrent: read("FUNDINSIGHT_MAX_CONCURRENT", 10),
            request_delay: Duration::from_millis(read("FUNDINSIGHT_REQUEST_DELAY_MS", 500)),
            timeout: Duration::from_secs(read("FUNDINSIGHT_TIMEOUT_SECS", 30)),
        }
    }
}

fn read<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
