//! FundInsight Fund Data Crate
//!
//! This crate provides the concurrent acquisition pipeline for fund data:
//! fetching per-fund attributes from a remote provider and materializing a
//! deduplicated, normalized fund collection for one run.
//!
//! # Overview
//!
//! - Rate-limited transport: bounded concurrency plus a minimum
//!   inter-request delay shared by every request in a run
//! - Per-fund fan-out: the three sub-resources (attributes, performance,
//!   fees) are fetched concurrently and joined
//! - Partial-failure tolerance: optional sub-resources degrade to defaults;
//!   per-fund failures are collected, never aborting the batch
//! - Pure normalization: raw provider payloads map into the canonical
//!   [`Fund`] shape with unit conversions and derived fields
//!
//! # Architecture
//!
//! ```text
//! +--------------------+
//! |  FetchOrchestrator |  (dedup, chunking, fan-in)
//! +--------------------+
//!           |
//!           v
//! +--------------------+
//! |    FundFetcher     |  (3-way sub-resource join per fund)
//! +--------------------+
//!           |
//!           v
//! +--------------------+     +------------------------+
//! |  FundDataProvider  | --> |  RateLimitedTransport  |
//! +--------------------+     +------------------------+
//!           |
//!           v
//! +--------------------+
//! |     normalize      |  (payloads -> Fund)
//! +--------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Fund`] - Canonical fund attributes for one acquisition run
//! - [`FetchError`] / [`FailureKind`] - Classified fetch failures
//! - [`BatchOutcome`] - Funds plus per-code failures from one batch run

pub mod errors;
pub mod fetcher;
pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod provider;
pub mod transport;

pub use errors::{FailureKind, FetchError, FetchFailure};
pub use fetcher::FundFetcher;
pub use models::{Fund, FundCategory, RawAttributes, RawFees, RawPerformance};
pub use normalizer::normalize;
pub use orchestrator::{BatchOutcome, FetchOrchestrator};
pub use provider::morningstar::MorningstarProvider;
pub use provider::FundDataProvider;
pub use transport::{RateLimitedTransport, TransportConfig};
