//! The end-to-end ranking pipeline.
//!
//! One entry point: an ordered sequence of candidate fund codes in, a
//! deterministically ranked sequence of scored funds plus a per-code failure
//! list out. Acquisition runs first and materializes the full cohort; only
//! then does scoring see it, so every percentile is computed against a
//! consistent, deduplicated snapshot.

use chrono::Utc;
use log::{info, warn};
use serde::Serialize;

use fundinsight_fund_data::{BatchOutcome, FetchFailure, FetchOrchestrator};

use crate::errors::Result;
use crate::scoring::{rank, score_cohort, ScoredFund};

/// Counts describing one ranking run.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    /// Codes requested, duplicates included.
    pub requested: usize,
    /// Funds successfully fetched and scored.
    pub fetched: usize,
    /// Codes that failed to fetch.
    pub failed: usize,
}

/// Output of one ranking run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCohort {
    /// Scored funds in final rank order.
    pub ranked: Vec<ScoredFund>,
    /// Per-code fetch failures, classified.
    #[serde(skip)]
    pub failures: Vec<FetchFailure>,
    /// Run counts for reporting collaborators.
    pub summary: CohortSummary,
}

/// Fetches, scores, and ranks a cohort of funds.
pub struct RankingService {
    orchestrator: FetchOrchestrator,
}

impl RankingService {
    /// Create a service over the given orchestrator.
    pub fn new(orchestrator: FetchOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run the full pipeline for the given candidate codes.
    ///
    /// A run where nothing fetches returns an empty ranked sequence plus the
    /// full failure list; deciding whether that is reportable is the
    /// caller's business.
    pub async fn rank_funds(&self, codes: &[String]) -> Result<RankedCohort> {
        info!("Ranking run over {} candidate codes", codes.len());

        let BatchOutcome { funds, failures } = self.orchestrator.fetch_all(codes).await;

        let summary = CohortSummary {
            requested: codes.len(),
            fetched: funds.len(),
            failed: failures.len(),
        };

        if funds.is_empty() {
            warn!("No funds fetched ({} failures), nothing to rank", failures.len());
            return Ok(RankedCohort {
                ranked: Vec::new(),
                failures,
                summary,
            });
        }

        // One snapshot of "now" for every age computation in this run.
        let as_of = Utc::now();
        let scored = score_cohort(&funds, as_of)?;
        let ranked = rank(scored);

        info!(
            "Ranking complete: {} funds ranked, {} failures",
            ranked.len(),
            failures.len()
        );

        Ok(RankedCohort {
            ranked,
            failures,
            summary,
        })
    }
}
