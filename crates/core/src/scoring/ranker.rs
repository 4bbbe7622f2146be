//! Final ordering of scored funds.

use super::engine::ScoredFund;

/// Sort scored funds into their final order and assign 1-based ranks.
///
/// Sort key: composite score descending; ties break on fund code ascending,
/// so the order is total and deterministic regardless of input iteration
/// order.
pub fn rank(mut scored: Vec<ScoredFund>) -> Vec<ScoredFund> {
    scored.sort_by(|a, b| {
        b.composite_score
            .total_cmp(&a.composite_score)
            .then_with(|| a.fund.code.cmp(&b.fund.code))
    });

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = (index + 1) as u32;
    }

    scored
}
