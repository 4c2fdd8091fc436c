//! Deterministic ordering of competing block candidates.

use crate::error::Result;
use crate::metrics::BlockMetrics;
use crate::smart_rate::{SmartRateCalculator, SmartRateResult};

/// A candidate with its score and original position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedCandidate {
    /// Index into the input slice
    pub index: usize,
    pub result: SmartRateResult,
}

/// Score every candidate and order them best-first.
///
/// Higher smart rate wins; equal rates keep input order. Any invalid
/// candidate fails the whole ranking, since a partial order would differ
/// between nodes.
pub fn rank_candidates(
    calculator: &SmartRateCalculator,
    candidates: &[BlockMetrics],
) -> Result<Vec<RankedCandidate>> {
    let mut ranked = candidates
        .iter()
        .enumerate()
        .map(|(index, metrics)| {
            calculator
                .compute(metrics)
                .map(|result| RankedCandidate { index, result })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| {
        b.result
            .smart_rate
            .total_cmp(&a.result.smart_rate)
            .then(a.index.cmp(&b.index))
    });
    Ok(ranked)
}
