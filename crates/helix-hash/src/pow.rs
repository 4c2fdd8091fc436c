//! Bounded proof-of-work over fractal hashes.

use tracing::{debug, trace};

use crate::hasher::{FractalHasher, VortexHash};
use crate::Digest;

/// A nonce that satisfies the difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowSolution {
    pub nonce: u64,
    pub hash: VortexHash,
}

/// Leading-zero-byte proof-of-work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractalPow {
    /// Required number of leading zero bytes
    pub difficulty: u32,
    /// Search stops after this many nonces
    pub max_nonce: u64,
}

impl FractalPow {
    pub const fn new(difficulty: u32, max_nonce: u64) -> Self {
        Self { difficulty, max_nonce }
    }

    /// Whether a hash has at least `difficulty` leading zero bytes.
    pub fn meets_difficulty(&self, hash: &Digest) -> bool {
        leading_zero_bytes(hash) >= self.difficulty as usize
    }

    /// Search nonces `0..max_nonce`. The nonce is appended little-endian.
    ///
    /// Returns `None` when the range is exhausted; retrying with a larger
    /// bound is up to the caller.
    pub fn mine(&self, hasher: &FractalHasher<'_>, data: &[u8]) -> Option<PowSolution> {
        let mut input = Vec::with_capacity(data.len() + 8);
        input.extend_from_slice(data);

        for nonce in 0..self.max_nonce {
            input.truncate(data.len());
            input.extend_from_slice(&nonce.to_le_bytes());

            let hash = hasher.hash(&input);
            if self.meets_difficulty(&hash.hash) {
                debug!(nonce, difficulty = self.difficulty, "proof of work found");
                return Some(PowSolution { nonce, hash });
            }
        }

        trace!(max_nonce = self.max_nonce, difficulty = self.difficulty, "nonce range exhausted");
        None
    }

    /// Recompute and check a solution.
    pub fn verify(&self, hasher: &FractalHasher<'_>, data: &[u8], solution: &PowSolution) -> bool {
        let mut input = data.to_vec();
        input.extend_from_slice(&solution.nonce.to_le_bytes());
        let recomputed = hasher.hash(&input);
        recomputed == solution.hash && self.meets_difficulty(&recomputed.hash)
    }
}

fn leading_zero_bytes(hash: &Digest) -> usize {
    hash.iter().take_while(|&&b| b == 0).count()
}
