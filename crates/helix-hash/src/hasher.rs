//! Block hashing: BLAKE3 digest followed by per-level fractal transforms.

use helix_pattern::{digital_root, VORTEX_SEQUENCE};

use crate::seed::SierpinskiSeed;
use crate::transform::transform_digest;
use crate::Digest;

/// A committed hash together with its vortex signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VortexHash {
    /// The block-committed hash
    pub hash: Digest,
    /// Six-step digital signature of the raw data (each entry < 9)
    pub vortex_signature: [u8; 6],
    /// Digital-root energy of the raw data
    pub energy_signature: u64,
    /// Number of transform levels applied
    pub depth: u32,
}

/// Hashes arbitrary data into a [`VortexHash`].
#[derive(Debug, Clone, Copy)]
pub struct FractalHasher<'s> {
    fractal_level: u32,
    seed: &'s SierpinskiSeed,
}

impl FractalHasher<'static> {
    /// Hasher using the process-wide seed.
    pub fn new(fractal_level: u32) -> Self {
        Self::with_seed(fractal_level, SierpinskiSeed::global())
    }
}

impl<'s> FractalHasher<'s> {
    /// Hasher using an explicit seed.
    pub fn with_seed(fractal_level: u32, seed: &'s SierpinskiSeed) -> Self {
        Self { fractal_level, seed }
    }

    /// Number of transform levels applied after the digest.
    pub fn fractal_level(&self) -> u32 {
        self.fractal_level
    }

    /// The seed in use.
    pub fn seed(&self) -> &'s SierpinskiSeed {
        self.seed
    }

    /// Committed hash of a pre-computed digest: levels `0..fractal_level` in order.
    pub fn commit(&self, digest: &Digest) -> Digest {
        (0..self.fractal_level).fold(*digest, |current, level| {
            transform_digest(&current, level, self.seed)
        })
    }

    /// Hash raw data.
    pub fn hash(&self, data: &[u8]) -> VortexHash {
        let digest = *blake3::hash(data).as_bytes();
        VortexHash {
            hash: self.commit(&digest),
            vortex_signature: vortex_signature(data),
            energy_signature: energy_signature(data),
            depth: self.fractal_level,
        }
    }

    /// Check data against a previously produced hash.
    pub fn verify(&self, data: &[u8], expected: &VortexHash) -> bool {
        self.hash(data) == *expected
    }
}

fn vortex_signature(data: &[u8]) -> [u8; 6] {
    let folded = data
        .iter()
        .fold(0u8, |acc, &byte| acc.wrapping_add(byte).wrapping_mul(7));

    let mut signature = [0u8; 6];
    for (i, (slot, base)) in signature.iter_mut().zip(VORTEX_SEQUENCE).enumerate() {
        *slot = base.wrapping_add(folded).wrapping_mul(i as u8 + 1) % 9;
    }
    signature
}

fn energy_signature(data: &[u8]) -> u64 {
    let root = data
        .iter()
        .fold(0u64, |acc, &byte| digital_root(acc + byte as u64) as u64);

    let multiplier = if VORTEX_SEQUENCE.contains(&(root as u8)) {
        root
    } else {
        3
    };
    root * multiplier
}
