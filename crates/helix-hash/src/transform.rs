//! Two-pass Sierpinski/vortex transform.

use helix_pattern::vortex_value;

use crate::error::{Error, Result};
use crate::seed::SierpinskiSeed;
use crate::{Digest, HASH_LEN};

/// Transform a raw digest into a block-committed hash.
///
/// Fails with [`Error::InvalidInput`] unless `input` is exactly 32 bytes.
pub fn transform(input: &[u8], level: u32, seed: &SierpinskiSeed) -> Result<Digest> {
    let digest: &Digest = input.try_into().map_err(|_| Error::InvalidInput {
        expected: HASH_LEN,
        actual: input.len(),
    })?;
    Ok(transform_digest(digest, level, seed))
}

/// Transform a digest whose length is already fixed by the type.
pub fn transform_digest(input: &Digest, level: u32, seed: &SierpinskiSeed) -> Digest {
    let mut output = [0u8; HASH_LEN];

    // Pass 1: Sierpinski bit mixing
    for (i, out) in output.iter_mut().enumerate() {
        let shift = (i % 8) as u32;
        let pattern_index = ((i as u64 + level as u64) % HASH_LEN as u64) as usize;
        let triangle_bit = (seed.byte(pattern_index) >> shift) & 1;
        *out = input[i] ^ (triangle_bit << shift);
    }

    // Pass 2: vortex mixing, independent of input and seed
    for (i, out) in output.iter_mut().enumerate() {
        *out = out.wrapping_add(vortex_value(i));
    }

    output
}

/// Decode a hex-encoded 32-byte digest.
pub fn parse_digest_hex(s: &str) -> Result<Digest> {
    let bytes = hex::decode(s.trim())?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| Error::InvalidInput {
        expected: HASH_LEN,
        actual,
    })
}
