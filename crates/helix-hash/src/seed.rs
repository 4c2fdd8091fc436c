//! The Sierpinski seed table.

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::{Digest, HASH_LEN};

static GLOBAL_SEED: OnceLock<SierpinskiSeed> = OnceLock::new();

/// 32-byte seed read by the bit-mixing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SierpinskiSeed(pub Digest);

impl SierpinskiSeed {
    /// The network seed: `((i * 7) mod 255) XOR ((i * 5) mod 255)`.
    pub const fn standard() -> Self {
        let mut seed = [0u8; HASH_LEN];
        let mut i = 0;
        while i < HASH_LEN {
            seed[i] = (((i * 7) % 255) ^ ((i * 5) % 255)) as u8;
            i += 1;
        }
        Self(seed)
    }

    /// An all-zero seed. Bit mixing becomes the identity.
    pub const fn zero() -> Self {
        Self([0; HASH_LEN])
    }

    /// Seed byte at a position.
    #[inline]
    pub const fn byte(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// The process-wide seed.
    ///
    /// Falls back to [`SierpinskiSeed::standard`] if nothing was installed
    /// before the first call.
    pub fn global() -> &'static SierpinskiSeed {
        GLOBAL_SEED.get_or_init(|| {
            tracing::debug!("installing standard sierpinski seed");
            Self::standard()
        })
    }

    /// Install a custom process-wide seed. Only the first call succeeds, and
    /// only if [`SierpinskiSeed::global`] has not been read yet.
    pub fn install_global(seed: SierpinskiSeed) -> Result<()> {
        GLOBAL_SEED
            .set(seed)
            .map_err(|_| Error::SeedAlreadyInstalled)?;
        tracing::debug!(seed = %hex::encode(seed.0), "installed custom sierpinski seed");
        Ok(())
    }
}

impl Default for SierpinskiSeed {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_seed_prefix() {
        let seed = SierpinskiSeed::standard();
        // 0^0, 7^5, 14^10, 21^15
        assert_eq!(&seed.0[..4], &[0, 2, 4, 26]);
        // i = 31: 217 ^ 155
        assert_eq!(seed.byte(31), 217 ^ 155);
    }

    #[test]
    fn global_seed_is_stable() {
        let a = SierpinskiSeed::global();
        let b = SierpinskiSeed::global();
        assert!(std::ptr::eq(a, b));
        assert!(SierpinskiSeed::install_global(SierpinskiSeed::zero()).is_err());
    }
}
