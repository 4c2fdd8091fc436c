//! Helix Fractal Hashing
//!
//! Derives block-committed hashes from a raw 32-byte digest.
//!
//! # Transform
//!
//! The transform runs two passes over the 32 byte positions:
//!
//! 1. **Sierpinski bit mixing**: position `i` reads bit `i mod 8` of seed byte
//!    `(i + level) mod 32` and XORs it back into the same bit of the input.
//! 2. **Vortex mixing**: position `i` adds the vortex value
//!    `[1, 2, 4, 8, 7, 5][i mod 6]` with wrapping arithmetic.
//!
//! The output is a pure function of `(input, level, seed)`. Every participant
//! computes the same committed hash from the same digest, which is what lets
//! blocks be verified independently.
//!
//! # Seed
//!
//! The seed is a process-wide constant installed once at startup (see
//! [`SierpinskiSeed::global`]) and never mutated, so any number of transforms
//! can run concurrently without locking.
//!
//! # Block Hashing
//!
//! [`FractalHasher`] digests arbitrary data with BLAKE3 and applies the
//! transform once per fractal level. [`FractalMerkleTree`] and [`FractalPow`]
//! build on it.

mod config;
mod error;
mod hasher;
mod merkle;
mod pow;
mod seed;
mod transform;

pub use config::HashConfig;
pub use error::{Error, Result};
pub use hasher::{FractalHasher, VortexHash};
pub use merkle::{FractalMerkleTree, ProofStep};
pub use pow::{FractalPow, PowSolution};
pub use seed::SierpinskiSeed;
pub use transform::{parse_digest_hex, transform, transform_digest};

/// Size of every digest and committed hash in bytes.
pub const HASH_LEN: usize = 32;

/// A 32-byte digest or committed hash.
pub type Digest = [u8; HASH_LEN];
