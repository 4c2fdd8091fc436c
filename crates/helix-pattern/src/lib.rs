//! Helix Vortex Patterns
//!
//! Pure constant and lookup provider shared by the hashing, scoring and
//! topology crates.
//!
//! # Vortex Sequence
//!
//! The base sequence is the doubling cycle 1-2-4-8-7-5: doubling a number and
//! reducing it to its digital root walks these six values forever. Every
//! pattern in the system has this length and is indexed by
//! `height mod len`, so the cycle index always lies in `[0, len - 1]`.
//!
//! # Thread Safety
//!
//! Nothing here holds mutable state. All functions can be called from any
//! number of threads without synchronization.

mod error;
mod pattern;
mod vortex;

pub use error::{Error, Result};
pub use pattern::{pattern_value, VortexPattern};
pub use vortex::{digital_root, energy_field_from_seed, vortex_step, vortex_value};

/// The golden ratio φ as fixed by the network parameters.
///
/// Deliberately truncated; every participant must use this exact value.
pub const GOLDEN_RATIO: f64 = 1.618033988749;

/// The golden angle in degrees, used to spread nodes across the torus tube.
pub const GOLDEN_ANGLE_DEGREES: f64 = 137.508;

/// Base vortex doubling sequence.
pub const VORTEX_SEQUENCE: [u8; 6] = [1, 2, 4, 8, 7, 5];

/// Energy weights used for the vortex energy rate.
pub const ENERGY_PATTERN: [f64; 6] = [1.0, 2.0, 4.0, 8.0, 7.0, 5.0];

/// Per-height multiplier applied to the final smart rate.
pub const MULTIPLIER_PATTERN: [f64; 6] = [1.0, 1.2, 1.4, 1.8, 1.7, 1.5];

/// Length of every standard pattern.
pub const PATTERN_LENGTH: usize = VORTEX_SEQUENCE.len();

const _: () = assert!(ENERGY_PATTERN.len() == PATTERN_LENGTH);
const _: () = assert!(MULTIPLIER_PATTERN.len() == PATTERN_LENGTH);

/// The golden ratio constant.
#[inline]
pub const fn golden_ratio_constant() -> f64 {
    GOLDEN_RATIO
}
