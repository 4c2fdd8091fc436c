//! Height-indexed cyclic patterns.
//!
//! A pattern is a fixed, non-empty sequence of weights. The weight for a
//! block is the entry at `height mod len`.

use crate::error::{Error, Result};
use crate::{ENERGY_PATTERN, MULTIPLIER_PATTERN, VORTEX_SEQUENCE};

/// Look up the pattern entry for a block height.
///
/// Fails with [`Error::Configuration`] when `pattern_set` is empty.
///
/// # Examples
///
/// ```
/// use helix_pattern::{pattern_value, VORTEX_SEQUENCE};
///
/// assert_eq!(pattern_value(0, &VORTEX_SEQUENCE), Ok(1));
/// assert_eq!(pattern_value(4, &VORTEX_SEQUENCE), Ok(7));
/// assert_eq!(pattern_value(6, &VORTEX_SEQUENCE), Ok(1));
/// ```
pub fn pattern_value<T: Copy>(height: u64, pattern_set: &[T]) -> Result<T> {
    if pattern_set.is_empty() {
        return Err(Error::Configuration);
    }
    Ok(pattern_set[cycle_index(height, pattern_set.len())])
}

#[inline]
fn cycle_index(height: u64, len: usize) -> usize {
    // len > 0 and fits in u64, so the remainder fits back in usize
    (height % len as u64) as usize
}

/// A validated, non-empty pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VortexPattern<T> {
    weights: Vec<T>,
}

impl<T: Copy> VortexPattern<T> {
    /// Build a pattern, rejecting an empty weight list.
    pub fn new(weights: Vec<T>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::Configuration);
        }
        Ok(Self { weights })
    }

    /// Build a pattern from a fixed-size array. Arrays of length zero are rejected.
    pub fn from_array<const N: usize>(weights: [T; N]) -> Result<Self> {
        Self::new(weights.to_vec())
    }

    /// Number of entries in one cycle.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false: construction guarantees at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position within the cycle for a height.
    #[inline]
    pub fn cycle_index(&self, height: u64) -> usize {
        cycle_index(height, self.weights.len())
    }

    /// Pattern entry for a height. Infallible once constructed.
    #[inline]
    pub fn value_at(&self, height: u64) -> T {
        self.weights[self.cycle_index(height)]
    }

    /// The raw weights.
    pub fn weights(&self) -> &[T] {
        &self.weights
    }
}

impl VortexPattern<u8> {
    /// The base 1-2-4-8-7-5 sequence.
    pub fn vortex() -> Self {
        Self { weights: VORTEX_SEQUENCE.to_vec() }
    }
}

impl VortexPattern<f64> {
    /// Energy weights for the vortex energy rate.
    pub fn energy() -> Self {
        Self { weights: ENERGY_PATTERN.to_vec() }
    }

    /// Final smart rate multipliers.
    pub fn multiplier() -> Self {
        Self { weights: MULTIPLIER_PATTERN.to_vec() }
    }
}
