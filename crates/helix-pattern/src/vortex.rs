//! Digital-root vortex arithmetic.

use crate::VORTEX_SEQUENCE;

/// Repeated decimal digit sum until a single digit remains.
///
/// `digital_root(0) == 0`; every other input maps into `1..=9`.
pub const fn digital_root(n: u64) -> u8 {
    if n == 0 {
        0
    } else {
        (1 + (n - 1) % 9) as u8
    }
}

/// Vortex value for a byte position: `VORTEX_SEQUENCE[position mod 6]`.
///
/// Depends only on the position, never on data.
#[inline]
pub const fn vortex_value(position: usize) -> u8 {
    VORTEX_SEQUENCE[position % VORTEX_SEQUENCE.len()]
}

/// Vortex value reached from an arbitrary number via its digital root.
#[inline]
pub const fn vortex_step(n: u64) -> u8 {
    VORTEX_SEQUENCE[digital_root(n) as usize % VORTEX_SEQUENCE.len()]
}

/// Six-step energy field seeded from a number.
///
/// Each step contributes `vortex_step(current) / 9` and advances
/// `current = current * 31 + 17` with wrapping arithmetic.
pub fn energy_field_from_seed(seed: u64) -> f64 {
    let mut energy = 0.0;
    let mut current = seed;
    for _ in 0..VORTEX_SEQUENCE.len() {
        energy += vortex_step(current) as f64 / 9.0;
        current = current.wrapping_mul(31).wrapping_add(17);
    }
    energy
}
