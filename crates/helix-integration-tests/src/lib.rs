//! Cross-crate scenarios for the Helix consensus core. See `tests/`.
